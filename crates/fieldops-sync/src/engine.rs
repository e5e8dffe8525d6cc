//! # Payment Synchronization Engine
//!
//! The orchestrator that keeps a Job, its source financial document,
//! payment notifications and the activity log mutually consistent when a
//! payment event occurs.
//!
//! ## Payment Event Fan-Out
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Payment Synchronization Flow                         │
//! │                                                                         │
//! │  sync_payment(job, source?, method, full?)                              │
//! │       │                                                                 │
//! │       ├── job missing ───────────────────────► JobNotFound              │
//! │       │                                                                 │
//! │       ├── no source:                                                    │
//! │       │     └── job.payment_status ← Paid/Partial, NOTHING else         │
//! │       │         (document stores untouched, no notification)            │
//! │       │                                                                 │
//! │       └── with source:                                                  │
//! │             1. resolve document in its store ──► DocumentNotFound?      │
//! │             2. full payment:                                            │
//! │                  invoice/agreement ──► status = Paid                    │
//! │                  estimate ──► EstimateConverter (idempotent)            │
//! │                               receipt carries the new invoice ID        │
//! │                partial payment: document left untouched                 │
//! │             3. job.payment_status ← Paid/Partial                        │
//! │                (job.source is NOT repointed at the new invoice)         │
//! │             4. transaction ID generated (opaque token)                  │
//! │             5. ONE notification persisted + broadcast (at-most-once)    │
//! │                ONE activity entry appended                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Source Repointing
//! When an estimate converts during payment, the job keeps its original
//! `source` (the estimate). The invoice is reachable through the
//! conversion ledger and through the receipt returned to the caller.
//! Repointing would erase the job's provenance; display layers that want
//! the invoice resolve it via the ledger. Pinned by test.
//!
//! ## Partial Payments
//! A partial payment marks the job `Partial` and leaves the source
//! document untouched; per-payment amounts are not tracked at this
//! layer, so the document stays `Open` until the closing full payment.

use tracing::{info, warn};
use uuid::Uuid;

use chrono::Utc;
use fieldops_core::types::{
    ActivityAction, AgreementStatus, DocumentKind, DocumentRef, InvoiceStatus, Job, PaymentMethod,
    PaymentStatus,
};
use fieldops_core::Money;
use fieldops_db::{NewActivity, Store};

use crate::config::EngineConfig;
use crate::convert::EstimateConverter;
use crate::error::{SyncError, SyncResult};
use crate::events::NotificationHub;

// =============================================================================
// Request / Receipt
// =============================================================================

/// A payment event to synchronize.
#[derive(Debug, Clone)]
pub struct PaymentSyncRequest {
    /// The job the payment was taken against.
    pub job_id: String,

    /// The job's source document, when it has one. `None` means the job
    /// was created standalone and only its own payment status changes.
    pub source: Option<DocumentRef>,

    /// How the payment was tendered.
    pub method: PaymentMethod,

    /// Whether this payment settles the full amount.
    pub full_payment: bool,
}

/// The result of a successfully synchronized payment.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    /// Opaque unique token identifying this payment event.
    pub transaction_id: String,

    /// The invoice materialized from the source estimate, when the
    /// payment triggered (or re-observed) a conversion.
    pub invoice_id: Option<String>,
}

// =============================================================================
// Engine
// =============================================================================

/// Orchestrates the payment event fan-out across stores.
#[derive(Clone)]
pub struct PaymentSyncEngine {
    store: Store,
    converter: EstimateConverter,
    hub: NotificationHub,
    config: EngineConfig,
}

impl PaymentSyncEngine {
    /// Creates an engine over the given store with default config.
    pub fn new(store: Store) -> Self {
        PaymentSyncEngine {
            converter: EstimateConverter::new(store.clone()),
            store,
            hub: NotificationHub::new(),
            config: EngineConfig::default(),
        }
    }

    /// Overrides the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.converter = EstimateConverter::new(self.store.clone()).with_config(config.clone());
        self.config = config;
        self
    }

    /// Returns the notification hub for UI subscribers.
    pub fn notifications(&self) -> &NotificationHub {
        &self.hub
    }

    /// Synchronizes a payment event across the job, its source document,
    /// notifications and the activity log.
    pub async fn sync_payment(&self, request: PaymentSyncRequest) -> SyncResult<PaymentReceipt> {
        let job = self
            .store
            .jobs()
            .get(&request.job_id)
            .await?
            .ok_or_else(|| SyncError::JobNotFound(request.job_id.clone()))?;

        let target_status = if request.full_payment {
            PaymentStatus::Paid
        } else {
            PaymentStatus::Partial
        };

        let receipt = match &request.source {
            None => self.sync_job_only(&job, target_status).await?,
            Some(source) => {
                self.sync_with_document(&job, source, &request, target_status)
                    .await?
            }
        };

        info!(
            job_id = %request.job_id,
            transaction_id = %receipt.transaction_id,
            invoice_id = ?receipt.invoice_id,
            full_payment = request.full_payment,
            "Payment synchronized"
        );

        Ok(receipt)
    }

    /// Handles a payment against a job with no source document: only the
    /// job's payment status changes. Document stores, notifications and
    /// the conversion ledger stay untouched; the activity log still
    /// records the payment against the job itself.
    async fn sync_job_only(
        &self,
        job: &Job,
        target_status: PaymentStatus,
    ) -> SyncResult<PaymentReceipt> {
        let now = Utc::now();
        self.store
            .jobs()
            .update(&job.id, |j| {
                j.payment_status = target_status;
                j.updated_at = now;
            })
            .await?;

        self.activity_log()
            .append(NewActivity {
                kind: None,
                action: ActivityAction::PaymentReceived,
                document_id: job.id.clone(),
                customer_name: job.customer_name.clone(),
                amount_cents: 0,
            })
            .await?;

        Ok(PaymentReceipt {
            transaction_id: generate_transaction_id(),
            invoice_id: None,
        })
    }

    /// Handles a payment against a job spawned from a document: the
    /// document's status is synchronized, estimates convert to invoices,
    /// and one notification plus one activity entry are emitted.
    async fn sync_with_document(
        &self,
        job: &Job,
        source: &DocumentRef,
        request: &PaymentSyncRequest,
        target_status: PaymentStatus,
    ) -> SyncResult<PaymentReceipt> {
        let (amount_cents, invoice_id) = self
            .apply_to_document(source, request.method, request.full_payment)
            .await?;

        let now = Utc::now();
        self.store
            .jobs()
            .update(&job.id, |j| {
                j.payment_status = target_status;
                // source deliberately left pointing at the original
                // document; see module docs
                j.updated_at = now;
            })
            .await?;

        let notification = self
            .store
            .notifications()
            .create_payment(source.kind, &source.id)
            .await?;
        self.hub.publish(&notification);

        self.activity_log()
            .append(NewActivity {
                kind: Some(source.kind),
                action: ActivityAction::PaymentReceived,
                document_id: source.id.clone(),
                customer_name: job.customer_name.clone(),
                amount_cents,
            })
            .await?;

        info!(
            source = %source,
            amount = %Money::from_cents(amount_cents),
            "Source document synchronized"
        );

        Ok(PaymentReceipt {
            transaction_id: generate_transaction_id(),
            invoice_id,
        })
    }

    /// Updates the source document for a payment and returns its amount
    /// plus the conversion invoice ID, when one applies.
    async fn apply_to_document(
        &self,
        source: &DocumentRef,
        method: PaymentMethod,
        full_payment: bool,
    ) -> SyncResult<(i64, Option<String>)> {
        let not_found = || SyncError::DocumentNotFound(source.kind, source.id.clone());
        let now = Utc::now();

        match source.kind {
            DocumentKind::Invoice => {
                if !full_payment {
                    let invoice = self
                        .store
                        .invoices()
                        .get(&source.id)
                        .await?
                        .ok_or_else(not_found)?;
                    return Ok((invoice.amount_cents, None));
                }

                let invoice = self
                    .store
                    .invoices()
                    .update(&source.id, |inv| {
                        inv.status = InvoiceStatus::Paid;
                        inv.payment_method = Some(method);
                        inv.updated_at = now;
                    })
                    .await?
                    .ok_or_else(not_found)?;

                Ok((invoice.amount_cents, None))
            }

            DocumentKind::Estimate => {
                let estimate = self
                    .store
                    .estimates()
                    .get(&source.id)
                    .await?
                    .ok_or_else(not_found)?;

                if !full_payment {
                    return Ok((estimate.amount_cents, None));
                }

                let outcome = self.converter.convert(&source.id).await?;
                if outcome.already_converted {
                    warn!(
                        estimate_id = %source.id,
                        invoice_id = %outcome.invoice_id,
                        "Payment retry on converted estimate; reusing invoice"
                    );
                } else {
                    // Record how the estimate was paid; status was already
                    // advanced to Converted by the converter
                    self.store
                        .estimates()
                        .update(&source.id, |e| {
                            e.payment_method = Some(method);
                            e.updated_at = now;
                        })
                        .await?;
                }

                Ok((estimate.amount_cents, Some(outcome.invoice_id)))
            }

            DocumentKind::Agreement => {
                if !full_payment {
                    let agreement = self
                        .store
                        .agreements()
                        .get(&source.id)
                        .await?
                        .ok_or_else(not_found)?;
                    return Ok((agreement.amount_cents, None));
                }

                let agreement = self
                    .store
                    .agreements()
                    .update(&source.id, |agr| {
                        agr.status = AgreementStatus::Paid;
                        agr.payment_method = Some(method);
                        agr.updated_at = now;
                    })
                    .await?
                    .ok_or_else(not_found)?;

                Ok((agreement.amount_cents, None))
            }
        }
    }

    fn activity_log(&self) -> fieldops_db::ActivityLog {
        self.store
            .activity()
            .with_history_limit(self.config.activity_history_limit)
    }
}

/// Generates an opaque unique transaction token.
fn generate_transaction_id() -> String {
    format!("TXN-{}", Uuid::new_v4().simple())
}

// =============================================================================
// Unit Tests
// =============================================================================
