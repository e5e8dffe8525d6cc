//! # Estimate-to-Invoice Converter
//!
//! One-way, idempotent materialization of an Invoice from a paid Estimate.
//!
//! ## Conversion Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Estimate → Invoice Conversion                        │
//! │                                                                         │
//! │  convert("EST-007")                                                     │
//! │       │                                                                 │
//! │       ├── ledger hit? ──► return existing invoice ID, NO writes         │
//! │       │                                                                 │
//! │       ├── estimate missing? ──► DocumentNotFound                        │
//! │       │                                                                 │
//! │       └── otherwise:                                                    │
//! │            1. synthesize Invoice                                        │
//! │               • issue_date = now, due_date = now + due days             │
//! │               • status = Paid, amount + line items copied               │
//! │               • source = (estimate, "EST-007")                          │
//! │            2. persist invoice (sequential INV ID assigned)              │
//! │            3. mark estimate "Converted to Invoice"                      │
//! │            4. record conversion in ledger (set + mapping)               │
//! │                                                                         │
//! │  INVARIANT: conversion is triggered at most once per estimate.          │
//! │  Repeated payment retries are pure reads of the existing mapping:       │
//! │  no duplicate invoice, no re-mutation of the estimate.                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger, not the estimate's status, is the source of truth for
//! "already converted": a status can be overwritten by unrelated edits,
//! the ledger only ever grows.

use chrono::{Duration, Utc};
use tracing::{debug, info};

use fieldops_core::types::{DocumentKind, DocumentRef, EstimateStatus, Invoice, InvoiceStatus};
use fieldops_db::Store;

use crate::config::EngineConfig;
use crate::error::{SyncError, SyncResult};

// =============================================================================
// Outcome
// =============================================================================

/// Result of a conversion request.
#[derive(Debug, Clone)]
pub struct ConversionOutcome {
    /// The invoice the estimate maps to.
    pub invoice_id: String,

    /// Whether this call found an existing conversion instead of
    /// performing one.
    pub already_converted: bool,
}

// =============================================================================
// Converter
// =============================================================================

/// Idempotent estimate → invoice converter.
#[derive(Clone)]
pub struct EstimateConverter {
    store: Store,
    config: EngineConfig,
}

impl EstimateConverter {
    /// Creates a converter over the given store with default config.
    pub fn new(store: Store) -> Self {
        EstimateConverter {
            store,
            config: EngineConfig::default(),
        }
    }

    /// Overrides the engine configuration.
    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Converts a paid estimate into an invoice.
    ///
    /// Idempotent: a second call for the same estimate returns the
    /// previously created invoice ID without touching any store.
    pub async fn convert(&self, estimate_id: &str) -> SyncResult<ConversionOutcome> {
        let ledger = self.store.conversions();

        if let Some(invoice_id) = ledger.invoice_for(estimate_id).await? {
            debug!(estimate_id, invoice_id = %invoice_id, "Conversion ledger hit");
            return Ok(ConversionOutcome {
                invoice_id,
                already_converted: true,
            });
        }

        let estimate = self
            .store
            .estimates()
            .get(estimate_id)
            .await?
            .ok_or_else(|| {
                SyncError::DocumentNotFound(DocumentKind::Estimate, estimate_id.to_string())
            })?;

        let now = Utc::now();
        let invoice = self
            .store
            .invoices()
            .create(Invoice {
                id: String::new(),
                customer_id: estimate.customer_id.clone(),
                customer_name: estimate.customer_name.clone(),
                amount_cents: estimate.amount_cents,
                status: InvoiceStatus::Paid,
                payment_method: estimate.payment_method,
                issue_date: now,
                due_date: now + Duration::days(self.config.invoice_due_days),
                line_items: estimate.line_items.clone(),
                source: Some(DocumentRef::new(DocumentKind::Estimate, estimate_id)),
                created_at: now,
                updated_at: now,
            })
            .await?;

        self.store
            .estimates()
            .update(estimate_id, |e| {
                e.status = EstimateStatus::Converted;
                e.updated_at = now;
            })
            .await?;

        ledger.record(estimate_id, &invoice.id).await?;

        info!(
            estimate_id,
            invoice_id = %invoice.id,
            amount_cents = estimate.amount_cents,
            "Converted estimate to invoice"
        );

        Ok(ConversionOutcome {
            invoice_id: invoice.id,
            already_converted: false,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fieldops_core::types::{Estimate, LineItem, PaymentMethod};
    use fieldops_db::MemoryStore;
    use std::sync::Arc;

    fn test_store() -> Store {
        Store::new(Arc::new(MemoryStore::new()))
    }

    async fn seed_estimate(store: &Store, id: &str, amount_cents: i64) {
        let now = Utc::now();
        store
            .estimates()
            .insert(Estimate {
                id: id.to_string(),
                customer_id: "CUST-001".to_string(),
                customer_name: "Dana Whitfield".to_string(),
                amount_cents,
                status: EstimateStatus::Open,
                payment_method: Some(PaymentMethod::CreditCard),
                issue_date: now,
                expires_at: None,
                line_items: Some(vec![LineItem {
                    description: "Water heater".to_string(),
                    quantity: 1,
                    unit_price_cents: amount_cents,
                    total_cents: amount_cents,
                }]),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_convert_materializes_invoice() {
        let store = test_store();
        seed_estimate(&store, "EST-007", 50000).await;

        let converter = EstimateConverter::new(store.clone());
        let outcome = converter.convert("EST-007").await.unwrap();

        assert!(!outcome.already_converted);

        let invoice = store
            .invoices()
            .get(&outcome.invoice_id)
            .await
            .unwrap()
            .expect("invoice persisted");
        assert_eq!(invoice.status, InvoiceStatus::Paid);
        assert_eq!(invoice.amount_cents, 50000);
        assert_eq!(
            invoice.source,
            Some(DocumentRef::new(DocumentKind::Estimate, "EST-007"))
        );
        assert_eq!(invoice.line_items.as_ref().unwrap().len(), 1);
        assert_eq!(
            (invoice.due_date - invoice.issue_date).num_days(),
            30,
            "due 30 days after issue"
        );

        let estimate = store.estimates().get("EST-007").await.unwrap().unwrap();
        assert_eq!(estimate.status, EstimateStatus::Converted);
    }

    #[tokio::test]
    async fn test_convert_is_idempotent() {
        let store = test_store();
        seed_estimate(&store, "EST-007", 50000).await;

        let converter = EstimateConverter::new(store.clone());
        let first = converter.convert("EST-007").await.unwrap();
        let second = converter.convert("EST-007").await.unwrap();

        assert_eq!(first.invoice_id, second.invoice_id);
        assert!(!first.already_converted);
        assert!(second.already_converted);

        // Exactly one invoice exists for the estimate
        let invoices = store.invoices().list().await.unwrap();
        let for_estimate: Vec<_> = invoices
            .iter()
            .filter(|inv| {
                inv.source
                    .as_ref()
                    .is_some_and(|s| s.kind == DocumentKind::Estimate && s.id == "EST-007")
            })
            .collect();
        assert_eq!(for_estimate.len(), 1);
    }

    #[tokio::test]
    async fn test_convert_unknown_estimate() {
        let store = test_store();
        let converter = EstimateConverter::new(store);

        let err = converter.convert("EST-404").await.unwrap_err();
        assert!(matches!(
            err,
            SyncError::DocumentNotFound(DocumentKind::Estimate, _)
        ));
        assert_eq!(err.to_string(), "Estimate not found: EST-404");
    }

    #[tokio::test]
    async fn test_conversion_honors_invoice_seed_ids() {
        use fieldops_db::SeedIds;

        // A seeded store: INV-015 exists as mock data only
        let store = Store::new(Arc::new(MemoryStore::new())).with_seed_ids(SeedIds {
            invoices: vec!["INV-015".to_string()],
            ..SeedIds::default()
        });
        seed_estimate(&store, "EST-007", 50000).await;

        let converter = EstimateConverter::new(store.clone());
        let outcome = converter.convert("EST-007").await.unwrap();

        // The materialized invoice never collides with the mock set
        assert_eq!(outcome.invoice_id, "INV-016");
    }

    #[tokio::test]
    async fn test_custom_due_days() {
        let store = test_store();
        seed_estimate(&store, "EST-001", 10000).await;

        let converter = EstimateConverter::new(store.clone()).with_config(EngineConfig {
            invoice_due_days: 14,
            ..EngineConfig::default()
        });
        let outcome = converter.convert("EST-001").await.unwrap();

        let invoice = store
            .invoices()
            .get(&outcome.invoice_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!((invoice.due_date - invoice.issue_date).num_days(), 14);
    }
}
