//! # Domain Types
//!
//! Core domain types used throughout FieldOps.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Invoice      │   │    Estimate     │   │   Agreement     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (INV-NNN)   │   │  id (EST-NNN)   │   │  id (AGR-NNN)   │       │
//! │  │  status         │   │  status         │   │  status         │       │
//! │  │  amount_cents   │   │  amount_cents   │   │  amount_cents   │       │
//! │  │  source (EST?)  │   │  line_items     │   │  start/end      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Job        │   │  ActivityEntry  │   │  Notification   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (JOB-NNN)   │   │  action         │   │  message        │       │
//! │  │  source?        │   │  document_id    │   │  source         │       │
//! │  │  linked_docs[]  │   │  amount_cents   │   │  is_read        │       │
//! │  │  payment_status │   │  timestamp      │   │  created_at     │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Pattern
//! Documents and jobs carry human-readable, type-prefixed sequential IDs
//! (`INV-031`, `EST-007`, `JOB-012`). Activity entries, notifications and
//! payment transactions carry opaque generated tokens instead; they are
//! never referenced by users.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Document Kind
// =============================================================================

/// The kind of financial document a record or reference points at.
///
/// ## Where This Shows Up
/// - The type half of a `DocumentRef` (job source / linked documents)
/// - Selecting which store a payment event resolves its document in
/// - The fixed kind → label table used for notification messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Invoice,
    Estimate,
    Agreement,
}

impl DocumentKind {
    /// Returns the sequential ID prefix for this document kind.
    ///
    /// ## Example
    /// ```rust
    /// use fieldops_core::types::DocumentKind;
    ///
    /// assert_eq!(DocumentKind::Invoice.prefix(), "INV");
    /// assert_eq!(DocumentKind::Estimate.prefix(), "EST");
    /// ```
    #[inline]
    pub const fn prefix(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "INV",
            DocumentKind::Estimate => "EST",
            DocumentKind::Agreement => "AGR",
        }
    }

    /// Returns the human-readable label used in messages and errors.
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            DocumentKind::Invoice => "Invoice",
            DocumentKind::Estimate => "Estimate",
            DocumentKind::Agreement => "Agreement",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Statuses
// =============================================================================

/// The status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    /// Issued, awaiting payment.
    Open,
    /// Fully paid.
    Paid,
    /// Past its due date without full payment.
    Overdue,
    /// Taken out of circulation without being paid.
    Deactivated,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Open
    }
}

/// The status of an estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    /// Sent to the customer, awaiting a decision.
    Open,
    /// Paid directly, pending conversion.
    Paid,
    /// Materialized into an invoice. Terminal.
    Converted,
    /// Rejected by the customer. Terminal.
    Declined,
}

impl Default for EstimateStatus {
    fn default() -> Self {
        EstimateStatus::Open
    }
}

impl fmt::Display for EstimateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EstimateStatus::Open => "Open",
            EstimateStatus::Paid => "Paid",
            EstimateStatus::Converted => "Converted to Invoice",
            EstimateStatus::Declined => "Declined",
        };
        f.write_str(label)
    }
}

/// The status of a service agreement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AgreementStatus {
    /// In force.
    Active,
    /// Fully paid.
    Paid,
    /// Past its end date.
    Expired,
}

impl Default for AgreementStatus {
    fn default() -> Self {
        AgreementStatus::Active
    }
}

/// Payment state carried on a job.
///
/// `Partial` is recorded when a payment event arrives with
/// `full_payment = false`; the source document keeps its current status in
/// that case because per-payment amounts are not tracked at the job level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    Paid,
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Unpaid
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a payment was tendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Paper check.
    Check,
    /// Card payment.
    CreditCard,
    /// ACH bank transfer. Only offered when the ACH flag is enabled.
    Ach,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Check => "Check",
            PaymentMethod::CreditCard => "Credit Card",
            PaymentMethod::Ach => "ACH",
        };
        f.write_str(label)
    }
}

// =============================================================================
// Document References
// =============================================================================

/// A (kind, id) pair identifying a document in its type-specific store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DocumentRef {
    pub kind: DocumentKind,
    pub id: String,
}

impl DocumentRef {
    /// Creates a reference to a document.
    pub fn new(kind: DocumentKind, id: impl Into<String>) -> Self {
        DocumentRef {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.id)
    }
}

/// A document manually associated with a job after its creation.
///
/// Distinct from the job's `source`: a job has at most one source document
/// (the one that spawned it) but any number of linked documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LinkedDocument {
    pub kind: DocumentKind,
    pub id: String,
    #[ts(as = "String")]
    pub linked_at: DateTime<Utc>,
}

// =============================================================================
// Line Items
// =============================================================================

/// A single billable line on an invoice or estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub description: String,
    pub quantity: i64,
    /// Unit price in cents.
    pub unit_price_cents: i64,
    /// Line total in cents (unit price × quantity).
    pub total_cents: i64,
}

// =============================================================================
// Documents
// =============================================================================

/// An invoice issued to a customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Invoice {
    /// Sequential identifier, e.g. `INV-031`.
    pub id: String,

    /// Customer this invoice belongs to.
    pub customer_id: String,

    /// Customer display name, frozen at issue time.
    pub customer_name: String,

    /// Total amount in cents.
    pub amount_cents: i64,

    /// Current status.
    pub status: InvoiceStatus,

    /// How the invoice was (or will be) paid, once known.
    pub payment_method: Option<PaymentMethod>,

    /// Date the invoice was issued.
    #[ts(as = "String")]
    pub issue_date: DateTime<Utc>,

    /// Date payment is due.
    #[ts(as = "String")]
    pub due_date: DateTime<Utc>,

    /// Itemized charges, when the invoice is itemized.
    pub line_items: Option<Vec<LineItem>>,

    /// Back-reference to the document this invoice was created from
    /// (set for invoices materialized from a paid estimate).
    pub source: Option<DocumentRef>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// An estimate offered to a customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Estimate {
    /// Sequential identifier, e.g. `EST-007`.
    pub id: String,

    /// Customer this estimate was prepared for.
    pub customer_id: String,

    /// Customer display name, frozen at issue time.
    pub customer_name: String,

    /// Total amount in cents.
    pub amount_cents: i64,

    /// Current status.
    pub status: EstimateStatus,

    /// How the estimate was paid, once paid.
    pub payment_method: Option<PaymentMethod>,

    /// Date the estimate was issued.
    #[ts(as = "String")]
    pub issue_date: DateTime<Utc>,

    /// Date after which the estimate is no longer honored.
    #[ts(as = "Option<String>")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Itemized charges, when the estimate is itemized.
    pub line_items: Option<Vec<LineItem>>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// A recurring service agreement with a customer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Agreement {
    /// Sequential identifier, e.g. `AGR-003`.
    pub id: String,

    /// Customer this agreement covers.
    pub customer_id: String,

    /// Customer display name, frozen at signing time.
    pub customer_name: String,

    /// Total amount in cents.
    pub amount_cents: i64,

    /// Current status.
    pub status: AgreementStatus,

    /// How the agreement is paid, once known.
    pub payment_method: Option<PaymentMethod>,

    /// First day the agreement is in force.
    #[ts(as = "String")]
    pub start_date: DateTime<Utc>,

    /// Last day the agreement is in force, for fixed-term agreements.
    #[ts(as = "Option<String>")]
    pub end_date: Option<DateTime<Utc>>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Job
// =============================================================================

/// A unit of scheduled work, optionally originating from a document.
///
/// ## Invariants
/// - At most one `source` (the document that spawned the job)
/// - `linked_documents` entries are unique per (kind, id),
///   enforced by [`Job::link_document`]
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Job {
    /// Sequential identifier, e.g. `JOB-012`.
    pub id: String,

    /// Short description of the work.
    pub title: String,

    /// Customer the work is for.
    pub customer_id: String,

    /// Customer display name.
    pub customer_name: String,

    /// The document that spawned this job, if any.
    pub source: Option<DocumentRef>,

    /// Payment state of the job.
    pub payment_status: PaymentStatus,

    /// Documents manually associated with this job after creation.
    #[serde(default)]
    pub linked_documents: Vec<LinkedDocument>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Job {
    /// Associates a document with this job.
    ///
    /// Returns `false` (and leaves the job unchanged) when the same
    /// (kind, id) pair is already linked.
    pub fn link_document(&mut self, kind: DocumentKind, id: &str, now: DateTime<Utc>) -> bool {
        if self
            .linked_documents
            .iter()
            .any(|doc| doc.kind == kind && doc.id == id)
        {
            return false;
        }

        self.linked_documents.push(LinkedDocument {
            kind,
            id: id.to_string(),
            linked_at: now,
        });
        self.updated_at = now;
        true
    }

    /// Checks whether this job references a document, either as its
    /// source or through a linked document.
    pub fn references(&self, kind: DocumentKind, id: &str) -> bool {
        if let Some(source) = &self.source {
            if source.kind == kind && source.id == id {
                return true;
            }
        }

        self.linked_documents
            .iter()
            .any(|doc| doc.kind == kind && doc.id == id)
    }
}

// =============================================================================
// Activity Log
// =============================================================================

/// The action an activity entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ActivityAction {
    /// A document or job was created.
    Created,
    /// A payment was received.
    PaymentReceived,
    /// An estimate was converted to an invoice.
    Converted,
    /// A deactivated document was put back in circulation.
    Reactivated,
    /// A document was taken out of circulation.
    Deactivated,
}

/// An immutable record of a side-effecting event.
///
/// The activity log retains at most the 50 most recent entries,
/// newest first; eviction is FIFO by insertion order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ActivityEntry {
    /// Opaque generated identifier.
    pub id: String,

    /// Document kind the event relates to, when it relates to one.
    pub kind: Option<DocumentKind>,

    /// What happened.
    pub action: ActivityAction,

    /// The document (or job) the event happened to.
    pub document_id: String,

    /// Customer display name at the time of the event.
    pub customer_name: String,

    /// Amount involved, in cents.
    pub amount_cents: i64,

    /// Calendar date of the event, for display grouping.
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Exact moment the event was recorded.
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Notifications
// =============================================================================

/// The category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Payment,
}

/// A user-facing notification raised by a payment event.
///
/// Mutable only via the `is_read` flag; deletable individually or in bulk.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    /// Opaque generated identifier.
    pub id: String,

    pub kind: NotificationKind,

    /// Human-readable message, e.g. "Payment received for Estimate EST-007".
    pub message: String,

    /// The document the payment was made against.
    pub source: DocumentRef,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    pub is_read: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn job(now: DateTime<Utc>) -> Job {
        Job {
            id: "JOB-001".to_string(),
            title: "Water heater replacement".to_string(),
            customer_id: "CUST-001".to_string(),
            customer_name: "Dana Whitfield".to_string(),
            source: Some(DocumentRef::new(DocumentKind::Estimate, "EST-004")),
            payment_status: PaymentStatus::Unpaid,
            linked_documents: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_document_kind_prefixes() {
        assert_eq!(DocumentKind::Invoice.prefix(), "INV");
        assert_eq!(DocumentKind::Estimate.prefix(), "EST");
        assert_eq!(DocumentKind::Agreement.prefix(), "AGR");
    }

    #[test]
    fn test_estimate_status_display() {
        assert_eq!(
            EstimateStatus::Converted.to_string(),
            "Converted to Invoice"
        );
    }

    #[test]
    fn test_link_document_rejects_duplicates() {
        let now = Utc::now();
        let mut job = job(now);

        assert!(job.link_document(DocumentKind::Invoice, "INV-002", now));
        assert!(!job.link_document(DocumentKind::Invoice, "INV-002", now));
        assert_eq!(job.linked_documents.len(), 1);

        // Same ID under a different kind is a distinct link
        assert!(job.link_document(DocumentKind::Agreement, "INV-002", now));
        assert_eq!(job.linked_documents.len(), 2);
    }

    #[test]
    fn test_references_checks_source_and_links() {
        let now = Utc::now();
        let mut job = job(now);
        job.link_document(DocumentKind::Invoice, "INV-009", now);

        assert!(job.references(DocumentKind::Estimate, "EST-004"));
        assert!(job.references(DocumentKind::Invoice, "INV-009"));
        assert!(!job.references(DocumentKind::Invoice, "EST-004"));
    }

    #[test]
    fn test_payment_status_default() {
        assert_eq!(PaymentStatus::default(), PaymentStatus::Unpaid);
    }
}
