//! # fieldops-sync: Payment Synchronization Engine for FieldOps
//!
//! This crate keeps a Job, its source financial document, payment
//! notifications and the activity log mutually consistent when a payment
//! event occurs. It sits between the client-facing surface and the
//! persistence layer.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FieldOps Sync Layer                               │
//! │                                                                         │
//! │  Payment event (job, source?, method, full?)                           │
//! │       │                                                                 │
//! │  ┌────▼────────────────────────────────────────────────────────────┐   │
//! │  │                 fieldops-sync (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────────────┐      ┌──────────────────┐               │   │
//! │  │   │ PaymentSyncEngine│─────►│ EstimateConverter│               │   │
//! │  │   │ (engine)         │      │ (convert)        │               │   │
//! │  │   │ orchestrates the │      │ idempotent       │               │   │
//! │  │   │ payment fan-out  │      │ EST → INV        │               │   │
//! │  │   └────────┬─────────┘      └──────────────────┘               │   │
//! │  │            │                                                    │   │
//! │  │   ┌────────▼─────────┐      ┌──────────────────┐               │   │
//! │  │   │ NotificationHub  │      │ JobIndex         │               │   │
//! │  │   │ (events)         │      │ (lookup)         │               │   │
//! │  │   │ broadcast,       │      │ derived          │               │   │
//! │  │   │ at-most-once     │      │ doc → job map    │               │   │
//! │  │   └──────────────────┘      └──────────────────┘               │   │
//! │  └────────────────────────────────┬────────────────────────────────┘   │
//! │                                   │                                     │
//! │                          fieldops-db (Store)                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`engine`] - Payment synchronization orchestrator
//! - [`convert`] - Idempotent estimate → invoice conversion
//! - [`lookup`] - Read-only document → job index
//! - [`events`] - Broadcast notification fan-out
//! - [`config`] - Engine tuning knobs
//! - [`error`] - Sync error types
//!
//! ## Consistency Model
//!
//! One payment event produces at most: one document status change, one
//! conversion, one job status change, one persisted notification, one
//! broadcast, one activity entry. Retries of a full estimate payment are
//! absorbed by the conversion ledger and never duplicate an invoice.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod convert;
pub mod engine;
pub mod error;
pub mod events;
pub mod lookup;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::EngineConfig;
pub use convert::{ConversionOutcome, EstimateConverter};
pub use engine::{PaymentReceipt, PaymentSyncEngine, PaymentSyncRequest};
pub use error::{SyncError, SyncResult};
pub use events::NotificationHub;
pub use lookup::JobIndex;
