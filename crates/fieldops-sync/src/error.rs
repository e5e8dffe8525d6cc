//! # Sync Error Types
//!
//! Error types for the payment synchronization engine.
//!
//! ## Propagation Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  StoreError (fieldops-db)                                               │
//! │       │ #[from]                                                         │
//! │       ▼                                                                 │
//! │  SyncError (this module) ← NotFound variants add document context       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Client boundary serializes to { success: false, error: "..." }         │
//! │  and shows a transient toast, never a crash, never a modal              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use fieldops_core::types::DocumentKind;
use fieldops_db::StoreError;

/// Payment synchronization and conversion errors.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The payment's source document does not exist in its store.
    ///
    /// Surfaces to the client as "<label> not found: <id>".
    #[error("{0} not found: {1}")]
    DocumentNotFound(DocumentKind, String),

    /// The job being paid does not exist.
    #[error("Job not found: {0}")]
    JobNotFound(String),

    /// Persistence failure underneath the engine.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result type for sync operations.
pub type SyncResult<T> = Result<T, SyncError>;

// =============================================================================
// Unit Tests
// =============================================================================
