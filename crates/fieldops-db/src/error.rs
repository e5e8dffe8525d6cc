//! # Store Error Types
//!
//! Error types for persistence operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Backend failure            Rejected record                             │
//! │  (sqlx / serde_json)        (ValidationError, fieldops-core)            │
//! │       │                          │                                      │
//! │       └──────────┬───────────────┘                                      │
//! │                  ▼                                                      │
//! │  StoreError (this module) ← Adds context and categorization             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SyncError (fieldops-sync) ← Wrapped at the engine boundary             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Client displays a transient toast message, never a crash               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note the contract from the store layer: an *unknown ID* on update or
//! delete is NOT an error; those return `None`/`false`. StoreError is
//! reserved for genuine persistence failures and rejected records.

use thiserror::Error;

use fieldops_core::ValidationError;

/// Persistence operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend read/write failed.
    ///
    /// ## When This Occurs
    /// - SQLite file unwritable, disk full
    /// - Connection pool exhausted or closed
    #[error("Storage backend failed: {0}")]
    Backend(String),

    /// Store connection could not be established.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// A persisted collection could not be decoded.
    ///
    /// ## When This Occurs
    /// - A collection blob was written by an incompatible schema version
    /// - Manual tampering with the underlying store
    #[error("Corrupt collection under key '{key}': {source}")]
    CorruptCollection {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record could not be encoded for persistence.
    #[error("Serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A record was rejected before any write.
    ///
    /// ## When This Occurs
    /// - Creating a document with a non-positive amount
    /// - Creating a record with an empty customer name or job title
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl StoreError {
    /// Creates a CorruptCollection error for a collection key.
    pub fn corrupt(key: impl Into<String>, source: serde_json::Error) -> Self {
        StoreError::CorruptCollection {
            key: key.into(),
            source,
        }
    }
}

/// Convert sqlx errors to StoreError.
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut => {
                StoreError::Backend("connection pool exhausted".to_string())
            }
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("pool is closed".to_string()),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Result type for persistence operations.
pub type StoreResult<T> = Result<T, StoreError>;
