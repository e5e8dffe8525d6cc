//! # Error Types
//!
//! Domain-specific error types for fieldops-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  fieldops-core errors (this file)                                       │
//! │  └── ValidationError  - Input validation failures                       │
//! │                                                                         │
//! │  fieldops-db errors (separate crate)                                    │
//! │  └── StoreError       - Persistence failures + rejected records         │
//! │                                                                         │
//! │  fieldops-sync errors (separate crate)                                  │
//! │  └── SyncError        - Payment sync / conversion failures              │
//! │                                                                         │
//! │  Flow: ValidationError → StoreError → SyncError → client               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ValidationError is raised by the validators in [`crate::validation`]
//! and enforced at the record-creation boundary in fieldops-db, where it
//! converts into `StoreError` via `#[from]`.
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, bounds)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message; nothing in this
//!    workspace is allowed to reach the client as an unhandled fault

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any store write.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed document ID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Unit Tests
// =============================================================================
