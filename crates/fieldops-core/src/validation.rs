//! # Validation Module
//!
//! Input validation utilities for FieldOps.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (TypeScript)                                         │
//! │  ├── Basic format checks (empty, length)                                │
//! │  └── Immediate user feedback                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (Rust)                                            │
//! │  ├── Business rule validation before any store write                    │
//! │  └── Typed ValidationError, never a panic                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Store layer                                                   │
//! │  └── Structural checks (ID uniqueness within a collection)              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use fieldops_core::validation::{validate_amount_cents, validate_deposit_percentage};
//!
//! validate_amount_cents(50000).unwrap();
//! validate_deposit_percentage(25).unwrap();
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a monetary amount in cents.
///
/// ## Rules
/// - Must be strictly positive (refund adjustments go through a different
///   path and never reach document creation)
///
/// ## Example
/// ```rust
/// use fieldops_core::validation::validate_amount_cents;
///
/// assert!(validate_amount_cents(50000).is_ok());
/// assert!(validate_amount_cents(0).is_err());
/// assert!(validate_amount_cents(-100).is_err());
/// ```
pub fn validate_amount_cents(amount_cents: i64) -> ValidationResult<()> {
    if amount_cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount".to_string(),
        });
    }

    Ok(())
}

/// Validates an overdue threshold in days.
///
/// ## Rules
/// - Must be strictly positive
pub fn validate_threshold(days: i64) -> ValidationResult<()> {
    if days <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "threshold".to_string(),
        });
    }

    Ok(())
}

/// Validates a deposit percentage.
///
/// ## Rules
/// - Must be within [0, 100]
///
/// ## Example
/// ```rust
/// use fieldops_core::validation::validate_deposit_percentage;
///
/// assert!(validate_deposit_percentage(0).is_ok());
/// assert!(validate_deposit_percentage(100).is_ok());
/// assert!(validate_deposit_percentage(101).is_err());
/// ```
pub fn validate_deposit_percentage(percentage: i64) -> ValidationResult<()> {
    if !(0..=100).contains(&percentage) {
        return Err(ValidationError::OutOfRange {
            field: "deposit_percentage".to_string(),
            min: 0,
            max: 100,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a customer display name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_customer_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer_name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "customer_name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a job title.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most 200 characters
pub fn validate_job_title(title: &str) -> ValidationResult<()> {
    let title = title.trim();

    if title.is_empty() {
        return Err(ValidationError::Required {
            field: "title".to_string(),
        });
    }

    if title.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "title".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_must_be_positive() {
        assert!(validate_amount_cents(1).is_ok());
        assert!(validate_amount_cents(0).is_err());
        assert!(validate_amount_cents(-50).is_err());
    }

    #[test]
    fn test_threshold_must_be_positive() {
        assert!(validate_threshold(30).is_ok());
        assert!(validate_threshold(0).is_err());
    }

    #[test]
    fn test_deposit_percentage_bounds() {
        assert!(validate_deposit_percentage(0).is_ok());
        assert!(validate_deposit_percentage(50).is_ok());
        assert!(validate_deposit_percentage(100).is_ok());
        assert!(validate_deposit_percentage(-1).is_err());
        assert!(validate_deposit_percentage(101).is_err());
    }

    #[test]
    fn test_customer_name() {
        assert!(validate_customer_name("Dana Whitfield").is_ok());
        assert!(validate_customer_name("   ").is_err());
        assert!(validate_customer_name(&"a".repeat(201)).is_err());
    }

    #[test]
    fn test_job_title() {
        assert!(validate_job_title("Drain cleaning").is_ok());
        assert!(validate_job_title("").is_err());
    }
}
