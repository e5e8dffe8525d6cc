//! # fieldops-core: Pure Business Logic for FieldOps
//!
//! This crate is the **heart** of the FieldOps backend. It contains all
//! business logic as pure functions and types with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FieldOps Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Mobile Client (TypeScript)                      │   │
//! │  │    Jobs UI ──► Estimates UI ──► Payment UI ──► Activity UI     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    fieldops-sync                                 │   │
//! │  │    Payment sync engine, converter, job index, notifications    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    fieldops-db                                   │   │
//! │  │    Key-value persistence, collections, activity log             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ fieldops-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │    ids    │  │ validation│  │   │
//! │  │   │ Documents │  │   Money   │  │ INV-032   │  │   rules   │  │   │
//! │  │   │   Jobs    │  │  (cents)  │  │ sequence  │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Invoice, Estimate, Agreement, Job, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`ids`] - Type-prefixed sequential ID generation
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every function is deterministic - same input = same output
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use fieldops_core::ids::next_sequential_id;
//! use fieldops_core::money::Money;
//!
//! // Sequential IDs scan the maximum existing suffix, never the count
//! let next = next_sequential_id("INV", ["INV-001", "INV-031", "INV-015"]);
//! assert_eq!(next, "INV-032");
//!
//! // Create money from cents (never from floats!)
//! let amount = Money::from_cents(50000);
//! assert_eq!(amount.to_string(), "$500.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ids;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use fieldops_core::Money` instead of
// `use fieldops_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of activity log entries retained.
///
/// ## Business Reason
/// The activity feed is a recency view, not an audit trail. The log keeps
/// the 50 most recent entries, newest first; older entries are evicted
/// FIFO on insert.
pub const MAX_ACTIVITY_ENTRIES: usize = 50;

/// Default number of days until an invoice is due.
///
/// ## Business Reason
/// Invoices materialized from a paid estimate are due 30 days after the
/// conversion date. Configurable per engine via `EngineConfig`.
pub const DEFAULT_INVOICE_DUE_DAYS: i64 = 30;
