//! # Sequential ID Generation
//!
//! Type-prefixed sequential identifiers for documents and jobs.
//!
//! ## ID Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Sequential ID Format                               │
//! │                                                                         │
//! │   INV-031        EST-007        AGR-003        JOB-012                 │
//! │   ───┬─── ─┬──                                                          │
//! │      │     └── numeric suffix, zero-padded to width 3                   │
//! │      └──────── document kind prefix                                     │
//! │                                                                         │
//! │   next_sequential_id("INV", ["INV-001", "INV-031", "INV-015"])         │
//! │        │                                                                │
//! │        ├── scan IDs matching the prefix                                 │
//! │        ├── take the maximum numeric suffix (31)                         │
//! │        └── increment and pad  →  "INV-032"                              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Generation scans the *union* of all known IDs for a prefix (the
//! persisted collection plus any seed set), so the next ID is strictly
//! greater than every existing one. IDs that don't match the prefix
//! pattern are ignored rather than rejected.

// =============================================================================
// Parsing
// =============================================================================

/// Extracts the numeric suffix from an ID of the form `{PREFIX}-{digits}`.
///
/// Returns `None` when the prefix doesn't match or the suffix isn't a
/// plain decimal number.
///
/// ## Example
/// ```rust
/// use fieldops_core::ids::numeric_suffix;
///
/// assert_eq!(numeric_suffix("INV", "INV-031"), Some(31));
/// assert_eq!(numeric_suffix("INV", "EST-031"), None);
/// assert_eq!(numeric_suffix("INV", "INV-abc"), None);
/// ```
pub fn numeric_suffix(prefix: &str, id: &str) -> Option<u64> {
    let rest = id.strip_prefix(prefix)?.strip_prefix('-')?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    rest.parse().ok()
}

// =============================================================================
// Generation
// =============================================================================

/// Generates the next sequential ID for a prefix.
///
/// Scans every existing ID matching `{prefix}-{digits}`, takes the maximum
/// numeric suffix, increments it, and zero-pads to width 3. Suffixes past
/// 999 keep their natural width.
///
/// ## Example
/// ```rust
/// use fieldops_core::ids::next_sequential_id;
///
/// let existing = ["INV-001", "INV-031", "INV-015"];
/// assert_eq!(next_sequential_id("INV", existing), "INV-032");
///
/// let none: [&str; 0] = [];
/// assert_eq!(next_sequential_id("EST", none), "EST-001");
/// ```
pub fn next_sequential_id<I, S>(prefix: &str, existing: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let max = existing
        .into_iter()
        .filter_map(|id| numeric_suffix(prefix, id.as_ref()))
        .max()
        .unwrap_or(0);

    format!("{}-{:03}", prefix, max + 1)
}

// =============================================================================
// Unit Tests
// =============================================================================
