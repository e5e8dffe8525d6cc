//! # Engine Configuration
//!
//! Tunable knobs for the payment synchronization engine. Deserializable so
//! a host application can load it from its own configuration file; every
//! field has a default matching production behavior.

use serde::{Deserialize, Serialize};

use fieldops_core::{DEFAULT_INVOICE_DUE_DAYS, MAX_ACTIVITY_ENTRIES};

/// Configuration for [`PaymentSyncEngine`](crate::engine::PaymentSyncEngine)
/// and [`EstimateConverter`](crate::convert::EstimateConverter).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Days until an invoice materialized from an estimate is due.
    /// Default: 30
    #[serde(default = "default_invoice_due_days")]
    pub invoice_due_days: i64,

    /// Maximum activity log entries retained.
    /// Default: 50
    #[serde(default = "default_activity_history_limit")]
    pub activity_history_limit: usize,
}

fn default_invoice_due_days() -> i64 {
    DEFAULT_INVOICE_DUE_DAYS
}

fn default_activity_history_limit() -> usize {
    MAX_ACTIVITY_ENTRIES
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            invoice_due_days: DEFAULT_INVOICE_DUE_DAYS,
            activity_history_limit: MAX_ACTIVITY_ENTRIES,
        }
    }
}
