//! # Activity Log
//!
//! Append-only record of side-effecting events, capped at a bounded
//! history length.
//!
//! ## Retention
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Activity Log Retention                             │
//! │                                                                         │
//! │   append(entry 51)                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   [ 51, 50, 49, ..., 3, 2 ]   ← newest first, entry 1 evicted          │
//! │     └──────── 50 ─────────┘                                             │
//! │                                                                         │
//! │   • Entries are immutable once appended                                 │
//! │   • Eviction is FIFO by insertion order                                 │
//! │   • The feed is a recency view, not an audit trail                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use fieldops_core::types::{ActivityAction, ActivityEntry, DocumentKind};
use fieldops_core::MAX_ACTIVITY_ENTRIES;

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;

/// Collection key the log is persisted under.
const ACTIVITY_KEY: &str = "activity_logs";

// =============================================================================
// New Entry
// =============================================================================

/// The caller-supplied half of an activity entry. ID, date and timestamp
/// are assigned on append.
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub kind: Option<DocumentKind>,
    pub action: ActivityAction,
    pub document_id: String,
    pub customer_name: String,
    pub amount_cents: i64,
}

// =============================================================================
// Activity Log
// =============================================================================

/// Persisted activity log with capped history.
#[derive(Clone)]
pub struct ActivityLog {
    kv: Arc<dyn KeyValueStore>,
    /// Maximum entries retained. Defaults to [`MAX_ACTIVITY_ENTRIES`].
    history_limit: usize,
}

impl ActivityLog {
    /// Creates an activity log over the given store.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        ActivityLog {
            kv,
            history_limit: MAX_ACTIVITY_ENTRIES,
        }
    }

    /// Overrides the retention cap.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }

    async fn load(&self) -> StoreResult<Vec<ActivityEntry>> {
        match self.kv.read(ACTIVITY_KEY).await? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| StoreError::corrupt(ACTIVITY_KEY, e))
            }
            None => Ok(Vec::new()),
        }
    }

    async fn persist(&self, entries: &[ActivityEntry]) -> StoreResult<()> {
        let raw = serde_json::to_string(entries)?;
        self.kv.write(ACTIVITY_KEY, &raw).await
    }

    /// Appends an entry, assigning its ID, date and timestamp.
    ///
    /// The entry is prepended (the log is stored newest-first) and the
    /// collection is truncated to the retention cap.
    pub async fn append(&self, new: NewActivity) -> StoreResult<ActivityEntry> {
        let now = Utc::now();
        let entry = ActivityEntry {
            id: Uuid::new_v4().to_string(),
            kind: new.kind,
            action: new.action,
            document_id: new.document_id,
            customer_name: new.customer_name,
            amount_cents: new.amount_cents,
            date: now.date_naive(),
            timestamp: now,
        };

        debug!(
            action = ?entry.action,
            document_id = %entry.document_id,
            "Appending activity entry"
        );

        let mut entries = self.load().await?;
        entries.insert(0, entry.clone());
        entries.truncate(self.history_limit);
        self.persist(&entries).await?;

        Ok(entry)
    }

    /// Returns the retained entries, newest first.
    pub async fn recent(&self) -> StoreResult<Vec<ActivityEntry>> {
        self.load().await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
