//! # Key-Value Store Seam
//!
//! The abstract persistence capability every store in this crate is built
//! on. The mobile client persisted whole JSON collections under named keys;
//! this trait preserves that contract while letting the backend vary.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       KeyValueStore Contract                            │
//! │                                                                         │
//! │   read("invoices")  ──►  Some("[{...}, {...}]") | None                  │
//! │   write("invoices", "[...]")  ──►  whole-collection overwrite           │
//! │   remove("ach_enabled")  ──►  idempotent delete                         │
//! │                                                                         │
//! │   • No partial/streaming access: collections are read and written       │
//! │     as a whole                                                          │
//! │   • Async signatures so a networked backend can introduce real          │
//! │     latency later; current backends complete immediately                │
//! │   • No retries, no timeouts: a failed write surfaces immediately        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::trace;

use crate::error::StoreResult;

// =============================================================================
// Trait
// =============================================================================

/// Abstract key-value persistence capability.
///
/// Implementations must be safe to share across tasks; every store method
/// is a single read-modify-write critical section from the caller's point
/// of view, so backends must not interleave a read and write of the same
/// key across callers (the in-memory backend uses an RwLock, the SQLite
/// backend relies on statement atomicity).
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`, if any.
    async fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    async fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Removes the value under `key`. Removing a missing key is a no-op.
    async fn remove(&self, key: &str) -> StoreResult<()>;
}

// =============================================================================
// In-Memory Backend
// =============================================================================

/// In-memory key-value store.
///
/// ## Usage
/// The default backend for tests and ephemeral sessions. State lives for
/// the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let entries = self.entries.read().await;
        Ok(entries.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        trace!(key, len = value.len(), "memory write");
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let mut entries = self.entries.write().await;
        entries.remove(key);
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();

        assert_eq!(store.read("invoices").await.unwrap(), None);

        store.write("invoices", "[]").await.unwrap();
        assert_eq!(store.read("invoices").await.unwrap().as_deref(), Some("[]"));

        store.write("invoices", "[1]").await.unwrap();
        assert_eq!(
            store.read("invoices").await.unwrap().as_deref(),
            Some("[1]")
        );
    }

    #[tokio::test]
    async fn test_memory_store_remove_is_idempotent() {
        let store = MemoryStore::new();
        store.write("ach_enabled", "true").await.unwrap();

        store.remove("ach_enabled").await.unwrap();
        assert_eq!(store.read("ach_enabled").await.unwrap(), None);

        // Removing again is a no-op, not an error
        store.remove("ach_enabled").await.unwrap();
    }
}
