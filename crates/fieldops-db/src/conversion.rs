//! # Conversion Ledger
//!
//! Persisted record of estimate → invoice conversions.
//!
//! ## Why a Ledger?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Conversion Idempotence                                │
//! │                                                                         │
//! │   pay EST-007 ──► convert ──► INV-032 created                           │
//! │   pay EST-007 (retry) ──► convert ──► ledger hit ──► INV-032 returned   │
//! │                                        NO second invoice                │
//! │                                                                         │
//! │   Persisted state:                                                      │
//! │     converted_estimates    = ["EST-007", ...]       (membership set)    │
//! │     estimate_invoice_map   = {"EST-007": "INV-032"} (mapping)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The set and the mapping are persisted under separate keys, matching the
//! layout the mobile client used. `record` writes the mapping before the
//! set so a torn write can never leave a converted estimate without its
//! invoice ID.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;

/// Key for the membership set of converted estimate IDs.
const CONVERTED_SET_KEY: &str = "converted_estimates";

/// Key for the estimateId → invoiceId mapping.
const CONVERSION_MAP_KEY: &str = "estimate_invoice_map";

// =============================================================================
// Conversion Ledger
// =============================================================================

/// Persisted estimate → invoice conversion record.
#[derive(Clone)]
pub struct ConversionLedger {
    kv: Arc<dyn KeyValueStore>,
}

impl ConversionLedger {
    /// Creates a ledger over the given store.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        ConversionLedger { kv }
    }

    async fn load_set(&self) -> StoreResult<Vec<String>> {
        match self.kv.read(CONVERTED_SET_KEY).await? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| StoreError::corrupt(CONVERTED_SET_KEY, e))
            }
            None => Ok(Vec::new()),
        }
    }

    async fn load_map(&self) -> StoreResult<HashMap<String, String>> {
        match self.kv.read(CONVERSION_MAP_KEY).await? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| StoreError::corrupt(CONVERSION_MAP_KEY, e))
            }
            None => Ok(HashMap::new()),
        }
    }

    /// Checks whether an estimate has already been converted.
    pub async fn is_converted(&self, estimate_id: &str) -> StoreResult<bool> {
        let set = self.load_set().await?;
        Ok(set.iter().any(|id| id == estimate_id))
    }

    /// Returns the invoice an estimate was converted into, if any.
    pub async fn invoice_for(&self, estimate_id: &str) -> StoreResult<Option<String>> {
        let map = self.load_map().await?;
        Ok(map.get(estimate_id).cloned())
    }

    /// Records a completed conversion.
    pub async fn record(&self, estimate_id: &str, invoice_id: &str) -> StoreResult<()> {
        debug!(estimate_id, invoice_id, "Recording conversion");

        let mut map = self.load_map().await?;
        map.insert(estimate_id.to_string(), invoice_id.to_string());
        self.kv
            .write(CONVERSION_MAP_KEY, &serde_json::to_string(&map)?)
            .await?;

        let mut set = self.load_set().await?;
        if !set.iter().any(|id| id == estimate_id) {
            set.push(estimate_id.to_string());
        }
        self.kv
            .write(CONVERTED_SET_KEY, &serde_json::to_string(&set)?)
            .await?;

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    #[tokio::test]
    async fn test_empty_ledger() {
        let ledger = ConversionLedger::new(Arc::new(MemoryStore::new()));

        assert!(!ledger.is_converted("EST-007").await.unwrap());
        assert_eq!(ledger.invoice_for("EST-007").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_record_and_lookup() {
        let ledger = ConversionLedger::new(Arc::new(MemoryStore::new()));

        ledger.record("EST-007", "INV-032").await.unwrap();

        assert!(ledger.is_converted("EST-007").await.unwrap());
        assert_eq!(
            ledger.invoice_for("EST-007").await.unwrap().as_deref(),
            Some("INV-032")
        );
        assert!(!ledger.is_converted("EST-008").await.unwrap());
    }

    #[tokio::test]
    async fn test_record_twice_keeps_single_set_entry() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let ledger = ConversionLedger::new(kv.clone());

        ledger.record("EST-007", "INV-032").await.unwrap();
        ledger.record("EST-007", "INV-032").await.unwrap();

        let raw = kv.read("converted_estimates").await.unwrap().unwrap();
        let set: Vec<String> = serde_json::from_str(&raw).unwrap();
        assert_eq!(set, vec!["EST-007".to_string()]);
    }
}
