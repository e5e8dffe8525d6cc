//! # Store Facade
//!
//! Single handle that hands out typed stores over one shared key-value
//! backend.
//!
//! ## Design: One Backend, Many Typed Views
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Store Facade                                   │
//! │                                                                         │
//! │   Store::new(backend)                                                   │
//! │       │                                                                 │
//! │       ├── invoices()      → Collection<Invoice>    (kv["invoices"])     │
//! │       ├── estimates()     → Collection<Estimate>   (kv["estimates"])    │
//! │       ├── agreements()    → Collection<Agreement>  (kv["agreements"])   │
//! │       ├── jobs()          → Collection<Job>        (kv["jobs"])         │
//! │       ├── activity()      → ActivityLog            (kv["activity_logs"])│
//! │       ├── notifications() → NotificationStore      (kv["notifications"])│
//! │       ├── conversions()   → ConversionLedger       (two keys)           │
//! │       └── settings()      → SettingsStore          (kv["ach_enabled"])  │
//! │                                                                         │
//! │   Each view is cheap to construct; they all share the same Arc'd        │
//! │   backend, so cloning the facade is cheap too.                          │
//! │                                                                         │
//! │   Seed IDs registered via with_seed_ids flow into every collection      │
//! │   handed out, so pre-provisioned demo records participate in            │
//! │   sequential ID generation everywhere.                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use fieldops_core::types::{Agreement, Estimate, Invoice, Job};

use crate::activity::ActivityLog;
use crate::collection::Collection;
use crate::conversion::ConversionLedger;
use crate::kv::KeyValueStore;
use crate::notification::NotificationStore;
use crate::settings::SettingsStore;

/// Pre-provisioned record IDs per collection.
///
/// These IDs participate in sequential ID generation even before the
/// corresponding records exist in the persisted collection, so a demo or
/// mock data set can never have its IDs reissued.
#[derive(Debug, Clone, Default)]
pub struct SeedIds {
    pub invoices: Vec<String>,
    pub estimates: Vec<String>,
    pub agreements: Vec<String>,
    pub jobs: Vec<String>,
}

/// Main persistence handle providing typed store access.
#[derive(Clone)]
pub struct Store {
    kv: Arc<dyn KeyValueStore>,
    seeds: Arc<SeedIds>,
}

impl Store {
    /// Creates a store facade over a key-value backend.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Store {
            kv,
            seeds: Arc::new(SeedIds::default()),
        }
    }

    /// Registers seed IDs that every collection view will honor during
    /// sequential ID generation.
    pub fn with_seed_ids(mut self, seeds: SeedIds) -> Self {
        self.seeds = Arc::new(seeds);
        self
    }

    /// Returns the underlying backend.
    ///
    /// ## Usage
    /// For keys not covered by a typed store. Prefer the typed accessors.
    pub fn backend(&self) -> Arc<dyn KeyValueStore> {
        self.kv.clone()
    }

    /// Returns the invoice collection.
    pub fn invoices(&self) -> Collection<Invoice> {
        Collection::new(self.kv.clone()).with_seed_ids(self.seeds.invoices.clone())
    }

    /// Returns the estimate collection.
    pub fn estimates(&self) -> Collection<Estimate> {
        Collection::new(self.kv.clone()).with_seed_ids(self.seeds.estimates.clone())
    }

    /// Returns the agreement collection.
    pub fn agreements(&self) -> Collection<Agreement> {
        Collection::new(self.kv.clone()).with_seed_ids(self.seeds.agreements.clone())
    }

    /// Returns the job collection.
    pub fn jobs(&self) -> Collection<Job> {
        Collection::new(self.kv.clone()).with_seed_ids(self.seeds.jobs.clone())
    }

    /// Returns the activity log.
    pub fn activity(&self) -> ActivityLog {
        ActivityLog::new(self.kv.clone())
    }

    /// Returns the notification store.
    pub fn notifications(&self) -> NotificationStore {
        NotificationStore::new(self.kv.clone())
    }

    /// Returns the conversion ledger.
    pub fn conversions(&self) -> ConversionLedger {
        ConversionLedger::new(self.kv.clone())
    }

    /// Returns the settings store.
    pub fn settings(&self) -> SettingsStore {
        SettingsStore::new(self.kv.clone())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;
    use chrono::Utc;
    use fieldops_core::types::{EstimateStatus, PaymentStatus};

    #[tokio::test]
    async fn test_views_share_one_backend() {
        let store = Store::new(Arc::new(MemoryStore::new()));
        let now = Utc::now();

        let estimate = store
            .estimates()
            .create(Estimate {
                id: String::new(),
                customer_id: "CUST-001".to_string(),
                customer_name: "Dana Whitfield".to_string(),
                amount_cents: 50000,
                status: EstimateStatus::Open,
                payment_method: None,
                issue_date: now,
                expires_at: None,
                line_items: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();

        // A second view over the same facade sees the write
        let found = store.estimates().get(&estimate.id).await.unwrap();
        assert!(found.is_some());

        // ...and other collections are untouched
        assert!(store.invoices().list().await.unwrap().is_empty());

        let job = store
            .jobs()
            .create(Job {
                id: String::new(),
                title: "Furnace tune-up".to_string(),
                customer_id: "CUST-001".to_string(),
                customer_name: "Dana Whitfield".to_string(),
                source: None,
                payment_status: PaymentStatus::Unpaid,
                linked_documents: Vec::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        assert_eq!(job.id, "JOB-001");
    }

    #[tokio::test]
    async fn test_seed_ids_flow_into_collections() {
        let store = Store::new(Arc::new(MemoryStore::new())).with_seed_ids(SeedIds {
            invoices: vec!["INV-015".to_string()],
            ..SeedIds::default()
        });
        let now = Utc::now();

        // The seed record is not persisted, but its ID is never reissued
        let invoice = store
            .invoices()
            .create(Invoice {
                id: String::new(),
                customer_id: "CUST-001".to_string(),
                customer_name: "Dana Whitfield".to_string(),
                amount_cents: 10000,
                status: Default::default(),
                payment_method: None,
                issue_date: now,
                due_date: now,
                line_items: None,
                source: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        assert_eq!(invoice.id, "INV-016");

        // Collections without seeds are unaffected
        let estimate = store
            .estimates()
            .create(Estimate {
                id: String::new(),
                customer_id: "CUST-001".to_string(),
                customer_name: "Dana Whitfield".to_string(),
                amount_cents: 5000,
                status: EstimateStatus::Open,
                payment_method: None,
                issue_date: now,
                expires_at: None,
                line_items: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        assert_eq!(estimate.id, "EST-001");
    }
}
