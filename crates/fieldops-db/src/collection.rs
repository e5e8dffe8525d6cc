//! # Typed Record Collections
//!
//! Generic CRUD over a JSON collection persisted under a named key.
//!
//! ## Collection Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Collection Operations                              │
//! │                                                                         │
//! │  create(draft)                                                          │
//! │    ├── validate business rules  →  Err(Validation), nothing written     │
//! │    ├── load collection from kv["invoices"]                              │
//! │    ├── next ID = max numeric suffix over (persisted ∪ seed) + 1         │
//! │    ├── stamp the ID onto the draft, append                              │
//! │    └── persist the FULL updated collection                              │
//! │                                                                         │
//! │  update(id, patch)                                                      │
//! │    ├── load, find by ID                                                 │
//! │    ├── unknown ID  →  Ok(None)   (never an error)                       │
//! │    └── apply patch, persist, Ok(Some(updated))                          │
//! │                                                                         │
//! │  delete(id)                                                             │
//! │    └── unknown ID  →  Ok(false)  (never an error)                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Within one store task there is no interleaving between the load and the
//! persist of a mutation; callers porting this to a concurrent runtime must
//! serialize mutations per collection key (see the crate docs).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::debug;

use fieldops_core::ids::next_sequential_id;
use fieldops_core::types::{Agreement, Estimate, Invoice, Job};
use fieldops_core::validation::{
    validate_amount_cents, validate_customer_name, validate_job_title,
};
use fieldops_core::ValidationError;

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;

// =============================================================================
// Record Trait
// =============================================================================

/// A record type persisted in a named collection with sequential IDs.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync {
    /// The key the collection is persisted under (e.g. `"invoices"`).
    const KEY: &'static str;

    /// The sequential ID prefix (e.g. `"INV"`).
    const ID_PREFIX: &'static str;

    /// Human-readable entity name for logs and errors.
    const ENTITY: &'static str;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: String);
    fn customer_id(&self) -> &str;

    /// Business-rule checks enforced before a record is created.
    fn validate(&self) -> Result<(), ValidationError>;
}

impl Record for Invoice {
    const KEY: &'static str = "invoices";
    const ID_PREFIX: &'static str = "INV";
    const ENTITY: &'static str = "Invoice";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn customer_id(&self) -> &str {
        &self.customer_id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_amount_cents(self.amount_cents)?;
        validate_customer_name(&self.customer_name)
    }
}

impl Record for Estimate {
    const KEY: &'static str = "estimates";
    const ID_PREFIX: &'static str = "EST";
    const ENTITY: &'static str = "Estimate";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn customer_id(&self) -> &str {
        &self.customer_id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_amount_cents(self.amount_cents)?;
        validate_customer_name(&self.customer_name)
    }
}

impl Record for Agreement {
    const KEY: &'static str = "agreements";
    const ID_PREFIX: &'static str = "AGR";
    const ENTITY: &'static str = "Agreement";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn customer_id(&self) -> &str {
        &self.customer_id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_amount_cents(self.amount_cents)?;
        validate_customer_name(&self.customer_name)
    }
}

impl Record for Job {
    const KEY: &'static str = "jobs";
    const ID_PREFIX: &'static str = "JOB";
    const ENTITY: &'static str = "Job";

    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, id: String) {
        self.id = id;
    }

    fn customer_id(&self) -> &str {
        &self.customer_id
    }

    fn validate(&self) -> Result<(), ValidationError> {
        validate_job_title(&self.title)?;
        validate_customer_name(&self.customer_name)
    }
}

// =============================================================================
// Collection
// =============================================================================

/// Typed CRUD access to one persisted collection.
///
/// Cheap to construct; holds only the store handle and an optional seed
/// ID set. The seed set models pre-provisioned demo records whose IDs
/// must never be reissued even though they are not in the persisted
/// collection yet.
#[derive(Clone)]
pub struct Collection<T: Record> {
    kv: Arc<dyn KeyValueStore>,
    seed_ids: Vec<String>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Record> Collection<T> {
    /// Creates a collection over the given store.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Collection {
            kv,
            seed_ids: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Adds seed IDs that participate in sequential ID generation.
    pub fn with_seed_ids(mut self, seed_ids: Vec<String>) -> Self {
        self.seed_ids = seed_ids;
        self
    }

    /// Loads the full collection. A missing key is an empty collection.
    async fn load(&self) -> StoreResult<Vec<T>> {
        match self.kv.read(T::KEY).await? {
            Some(raw) => serde_json::from_str(&raw).map_err(|e| StoreError::corrupt(T::KEY, e)),
            None => Ok(Vec::new()),
        }
    }

    /// Persists the full collection.
    async fn persist(&self, records: &[T]) -> StoreResult<()> {
        let raw = serde_json::to_string(records)?;
        self.kv.write(T::KEY, &raw).await
    }

    /// Creates a record, assigning the next sequential ID.
    ///
    /// The draft is validated against its business rules before anything
    /// is written; a rejected draft surfaces as [`StoreError::Validation`].
    /// The ID on the draft is ignored and replaced. The next ID is strictly
    /// greater (numerically) than every existing ID of this collection's
    /// prefix, across both persisted records and the seed set.
    pub async fn create(&self, mut draft: T) -> StoreResult<T> {
        draft.validate()?;

        let mut records = self.load().await?;

        let id = next_sequential_id(
            T::ID_PREFIX,
            records
                .iter()
                .map(|r| r.id())
                .chain(self.seed_ids.iter().map(String::as_str)),
        );

        debug!(entity = T::ENTITY, id = %id, "Creating record");

        draft.set_id(id);
        records.push(draft.clone());
        self.persist(&records).await?;

        Ok(draft)
    }

    /// Inserts a fully-formed record, keeping its ID. Used for seeding
    /// and for records whose ID is produced elsewhere (e.g. conversion).
    pub async fn insert(&self, record: T) -> StoreResult<T> {
        let mut records = self.load().await?;
        records.push(record.clone());
        self.persist(&records).await?;
        Ok(record)
    }

    /// Gets a record by ID.
    pub async fn get(&self, id: &str) -> StoreResult<Option<T>> {
        let records = self.load().await?;
        Ok(records.into_iter().find(|r| r.id() == id))
    }

    /// Lists the full collection.
    pub async fn list(&self) -> StoreResult<Vec<T>> {
        self.load().await
    }

    /// Lists records belonging to one customer.
    pub async fn list_by_customer(&self, customer_id: &str) -> StoreResult<Vec<T>> {
        let records = self.load().await?;
        Ok(records
            .into_iter()
            .filter(|r| r.customer_id() == customer_id)
            .collect())
    }

    /// Applies a patch to a record and persists the collection.
    ///
    /// Returns `Ok(None)` for an unknown ID, not an error.
    pub async fn update<F>(&self, id: &str, patch: F) -> StoreResult<Option<T>>
    where
        F: FnOnce(&mut T),
    {
        let mut records = self.load().await?;

        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            debug!(entity = T::ENTITY, id, "Update on unknown ID");
            return Ok(None);
        };

        patch(record);
        let updated = record.clone();
        self.persist(&records).await?;

        Ok(Some(updated))
    }

    /// Deletes a record by ID.
    ///
    /// Returns `Ok(false)` for an unknown ID, not an error.
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut records = self.load().await?;
        let before = records.len();
        records.retain(|r| r.id() != id);

        if records.len() == before {
            return Ok(false);
        }

        debug!(entity = T::ENTITY, id, "Deleted record");
        self.persist(&records).await?;
        Ok(true)
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
    use fieldops_core::types::InvoiceStatus;

    fn invoice_draft(customer_id: &str, amount_cents: i64) -> Invoice {
        let now = Utc::now();
        Invoice {
            id: String::new(),
            customer_id: customer_id.to_string(),
            customer_name: "Dana Whitfield".to_string(),
            amount_cents,
            status: InvoiceStatus::Open,
            payment_method: None,
            issue_date: now,
            due_date: now,
            line_items: None,
            source: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn invoices(kv: Arc<dyn KeyValueStore>) -> Collection<Invoice> {
        Collection::new(kv)
    }

    #[tokio::test]
    async fn test_create_assigns_sequential_ids() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = invoices(kv);

        let a = store.create(invoice_draft("CUST-001", 100)).await.unwrap();
        let b = store.create(invoice_draft("CUST-002", 200)).await.unwrap();

        assert_eq!(a.id, "INV-001");
        assert_eq!(b.id, "INV-002");
    }

    #[tokio::test]
    async fn test_create_scans_persisted_and_seed_ids() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = invoices(kv.clone()).with_seed_ids(vec!["INV-015".to_string()]);

        // Persist INV-001 and INV-031 out of order
        store
            .insert({
                let mut inv = invoice_draft("CUST-001", 100);
                inv.id = "INV-001".to_string();
                inv
            })
            .await
            .unwrap();
        store
            .insert({
                let mut inv = invoice_draft("CUST-001", 100);
                inv.id = "INV-031".to_string();
                inv
            })
            .await
            .unwrap();

        // Max over persisted {1, 31} ∪ seed {15} is 31 → INV-032
        let created = store.create(invoice_draft("CUST-003", 300)).await.unwrap();
        assert_eq!(created.id, "INV-032");
    }

    #[tokio::test]
    async fn test_create_rejects_non_positive_amount() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = invoices(kv.clone());

        for amount in [0, -50] {
            let err = store
                .create(invoice_draft("CUST-001", amount))
                .await
                .unwrap_err();
            assert!(matches!(err, StoreError::Validation(_)));
            assert_eq!(err.to_string(), "Validation failed: amount must be positive");
        }

        // Nothing was written
        assert_eq!(kv.read("invoices").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_customer_name() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = invoices(kv);

        let mut draft = invoice_draft("CUST-001", 100);
        draft.customer_name = "   ".to_string();

        let err = store.create(draft).await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn test_create_rejects_blank_job_title() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let jobs: Collection<Job> = Collection::new(kv);
        let now = Utc::now();

        let err = jobs
            .create(Job {
                id: String::new(),
                title: String::new(),
                customer_id: "CUST-001".to_string(),
                customer_name: "Dana Whitfield".to_string(),
                source: None,
                payment_status: fieldops_core::types::PaymentStatus::Unpaid,
                linked_documents: Vec::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Validation failed: title is required");
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_none() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = invoices(kv);

        let result = store
            .update("INV-999", |inv| inv.amount_cents = 1)
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_update_persists_patch() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = invoices(kv);

        let created = store.create(invoice_draft("CUST-001", 100)).await.unwrap();
        let updated = store
            .update(&created.id, |inv| inv.status = InvoiceStatus::Paid)
            .await
            .unwrap()
            .expect("invoice exists");

        assert_eq!(updated.status, InvoiceStatus::Paid);

        let reloaded = store.get(&created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.status, InvoiceStatus::Paid);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_false() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = invoices(kv);

        assert!(!store.delete("INV-404").await.unwrap());

        let created = store.create(invoice_draft("CUST-001", 100)).await.unwrap();
        assert!(store.delete(&created.id).await.unwrap());
        assert!(store.get(&created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_by_customer() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let store = invoices(kv);

        store.create(invoice_draft("CUST-001", 100)).await.unwrap();
        store.create(invoice_draft("CUST-002", 200)).await.unwrap();
        store.create(invoice_draft("CUST-001", 300)).await.unwrap();

        let mine = store.list_by_customer("CUST-001").await.unwrap();
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|inv| inv.customer_id == "CUST-001"));
    }

    #[tokio::test]
    async fn test_corrupt_collection_surfaces_as_error() {
        let kv: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        kv.write("invoices", "not json").await.unwrap();

        let store = invoices(kv);
        let err = store.list().await.unwrap_err();
        assert!(matches!(err, StoreError::CorruptCollection { .. }));
    }
}
