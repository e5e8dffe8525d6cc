//! # fieldops-db: Persistence Layer for FieldOps
//!
//! This crate provides persistence for the FieldOps backend. Every store
//! is built on an abstract key-value capability that holds whole
//! JSON-encoded collections under named keys (the exact layout the
//! mobile client persisted), with an in-memory backend for tests and a
//! SQLite backend for durable storage.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        FieldOps Data Flow                               │
//! │                                                                         │
//! │  Payment sync engine (fieldops-sync)                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    fieldops-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌────────────────┐   ┌───────────────┐  │   │
//! │  │   │ Collections   │   │ ActivityLog    │   │ Conversion    │  │   │
//! │  │   │ (collection)  │   │ Notifications  │   │ Ledger        │  │   │
//! │  │   │               │   │ Settings       │   │               │  │   │
//! │  │   │ Invoice, Job  │   │ capped history │   │ EST → INV map │  │   │
//! │  │   └───────┬───────┘   └───────┬────────┘   └──────┬────────┘  │   │
//! │  │           └───────────────────┼───────────────────┘           │   │
//! │  │                               ▼                                │   │
//! │  │                    KeyValueStore (kv.rs)                       │   │
//! │  │                    MemoryStore │ SqliteStore                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                               │                                         │
//! │                               ▼                                         │
//! │                  kv_store table / in-process HashMap                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`kv`] - The KeyValueStore trait and the in-memory backend
//! - [`sqlite`] - SQLite-backed durable store
//! - [`collection`] - Generic typed CRUD over one persisted collection
//! - [`activity`] - Activity log with capped history
//! - [`notification`] - Notification persistence
//! - [`conversion`] - Estimate → invoice conversion ledger
//! - [`settings`] - Persisted configuration flags
//! - [`store`] - Facade handing out typed views over one backend
//! - [`error`] - Store error types
//!
//! ## Concurrency Model
//!
//! All operations are async to mirror a future network-backed store, but
//! current backends complete immediately. Every mutation is a single
//! read-modify-write against one key; there is no interleaving within one
//! store call. If this crate is ever driven from multiple concurrent
//! writers, mutations must be serialized per collection key to preserve
//! read-modify-write atomicity.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use fieldops_db::{Store, SqliteConfig, SqliteStore};
//!
//! let backend = Arc::new(SqliteStore::new(SqliteConfig::new("fieldops.db")).await?);
//! let store = Store::new(backend);
//!
//! let invoice = store.invoices().get("INV-031").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod activity;
pub mod collection;
pub mod conversion;
pub mod error;
pub mod kv;
pub mod notification;
pub mod settings;
pub mod sqlite;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use kv::{KeyValueStore, MemoryStore};
pub use sqlite::{SqliteConfig, SqliteStore};
pub use store::{SeedIds, Store};

// Typed store re-exports for convenience
pub use activity::{ActivityLog, NewActivity};
pub use collection::{Collection, Record};
pub use conversion::ConversionLedger;
pub use notification::NotificationStore;
pub use settings::SettingsStore;
