//! # Job Lookup Index
//!
//! Derived mapping from a document to the job that owns it. Read-only:
//! the index never feeds back into the payment engine; it exists for the
//! client to render job associations next to documents.
//!
//! ## Match Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Job Lookup Matching                               │
//! │                                                                         │
//! │   Job JOB-004                                                           │
//! │   ├── source: (invoice, INV-010)        ← direct source link            │
//! │   └── linked_documents:                                                 │
//! │        ├── (invoice, INV-011)           ← manual association            │
//! │        └── (agreement, AGR-002)                                         │
//! │                                                                         │
//! │   find_job_for_document: source matches are checked across ALL jobs     │
//! │   before any linked-document match; a direct source link always wins.   │
//! │                                                                         │
//! │   lookup_map: ONE pass over jobs; per job the source match is inserted  │
//! │   before its linked matches, and later inserts overwrite earlier ones   │
//! │   (last-write-wins by iteration order).                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The two operations deliberately differ on precedence; both behaviors
//! are pinned by tests below.

use std::collections::HashMap;

use fieldops_core::types::{DocumentKind, Job};
use fieldops_db::{Collection, Store};

use crate::error::SyncResult;

// =============================================================================
// Pure matching (testable without a store)
// =============================================================================

/// Finds the job owning a document: direct source matches across all jobs
/// first, then linked-document matches.
pub fn find_in(jobs: &[Job], kind: DocumentKind, document_id: &str) -> Option<String> {
    let source_match = jobs.iter().find(|job| {
        job.source
            .as_ref()
            .is_some_and(|s| s.kind == kind && s.id == document_id)
    });
    if let Some(job) = source_match {
        return Some(job.id.clone());
    }

    jobs.iter()
        .find(|job| {
            job.linked_documents
                .iter()
                .any(|doc| doc.kind == kind && doc.id == document_id)
        })
        .map(|job| job.id.clone())
}

/// Builds the documentId → jobId map for one document kind in a single
/// pass. Last write wins: a linked-document entry encountered later in
/// iteration order overwrites an earlier source match for the same ID.
pub fn build_map(jobs: &[Job], kind: DocumentKind) -> HashMap<String, String> {
    let mut map = HashMap::new();

    for job in jobs {
        if let Some(source) = &job.source {
            if source.kind == kind {
                map.insert(source.id.clone(), job.id.clone());
            }
        }

        for doc in &job.linked_documents {
            if doc.kind == kind {
                map.insert(doc.id.clone(), job.id.clone());
            }
        }
    }

    map
}

// =============================================================================
// Store-backed index
// =============================================================================

/// Read-only lookup index over the persisted job collection.
#[derive(Clone)]
pub struct JobIndex {
    jobs: Collection<Job>,
}

impl JobIndex {
    /// Creates an index over the store's job collection.
    pub fn new(store: &Store) -> Self {
        JobIndex { jobs: store.jobs() }
    }

    /// Finds the job ID owning a document, if any.
    pub async fn find_job_for_document(
        &self,
        kind: DocumentKind,
        document_id: &str,
    ) -> SyncResult<Option<String>> {
        let jobs = self.jobs.list().await?;
        Ok(find_in(&jobs, kind, document_id))
    }

    /// Builds the documentId → jobId map for bulk lookups.
    pub async fn lookup_map(&self, kind: DocumentKind) -> SyncResult<HashMap<String, String>> {
        let jobs = self.jobs.list().await?;
        Ok(build_map(&jobs, kind))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fieldops_core::types::{DocumentRef, PaymentStatus};

    fn job(id: &str, source: Option<DocumentRef>) -> Job {
        let now = Utc::now();
        Job {
            id: id.to_string(),
            title: "Service call".to_string(),
            customer_id: "CUST-001".to_string(),
            customer_name: "Dana Whitfield".to_string(),
            source,
            payment_status: PaymentStatus::Unpaid,
            linked_documents: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_find_prefers_source_match_across_jobs() {
        let now = Utc::now();

        // JOB-001 links INV-010; JOB-002 has it as its source. JOB-001
        // comes first in iteration order, but the source match wins.
        let mut linker = job("JOB-001", None);
        linker.link_document(DocumentKind::Invoice, "INV-010", now);
        let owner = job(
            "JOB-002",
            Some(DocumentRef::new(DocumentKind::Invoice, "INV-010")),
        );

        let jobs = vec![linker, owner];
        assert_eq!(
            find_in(&jobs, DocumentKind::Invoice, "INV-010").as_deref(),
            Some("JOB-002")
        );
    }

    #[test]
    fn test_find_falls_back_to_linked_documents() {
        let now = Utc::now();
        let mut linker = job("JOB-001", None);
        linker.link_document(DocumentKind::Agreement, "AGR-002", now);

        let jobs = vec![job("JOB-000", None), linker];
        assert_eq!(
            find_in(&jobs, DocumentKind::Agreement, "AGR-002").as_deref(),
            Some("JOB-001")
        );
        assert_eq!(find_in(&jobs, DocumentKind::Agreement, "AGR-404"), None);
    }

    #[test]
    fn test_find_distinguishes_kinds() {
        let owner = job(
            "JOB-001",
            Some(DocumentRef::new(DocumentKind::Estimate, "EST-004")),
        );
        let jobs = vec![owner];

        assert!(find_in(&jobs, DocumentKind::Estimate, "EST-004").is_some());
        assert!(find_in(&jobs, DocumentKind::Invoice, "EST-004").is_none());
    }

    #[test]
    fn test_map_overlap_yields_single_entry() {
        // One job with both a source link and a linked-document entry for
        // the same invoice ID: exactly one map entry, pointing at that job.
        let now = Utc::now();
        let mut owner = job(
            "JOB-001",
            Some(DocumentRef::new(DocumentKind::Invoice, "INV-010")),
        );
        owner.link_document(DocumentKind::Invoice, "INV-010", now);

        let map = build_map(&[owner], DocumentKind::Invoice);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("INV-010").map(String::as_str), Some("JOB-001"));
    }

    #[test]
    fn test_map_last_write_wins_across_jobs() {
        // JOB-001 owns INV-010 as source; JOB-002, later in iteration
        // order, links the same invoice. The later insert wins.
        let now = Utc::now();
        let owner = job(
            "JOB-001",
            Some(DocumentRef::new(DocumentKind::Invoice, "INV-010")),
        );
        let mut linker = job("JOB-002", None);
        linker.link_document(DocumentKind::Invoice, "INV-010", now);

        let map = build_map(&[owner, linker], DocumentKind::Invoice);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("INV-010").map(String::as_str), Some("JOB-002"));
    }

    #[test]
    fn test_map_filters_by_kind() {
        let now = Utc::now();
        let mut mixed = job(
            "JOB-001",
            Some(DocumentRef::new(DocumentKind::Estimate, "EST-004")),
        );
        mixed.link_document(DocumentKind::Invoice, "INV-010", now);

        let invoices = build_map(std::slice::from_ref(&mixed), DocumentKind::Invoice);
        assert_eq!(invoices.len(), 1);
        assert!(invoices.contains_key("INV-010"));

        let estimates = build_map(std::slice::from_ref(&mixed), DocumentKind::Estimate);
        assert_eq!(estimates.len(), 1);
        assert!(estimates.contains_key("EST-004"));
    }

    #[tokio::test]
    async fn test_store_backed_index() {
        use fieldops_db::{MemoryStore, Store};
        use std::sync::Arc;

        let store = Store::new(Arc::new(MemoryStore::new()));
        store
            .jobs()
            .insert(job(
                "JOB-001",
                Some(DocumentRef::new(DocumentKind::Invoice, "INV-010")),
            ))
            .await
            .unwrap();

        let index = JobIndex::new(&store);
        assert_eq!(
            index
                .find_job_for_document(DocumentKind::Invoice, "INV-010")
                .await
                .unwrap()
                .as_deref(),
            Some("JOB-001")
        );

        let map = index.lookup_map(DocumentKind::Invoice).await.unwrap();
        assert_eq!(map.len(), 1);
    }
}
