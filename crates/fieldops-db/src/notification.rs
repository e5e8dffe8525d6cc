//! # Notification Store
//!
//! Persistence for user-facing notifications.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Notification Lifecycle                              │
//! │                                                                         │
//! │   create_payment(kind, id)                                              │
//! │       │    message = "Payment received for {label} {id}"                │
//! │       ▼                                                                 │
//! │   [ unread ] ──mark_read──► [ read ]                                    │
//! │       │                        │                                        │
//! │       └──────── delete / delete_all ────────► gone                      │
//! │                                                                         │
//! │   Mutable only via the is_read flag. Broadcast to UI subscribers is     │
//! │   the sync crate's job; this store only persists.                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use fieldops_core::types::{DocumentKind, DocumentRef, Notification, NotificationKind};

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;

/// Collection key notifications are persisted under.
const NOTIFICATIONS_KEY: &str = "notifications";

// =============================================================================
// Notification Store
// =============================================================================

/// Persisted notification list, newest first.
#[derive(Clone)]
pub struct NotificationStore {
    kv: Arc<dyn KeyValueStore>,
}

impl NotificationStore {
    /// Creates a notification store over the given store.
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        NotificationStore { kv }
    }

    async fn load(&self) -> StoreResult<Vec<Notification>> {
        match self.kv.read(NOTIFICATIONS_KEY).await? {
            Some(raw) => {
                serde_json::from_str(&raw).map_err(|e| StoreError::corrupt(NOTIFICATIONS_KEY, e))
            }
            None => Ok(Vec::new()),
        }
    }

    async fn persist(&self, notifications: &[Notification]) -> StoreResult<()> {
        let raw = serde_json::to_string(notifications)?;
        self.kv.write(NOTIFICATIONS_KEY, &raw).await
    }

    /// Creates a payment notification for a document and persists it.
    ///
    /// The message comes from the fixed kind → label table on
    /// [`DocumentKind`], e.g. "Payment received for Estimate EST-007".
    pub async fn create_payment(
        &self,
        kind: DocumentKind,
        document_id: &str,
    ) -> StoreResult<Notification> {
        let notification = Notification {
            id: Uuid::new_v4().to_string(),
            kind: NotificationKind::Payment,
            message: format!("Payment received for {} {}", kind.label(), document_id),
            source: DocumentRef::new(kind, document_id),
            created_at: Utc::now(),
            is_read: false,
        };

        debug!(document_id, "Creating payment notification");

        let mut notifications = self.load().await?;
        notifications.insert(0, notification.clone());
        self.persist(&notifications).await?;

        Ok(notification)
    }

    /// Returns all notifications, newest first.
    pub async fn list(&self) -> StoreResult<Vec<Notification>> {
        self.load().await
    }

    /// Number of unread notifications.
    pub async fn unread_count(&self) -> StoreResult<usize> {
        let notifications = self.load().await?;
        Ok(notifications.iter().filter(|n| !n.is_read).count())
    }

    /// Flags a notification as read. Unknown ID returns `false`.
    pub async fn mark_read(&self, id: &str) -> StoreResult<bool> {
        let mut notifications = self.load().await?;

        let Some(notification) = notifications.iter_mut().find(|n| n.id == id) else {
            return Ok(false);
        };

        notification.is_read = true;
        self.persist(&notifications).await?;
        Ok(true)
    }

    /// Deletes one notification. Unknown ID returns `false`.
    pub async fn delete(&self, id: &str) -> StoreResult<bool> {
        let mut notifications = self.load().await?;
        let before = notifications.len();
        notifications.retain(|n| n.id != id);

        if notifications.len() == before {
            return Ok(false);
        }

        self.persist(&notifications).await?;
        Ok(true)
    }

    /// Deletes every notification.
    pub async fn delete_all(&self) -> StoreResult<()> {
        self.persist(&[]).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn store() -> NotificationStore {
        NotificationStore::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_payment_message() {
        let store = store();
        let n = store
            .create_payment(DocumentKind::Estimate, "EST-007")
            .await
            .unwrap();

        assert_eq!(n.message, "Payment received for Estimate EST-007");
        assert_eq!(n.source.id, "EST-007");
        assert!(!n.is_read);
    }

    #[tokio::test]
    async fn test_newest_first_and_unread_count() {
        let store = store();
        store
            .create_payment(DocumentKind::Invoice, "INV-001")
            .await
            .unwrap();
        store
            .create_payment(DocumentKind::Invoice, "INV-002")
            .await
            .unwrap();

        let all = store.list().await.unwrap();
        assert_eq!(all[0].source.id, "INV-002");
        assert_eq!(store.unread_count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_mark_read_and_delete() {
        let store = store();
        let n = store
            .create_payment(DocumentKind::Invoice, "INV-001")
            .await
            .unwrap();

        assert!(store.mark_read(&n.id).await.unwrap());
        assert!(!store.mark_read("missing").await.unwrap());
        assert_eq!(store.unread_count().await.unwrap(), 0);

        assert!(store.delete(&n.id).await.unwrap());
        assert!(!store.delete(&n.id).await.unwrap());
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_all() {
        let store = store();
        store
            .create_payment(DocumentKind::Invoice, "INV-001")
            .await
            .unwrap();
        store
            .create_payment(DocumentKind::Agreement, "AGR-001")
            .await
            .unwrap();

        store.delete_all().await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
    }
}
