//! # Notification Hub
//!
//! Broadcast fan-out of notifications to subscribed UI components.
//!
//! ## Delivery Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Notification Delivery                               │
//! │                                                                         │
//! │   PaymentSyncEngine ──publish──► broadcast channel ──► subscriber 1     │
//! │                                         │                               │
//! │                                         ├────────────► subscriber 2     │
//! │                                         └────────────► (none is fine)   │
//! │                                                                         │
//! │   • At-most-once: no retry, no redelivery, no persistence of the        │
//! │     event itself (the Notification record IS persisted, by the store)   │
//! │   • publish with zero subscribers is a successful no-op                 │
//! │   • A slow subscriber that falls behind the channel capacity loses      │
//! │     the oldest events (tokio broadcast lagging semantics)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::broadcast;
use tracing::trace;

use fieldops_core::types::Notification;

/// Default buffered event capacity per subscriber.
const DEFAULT_CAPACITY: usize = 64;

/// At-most-once notification fan-out.
#[derive(Clone)]
pub struct NotificationHub {
    tx: broadcast::Sender<Notification>,
}

impl NotificationHub {
    /// Creates a hub with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates a hub with an explicit channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        NotificationHub { tx }
    }

    /// Subscribes to future notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }

    /// Publishes a notification to all current subscribers.
    ///
    /// Fire-and-forget: returns the number of subscribers reached, which
    /// is zero (not an error) when nobody is listening.
    pub fn publish(&self, notification: &Notification) -> usize {
        match self.tx.send(notification.clone()) {
            Ok(reached) => reached,
            Err(_) => {
                trace!(id = %notification.id, "No notification subscribers");
                0
            }
        }
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
