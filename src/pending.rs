//! The deferred purchase-request slot
//!
//! When a visitor submits a purchase request without being signed in, the
//! request is parked in a single well-known storage slot and replayed after
//! the next successful authentication. The slot holds at most one entry; a
//! second attempt overwrites the first.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::storage::KeyValueStore;

/// Tag identifying a deferred purchase request in the slot
pub const PENDING_ACTION_TAG: &str = "pendingRequestAfterModal";

/// A purchase request parked across the login redirect
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingAction {
    /// Discriminator; entries written by this client always carry
    /// [`PENDING_ACTION_TAG`]
    pub action: String,

    /// The product the request targets
    #[serde(rename = "productId")]
    pub product_id: String,

    /// The requested amount, as the visitor typed it
    pub quantity: String,
}

impl PendingAction {
    /// Create a new tagged pending action
    pub fn new(product_id: &str, quantity: &str) -> Self {
        Self {
            action: PENDING_ACTION_TAG.to_string(),
            product_id: product_id.to_string(),
            quantity: quantity.to_string(),
        }
    }
}

/// The single pending-action slot, bound to a storage key
pub struct PendingStore {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl PendingStore {
    /// Create a new PendingStore over the given slot
    pub(crate) fn new(store: Arc<dyn KeyValueStore>, key: String) -> Self {
        Self { store, key }
    }

    /// Park a purchase request, overwriting any previous entry
    pub fn set(&self, product_id: &str, quantity: &str) {
        let value = serde_json::json!({
            "action": PENDING_ACTION_TAG,
            "productId": product_id,
            "quantity": quantity,
        });
        self.store.set(&self.key, &value.to_string());
    }

    /// Read and clear the slot in one synchronous call.
    ///
    /// Returns `None` when the slot is empty or its content is not a
    /// well-formed tagged action; a malformed entry is a stale artifact,
    /// not a user action, so it is discarded without surfacing an error.
    /// The slot is cleared in every case.
    pub fn take(&self) -> Option<PendingAction> {
        let raw = self.store.get(&self.key)?;
        self.store.delete(&self.key);

        match serde_json::from_str::<PendingAction>(&raw) {
            Ok(action) if action.action == PENDING_ACTION_TAG => Some(action),
            Ok(action) => {
                warn!(tag = %action.action, "discarding pending entry with unrecognized tag");
                None
            }
            Err(err) => {
                warn!(%err, "discarding malformed pending entry");
                None
            }
        }
    }

    /// Drop the slot without reading it
    pub fn clear(&self) {
        self.store.delete(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn pending() -> (Arc<MemoryStore>, PendingStore) {
        let store = Arc::new(MemoryStore::new());
        let pending = PendingStore::new(store.clone(), "pendingRequest".to_string());
        (store, pending)
    }

    #[test]
    fn take_returns_the_action_once_then_none() {
        let (_, pending) = pending();
        pending.set("7", "3");

        let action = pending.take().unwrap();
        assert_eq!(action.product_id, "7");
        assert_eq!(action.quantity, "3");
        assert_eq!(action.action, PENDING_ACTION_TAG);

        assert_eq!(pending.take(), None);
    }

    #[test]
    fn second_set_overwrites_the_first() {
        let (_, pending) = pending();
        pending.set("7", "3");
        pending.set("9", "1");

        let action = pending.take().unwrap();
        assert_eq!(action.product_id, "9");
        assert_eq!(action.quantity, "1");
    }

    #[test]
    fn missing_field_reads_as_none_and_clears_the_slot() {
        let (store, pending) = pending();
        store.set(
            "pendingRequest",
            r#"{"action":"pendingRequestAfterModal","quantity":"3"}"#,
        );

        assert_eq!(pending.take(), None);
        assert_eq!(store.get("pendingRequest"), None);
    }

    #[test]
    fn unrecognized_tag_reads_as_none_and_clears_the_slot() {
        let (store, pending) = pending();
        store.set(
            "pendingRequest",
            r#"{"action":"somethingElse","productId":"7","quantity":"3"}"#,
        );

        assert_eq!(pending.take(), None);
        assert_eq!(store.get("pendingRequest"), None);
    }

    #[test]
    fn garbage_reads_as_none_and_clears_the_slot() {
        let (store, pending) = pending();
        store.set("pendingRequest", "not json at all");

        assert_eq!(pending.take(), None);
        assert_eq!(store.get("pendingRequest"), None);
    }

    #[test]
    fn empty_slot_reads_as_none() {
        let (_, pending) = pending();
        assert_eq!(pending.take(), None);
    }

    #[test]
    fn clear_drops_the_slot_unread() {
        let (store, pending) = pending();
        pending.set("7", "3");
        pending.clear();

        assert_eq!(store.get("pendingRequest"), None);
        assert_eq!(pending.take(), None);
    }
}
