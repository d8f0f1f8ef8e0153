use crate::infrastructure::KeyValueStore;
use cadence_core::GroupId;
use std::collections::HashSet;

/// Versioned storage key for the manual group order
const ORDER_KEY: &str = "cadence.group_order.v1";

/// Durable store for the user's manual group ordering.
///
/// The order is device-local and exclusively client-owned; the server
/// never sees it. Persistence is best-effort: unavailable storage or a
/// corrupt stored value degrade to "no saved order", and the feed falls
/// back to server fetch order instead of failing.
#[derive(Debug, Clone)]
pub struct OrderStore<S> {
    store: S,
}

impl<S: KeyValueStore> OrderStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the persisted order. Missing, unparsable, or unreadable
    /// values all return an empty order.
    pub async fn load_order(&self) -> Vec<GroupId> {
        let raw = match self.store.get(ORDER_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!("Order storage unreadable, falling back to fetch order: {}", e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<GroupId>>(&raw) {
            Ok(ids) => ids,
            Err(e) => {
                tracing::warn!("Stored group order is corrupt, discarding: {}", e);
                Vec::new()
            }
        }
    }

    /// Persist an order, deduplicating on first occurrence. Never fails:
    /// a storage error is logged and swallowed.
    pub async fn save_order(&self, ids: &[GroupId]) {
        let mut seen: HashSet<GroupId> = HashSet::with_capacity(ids.len());
        let deduped: Vec<GroupId> = ids.iter().copied().filter(|id| seen.insert(*id)).collect();

        let raw = match serde_json::to_string(&deduped) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Could not serialize group order: {}", e);
                return;
            }
        };

        if let Err(e) = self.store.set(ORDER_KEY, &raw).await {
            tracing::warn!("Could not persist group order: {}", e);
        }
    }

    /// Drop the given ids from the persisted order (after a hide).
    pub async fn remove(&self, ids: &[GroupId]) {
        let current = self.load_order().await;
        if current.is_empty() {
            return;
        }

        let remaining: Vec<GroupId> =
            current.into_iter().filter(|id| !ids.contains(id)).collect();
        self.save_order(&remaining).await;
    }
}
