//! In-memory entity cache with upsert semantics
//!
//! The cache is the read-shared side of the store layer: stores are the
//! only writers, view models read. Entries are keyed by their natural
//! identity and that key is immutable after insertion - an upsert for an
//! existing key mutates fields in place, never replaces the identity.
//!
//! Order notes are children of an order: a note upsert for an order that
//! is not cached is refused (the caller decides whether to warn), so the
//! cache can never hold an orphaned child record.

use parking_lot::RwLock;
use shared::{Order, OrderNote};
use std::collections::HashMap;
use std::sync::Arc;

/// Identity key for a cached order
pub type OrderKey = (i64, i64); // (site_id, order_id)

#[derive(Default)]
struct CacheInner {
    orders: HashMap<OrderKey, Order>,
    /// Notes per parent order, upserted by note_id
    notes: HashMap<OrderKey, Vec<OrderNote>>,
}

/// Shared handle to the entity cache
#[derive(Clone, Default)]
pub struct StoreCache {
    inner: Arc<RwLock<CacheInner>>,
}

impl StoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a cached order by key
    pub fn order(&self, site_id: i64, order_id: i64) -> Option<Order> {
        self.inner.read().orders.get(&(site_id, order_id)).cloned()
    }

    /// Update-or-insert a canonical order
    pub fn upsert_order(&self, order: Order) {
        let key = (order.site_id, order.order_id);
        let mut inner = self.inner.write();
        match inner.orders.get_mut(&key) {
            Some(existing) => *existing = order,
            None => {
                inner.orders.insert(key, order);
            }
        }
    }

    /// Update-or-insert a note under its parent order.
    ///
    /// Returns `false` without touching the cache when the parent order
    /// is absent and the note is not already cached.
    pub fn upsert_note(&self, site_id: i64, order_id: i64, note: OrderNote) -> bool {
        let key = (site_id, order_id);
        let mut inner = self.inner.write();

        if let Some(notes) = inner.notes.get_mut(&key) {
            if let Some(existing) = notes.iter_mut().find(|n| n.note_id == note.note_id) {
                *existing = note;
                return true;
            }
            notes.push(note);
            return true;
        }

        if !inner.orders.contains_key(&key) {
            return false;
        }
        inner.notes.insert(key, vec![note]);
        true
    }

    /// Cached notes for an order, if any
    pub fn notes(&self, site_id: i64, order_id: i64) -> Vec<OrderNote> {
        self.inner
            .read()
            .notes
            .get(&(site_id, order_id))
            .cloned()
            .unwrap_or_default()
    }

    /// Number of cached orders
    pub fn order_count(&self) -> usize {
        self.inner.read().orders.len()
    }

    /// Number of cached notes under an order
    pub fn note_count(&self, site_id: i64, order_id: i64) -> usize {
        self.inner
            .read()
            .notes
            .get(&(site_id, order_id))
            .map_or(0, Vec::len)
    }
}
