//! Order note store
//!
//! Notes are children of an order. A fetched or created note is
//! upserted by note id; when the parent order is not cached the write
//! is dropped with a warning so no orphaned child record is ever
//! created. A dropped write is not a caller-visible failure - the
//! completion still resolves with the remote result.

use crate::cache::StoreCache;
use crate::dispatcher::{Action, ActionProcessor, Completion, OrderNoteAction};
use crate::remote::OrdersRemote;
use shared::OrderNote;
use std::sync::Arc;

pub struct OrderNoteStore {
    remote: Arc<dyn OrdersRemote>,
    cache: StoreCache,
}

impl OrderNoteStore {
    pub fn new(remote: Arc<dyn OrdersRemote>, cache: StoreCache) -> Self {
        Self { remote, cache }
    }
}

impl ActionProcessor for OrderNoteStore {
    fn on_action(&self, action: Action) {
        let Action::OrderNote(action) = action else {
            tracing::error!(kind = ?action.kind(), "OrderNoteStore received an unsupported action");
            debug_assert!(false, "OrderNoteStore received an unsupported action");
            return;
        };

        match action {
            OrderNoteAction::RetrieveOrderNotes {
                site_id,
                order_id,
                respond_to,
            } => self.retrieve_order_notes(site_id, order_id, respond_to),
            OrderNoteAction::AddOrderNote {
                site_id,
                order_id,
                note,
                is_customer_note,
                respond_to,
            } => self.add_order_note(site_id, order_id, note, is_customer_note, respond_to),
        }
    }
}

/// Upsert a note under its parent, warning when the parent is absent
fn upsert_stored_note(cache: &StoreCache, site_id: i64, order_id: i64, note: &OrderNote) {
    if !cache.upsert_note(site_id, order_id, note.clone()) {
        tracing::warn!(
            note_id = note.note_id,
            order_id,
            "could not persist order note, parent order is not cached"
        );
    }
}

impl OrderNoteStore {
    fn retrieve_order_notes(
        &self,
        site_id: i64,
        order_id: i64,
        respond_to: Completion<Vec<OrderNote>>,
    ) {
        let remote = Arc::clone(&self.remote);
        let cache = self.cache.clone();
        tokio::spawn(async move {
            match remote.load_order_notes(site_id, order_id).await {
                Ok(notes) => {
                    for note in &notes {
                        upsert_stored_note(&cache, site_id, order_id, note);
                    }
                    let _ = respond_to.send(Ok(notes));
                }
                Err(error) => {
                    tracing::warn!(site_id, order_id, %error, "loading order notes failed");
                    let _ = respond_to.send(Err(error));
                }
            }
        });
    }

    fn add_order_note(
        &self,
        site_id: i64,
        order_id: i64,
        note: String,
        is_customer_note: bool,
        respond_to: Completion<OrderNote>,
    ) {
        let remote = Arc::clone(&self.remote);
        let cache = self.cache.clone();
        tokio::spawn(async move {
            match remote
                .add_order_note(site_id, order_id, &note, is_customer_note)
                .await
            {
                Ok(note) => {
                    upsert_stored_note(&cache, site_id, order_id, &note);
                    let _ = respond_to.send(Ok(note));
                }
                Err(error) => {
                    tracing::warn!(site_id, order_id, %error, "adding order note failed");
                    let _ = respond_to.send(Err(error));
                }
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote::mock::MockOrdersRemote;
    use shared::{Order, OrderDraft, OrderStatus};
    use tokio::sync::oneshot;

    fn cached_order(site_id: i64, order_id: i64) -> Order {
        Order {
            site_id,
            order_id,
            status: OrderStatus::Pending,
            currency: "USD".to_string(),
            line_items: vec![],
            shipping_lines: vec![],
            fee_lines: vec![],
            billing: None,
            shipping: None,
            customer_note: None,
            total: "0.00".to_string(),
            total_tax: String::new(),
            shipping_total: String::new(),
            date_created: None,
            date_modified: None,
        }
    }

    fn note(note_id: i64, body: &str) -> OrderNote {
        OrderNote {
            note_id,
            author: "admin".to_string(),
            note: body.to_string(),
            is_customer_note: false,
            date_created: None,
        }
    }

    #[tokio::test]
    async fn retrieved_notes_are_cached_under_their_parent() {
        let remote = Arc::new(MockOrdersRemote::new());
        remote.set_notes(vec![note(7, "packed"), note(8, "shipped")]);
        let cache = StoreCache::new();
        cache.upsert_order(cached_order(123, 10));
        let store = OrderNoteStore::new(remote, cache.clone());

        let (tx, rx) = oneshot::channel();
        store.on_action(Action::OrderNote(OrderNoteAction::RetrieveOrderNotes {
            site_id: 123,
            order_id: 10,
            respond_to: tx,
        }));

        let notes = rx.await.unwrap().unwrap();
        assert_eq!(notes.len(), 2);
        assert_eq!(cache.note_count(123, 10), 2);
    }

    #[tokio::test]
    async fn notes_without_cached_parent_are_dropped_but_still_returned() {
        let remote = Arc::new(MockOrdersRemote::new());
        remote.set_notes(vec![note(7, "packed")]);
        let cache = StoreCache::new();
        let store = OrderNoteStore::new(remote, cache.clone());

        let (tx, rx) = oneshot::channel();
        store.on_action(Action::OrderNote(OrderNoteAction::RetrieveOrderNotes {
            site_id: 123,
            order_id: 10,
            respond_to: tx,
        }));

        // The caller still gets the notes; only the cache write is dropped
        let notes = rx.await.unwrap().unwrap();
        assert_eq!(notes.len(), 1);
        assert_eq!(cache.note_count(123, 10), 0);
    }

    #[tokio::test]
    async fn retrieving_twice_does_not_duplicate_cached_notes() {
        let remote = Arc::new(MockOrdersRemote::new());
        remote.set_notes(vec![note(7, "packed")]);
        let cache = StoreCache::new();
        cache.upsert_order(cached_order(123, 10));
        let store = OrderNoteStore::new(remote, cache.clone());

        for _ in 0..2 {
            let (tx, rx) = oneshot::channel();
            store.on_action(Action::OrderNote(OrderNoteAction::RetrieveOrderNotes {
                site_id: 123,
                order_id: 10,
                respond_to: tx,
            }));
            rx.await.unwrap().unwrap();
        }

        assert_eq!(cache.note_count(123, 10), 1);
    }

    #[tokio::test]
    async fn added_note_is_cached_under_its_parent() {
        let remote = Arc::new(MockOrdersRemote::new());
        let cache = StoreCache::new();
        cache.upsert_order(cached_order(123, 10));
        let store = OrderNoteStore::new(remote, cache.clone());

        let (tx, rx) = oneshot::channel();
        store.on_action(Action::OrderNote(OrderNoteAction::AddOrderNote {
            site_id: 123,
            order_id: 10,
            note: "Fragile".to_string(),
            is_customer_note: true,
            respond_to: tx,
        }));

        let created = rx.await.unwrap().unwrap();
        assert!(created.is_customer_note);
        assert_eq!(cache.note_count(123, 10), 1);
    }

    #[tokio::test]
    #[should_panic(expected = "unsupported action")]
    async fn unsupported_action_kind_is_a_programming_error() {
        let remote = Arc::new(MockOrdersRemote::new());
        let store = OrderNoteStore::new(remote, StoreCache::new());
        let (tx, _rx) = oneshot::channel();
        store.on_action(Action::Order(crate::dispatcher::OrderAction::CreateOrder {
            site_id: 123,
            draft: OrderDraft::new(123),
            respond_to: tx,
        }));
    }
}
