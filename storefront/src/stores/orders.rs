//! Order store - create/update orders against the remote and cache the
//! canonical results

use crate::cache::StoreCache;
use crate::dispatcher::{Action, ActionProcessor, Completion, OrderAction};
use crate::remote::OrdersRemote;
use shared::{Order, OrderDraft, OrderStatus};
use std::sync::Arc;

pub struct OrderStore {
    remote: Arc<dyn OrdersRemote>,
    cache: StoreCache,
}

impl OrderStore {
    pub fn new(remote: Arc<dyn OrdersRemote>, cache: StoreCache) -> Self {
        Self { remote, cache }
    }
}

impl ActionProcessor for OrderStore {
    fn on_action(&self, action: Action) {
        let Action::Order(action) = action else {
            tracing::error!(kind = ?action.kind(), "OrderStore received an unsupported action");
            debug_assert!(false, "OrderStore received an unsupported action");
            return;
        };

        match action {
            OrderAction::CreateOrder {
                site_id,
                draft,
                respond_to,
            } => self.create_order(site_id, draft, respond_to),
            OrderAction::UpdateOrder {
                site_id,
                order_id,
                draft,
                respond_to,
            } => self.update_order(site_id, order_id, draft, respond_to),
            OrderAction::UpdateOrderStatus {
                site_id,
                order_id,
                status,
                respond_to,
            } => self.update_order_status(site_id, order_id, status, respond_to),
        }
    }
}

impl OrderStore {
    fn create_order(&self, site_id: i64, draft: OrderDraft, respond_to: Completion<Order>) {
        let remote = Arc::clone(&self.remote);
        let cache = self.cache.clone();
        tokio::spawn(async move {
            match remote.create_order(site_id, &draft).await {
                Ok(order) => {
                    cache.upsert_order(order.clone());
                    let _ = respond_to.send(Ok(order));
                }
                Err(error) => {
                    tracing::warn!(site_id, %error, "order creation failed");
                    let _ = respond_to.send(Err(error));
                }
            }
        });
    }

    fn update_order(
        &self,
        site_id: i64,
        order_id: i64,
        draft: OrderDraft,
        respond_to: Completion<Order>,
    ) {
        let remote = Arc::clone(&self.remote);
        let cache = self.cache.clone();
        tokio::spawn(async move {
            match remote.update_order(site_id, order_id, &draft).await {
                Ok(order) => {
                    cache.upsert_order(order.clone());
                    let _ = respond_to.send(Ok(order));
                }
                Err(error) => {
                    tracing::warn!(site_id, order_id, %error, "order update failed");
                    let _ = respond_to.send(Err(error));
                }
            }
        });
    }

    fn update_order_status(
        &self,
        site_id: i64,
        order_id: i64,
        status: OrderStatus,
        respond_to: Completion<Order>,
    ) {
        let remote = Arc::clone(&self.remote);
        let cache = self.cache.clone();
        tokio::spawn(async move {
            match remote.update_order_status(site_id, order_id, status).await {
                Ok(order) => {
                    cache.upsert_order(order.clone());
                    let _ = respond_to.send(Ok(order));
                }
                Err(error) => {
                    tracing::warn!(site_id, order_id, %error, "order status update failed");
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
    use crate::remote::RemoteError;
    use tokio::sync::oneshot;

    fn store(remote: Arc<MockOrdersRemote>, cache: StoreCache) -> OrderStore {
        OrderStore::new(remote, cache)
    }

    fn draft_with_item() -> OrderDraft {
        let mut draft = OrderDraft::new(123);
        draft.add_item(5, "Sticker pack", "8.50", 2);
        draft
    }

    #[tokio::test]
    async fn create_order_upserts_canonical_order_before_completion() {
        let remote = Arc::new(MockOrdersRemote::new());
        let cache = StoreCache::new();
        let store = store(remote, cache.clone());

        let (tx, rx) = oneshot::channel();
        store.on_action(Action::Order(OrderAction::CreateOrder {
            site_id: 123,
            draft: draft_with_item(),
            respond_to: tx,
        }));

        let order = rx.await.unwrap().unwrap();
        assert_eq!(order.total, "17.00");
        // The upsert happened before the completion resolved
        assert_eq!(cache.order(123, order.order_id), Some(order));
    }

    #[tokio::test]
    async fn failed_create_leaves_cache_untouched() {
        let remote = Arc::new(MockOrdersRemote::new());
        remote.fail_with(RemoteError::UnacceptableStatus(500));
        let cache = StoreCache::new();
        let store = store(remote, cache.clone());

        let (tx, rx) = oneshot::channel();
        store.on_action(Action::Order(OrderAction::CreateOrder {
            site_id: 123,
            draft: draft_with_item(),
            respond_to: tx,
        }));

        assert!(matches!(
            rx.await.unwrap(),
            Err(RemoteError::UnacceptableStatus(500))
        ));
        assert_eq!(cache.order_count(), 0);
    }

    #[tokio::test]
    async fn update_order_replaces_the_cached_entry_in_place() {
        let remote = Arc::new(MockOrdersRemote::new());
        let cache = StoreCache::new();
        let store = store(remote, cache.clone());

        let (tx, rx) = oneshot::channel();
        store.on_action(Action::Order(OrderAction::CreateOrder {
            site_id: 123,
            draft: draft_with_item(),
            respond_to: tx,
        }));
        let created = rx.await.unwrap().unwrap();

        let mut draft = draft_with_item();
        draft.set_item_quantity(5, 4);
        let (tx, rx) = oneshot::channel();
        store.on_action(Action::Order(OrderAction::UpdateOrder {
            site_id: 123,
            order_id: created.order_id,
            draft,
            respond_to: tx,
        }));
        let updated = rx.await.unwrap().unwrap();

        assert_eq!(updated.order_id, created.order_id);
        assert_eq!(updated.total, "34.00");
        assert_eq!(cache.order_count(), 1);
        assert_eq!(cache.order(123, created.order_id).unwrap().total, "34.00");
    }
}
