//! Test double for [`OrdersRemote`]
//!
//! Echoes drafts back as canonical orders the way the real backend
//! does: every line survives, ids get assigned, and totals are
//! "server-computed" from the payload (plus a configurable tax).

use super::{OrdersRemote, RemoteError};
use crate::money::{parse_amount, to_amount_string};
use async_trait::async_trait;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use shared::{Order, OrderDraft, OrderItem, OrderNote, OrderStatus};
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

#[derive(Default)]
pub struct MockOrdersRemote {
    next_order_id: AtomicI64,
    next_note_id: AtomicI64,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    /// When set, every call fails with this error
    failure: Mutex<Option<RemoteError>>,
    /// Tax the "server" adds to every synced order
    tax: Mutex<Option<String>>,
    notes: Mutex<Vec<OrderNote>>,
    /// Simulated network latency for order create/update calls
    latency: Mutex<Option<std::time::Duration>>,
}

impl MockOrdersRemote {
    pub fn new() -> Self {
        Self {
            next_order_id: AtomicI64::new(963),
            next_note_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    pub fn fail_with(&self, error: RemoteError) {
        *self.failure.lock() = Some(error);
    }

    pub fn succeed(&self) {
        *self.failure.lock() = None;
    }

    /// Make the "server" report this tax on every order
    pub fn set_tax(&self, tax: &str) {
        *self.tax.lock() = Some(tax.to_string());
    }

    /// Seed notes returned by `load_order_notes`
    pub fn set_notes(&self, notes: Vec<OrderNote>) {
        *self.notes.lock() = notes;
    }

    /// Delay order create/update responses by this long
    pub fn set_latency(&self, latency: std::time::Duration) {
        *self.latency.lock() = Some(latency);
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), RemoteError> {
        match self.failure.lock().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    /// Build the canonical order a real server would return for a draft
    fn canonical_from_draft(&self, draft: &OrderDraft, order_id: i64) -> Order {
        let mut items_total = Decimal::ZERO;
        let line_items: Vec<OrderItem> = draft
            .items
            .iter()
            .enumerate()
            .map(|(idx, item)| {
                let unit = parse_amount(&item.price).unwrap_or(Decimal::ZERO);
                let line_total = unit * Decimal::from(item.quantity);
                items_total += line_total;
                OrderItem {
                    item_id: idx as i64 + 1,
                    product_id: item.product_id,
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price: item.price.clone(),
                    subtotal: to_amount_string(line_total),
                    total: to_amount_string(line_total),
                }
            })
            .collect();

        let shipping_total = draft
            .shipping_line
            .as_ref()
            .and_then(|l| parse_amount(&l.total))
            .unwrap_or(Decimal::ZERO);
        let fees_total = draft
            .fee_line
            .as_ref()
            .and_then(|l| parse_amount(&l.total))
            .unwrap_or(Decimal::ZERO);
        let tax = self
            .tax
            .lock()
            .as_deref()
            .and_then(parse_amount)
            .unwrap_or(Decimal::ZERO);

        Order {
            site_id: draft.site_id,
            order_id,
            status: draft.status,
            currency: "USD".to_string(),
            line_items,
            shipping_lines: draft.shipping_line.clone().into_iter().collect(),
            fee_lines: draft.fee_line.clone().into_iter().collect(),
            billing: draft.billing.clone(),
            shipping: draft.shipping.clone(),
            customer_note: draft.customer_note.clone(),
            total: to_amount_string(items_total + shipping_total + fees_total + tax),
            total_tax: to_amount_string(tax),
            shipping_total: to_amount_string(shipping_total),
            date_created: None,
            date_modified: None,
        }
    }
}

#[async_trait]
impl OrdersRemote for MockOrdersRemote {
    async fn create_order(&self, _site_id: i64, draft: &OrderDraft) -> Result<Order, RemoteError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        self.check_failure()?;
        let order_id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        Ok(self.canonical_from_draft(draft, order_id))
    }

    async fn update_order(
        &self,
        _site_id: i64,
        order_id: i64,
        draft: &OrderDraft,
    ) -> Result<Order, RemoteError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;
        self.check_failure()?;
        Ok(self.canonical_from_draft(draft, order_id))
    }

    async fn update_order_status(
        &self,
        site_id: i64,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<Order, RemoteError> {
        self.check_failure()?;
        let mut draft = OrderDraft::new(site_id);
        draft.status = status;
        Ok(self.canonical_from_draft(&draft, order_id))
    }

    async fn load_order_notes(
        &self,
        _site_id: i64,
        _order_id: i64,
    ) -> Result<Vec<OrderNote>, RemoteError> {
        self.check_failure()?;
        Ok(self.notes.lock().clone())
    }

    async fn add_order_note(
        &self,
        _site_id: i64,
        _order_id: i64,
        note: &str,
        is_customer_note: bool,
    ) -> Result<OrderNote, RemoteError> {
        self.check_failure()?;
        Ok(OrderNote {
            note_id: self.next_note_id.fetch_add(1, Ordering::SeqCst),
            author: "mock".to_string(),
            note: note.to_string(),
            is_customer_note,
            date_created: Some(chrono::Utc::now()),
        })
    }
}
