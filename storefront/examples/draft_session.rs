//! End-to-end draft editing session against an in-process fake server.
//!
//! ```sh
//! cargo run --example draft_session
//! ```

use async_trait::async_trait;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use storefront::money::{parse_amount, to_amount_string};
use storefront::{
    wire_dispatcher, CurrencySettings, OrderDraftViewModel, OrdersRemote, RemoteError, StoreCache,
};
use shared::{Order, OrderDraft, OrderItem, OrderNote, OrderStatus, ShippingLine};

/// Fake site backend: echoes drafts back as canonical orders with
/// server-assigned ids and a flat 8% tax.
struct EchoRemote {
    next_order_id: AtomicI64,
}

impl EchoRemote {
    fn new() -> Self {
        Self {
            next_order_id: AtomicI64::new(1000),
        }
    }

    fn canonical(&self, draft: &OrderDraft, order_id: i64) -> Order {
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

        let shipping = draft
            .shipping_line
            .as_ref()
            .and_then(|l| parse_amount(&l.total))
            .unwrap_or(Decimal::ZERO);
        let tax = (items_total + shipping) * Decimal::new(8, 2);

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
            total: to_amount_string(items_total + shipping + tax),
            total_tax: to_amount_string(tax),
            shipping_total: to_amount_string(shipping),
            date_created: None,
            date_modified: None,
        }
    }
}

#[async_trait]
impl OrdersRemote for EchoRemote {
    async fn create_order(&self, _site_id: i64, draft: &OrderDraft) -> Result<Order, RemoteError> {
        let order_id = self.next_order_id.fetch_add(1, Ordering::SeqCst);
        tracing::info!(order_id, "server created order");
        Ok(self.canonical(draft, order_id))
    }

    async fn update_order(
        &self,
        _site_id: i64,
        order_id: i64,
        draft: &OrderDraft,
    ) -> Result<Order, RemoteError> {
        tracing::info!(order_id, "server updated order");
        Ok(self.canonical(draft, order_id))
    }

    async fn update_order_status(
        &self,
        site_id: i64,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<Order, RemoteError> {
        let mut draft = OrderDraft::new(site_id);
        draft.status = status;
        Ok(self.canonical(&draft, order_id))
    }

    async fn load_order_notes(
        &self,
        _site_id: i64,
        _order_id: i64,
    ) -> Result<Vec<OrderNote>, RemoteError> {
        Ok(Vec::new())
    }

    async fn add_order_note(
        &self,
        _site_id: i64,
        _order_id: i64,
        note: &str,
        is_customer_note: bool,
    ) -> Result<OrderNote, RemoteError> {
        Ok(OrderNote {
            note_id: 1,
            author: "demo".to_string(),
            note: note.to_string(),
            is_customer_note,
            date_created: Some(chrono::Utc::now()),
        })
    }
}

fn print_totals(vm: &OrderDraftViewModel) {
    let totals = vm.totals();
    println!("  items    {}", totals.items_total);
    if totals.should_show_shipping {
        println!("  shipping {}", totals.shipping_total);
    }
    if totals.should_show_taxes {
        println!("  taxes    {}", totals.taxes_total);
    }
    println!("  total    {}", totals.order_total);
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let remote = Arc::new(EchoRemote::new());
    let cache = StoreCache::new();
    let dispatcher = wire_dispatcher(remote, cache).expect("wiring is static");
    let mut vm = OrderDraftViewModel::new(123, dispatcher, CurrencySettings::default());

    println!("adding items...");
    vm.add_item(5, "Sticker pack", "8.50", 1);
    vm.set_item_quantity(5, 2);
    vm.set_shipping_line(Some(ShippingLine::new("Flat Rate", "flat_rate", "10")));
    print_totals(&vm);

    // Let the debounce window close and the sync complete
    tokio::time::sleep(Duration::from_millis(800)).await;
    vm.refresh();

    let order = vm.canonical_order().expect("sync completed");
    println!("\nsynced as order #{} ({})", order.order_id, vm.status_label());
    print_totals(&vm);
}
