//! Order draft view model
//!
//! The single writer of an [`OrderDraft`]. Every edit method mutates
//! the draft, clears any stale notice, and hands a full clone of the
//! draft to the synchronizer. Totals shown while a sync is pending are
//! computed locally from the draft; once a canonical order arrives,
//! server-only figures (taxes, so far) are merged in.

use crate::money::{parse_amount, CurrencyFormatter, CurrencySettings};
use crate::sync::{RemoteOrderSynchronizer, SyncState, SyncUpdate};
use crate::Dispatcher;
use rust_decimal::Decimal;
use shared::{Address, FeeLine, Order, OrderDraft, OrderStatus, ShippingLine};
use std::sync::Arc;
use tokio::sync::watch;


/// Transient, user-dismissable banner message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub(crate) fn sync_failed() -> Self {
        Self {
            message: "Unable to save changes to the order. Please try again.".to_string(),
        }
    }
}

/// Display snapshot of the payment section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentTotals {
    pub items_total: String,
    pub shipping_total: String,
    pub fees_total: String,
    pub taxes_total: String,
    pub order_total: String,
    /// Show the shipping row only once a shipping line exists
    pub should_show_shipping: bool,
    pub should_show_fees: bool,
    /// Taxes are server-computed, so the row appears only after a sync
    pub should_show_taxes: bool,
    /// A sync is in flight; totals may be about to change
    pub is_loading: bool,
}

/// Display snapshot of the customer section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerSummary {
    pub is_data_available: bool,
    pub full_name: Option<String>,
    pub billing_formatted: String,
    pub shipping_formatted: String,
}

/// View model backing the order creation/editing screen
pub struct OrderDraftViewModel {
    draft: OrderDraft,
    synchronizer: RemoteOrderSynchronizer,
    updates: watch::Receiver<SyncUpdate>,
    formatter: CurrencyFormatter,
    canonical: Option<Order>,
    notice: Option<Notice>,
    is_loading: bool,
}

impl OrderDraftViewModel {
    pub fn new(site_id: i64, dispatcher: Arc<Dispatcher>, currency: CurrencySettings) -> Self {
        Self::with_synchronizer(site_id, RemoteOrderSynchronizer::new(dispatcher), currency)
    }

    pub fn with_synchronizer(
        site_id: i64,
        synchronizer: RemoteOrderSynchronizer,
        currency: CurrencySettings,
    ) -> Self {
        let updates = synchronizer.subscribe();
        Self {
            draft: OrderDraft::new(site_id),
            synchronizer,
            updates,
            formatter: CurrencyFormatter::new(currency),
            canonical: None,
            notice: None,
            is_loading: false,
        }
    }

    // ----- edits -----

    /// Add a product line, or bump quantity if already present
    pub fn add_item(
        &mut self,
        product_id: i64,
        name: impl Into<String>,
        price: impl Into<String>,
        quantity: u32,
    ) {
        self.draft.add_item(product_id, name, price, quantity);
        self.draft_edited();
    }

    /// Set a line's quantity; 0 removes the line
    pub fn set_item_quantity(&mut self, product_id: i64, quantity: u32) {
        self.draft.set_item_quantity(product_id, quantity);
        self.draft_edited();
    }

    pub fn remove_item(&mut self, product_id: i64) {
        self.draft.remove_item(product_id);
        self.draft_edited();
    }

    /// Set or clear the draft's single shipping line
    pub fn set_shipping_line(&mut self, line: Option<ShippingLine>) {
        self.draft.shipping_line = line;
        self.draft_edited();
    }

    /// Set or clear the draft's single fee line
    pub fn set_fee_line(&mut self, line: Option<FeeLine>) {
        self.draft.fee_line = line;
        self.draft_edited();
    }

    pub fn set_addresses(&mut self, billing: Option<Address>, shipping: Option<Address>) {
        self.draft.billing = billing;
        self.draft.shipping = shipping;
        self.draft_edited();
    }

    pub fn update_order_status(&mut self, status: OrderStatus) {
        self.draft.status = status;
        self.draft_edited();
    }

    pub fn set_customer_note(&mut self, note: Option<String>) {
        self.draft.customer_note = note;
        self.draft_edited();
    }

    /// Every edit supersedes a stale failure notice and feeds the
    /// synchronizer the full current draft.
    fn draft_edited(&mut self) {
        self.notice = None;
        self.synchronizer.order_edited(self.draft.clone());
    }

    // ----- sync observation -----

    /// Fold the latest synchronizer update into view state
    pub fn refresh(&mut self) {
        let update = self.updates.borrow_and_update().clone();
        self.apply_update(update);
    }

    /// Wait for the next synchronizer transition, then fold it in
    pub async fn changed(&mut self) {
        if self.updates.changed().await.is_ok() {
            self.refresh();
        }
    }

    fn apply_update(&mut self, update: SyncUpdate) {
        self.is_loading = update.state == SyncState::Syncing;
        match update.state {
            SyncState::Error => self.notice = Some(Notice::sync_failed()),
            SyncState::Synced => self.notice = None,
            _ => {}
        }
        if let Some(order) = update.order {
            self.draft.order_id = Some(order.order_id);
            self.canonical = Some(order);
        }
    }

    // ----- display -----

    pub fn totals(&self) -> PaymentTotals {
        let items: Decimal = self
            .draft
            .items
            .iter()
            .map(|item| {
                parse_amount(&item.price).unwrap_or(Decimal::ZERO) * Decimal::from(item.quantity)
            })
            .sum();
        let shipping = self
            .draft
            .shipping_line
            .as_ref()
            .and_then(|line| parse_amount(&line.total))
            .unwrap_or(Decimal::ZERO);
        let fees = self
            .draft
            .fee_line
            .as_ref()
            .and_then(|line| parse_amount(&line.total))
            .unwrap_or(Decimal::ZERO);
        let taxes = self
            .canonical
            .as_ref()
            .and_then(|order| parse_amount(&order.total_tax))
            .unwrap_or(Decimal::ZERO);

        PaymentTotals {
            items_total: self.formatter.format(items),
            shipping_total: self.formatter.format(shipping),
            fees_total: self.formatter.format(fees),
            taxes_total: self.formatter.format(taxes),
            order_total: self.formatter.format(items + shipping + fees + taxes),
            should_show_shipping: self.draft.shipping_line.is_some(),
            should_show_fees: self.draft.fee_line.is_some(),
            should_show_taxes: self
                .canonical
                .as_ref()
                .is_some_and(|order| order.has_taxes()),
            is_loading: self.is_loading,
        }
    }

    pub fn customer_summary(&self) -> CustomerSummary {
        let billing = self.draft.billing.as_ref();
        let shipping = self.draft.shipping.as_ref();
        let is_data_available = billing.is_some_and(Address::has_data)
            || shipping.is_some_and(Address::has_data);
        let full_name = billing
            .map(Address::full_name)
            .filter(|name| !name.is_empty());

        CustomerSummary {
            is_data_available,
            full_name,
            billing_formatted: billing.map(Address::formatted).unwrap_or_default(),
            shipping_formatted: shipping.map(Address::formatted).unwrap_or_default(),
        }
    }

    /// Status badge text for the current draft
    pub fn status_label(&self) -> &'static str {
        self.draft.status.label()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn draft(&self) -> &OrderDraft {
        &self.draft
    }

    /// Latest server-confirmed order, once any sync succeeded
    pub fn canonical_order(&self) -> Option<&Order> {
        self.canonical.as_ref()
    }
}
