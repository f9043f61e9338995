//! Order draft - client-local, not-yet-confirmed edit state
//!
//! A draft lives only inside the view model. It is never cached; on
//! every sync it is transformed whole into an action payload, so the
//! server always sees the full current state rather than a diff.

use super::types::{Address, FeeLine, OrderStatus, ShippingLine};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A product line on a draft, before the server has assigned line ids
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DraftItem {
    /// Product this line refers to
    pub product_id: i64,
    /// Product name snapshot
    pub name: String,
    /// Unit price as a decimal string
    pub price: String,
    /// Quantity ordered
    pub quantity: u32,
}

/// Client-only editable order aggregate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDraft {
    /// Client-side identity, assigned before the server knows the order
    pub local_id: Uuid,
    /// Site the draft targets
    pub site_id: i64,
    /// Server-assigned order id, present once the first sync succeeded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<i64>,
    /// Requested status
    pub status: OrderStatus,
    /// Product lines
    pub items: Vec<DraftItem>,
    /// At most one shipping line per draft
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_line: Option<ShippingLine>,
    /// At most one fee line per draft
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_line: Option<FeeLine>,
    /// Billing address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<Address>,
    /// Shipping address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Address>,
    /// Customer-provided note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,
}

impl OrderDraft {
    /// Create an empty draft for a site
    pub fn new(site_id: i64) -> Self {
        Self {
            local_id: Uuid::new_v4(),
            site_id,
            order_id: None,
            status: OrderStatus::default(),
            items: Vec::new(),
            shipping_line: None,
            fee_line: None,
            billing: None,
            shipping: None,
            customer_note: None,
        }
    }

    /// Look up a line by product id
    pub fn item(&self, product_id: i64) -> Option<&DraftItem> {
        self.items.iter().find(|i| i.product_id == product_id)
    }

    /// Add a line, or bump quantity if the product is already present
    pub fn add_item(&mut self, product_id: i64, name: impl Into<String>, price: impl Into<String>, quantity: u32) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            existing.quantity += quantity;
            return;
        }
        self.items.push(DraftItem {
            product_id,
            name: name.into(),
            price: price.into(),
            quantity,
        });
    }

    /// Set a line's quantity; quantity 0 removes the line
    pub fn set_item_quantity(&mut self, product_id: i64, quantity: u32) {
        if quantity == 0 {
            self.remove_item(product_id);
            return;
        }
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product_id) {
            item.quantity = quantity;
        }
    }

    /// Remove a line entirely
    pub fn remove_item(&mut self, product_id: i64) {
        self.items.retain(|i| i.product_id != product_id);
    }

    /// Whether there is anything worth syncing
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
            && self.shipping_line.is_none()
            && self.fee_line.is_none()
            && self.billing.is_none()
            && self.shipping.is_none()
    }
}
