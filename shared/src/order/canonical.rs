//! Canonical order - the server-authoritative snapshot
//!
//! Totals on a canonical order are always server-computed, never
//! recomputed locally. The client treats them as opaque decimal strings
//! so client and server rounding can never diverge.

use super::types::{Address, FeeLine, OrderItem, OrderStatus, ShippingLine};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Server-confirmed order snapshot
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Site the order belongs to
    pub site_id: i64,
    /// Order identifier assigned by the server
    pub order_id: i64,
    /// Current status
    pub status: OrderStatus,
    /// ISO 4217 currency code
    pub currency: String,
    /// Product lines
    pub line_items: Vec<OrderItem>,
    /// Shipping method lines
    #[serde(default)]
    pub shipping_lines: Vec<ShippingLine>,
    /// Extra fee lines
    #[serde(default)]
    pub fee_lines: Vec<FeeLine>,
    /// Billing address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing: Option<Address>,
    /// Shipping address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping: Option<Address>,
    /// Customer-provided note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,
    /// Order total, server-computed
    pub total: String,
    /// Total tax, server-computed
    #[serde(default)]
    pub total_tax: String,
    /// Shipping total, server-computed
    #[serde(default)]
    pub shipping_total: String,
    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    /// Last modification timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<DateTime<Utc>>,
}

impl Order {
    /// Whether the server reported any tax on the order
    pub fn has_taxes(&self) -> bool {
        !self.total_tax.is_empty() && self.total_tax != "0" && self.total_tax != "0.00"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        Order {
            site_id: 123,
            order_id: 963,
            status: OrderStatus::Pending,
            currency: "USD".to_string(),
            line_items: vec![OrderItem {
                item_id: 1,
                product_id: 5,
                name: "Dymo LabelWriter 4XL".to_string(),
                quantity: 2,
                price: "8.50".to_string(),
                subtotal: "17.00".to_string(),
                total: "17.00".to_string(),
            }],
            shipping_lines: vec![],
            fee_lines: vec![],
            billing: None,
            shipping: None,
            customer_note: None,
            total: "17.00".to_string(),
            total_tax: "0.00".to_string(),
            shipping_total: "0.00".to_string(),
            date_created: None,
            date_modified: None,
        }
    }

    #[test]
    fn has_taxes_ignores_zero_amounts() {
        let mut order = sample_order();
        assert!(!order.has_taxes());
        order.total_tax = "2.50".to_string();
        assert!(order.has_taxes());
    }

    #[test]
    fn order_round_trips_through_json() {
        let order = sample_order();
        let json = serde_json::to_string(&order).unwrap();
        let parsed: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, order);
    }
}
