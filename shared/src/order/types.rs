//! Shared building blocks for orders and drafts
//!
//! Monetary amounts cross the REST boundary as decimal strings
//! (`"8.50"`), exactly as the site API emits them. They are parsed with
//! `rust_decimal` at the edges; nothing in this crate does arithmetic.

use serde::{Deserialize, Serialize};

/// Order status as reported by the site
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// Awaiting payment
    #[default]
    Pending,
    /// Payment received, awaiting fulfilment
    Processing,
    OnHold,
    Completed,
    Cancelled,
    Refunded,
    Failed,
}

impl OrderStatus {
    /// Human-readable label for status badges
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending payment",
            OrderStatus::Processing => "Processing",
            OrderStatus::OnHold => "On hold",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
            OrderStatus::Refunded => "Refunded",
            OrderStatus::Failed => "Failed",
        }
    }
}

/// A product line on a canonical order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderItem {
    /// Line identifier assigned by the server
    pub item_id: i64,
    /// Product this line refers to
    pub product_id: i64,
    /// Product name snapshot
    pub name: String,
    /// Quantity ordered
    pub quantity: u32,
    /// Unit price as a decimal string
    pub price: String,
    /// Line subtotal before discounts
    pub subtotal: String,
    /// Line total after discounts
    pub total: String,
}

/// A shipping method line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingLine {
    /// Line identifier assigned by the server (0 for client-created lines)
    #[serde(default)]
    pub shipping_id: i64,
    /// Display title, e.g. "Flat Rate"
    pub method_title: String,
    /// Method slug, e.g. "flat_rate"
    pub method_id: String,
    /// Shipping cost as a decimal string
    pub total: String,
    /// Tax charged on shipping
    #[serde(default)]
    pub total_tax: String,
}

impl ShippingLine {
    pub fn new(method_title: impl Into<String>, method_id: impl Into<String>, total: impl Into<String>) -> Self {
        Self {
            shipping_id: 0,
            method_title: method_title.into(),
            method_id: method_id.into(),
            total: total.into(),
            total_tax: String::new(),
        }
    }
}

/// An extra fee line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeeLine {
    /// Line identifier assigned by the server (0 for client-created lines)
    #[serde(default)]
    pub fee_id: i64,
    /// Fee description
    pub name: String,
    /// Fee amount as a decimal string
    pub total: String,
    /// Tax charged on the fee
    #[serde(default)]
    pub total_tax: String,
}

impl FeeLine {
    pub fn new(name: impl Into<String>, total: impl Into<String>) -> Self {
        Self {
            fee_id: 0,
            name: name.into(),
            total: total.into(),
            total_tax: String::new(),
        }
    }
}

/// Billing or shipping address
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Address {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub address_1: String,
    #[serde(default)]
    pub address_2: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub postcode: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl Address {
    /// Whether any displayable field is filled in
    pub fn has_data(&self) -> bool {
        !self.full_name().is_empty()
            || !self.company.is_empty()
            || !self.address_1.is_empty()
            || !self.city.is_empty()
            || !self.phone.is_empty()
            || !self.email.is_empty()
    }

    /// "First Last", trimmed
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Postal format, skipping empty lines
    pub fn formatted(&self) -> String {
        let region = [self.city.as_str(), self.state.as_str(), self.postcode.as_str()]
            .iter()
            .filter(|s| !s.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");

        [
            self.full_name(),
            self.company.clone(),
            self.address_1.clone(),
            self.address_2.clone(),
            region,
            self.country.clone(),
        ]
        .into_iter()
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
    }
}
