//! Shared domain types for the storefront client core
//!
//! Pure data definitions used by every layer: the canonical order
//! returned by the site, the client-only order draft, order notes and
//! the building blocks they share (line items, shipping/fee lines,
//! addresses, statuses). No I/O lives here.

pub mod order;

pub use order::{
    Address, FeeLine, Order, OrderDraft, OrderItem, OrderNote, OrderStatus, ShippingLine,
};
