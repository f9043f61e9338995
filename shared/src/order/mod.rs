//! Order domain model
//!
//! - **types**: line items, shipping/fee lines, addresses, statuses
//! - **canonical**: the server-authoritative order snapshot
//! - **draft**: the client-only editable aggregate
//! - **note**: order notes attached to a canonical order

pub mod canonical;
pub mod draft;
pub mod note;
pub mod types;

pub use canonical::Order;
pub use draft::{DraftItem, OrderDraft};
pub use note::OrderNote;
pub use types::{Address, FeeLine, OrderItem, OrderStatus, ShippingLine};
