//! Remote endpoints for orders and order notes
//!
//! One REST call per action variant. The request and response shapes
//! are owned by the site API; this layer only moves typed payloads
//! across it and normalizes failures into [`RemoteError`].

mod http;
#[cfg(test)]
pub(crate) mod mock;

pub use http::RestOrdersRemote;

use async_trait::async_trait;
use shared::{Order, OrderDraft, OrderNote, OrderStatus};

/// Transport and server failures surfaced by remotes.
///
/// These are never retried by the stores; the caller decides what a
/// failure means for its state machine.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RemoteError {
    #[error("network failure: {0}")]
    Network(String),

    #[error("unacceptable status code: {0}")]
    UnacceptableStatus(u16),

    #[error("malformed response payload: {0}")]
    MalformedPayload(String),
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            RemoteError::MalformedPayload(e.to_string())
        } else {
            RemoteError::Network(e.to_string())
        }
    }
}

/// Remote surface for the orders domain
#[async_trait]
pub trait OrdersRemote: Send + Sync {
    /// Create an order from the full draft; the response carries the
    /// server-assigned id and server-computed totals.
    async fn create_order(&self, site_id: i64, draft: &OrderDraft) -> Result<Order, RemoteError>;

    /// Replace an existing order's editable fields with the full draft
    async fn update_order(
        &self,
        site_id: i64,
        order_id: i64,
        draft: &OrderDraft,
    ) -> Result<Order, RemoteError>;

    /// Change only the status of an existing order
    async fn update_order_status(
        &self,
        site_id: i64,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<Order, RemoteError>;

    /// Load all notes attached to an order
    async fn load_order_notes(
        &self,
        site_id: i64,
        order_id: i64,
    ) -> Result<Vec<OrderNote>, RemoteError>;

    /// Attach a new note to an order
    async fn add_order_note(
        &self,
        site_id: i64,
        order_id: i64,
        note: &str,
        is_customer_note: bool,
    ) -> Result<OrderNote, RemoteError>;
}
