//! Action definitions
//!
//! An action is an immutable intent value: the payload plus a one-shot
//! completion channel. It is consumed exactly once by the store
//! registered for its kind.

use crate::remote::RemoteError;
use shared::{Order, OrderDraft, OrderNote, OrderStatus};
use tokio::sync::oneshot;

/// Completion channel carried by every action
pub type Completion<T> = oneshot::Sender<Result<T, RemoteError>>;

/// Action kinds, one registered processor each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Order,
    OrderNote,
}

/// Top-level action routed through the dispatcher
#[derive(Debug)]
pub enum Action {
    Order(OrderAction),
    OrderNote(OrderNoteAction),
}

impl Action {
    /// Runtime kind used for routing
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Order(_) => ActionKind::Order,
            Action::OrderNote(_) => ActionKind::OrderNote,
        }
    }
}

/// Intents handled by the order store
#[derive(Debug)]
pub enum OrderAction {
    /// Create an order on the server from the full draft
    CreateOrder {
        site_id: i64,
        draft: OrderDraft,
        respond_to: Completion<Order>,
    },
    /// Replace an existing order's editable fields with the full draft
    UpdateOrder {
        site_id: i64,
        order_id: i64,
        draft: OrderDraft,
        respond_to: Completion<Order>,
    },
    /// Change only an order's status
    UpdateOrderStatus {
        site_id: i64,
        order_id: i64,
        status: OrderStatus,
        respond_to: Completion<Order>,
    },
}

/// Intents handled by the order note store
#[derive(Debug)]
pub enum OrderNoteAction {
    /// Fetch all notes for an order and cache them
    RetrieveOrderNotes {
        site_id: i64,
        order_id: i64,
        respond_to: Completion<Vec<OrderNote>>,
    },
    /// Attach a new note to an order and cache it
    AddOrderNote {
        site_id: i64,
        order_id: i64,
        note: String,
        is_customer_note: bool,
        respond_to: Completion<OrderNote>,
    },
}
