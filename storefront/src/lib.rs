//! Storefront client core - order draft synchronization pipeline
//!
//! This crate implements the machinery that keeps a locally-edited,
//! not-yet-persisted order draft consistent with the server-computed
//! canonical order:
//!
//! - **dispatcher**: typed actions routed to exactly one store
//! - **stores**: domain logic, one remote call per action, cache upserts
//! - **cache**: in-memory entity cache with upsert semantics
//! - **remote**: REST calls against the site API
//! - **sync**: debounced draft synchronization state machine
//! - **draft**: the order draft view model and its display snapshot
//! - **money**: currency settings and locale-aware formatting
//!
//! # Data Flow
//!
//! ```text
//! edit → view model → synchronizer (debounce) → action → dispatcher
//!            ↑                                              ↓
//!      display snapshot ← canonical order ← cache ← store ← remote
//! ```
//!
//! Edits made while a sync is in flight are never lost: the
//! synchronizer re-reads the full current draft at the next dispatch,
//! and at most one sync action is in flight per draft at any time.

pub mod cache;
pub mod dispatcher;
pub mod draft;
pub mod money;
pub mod remote;
pub mod stores;
pub mod sync;

use std::sync::Arc;

pub use cache::StoreCache;
pub use dispatcher::{Action, ActionKind, Dispatcher, DispatcherBuilder, RegistrationError};
pub use draft::{CustomerSummary, Notice, OrderDraftViewModel, PaymentTotals};
pub use money::{CurrencyFormatter, CurrencyPosition, CurrencySettings};
pub use remote::{OrdersRemote, RemoteError, RestOrdersRemote};
pub use stores::{OrderNoteStore, OrderStore};
pub use sync::{RemoteOrderSynchronizer, SyncState, SyncUpdate};

/// Wire the standard stores into a dispatcher.
///
/// This is the application-wiring entry point: every supported action
/// kind gets exactly one processor, and the routing table is fixed for
/// the lifetime of the returned dispatcher.
pub fn wire_dispatcher(
    remote: Arc<dyn OrdersRemote>,
    cache: StoreCache,
) -> Result<Arc<Dispatcher>, RegistrationError> {
    let orders = Arc::new(OrderStore::new(Arc::clone(&remote), cache.clone()));
    let notes = Arc::new(OrderNoteStore::new(remote, cache));

    let dispatcher = DispatcherBuilder::new()
        .register(ActionKind::Order, orders)?
        .register(ActionKind::OrderNote, notes)?
        .build();

    Ok(Arc::new(dispatcher))
}
