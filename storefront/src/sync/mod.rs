//! Remote order synchronizer
//!
//! Keeps a locally-edited draft consistent with the server-computed
//! canonical order. Edits are debounced; when the window settles,
//! exactly one Create/Update action built from the full current draft
//! is dispatched. At most one sync action is ever in flight per draft.
//!
//! # State machine
//!
//! ```text
//! Idle ──edit──▶ PendingSync ──timer──▶ Syncing ──ok──▶ Synced
//!   ▲                ▲  ▲                  │ │
//!   │                │  └──edit (restart)──┘ └──err──▶ Error
//!   └── new drafts   └──────── edit ───────────────────┘
//! ```
//!
//! Edits arriving while `Syncing` are queued logically: the draft is
//! simply re-read at the next dispatch, so only the latest coalesced
//! state is ever sent and no edit is lost.
//!
//! Completions carry the sequence number of the action they answer;
//! a completion whose sequence is not the latest dispatched one is
//! stale and ignored.

use crate::dispatcher::{Action, Dispatcher, OrderAction};
use crate::remote::RemoteError;
use shared::{Order, OrderDraft};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Debounce window between the last edit and the sync dispatch
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Synchronizer state, published with every transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    /// No pending edit
    #[default]
    Idle,
    /// An edit was recorded; the debounce timer is running
    PendingSync,
    /// A sync action is in flight
    Syncing,
    /// Last sync succeeded; canonical order available
    Synced,
    /// Last sync failed; draft retained for retry on next edit
    Error,
}

/// Published snapshot of the synchronizer
#[derive(Debug, Clone, Default)]
pub struct SyncUpdate {
    pub state: SyncState,
    /// Latest canonical order, once any sync succeeded
    pub order: Option<Order>,
    /// Message of the failure that put us in `Error`, if any
    pub last_error: Option<String>,
}

/// Completion forwarded back into the sync loop, tagged with the
/// sequence number of the action it answers
type TaggedCompletion = (u64, Result<Order, RemoteError>);

/// Handle to a per-draft synchronization task
pub struct RemoteOrderSynchronizer {
    edits_tx: mpsc::UnboundedSender<OrderDraft>,
    updates_rx: watch::Receiver<SyncUpdate>,
    shutdown: CancellationToken,
}

impl RemoteOrderSynchronizer {
    /// Spawn a synchronizer with the default debounce window
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self::with_debounce(dispatcher, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(dispatcher: Arc<Dispatcher>, debounce: Duration) -> Self {
        let (edits_tx, edits_rx) = mpsc::unbounded_channel();
        let (updates_tx, updates_rx) = watch::channel(SyncUpdate::default());
        let shutdown = CancellationToken::new();

        let sync_loop = SyncLoop {
            dispatcher,
            debounce,
            updates: updates_tx,
            draft: None,
            order_id: None,
            dirty: false,
            deadline: None,
            in_flight: false,
            latest_seq: 0,
            canonical: None,
            last_error: None,
        };
        tokio::spawn(sync_loop.run(edits_rx, shutdown.clone()));

        Self {
            edits_tx,
            updates_rx,
            shutdown,
        }
    }

    /// Record an edit. The draft passed in is the full current state,
    /// not a diff; the latest one wins when edits coalesce.
    pub fn order_edited(&self, draft: OrderDraft) {
        if self.edits_tx.send(draft).is_err() {
            tracing::error!("synchronizer task is gone, edit dropped");
        }
    }

    /// Subscribe to state transitions and canonical order updates
    pub fn subscribe(&self) -> watch::Receiver<SyncUpdate> {
        self.updates_rx.clone()
    }
}

impl Drop for RemoteOrderSynchronizer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Single-writer loop owning the draft snapshot and all sync state.
///
/// Everything enters through channels, so draft state and transitions
/// are linearized per draft without locks.
struct SyncLoop {
    dispatcher: Arc<Dispatcher>,
    debounce: Duration,
    updates: watch::Sender<SyncUpdate>,
    /// Latest full draft received from the view model
    draft: Option<OrderDraft>,
    /// Server-assigned id, captured from the first successful sync
    order_id: Option<i64>,
    /// An edit arrived since the last dispatch
    dirty: bool,
    /// Debounce deadline, armed while PendingSync
    deadline: Option<Instant>,
    in_flight: bool,
    /// Sequence of the most recently dispatched action
    latest_seq: u64,
    canonical: Option<Order>,
    last_error: Option<String>,
}

impl SyncLoop {
    async fn run(
        mut self,
        mut edits_rx: mpsc::UnboundedReceiver<OrderDraft>,
        shutdown: CancellationToken,
    ) {
        let (completions_tx, mut completions_rx) = mpsc::unbounded_channel::<TaggedCompletion>();

        loop {
            let sleep_until = self
                .deadline
                .unwrap_or_else(|| Instant::now() + Duration::from_secs(3600));

            tokio::select! {
                _ = shutdown.cancelled() => break,

                _ = tokio::time::sleep_until(sleep_until), if self.deadline.is_some() => {
                    self.dispatch_sync(&completions_tx);
                }

                Some((seq, result)) = completions_rx.recv() => {
                    self.on_completion(seq, result);
                }

                draft = edits_rx.recv() => match draft {
                    Some(draft) => self.on_edit(draft),
                    None => break,
                }
            }
        }

        tracing::debug!("order synchronizer stopped");
    }

    /// Any edit supersedes the pending debounce timer; while a sync is
    /// in flight the edit is held and re-arms the timer after settling.
    fn on_edit(&mut self, draft: OrderDraft) {
        self.draft = Some(draft);
        self.dirty = true;
        self.last_error = None;

        if self.in_flight {
            return;
        }
        self.deadline = Some(Instant::now() + self.debounce);
        self.publish(SyncState::PendingSync);
    }

    /// Timer expired: build one action from the full current draft
    fn dispatch_sync(&mut self, completions: &mpsc::UnboundedSender<TaggedCompletion>) {
        self.deadline = None;
        let Some(draft) = self.draft.clone() else {
            return;
        };
        self.dirty = false;
        self.in_flight = true;
        self.latest_seq += 1;
        let seq = self.latest_seq;

        let (respond_to, completion_rx) = oneshot::channel();
        let completions = completions.clone();
        tokio::spawn(async move {
            let result = match completion_rx.await {
                Ok(result) => result,
                Err(_) => Err(RemoteError::Network(
                    "sync action dropped without a completion".to_string(),
                )),
            };
            let _ = completions.send((seq, result));
        });

        let action = match self.order_id {
            Some(order_id) => OrderAction::UpdateOrder {
                site_id: draft.site_id,
                order_id,
                draft,
                respond_to,
            },
            None => OrderAction::CreateOrder {
                site_id: draft.site_id,
                draft,
                respond_to,
            },
        };

        self.publish(SyncState::Syncing);
        tracing::debug!(seq, order_id = ?self.order_id, "dispatching order sync");
        self.dispatcher.dispatch(Action::Order(action));
    }

    fn on_completion(&mut self, seq: u64, result: Result<Order, RemoteError>) {
        if seq != self.latest_seq {
            tracing::debug!(seq, latest = self.latest_seq, "ignoring stale sync completion");
            return;
        }
        self.in_flight = false;

        match result {
            Ok(order) => {
                self.order_id = Some(order.order_id);
                if let Some(draft) = self.draft.as_mut() {
                    draft.order_id = Some(order.order_id);
                }
                self.canonical = Some(order);
                self.last_error = None;
                if self.dirty {
                    // a queued edit arrived while syncing
                    self.deadline = Some(Instant::now() + self.debounce);
                    self.publish(SyncState::PendingSync);
                } else {
                    self.publish(SyncState::Synced);
                }
            }
            Err(error) => {
                tracing::warn!(seq, %error, "order sync failed");
                if self.dirty {
                    // the failure is already superseded by a newer edit
                    self.deadline = Some(Instant::now() + self.debounce);
                    self.publish(SyncState::PendingSync);
                } else {
                    self.last_error = Some(error.to_string());
                    self.publish(SyncState::Error);
                }
            }
        }
    }

    fn publish(&mut self, state: SyncState) {
        self.updates.send_replace(SyncUpdate {
            state,
            order: self.canonical.clone(),
            last_error: self.last_error.clone(),
        });
    }
}
