//! Action dispatcher
//!
//! Routes a typed action to the single processor registered for its
//! kind. The routing table is built once at application-wiring time via
//! [`DispatcherBuilder`] and is immutable afterwards; registering two
//! processors for the same kind is a construction-time error rather
//! than last-writer-wins.
//!
//! A missing registration at dispatch time means a store was never
//! wired at startup. That is a programming error, not a recoverable
//! condition, so `dispatch` panics.

mod actions;

pub use actions::{Action, ActionKind, Completion, OrderAction, OrderNoteAction};

use std::collections::HashMap;
use std::sync::Arc;

/// Receives the actions of one kind
pub trait ActionProcessor: Send + Sync {
    /// Consume an action. Must not block; long-running work is spawned.
    fn on_action(&self, action: Action);
}

/// Wiring error raised while building a dispatcher
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("a processor is already registered for {0:?} actions")]
    Duplicate(ActionKind),
}

/// Builds the action routing table at wiring time
#[derive(Default)]
pub struct DispatcherBuilder {
    processors: HashMap<ActionKind, Arc<dyn ActionProcessor>>,
}

impl DispatcherBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate exactly one processor with an action kind
    pub fn register(
        mut self,
        kind: ActionKind,
        processor: Arc<dyn ActionProcessor>,
    ) -> Result<Self, RegistrationError> {
        if self.processors.contains_key(&kind) {
            return Err(RegistrationError::Duplicate(kind));
        }
        self.processors.insert(kind, processor);
        Ok(self)
    }

    pub fn build(self) -> Dispatcher {
        Dispatcher {
            processors: self.processors,
        }
    }
}

/// Immutable action router
pub struct Dispatcher {
    processors: HashMap<ActionKind, Arc<dyn ActionProcessor>>,
}

impl Dispatcher {
    /// Forward an action to its registered processor.
    ///
    /// # Panics
    ///
    /// Panics if no processor was registered for the action's kind;
    /// this indicates a missing store registration at startup.
    pub fn dispatch(&self, action: Action) {
        let kind = action.kind();
        match self.processors.get(&kind) {
            Some(processor) => processor.on_action(action),
            None => panic!("no processor registered for {kind:?} actions"),
        }
    }
}
