//! Stores - one domain's business logic each
//!
//! A store receives the actions of its kind, performs one remote call
//! per action, and on success upserts the result into the shared cache
//! before resolving the action's completion. On remote failure the
//! completion resolves with the error and the cache is left untouched;
//! there are no partial writes.

mod order_notes;
mod orders;

pub use order_notes::OrderNoteStore;
pub use orders::OrderStore;
