//! Undo/Redo history for annotation edits.
//!
//! Every edit is recorded as a [`HistoryAction`] that carries enough data to
//! be reversed on its own. Each open document owns one [`HistorySession`];
//! the session manager decides which one is active.
//!
//! ## Module Structure
//!
//! - [`action`] - HistoryAction enum defining all reversible edits
//! - [`session`] - HistorySession: linear log, cursor, saved marker, temporary buffer
//! - [`apply`] - inverse and forward application of actions to a document

mod action;
mod apply;
mod session;


pub use action::{ErasedStroke, HistoryAction, ModifyKind};
pub use apply::{apply_redo, apply_undo};
pub use session::{HistorySession, SavedStep};
