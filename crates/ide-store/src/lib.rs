//! # ide-store
//!
//! Single source of truth for editor-visible state.
//!
//! - [`EditorState`] is immutable; every transition produces a new
//!   `Arc<EditorState>` or hands back the same one when nothing changed.
//! - [`reduce`] is the pure transition function over [`Action`].
//! - [`Store`] holds the current state and notifies subscribers on change.
//! - [`persistence`] stores the authenticated/public toggle client-side.

pub mod action;
pub mod persistence;
pub mod reducer;
pub mod selectors;
pub mod state;
pub mod store;

pub use action::Action;
pub use persistence::{AuthPreference, FileStorage, LocalStorage, MemoryStorage};
pub use reducer::reduce;
pub use state::{EditorState, Schema, SchemaState};
pub use store::{Store, SubscriptionId};
