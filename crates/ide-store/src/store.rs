//! Store handle: holds the current state and notifies subscribers.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::debug;

use ide_core::result::AppResult;

use crate::action::Action;
use crate::reducer::reduce;
use crate::state::EditorState;

type Subscriber = Arc<dyn Fn(&Arc<EditorState>) + Send + Sync>;

/// Handle returned by [`Store::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The single writer of [`EditorState`].
///
/// All writes go through [`Store::dispatch`]. Subscribers run only when a
/// dispatch produced a new state object.
pub struct Store {
    /// Current state.
    state: RwLock<Arc<EditorState>>,
    /// Change listeners.
    subscribers: RwLock<Vec<(SubscriptionId, Subscriber)>>,
    /// Next subscription id.
    next_id: AtomicU64,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state.read())
            .field("subscribers", &self.subscribers.read().len())
            .finish()
    }
}

impl Store {
    /// Creates a store with the default initial state.
    pub fn new() -> Self {
        Self::with_state(EditorState::default())
    }

    /// Creates a store with a specific initial state.
    pub fn with_state(state: EditorState) -> Self {
        Self {
            state: RwLock::new(Arc::new(state)),
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Returns the current state.
    pub fn state(&self) -> Arc<EditorState> {
        self.state.read().clone()
    }

    /// Applies an action and returns the resulting state.
    pub fn dispatch(&self, action: Action) -> Arc<EditorState> {
        let (next, changed) = {
            let mut current = self.state.write();
            let next = reduce(&*current, &action);
            let changed = !Arc::ptr_eq(&*current, &next);
            *current = Arc::clone(&next);
            (next, changed)
        };

        debug!(action = action.tag(), changed = changed, "Store action dispatched");

        if changed {
            let subscribers: Vec<Subscriber> = self
                .subscribers
                .read()
                .iter()
                .map(|(_, s)| Arc::clone(s))
                .collect();
            for subscriber in subscribers {
                subscriber(&next);
            }
        }

        next
    }

    /// Decodes a JSON action and applies it.
    pub fn dispatch_json(&self, raw: &serde_json::Value) -> AppResult<Arc<EditorState>> {
        let action: Action = serde_json::from_value(raw.clone())?;
        Ok(self.dispatch(action))
    }

    /// Registers a change listener.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
    where
        F: Fn(&Arc<EditorState>) + Send + Sync + 'static,
    {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push((id, Arc::new(listener)));
        id
    }

    /// Removes a change listener.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.write().retain(|(sid, _)| *sid != id);
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
