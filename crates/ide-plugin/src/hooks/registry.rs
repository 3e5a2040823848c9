//! Hook registry: listeners subscribe by hook name with priority ordering.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use super::definitions::HookName;
use crate::traits::HookListener;

/// Entry in the hook registry.
#[derive(Debug)]
struct ListenerEntry {
    /// The listener.
    listener: Arc<dyn HookListener>,
    /// Priority (lower = earlier execution).
    priority: i32,
}

/// Registry of hook listeners organized by hook name.
///
/// Each list is kept sorted by priority; the sort is stable, so listeners
/// with equal priority stay in subscription order.
#[derive(Debug, Default)]
pub struct HookRegistry {
    /// Hook name → sorted list of listeners.
    listeners: RwLock<HashMap<String, Vec<ListenerEntry>>>,
}

impl HookRegistry {
    /// Creates a new empty hook registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes a listener to a hook.
    pub fn subscribe(&self, hook: &HookName, listener: Arc<dyn HookListener>, priority: i32) {
        let listener_id = listener.listener_id().to_string();

        let mut listeners = self.listeners.write();
        let entries = listeners.entry(hook.as_str().to_string()).or_default();

        entries.push(ListenerEntry { listener, priority });
        entries.sort_by_key(|e| e.priority);

        info!(
            hook = %hook,
            listener_id = %listener_id,
            priority = priority,
            "Hook listener subscribed"
        );
    }

    /// Removes every subscription held by a listener id.
    pub fn unsubscribe(&self, listener_id: &str) {
        let mut listeners = self.listeners.write();

        for entries in listeners.values_mut() {
            entries.retain(|e| e.listener.listener_id() != listener_id);
        }

        listeners.retain(|_, entries| !entries.is_empty());

        info!(listener_id = %listener_id, "Hook listener unsubscribed");
    }

    /// Returns a snapshot of the listeners for a hook, in dispatch order.
    pub fn listeners(&self, hook: &HookName) -> Vec<Arc<dyn HookListener>> {
        let listeners = self.listeners.read();
        listeners
            .get(hook.as_str())
            .map(|entries| entries.iter().map(|e| e.listener.clone()).collect())
            .unwrap_or_default()
    }

    /// Returns the number of listeners subscribed to a hook.
    pub fn listener_count(&self, hook: &HookName) -> usize {
        let listeners = self.listeners.read();
        listeners.get(hook.as_str()).map(Vec::len).unwrap_or(0)
    }
}
