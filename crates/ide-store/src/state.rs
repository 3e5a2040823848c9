//! Editor state and the schema slot.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A GraphQL schema as returned by introspection.
///
/// Opaque to the store; identity is tracked through `Arc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema(pub serde_json::Value);

impl Schema {
    /// Wraps an introspection result.
    pub fn new(introspection: serde_json::Value) -> Self {
        Self(introspection)
    }

    /// Returns the raw introspection value.
    pub fn introspection(&self) -> &serde_json::Value {
        &self.0
    }
}

/// Where the store stands with respect to the schema.
#[derive(Debug, Clone, Default)]
pub enum SchemaState {
    /// No schema has ever been set.
    #[default]
    Unset,
    /// A schema was set and then explicitly invalidated.
    Cleared,
    /// A schema is loaded.
    Loaded(Arc<Schema>),
}

impl SchemaState {
    /// Returns the loaded schema, if any.
    pub fn current(&self) -> Option<&Arc<Schema>> {
        match self {
            Self::Loaded(schema) => Some(schema),
            Self::Unset | Self::Cleared => None,
        }
    }

    /// Whether `incoming` is the value this slot already holds.
    ///
    /// Loaded schemas compare by reference; "no schema" matches both
    /// `Unset` and `Cleared`.
    pub fn holds(&self, incoming: Option<&Arc<Schema>>) -> bool {
        match (self, incoming) {
            (Self::Loaded(current), Some(incoming)) => Arc::ptr_eq(current, incoming),
            (Self::Unset | Self::Cleared, None) => true,
            _ => false,
        }
    }

    /// Whether a schema has never been set.
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }
}

/// Everything the editor renders from.
#[derive(Debug, Clone)]
pub struct EditorState {
    /// Current query document; `None` when no query is loaded.
    pub query: Option<String>,
    /// Schema slot.
    pub schema: SchemaState,
    /// Whether the drawer is open.
    pub is_drawer_open: bool,
    /// Whether the editor renders on its own page.
    pub should_render_standalone: bool,
    /// Latched once boot completes.
    pub is_initial_state_loaded: bool,
    /// True while an operation is in flight.
    pub is_fetching: bool,
    /// Whether non-introspection requests carry credentials.
    pub is_authenticated: bool,
    /// Extension configs in insertion order.
    pub registered_extensions: IndexMap<String, serde_json::Value>,
    /// Activity panel currently shown, if any.
    pub visible_activity_panel: Option<String>,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            query: None,
            schema: SchemaState::Unset,
            is_drawer_open: false,
            should_render_standalone: false,
            is_initial_state_loaded: false,
            is_fetching: false,
            is_authenticated: true,
            registered_extensions: IndexMap::new(),
            visible_activity_panel: None,
        }
    }
}
