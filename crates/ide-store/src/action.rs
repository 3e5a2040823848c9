//! Store actions.
//!
//! Actions can also arrive as JSON objects tagged by `type`, e.g.
//! `{"type": "SET_DRAWER_OPEN", "isDrawerOpen": true}`. Any tag this
//! version does not know decodes to [`Action::Unknown`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::state::Schema;

/// A state transition request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "SCREAMING_SNAKE_CASE",
    rename_all_fields = "camelCase"
)]
pub enum Action {
    /// Replace the query document.
    SetQuery {
        /// New query; `None` unloads it.
        query: Option<String>,
    },
    /// Replace the schema. `None` invalidates it.
    SetSchema {
        /// New schema.
        schema: Option<Arc<Schema>>,
    },
    /// Open or close the drawer.
    SetDrawerOpen {
        /// Drawer visibility.
        is_drawer_open: bool,
    },
    /// Choose standalone or drawer rendering.
    SetRenderStandalone {
        /// Standalone flag.
        should_render_standalone: bool,
    },
    /// Latch the initial-state flag.
    SetInitialStateLoaded,
    /// Add or overwrite an extension config.
    #[serde(alias = "REGISTER_PLUGIN")]
    RegisterExtension {
        /// Extension name.
        name: String,
        /// Extension config.
        config: serde_json::Value,
    },
    /// Mark an operation as in flight or settled.
    SetIsFetching {
        /// In-flight flag.
        is_fetching: bool,
    },
    /// Set the credential toggle.
    SetAuthenticated {
        /// Toggle value.
        is_authenticated: bool,
    },
    /// Flip the credential toggle.
    ToggleAuthenticated,
    /// Show a panel, or hide it if it is already shown.
    TogglePanelVisibility {
        /// Panel name.
        name: String,
    },
    /// An action this version does not understand.
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Creates a `SetQuery` action.
    pub fn set_query(query: impl Into<String>) -> Self {
        Self::SetQuery {
            query: Some(query.into()),
        }
    }

    /// Creates a `SetSchema` action.
    pub fn set_schema(schema: Option<Arc<Schema>>) -> Self {
        Self::SetSchema { schema }
    }

    /// Creates a `SetIsFetching` action.
    pub fn set_is_fetching(is_fetching: bool) -> Self {
        Self::SetIsFetching { is_fetching }
    }

    /// Returns the action's tag, for logs.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::SetQuery { .. } => "SET_QUERY",
            Self::SetSchema { .. } => "SET_SCHEMA",
            Self::SetDrawerOpen { .. } => "SET_DRAWER_OPEN",
            Self::SetRenderStandalone { .. } => "SET_RENDER_STANDALONE",
            Self::SetInitialStateLoaded => "SET_INITIAL_STATE_LOADED",
            Self::RegisterExtension { .. } => "REGISTER_EXTENSION",
            Self::SetIsFetching { .. } => "SET_IS_FETCHING",
            Self::SetAuthenticated { .. } => "SET_AUTHENTICATED",
            Self::ToggleAuthenticated => "TOGGLE_AUTHENTICATED",
            Self::TogglePanelVisibility { .. } => "TOGGLE_PANEL_VISIBILITY",
            Self::Unknown => "UNKNOWN",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_tagged_json() {
        let action: Action =
            serde_json::from_str(r#"{"type": "SET_DRAWER_OPEN", "isDrawerOpen": true}"#).unwrap();
        assert!(matches!(action, Action::SetDrawerOpen { is_drawer_open: true }));

        let action: Action =
            serde_json::from_str(r#"{"type": "SET_RENDER_STANDALONE", "shouldRenderStandalone": true}"#)
                .unwrap();
        assert!(matches!(
            action,
            Action::SetRenderStandalone {
                should_render_standalone: true
            }
        ));
    }

    #[test]
    fn test_legacy_register_plugin_tag() {
        let action: Action = serde_json::from_str(
            r#"{"type": "REGISTER_PLUGIN", "name": "explorer", "config": {"title": "Explorer"}}"#,
        )
        .unwrap();
        assert!(matches!(action, Action::RegisterExtension { ref name, .. } if name == "explorer"));
    }

    #[test]
    fn test_unknown_tag_decodes_to_unknown() {
        let action: Action =
            serde_json::from_str(r#"{"type": "SET_THEME", "theme": "dark"}"#).unwrap();
        assert!(matches!(action, Action::Unknown));
    }
}
