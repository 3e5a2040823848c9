//! Pure state transitions.

use std::sync::Arc;

use crate::action::Action;
use crate::state::{EditorState, SchemaState};

/// Applies `action` to `state`.
///
/// Returns the same `Arc` when the action leaves nothing to change:
/// setting the schema it already holds, re-latching the initial-state flag,
/// and unknown actions.
pub fn reduce(state: &Arc<EditorState>, action: &Action) -> Arc<EditorState> {
    match action {
        Action::SetSchema { schema } => {
            if state.schema.holds(schema.as_ref()) {
                return Arc::clone(state);
            }
            let schema = match schema {
                Some(schema) => SchemaState::Loaded(Arc::clone(schema)),
                None => SchemaState::Cleared,
            };
            update(state, |s| s.schema = schema)
        }
        Action::SetInitialStateLoaded => {
            if state.is_initial_state_loaded {
                return Arc::clone(state);
            }
            update(state, |s| s.is_initial_state_loaded = true)
        }
        Action::SetQuery { query } => update(state, |s| s.query = query.clone()),
        Action::SetDrawerOpen { is_drawer_open } => {
            update(state, |s| s.is_drawer_open = *is_drawer_open)
        }
        Action::SetRenderStandalone {
            should_render_standalone,
        } => update(state, |s| s.should_render_standalone = *should_render_standalone),
        Action::RegisterExtension { name, config } => update(state, |s| {
            s.registered_extensions.insert(name.clone(), config.clone());
        }),
        Action::SetIsFetching { is_fetching } => update(state, |s| s.is_fetching = *is_fetching),
        Action::SetAuthenticated { is_authenticated } => {
            update(state, |s| s.is_authenticated = *is_authenticated)
        }
        Action::ToggleAuthenticated => update(state, |s| s.is_authenticated = !s.is_authenticated),
        Action::TogglePanelVisibility { name } => update(state, |s| {
            s.visible_activity_panel = match s.visible_activity_panel.take() {
                Some(current) if current == *name => None,
                _ => Some(name.clone()),
            };
        }),
        Action::Unknown => Arc::clone(state),
    }
}

fn update(state: &EditorState, apply: impl FnOnce(&mut EditorState)) -> Arc<EditorState> {
    let mut next = state.clone();
    apply(&mut next);
    Arc::new(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Schema;

    fn initial() -> Arc<EditorState> {
        Arc::new(EditorState::default())
    }

    fn schema() -> Arc<Schema> {
        Arc::new(Schema::new(serde_json::json!({ "__schema": { "types": [] } })))
    }

    #[test]
    fn test_set_schema_same_reference_is_identity() {
        let x = schema();
        let first = reduce(&initial(), &Action::set_schema(Some(x.clone())));
        let second = reduce(&first, &Action::set_schema(Some(x)));

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_set_schema_equal_but_distinct_value_replaces() {
        let first = reduce(&initial(), &Action::set_schema(Some(schema())));
        let second = reduce(&first, &Action::set_schema(Some(schema())));

        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn test_clearing_schema_is_distinct_from_never_set() {
        let fresh = initial();
        assert!(fresh.schema.is_unset());

        let loaded = reduce(&fresh, &Action::set_schema(Some(schema())));
        let cleared = reduce(&loaded, &Action::set_schema(None));

        assert!(cleared.schema.current().is_none());
        assert!(matches!(cleared.schema, SchemaState::Cleared));
        assert!(!cleared.schema.is_unset());
    }

    #[test]
    fn test_clearing_unset_schema_is_identity() {
        let fresh = initial();
        let next = reduce(&fresh, &Action::set_schema(None));
        assert!(Arc::ptr_eq(&fresh, &next));
    }

    #[test]
    fn test_initial_state_loaded_latches() {
        let loaded = reduce(&initial(), &Action::SetInitialStateLoaded);
        assert!(loaded.is_initial_state_loaded);

        let again = reduce(&loaded, &Action::SetInitialStateLoaded);
        assert!(again.is_initial_state_loaded);
        assert!(Arc::ptr_eq(&loaded, &again));
    }

    #[test]
    fn test_unknown_action_leaves_state_unchanged() {
        let state = reduce(&initial(), &Action::set_query("{ posts { nodes { id } } }"));
        let next = reduce(&state, &Action::Unknown);

        assert!(Arc::ptr_eq(&state, &next));
        assert_eq!(next.query.as_deref(), Some("{ posts { nodes { id } } }"));
    }

    #[test]
    fn test_register_extension_overwrites_keeping_position() {
        let mut state = initial();
        for (name, title) in [("explorer", "Explorer"), ("help", "Help"), ("explorer", "Composer")] {
            state = reduce(
                &state,
                &Action::RegisterExtension {
                    name: name.to_string(),
                    config: serde_json::json!({ "title": title }),
                },
            );
        }

        let names: Vec<&str> = state.registered_extensions.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["explorer", "help"]);
        assert_eq!(state.registered_extensions["explorer"]["title"], "Composer");
    }

    #[test]
    fn test_field_setters() {
        let mut state = initial();
        state = reduce(&state, &Action::SetDrawerOpen { is_drawer_open: true });
        state = reduce(
            &state,
            &Action::SetRenderStandalone {
                should_render_standalone: true,
            },
        );
        state = reduce(&state, &Action::set_is_fetching(true));
        state = reduce(&state, &Action::SetQuery { query: None });

        assert!(state.is_drawer_open);
        assert!(state.should_render_standalone);
        assert!(state.is_fetching);
        assert!(state.query.is_none());
    }

    #[test]
    fn test_toggle_authenticated() {
        let state = initial();
        assert!(state.is_authenticated);

        let public = reduce(&state, &Action::ToggleAuthenticated);
        assert!(!public.is_authenticated);

        let explicit = reduce(&public, &Action::SetAuthenticated { is_authenticated: true });
        assert!(explicit.is_authenticated);
    }

    #[test]
    fn test_toggle_panel_visibility() {
        let toggle = |name: &str| Action::TogglePanelVisibility {
            name: name.to_string(),
        };

        let shown = reduce(&initial(), &toggle("help"));
        assert_eq!(shown.visible_activity_panel.as_deref(), Some("help"));

        let switched = reduce(&shown, &toggle("explorer"));
        assert_eq!(switched.visible_activity_panel.as_deref(), Some("explorer"));

        let hidden = reduce(&switched, &toggle("explorer"));
        assert!(hidden.visible_activity_panel.is_none());
    }
}
