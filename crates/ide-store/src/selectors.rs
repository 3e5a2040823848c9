//! Derived reads over [`EditorState`].

use std::sync::Arc;

use crate::state::{EditorState, Schema};

/// Current query document.
pub fn query(state: &EditorState) -> Option<&str> {
    state.query.as_deref()
}

/// Currently loaded schema.
pub fn schema(state: &EditorState) -> Option<&Arc<Schema>> {
    state.schema.current()
}

/// Whether a new operation should wait for the one in flight.
pub fn is_blocked_by_fetch(state: &EditorState) -> bool {
    state.is_fetching
}

/// Registered extension configs, flattened in insertion order.
///
/// This is storage order, not priority order. Priority-ordered views come
/// from the extension registry.
pub fn extensions_list(state: &EditorState) -> Vec<&serde_json::Value> {
    state.registered_extensions.values().collect()
}

/// Whether the drawer close control is shown.
pub fn shows_drawer_controls(state: &EditorState) -> bool {
    !state.should_render_standalone
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::reducer::reduce;

    #[test]
    fn test_extensions_list_keeps_insertion_order() {
        let mut state = Arc::new(EditorState::default());
        for name in ["zeta", "alpha", "mid"] {
            state = reduce(
                &state,
                &Action::RegisterExtension {
                    name: name.to_string(),
                    config: serde_json::json!({ "title": name }),
                },
            );
        }

        let titles: Vec<&str> = extensions_list(&state)
            .iter()
            .filter_map(|c| c["title"].as_str())
            .collect();
        assert_eq!(titles, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_query_reads_current_document() {
        let state = Arc::new(EditorState::default());
        assert_eq!(query(&state), None);

        let edited = reduce(&state, &Action::set_query("{ viewer { name } }"));
        assert_eq!(query(&edited), Some("{ viewer { name } }"));
    }

    #[test]
    fn test_schema_reads_loaded_schema() {
        let state = Arc::new(EditorState::default());
        assert!(schema(&state).is_none());

        let loaded = Arc::new(Schema::new(serde_json::json!({ "__schema": {} })));
        let next = reduce(&state, &Action::set_schema(Some(loaded.clone())));
        assert!(Arc::ptr_eq(schema(&next).unwrap(), &loaded));

        let cleared = reduce(&next, &Action::set_schema(None));
        assert!(schema(&cleared).is_none());
    }

    #[test]
    fn test_drawer_controls_hidden_when_standalone() {
        let state = Arc::new(EditorState::default());
        assert!(shows_drawer_controls(&state));

        let standalone = reduce(&state, &Action::SetRenderStandalone { should_render_standalone: true });
        assert!(!shows_drawer_controls(&standalone));
    }

    #[test]
    fn test_blocked_by_fetch_follows_flag() {
        let state = Arc::new(EditorState::default());
        assert!(!is_blocked_by_fetch(&state));

        let fetching = reduce(&state, &Action::set_is_fetching(true));
        assert!(is_blocked_by_fetch(&fetching));
    }
}
