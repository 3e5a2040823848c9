//! A running IDE session: operations, schema loading and toolbar commands.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use serde_json::Value;
use tracing::{debug, info, warn};

use ide_client::{
    INTROSPECTION_QUERY, OperationRequest, RequestDispatcher, Transport, merge_fragments,
    prettify,
};
use ide_core::error::AppError;
use ide_core::result::AppResult;
use ide_plugin::{ExtensionKind, HookEvent, ToolbarCommand};
use ide_store::{Action, Schema};

use crate::commands::CommandOutcome;
use crate::context::IdeContext;

/// Orchestrates requests and editor commands for one context.
///
/// `is_fetching` is true while at least one operation is in flight.
/// Overlapping operations are neither serialized nor cancelled. When schema
/// fetches overlap, only the most recently started one is stored.
#[derive(Debug)]
pub struct Session {
    /// Shared context.
    context: IdeContext,
    /// Request dispatcher.
    dispatcher: RequestDispatcher,
    /// Operations currently in flight.
    in_flight: Mutex<usize>,
    /// Incremented for every schema fetch started.
    schema_generation: AtomicU64,
    /// Host-supplied fragment snippets used when merging fragments.
    external_fragments: Vec<String>,
}

impl Session {
    /// Creates a session sending requests through `transport`.
    pub fn new(context: IdeContext, transport: Arc<dyn Transport>) -> Self {
        Self {
            context,
            dispatcher: RequestDispatcher::new(transport),
            in_flight: Mutex::new(0),
            schema_generation: AtomicU64::new(0),
            external_fragments: Vec::new(),
        }
    }

    /// Sets the fragments available to the merge-fragments command.
    pub fn with_external_fragments(mut self, fragments: Vec<String>) -> Self {
        self.external_fragments = fragments;
        self
    }

    /// Returns the session context.
    pub fn context(&self) -> &IdeContext {
        &self.context
    }

    /// Executes an operation with the credentials the current toggle implies.
    pub async fn execute(&self, request: &OperationRequest) -> AppResult<Value> {
        let is_authenticated = self.context.state().is_authenticated;
        let _fetching = FetchGuard::enter(self);
        self.dispatcher.execute(request, is_authenticated).await
    }

    /// Executes the current query.
    pub async fn execute_current(&self) -> AppResult<Value> {
        let query = self
            .context
            .state()
            .query
            .clone()
            .ok_or_else(|| AppError::validation("No query loaded"))?;
        self.execute(&OperationRequest::new(query)).await
    }

    /// Loads the schema by introspection and stores it.
    ///
    /// A result that arrives after a newer fetch was started is returned
    /// but not stored.
    pub async fn fetch_schema(&self) -> AppResult<Arc<Schema>> {
        let generation = self.schema_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let response = self.execute(&OperationRequest::new(INTROSPECTION_QUERY)).await?;

        let data = match response.get("data") {
            Some(data) if !data.is_null() => data.clone(),
            _ => {
                let errors = response.get("errors").cloned().unwrap_or(Value::Null);
                return Err(AppError::validation(format!(
                    "Introspection returned no data: {errors}"
                )));
            }
        };

        let schema = Arc::new(Schema::new(data));
        if self.schema_generation.load(Ordering::SeqCst) != generation {
            debug!(generation = generation, "Discarding superseded schema response");
            return Ok(schema);
        }
        self.context
            .store()
            .dispatch(Action::set_schema(Some(schema.clone())));
        info!("Schema loaded");
        Ok(schema)
    }

    /// Replaces the current query.
    pub fn set_query(&self, query: impl Into<String>) {
        self.context.store().dispatch(Action::set_query(query));
    }

    /// Flips the authenticated toggle and returns the new value.
    pub fn toggle_auth(&self) -> bool {
        self.context
            .store()
            .dispatch(Action::ToggleAuthenticated)
            .is_authenticated
    }

    /// Sets the authenticated toggle.
    pub fn set_authenticated(&self, is_authenticated: bool) {
        self.context
            .store()
            .dispatch(Action::SetAuthenticated { is_authenticated });
    }

    /// Shows an activity panel, or hides it when it is already visible.
    pub fn toggle_panel(&self, name: &str) -> Option<String> {
        self.context
            .store()
            .dispatch(Action::TogglePanelVisibility {
                name: name.to_string(),
            })
            .visible_activity_panel
            .clone()
    }

    /// Runs the command of the toolbar button named `button`.
    pub fn run_toolbar_command(&self, button: &str) -> AppResult<CommandOutcome> {
        let entry = self
            .context
            .extensions()
            .get(ExtensionKind::ToolbarButton, button)
            .ok_or_else(|| AppError::not_found(format!("Toolbar button '{button}' not found")))?;
        let command = entry
            .config
            .as_toolbar_button()
            .map(|config| config.command.clone())
            .ok_or_else(|| AppError::internal(format!("'{button}' is not a toolbar button")))?;

        debug!(button = %button, command = ?command, "Running toolbar command");

        let outcome = match command {
            ToolbarCommand::Prettify => self.rewrite_query("prettify", prettify),
            ToolbarCommand::MergeFragments => self.rewrite_query("merge fragments", |query| {
                merge_fragments(query, &self.external_fragments)
            }),
            ToolbarCommand::CopyQuery => CommandOutcome::Copied(self.context.state().query.clone()),
            ToolbarCommand::ToggleAuth => CommandOutcome::AuthToggled(self.toggle_auth()),
            ToolbarCommand::RefetchSchema => {
                self.context.store().dispatch(Action::set_schema(None));
                CommandOutcome::SchemaInvalidated
            }
            ToolbarCommand::Custom(command) => {
                self.context.fire(&HookEvent::ToolbarCommand {
                    button: button.to_string(),
                    command: command.clone(),
                });
                CommandOutcome::Dispatched(command)
            }
        };

        Ok(outcome)
    }

    fn rewrite_query<F>(&self, label: &str, rewrite: F) -> CommandOutcome
    where
        F: FnOnce(&str) -> AppResult<String>,
    {
        let Some(query) = self.context.state().query.clone() else {
            return CommandOutcome::Unchanged;
        };
        match rewrite(&query) {
            Ok(rewritten) if rewritten != query => {
                self.set_query(rewritten.clone());
                CommandOutcome::QueryUpdated(rewritten)
            }
            Ok(_) => CommandOutcome::Unchanged,
            Err(e) => {
                warn!(command = %label, error = %e, "Leaving query unchanged");
                CommandOutcome::Unchanged
            }
        }
    }

    fn begin_fetch(&self) {
        let mut in_flight = self.in_flight.lock();
        *in_flight += 1;
        if *in_flight == 1 {
            self.context.store().dispatch(Action::set_is_fetching(true));
        }
    }

    fn end_fetch(&self) {
        let mut in_flight = self.in_flight.lock();
        *in_flight = in_flight.saturating_sub(1);
        if *in_flight == 0 {
            self.context.store().dispatch(Action::set_is_fetching(false));
        }
    }
}

/// Clears the fetching flag when an operation settles or is dropped.
struct FetchGuard<'a> {
    session: &'a Session,
}

impl<'a> FetchGuard<'a> {
    fn enter(session: &'a Session) -> Self {
        session.begin_fetch();
        Self { session }
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.session.end_fetch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use ide_client::CredentialMode;
    use ide_plugin::{HookName, ToolbarButtonConfig};

    #[derive(Debug)]
    struct StaticTransport(Value);

    #[async_trait]
    impl Transport for StaticTransport {
        async fn send(&self, _: &OperationRequest, _: CredentialMode) -> AppResult<Value> {
            Ok(self.0.clone())
        }
    }

    fn session_with(response: Value) -> Session {
        let session = Session::new(
            IdeContext::in_memory(),
            Arc::new(StaticTransport(response)),
        );
        crate::loader::ExtensionLoader::new(session.context().clone())
            .load_all(&crate::builtins::builtin_extensions());
        session
    }

    #[test]
    fn test_prettify_command_rewrites_query() {
        let session = session_with(Value::Null);
        session.set_query("{viewer{name}}");

        let outcome = session.run_toolbar_command("prettify").unwrap();
        let CommandOutcome::QueryUpdated(query) = outcome else {
            panic!("expected a rewritten query, got {outcome:?}");
        };
        assert!(query.contains("viewer {"));
        assert_eq!(session.context().state().query.as_deref(), Some(query.as_str()));
    }

    #[test]
    fn test_prettify_leaves_broken_query_alone() {
        let session = session_with(Value::Null);
        session.set_query("{ viewer {");

        assert_eq!(
            session.run_toolbar_command("prettify").unwrap(),
            CommandOutcome::Unchanged
        );
        assert_eq!(session.context().state().query.as_deref(), Some("{ viewer {"));
    }

    #[test]
    fn test_merge_fragments_keeps_fragment_only_query() {
        let session = session_with(Value::Null);
        session.set_query("fragment PostFields on Post { title }");

        assert_eq!(
            session.run_toolbar_command("merge-fragments").unwrap(),
            CommandOutcome::Unchanged
        );
        assert_eq!(
            session.context().state().query.as_deref(),
            Some("fragment PostFields on Post { title }")
        );
    }

    #[test]
    fn test_merge_fragments_uses_external_fragments() {
        let session = session_with(Value::Null)
            .with_external_fragments(vec!["fragment ViewerName on User { name }".to_string()]);
        session.set_query("{ viewer { ...ViewerName } }");

        let outcome = session.run_toolbar_command("merge-fragments").unwrap();
        let CommandOutcome::QueryUpdated(query) = outcome else {
            panic!("expected a rewritten query, got {outcome:?}");
        };
        assert!(query.contains("... on User"));
        assert!(!query.contains("...ViewerName"));
    }

    #[test]
    fn test_copy_toggle_and_refetch() {
        let session = session_with(Value::Null);
        session.set_query("{ a }");

        assert_eq!(
            session.run_toolbar_command("copy-query").unwrap(),
            CommandOutcome::Copied(Some("{ a }".to_string()))
        );
        assert_eq!(
            session.run_toolbar_command("toggle-auth").unwrap(),
            CommandOutcome::AuthToggled(false)
        );

        session
            .context()
            .store()
            .dispatch(Action::set_schema(Some(Arc::new(Schema::new(Value::Null)))));
        session.context().register_button(
            "refetch",
            ToolbarButtonConfig::new("Refetch", ToolbarCommand::RefetchSchema),
            50,
        );
        assert_eq!(
            session.run_toolbar_command("refetch").unwrap(),
            CommandOutcome::SchemaInvalidated
        );
        let state = session.context().state();
        assert!(state.schema.current().is_none());
        assert!(!state.schema.is_unset());
    }

    #[test]
    fn test_custom_command_fires_hook() {
        let session = session_with(Value::Null);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        session
            .context()
            .on(HookName::ToolbarCommand, "recorder", 10, move |event| {
                if let HookEvent::ToolbarCommand { button, command } = event {
                    sink.lock().push(format!("{button}:{command}"));
                }
                Ok(())
            });
        session.context().register_button(
            "share",
            ToolbarButtonConfig::new("Share", ToolbarCommand::Custom("share-link".to_string())),
            50,
        );

        assert_eq!(
            session.run_toolbar_command("share").unwrap(),
            CommandOutcome::Dispatched("share-link".to_string())
        );
        assert_eq!(*seen.lock(), vec!["share:share-link".to_string()]);
    }

    #[test]
    fn test_unknown_button_is_not_found() {
        let session = session_with(Value::Null);
        let err = session.run_toolbar_command("missing").unwrap_err();
        assert_eq!(err.kind, ide_core::error::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_schema_stores_data() {
        let session = session_with(serde_json::json!({
            "data": { "__schema": { "types": [] } }
        }));

        let schema = session.fetch_schema().await.unwrap();
        let state = session.context().state();

        assert!(state.schema.holds(Some(&schema)));
        assert!(!state.is_fetching);
    }

    #[tokio::test]
    async fn test_fetch_schema_without_data_fails() {
        let session = session_with(serde_json::json!({
            "errors": [{ "message": "Internal server error" }]
        }));

        let err = session.fetch_schema().await.unwrap_err();
        assert!(err.message.contains("Internal server error"));
        assert!(session.context().state().schema.is_unset());
    }
}
