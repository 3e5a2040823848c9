//! Results of toolbar commands.

use serde::Serialize;

/// What a toolbar command did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum CommandOutcome {
    /// The query was rewritten.
    QueryUpdated(String),
    /// Nothing changed (no query, or it could not be parsed).
    Unchanged,
    /// The current query, for the clipboard.
    Copied(Option<String>),
    /// The authenticated toggle now has this value.
    AuthToggled(bool),
    /// The schema was dropped and will be fetched again.
    SchemaInvalidated,
    /// A custom command was handed to `toolbar_command` listeners.
    Dispatched(String),
}
