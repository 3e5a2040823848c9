//! Outgoing operation payload.

use serde::{Deserialize, Serialize};

/// The JSON body POSTed to the GraphQL endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    /// Operation document.
    pub query: String,
    /// Variables, if any.
    #[serde(default)]
    pub variables: Option<serde_json::Value>,
    /// Operation to run when the document holds several.
    #[serde(default)]
    pub operation_name: Option<String>,
}

impl OperationRequest {
    /// Creates a request for a document without variables.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    /// Sets the variables.
    pub fn with_variables(mut self, variables: serde_json::Value) -> Self {
        self.variables = Some(variables);
        self
    }

    /// Sets the operation name.
    pub fn with_operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}
