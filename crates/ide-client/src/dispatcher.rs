//! Per-request credential decisions.

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, instrument};

use ide_core::result::AppResult;

use crate::classify::classify;
use crate::credentials::{CredentialMode, credential_mode};
use crate::operation::OperationRequest;
use crate::transport::Transport;

/// What the dispatcher decided for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchPlan {
    /// Whether the document is introspection-class.
    pub is_introspection: bool,
    /// Credential mode the request is sent with.
    pub credentials: CredentialMode,
}

/// Classifies operations and sends them with the right credentials.
#[derive(Debug, Clone)]
pub struct RequestDispatcher {
    transport: Arc<dyn Transport>,
}

impl RequestDispatcher {
    /// Creates a dispatcher over `transport`.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Decides how `request` would be sent without sending it.
    pub fn plan(request: &OperationRequest, is_authenticated: bool) -> DispatchPlan {
        let is_introspection = classify(&request.query);
        DispatchPlan {
            is_introspection,
            credentials: credential_mode(is_introspection, is_authenticated),
        }
    }

    /// Sends `request`, returning the endpoint's JSON response.
    ///
    /// `is_authenticated` is read once by the caller at send time; later
    /// toggles do not affect a request already in flight.
    #[instrument(skip(self, request), fields(operation = request.operation_name.as_deref().unwrap_or("")))]
    pub async fn execute(
        &self,
        request: &OperationRequest,
        is_authenticated: bool,
    ) -> AppResult<Value> {
        let plan = Self::plan(request, is_authenticated);
        debug!(
            is_introspection = plan.is_introspection,
            credentials = %plan.credentials,
            "Dispatching operation"
        );
        self.transport.send(request, plan.credentials).await
    }
}
