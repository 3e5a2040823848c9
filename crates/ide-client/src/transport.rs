//! Network transport for GraphQL operations.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};

use ide_core::config::IdeConfig;
use ide_core::error::{AppError, ErrorKind};
use ide_core::result::AppResult;

use crate::credentials::{CredentialMode, CredentialProvider, providers_from_config};
use crate::operation::OperationRequest;

/// Sends an operation to the GraphQL endpoint and returns the JSON response.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends `request` with the given credential mode.
    async fn send(&self, request: &OperationRequest, mode: CredentialMode) -> AppResult<Value>;
}

/// HTTP POST transport built on `reqwest`.
pub struct HttpTransport {
    client: Client,
    endpoint: String,
    providers: Vec<Box<dyn CredentialProvider>>,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.endpoint)
            .field("providers", &self.providers)
            .finish()
    }
}

impl HttpTransport {
    /// Creates a transport for `endpoint` with no credential providers.
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| transport_error("Failed to build HTTP client", e))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            providers: Vec::new(),
        })
    }

    /// Creates a transport from the endpoint and auth configuration.
    pub fn from_config(config: &IdeConfig) -> AppResult<Self> {
        let timeout = config.endpoint.timeout_seconds.map(Duration::from_secs);
        let mut transport = Self::new(config.endpoint.url.clone(), timeout)?;
        transport.providers = providers_from_config(&config.auth);
        Ok(transport)
    }

    /// Adds a credential provider.
    pub fn with_provider(mut self, provider: Box<dyn CredentialProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Returns the endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn headers(&self, mode: CredentialMode) -> AppResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for provider in &self.providers {
            provider.apply(mode, &mut headers)?;
        }
        Ok(headers)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: &OperationRequest, mode: CredentialMode) -> AppResult<Value> {
        debug!(
            endpoint = %self.endpoint,
            credentials = %mode,
            operation = request.operation_name.as_deref().unwrap_or(""),
            "Sending GraphQL operation"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .headers(self.headers(mode)?)
            .json(request)
            .send()
            .await
            .map_err(|e| transport_error("GraphQL request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, "GraphQL endpoint returned an error status");
            return Err(AppError::transport(format!("status {status}: {text}")));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| transport_error("Invalid GraphQL response", e))
    }
}

fn transport_error(context: &str, err: reqwest::Error) -> AppError {
    AppError::with_source(ErrorKind::Transport, format!("{context}: {err}"), err)
}
