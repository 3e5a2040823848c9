//! GraphQL endpoint configuration.

use serde::{Deserialize, Serialize};

/// Where operations are sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Absolute URL of the GraphQL endpoint.
    #[serde(default = "default_url")]
    pub url: String,
    /// Request timeout in seconds. `None` waits indefinitely.
    #[serde(default)]
    pub timeout_seconds: Option<u64>,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            timeout_seconds: None,
        }
    }
}

fn default_url() -> String {
    "http://localhost/graphql".to_string()
}
