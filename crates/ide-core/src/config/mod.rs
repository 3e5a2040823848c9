//! Application configuration schemas.
//!
//! Configuration is deserialized from an optional TOML file via the
//! `config` crate, overlaid with `GRAPHQL_IDE__*` environment variables.
//! Every section has defaults, so an empty configuration is valid.

pub mod auth;
pub mod endpoint;
pub mod logging;
pub mod storage;

use serde::{Deserialize, Serialize};

use self::auth::AuthConfig;
use self::endpoint::EndpointConfig;
use self::logging::LoggingConfig;
use self::storage::StorageConfig;

use crate::error::AppError;

/// Root IDE configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdeConfig {
    /// GraphQL endpoint settings.
    #[serde(default)]
    pub endpoint: EndpointConfig,
    /// Credential settings for outgoing requests.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Client-local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl IdeConfig {
    /// Load configuration from a TOML file and the environment.
    ///
    /// The file is optional; environment variables prefixed with
    /// `GRAPHQL_IDE` (nested with `__`) take precedence over it.
    pub fn load(path: &str) -> Result<Self, AppError> {
        tracing::debug!(path = %path, "Loading configuration");

        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("GRAPHQL_IDE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}
