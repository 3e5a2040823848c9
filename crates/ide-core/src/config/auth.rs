//! Credential configuration for outgoing GraphQL requests.

use serde::{Deserialize, Serialize};

/// Credentials attached to outgoing requests.
///
/// `basic_auth` is sent with every request regardless of credential mode.
/// `session_cookie` and `nonce` are only sent when the request includes
/// credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Static HTTP basic-auth pair (e.g. a staging site behind a password).
    #[serde(default)]
    pub basic_auth: Option<BasicAuthConfig>,
    /// Raw `Cookie` header value carrying the host session.
    #[serde(default)]
    pub session_cookie: Option<String>,
    /// REST nonce sent as `X-WP-Nonce` alongside the session cookie.
    #[serde(default)]
    pub nonce: Option<String>,
}

/// Username/password pair for HTTP basic auth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BasicAuthConfig {
    /// Username.
    pub username: String,
    /// Password.
    pub password: String,
}
