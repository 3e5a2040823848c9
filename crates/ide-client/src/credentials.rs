//! Credential policy and header providers.
//!
//! Introspection requests always carry the user's session so the schema
//! reflects everything they can see. Other operations carry it only while
//! the authenticated toggle is on.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::{AUTHORIZATION, COOKIE, HeaderMap, HeaderName, HeaderValue};
use serde::{Deserialize, Serialize};

use ide_core::config::auth::AuthConfig;
use ide_core::error::AppError;
use ide_core::result::AppResult;

/// Header carrying the host's REST nonce.
pub const NONCE_HEADER: &str = "X-WP-Nonce";

/// Whether session credentials accompany a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialMode {
    /// Send session credentials.
    Include,
    /// Send no session credentials.
    Omit,
}

impl CredentialMode {
    /// Returns the wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Include => "include",
            Self::Omit => "omit",
        }
    }
}

impl fmt::Display for CredentialMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks the credential mode for one request.
pub fn credential_mode(is_introspection: bool, is_authenticated: bool) -> CredentialMode {
    if is_introspection || is_authenticated {
        CredentialMode::Include
    } else {
        CredentialMode::Omit
    }
}

/// Contributes headers to outgoing requests.
pub trait CredentialProvider: Send + Sync + fmt::Debug {
    /// Adds this provider's headers for a request sent with `mode`.
    fn apply(&self, mode: CredentialMode, headers: &mut HeaderMap) -> AppResult<()>;
}

/// Static HTTP basic auth, sent with every request.
///
/// This protects the endpoint itself (e.g. a password-protected staging
/// site) and has nothing to do with the user's session.
#[derive(Clone)]
pub struct BasicAuthProvider {
    header: String,
}

impl fmt::Debug for BasicAuthProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthProvider")
            .field("header", &"<redacted>")
            .finish()
    }
}

impl BasicAuthProvider {
    /// Builds the provider from a username and password.
    pub fn new(username: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        Self {
            header: format!("Basic {encoded}"),
        }
    }
}

impl CredentialProvider for BasicAuthProvider {
    fn apply(&self, _mode: CredentialMode, headers: &mut HeaderMap) -> AppResult<()> {
        headers.insert(AUTHORIZATION, header_value(&self.header)?);
        Ok(())
    }
}

/// The host session: cookie plus nonce, sent only in [`CredentialMode::Include`].
#[derive(Clone, Default)]
pub struct SessionCredentials {
    cookie: Option<String>,
    nonce: Option<String>,
}

impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("cookie", &self.cookie.as_ref().map(|_| "<redacted>"))
            .field("nonce", &self.nonce.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl SessionCredentials {
    /// Creates session credentials.
    pub fn new(cookie: Option<String>, nonce: Option<String>) -> Self {
        Self { cookie, nonce }
    }

    /// Returns whether there is anything to send.
    pub fn is_empty(&self) -> bool {
        self.cookie.is_none() && self.nonce.is_none()
    }
}

impl CredentialProvider for SessionCredentials {
    fn apply(&self, mode: CredentialMode, headers: &mut HeaderMap) -> AppResult<()> {
        if mode == CredentialMode::Omit {
            return Ok(());
        }
        if let Some(cookie) = &self.cookie {
            headers.insert(COOKIE, header_value(cookie)?);
        }
        if let Some(nonce) = &self.nonce {
            headers.insert(HeaderName::from_static("x-wp-nonce"), header_value(nonce)?);
        }
        Ok(())
    }
}

/// Builds the providers described by the auth configuration.
pub fn providers_from_config(auth: &AuthConfig) -> Vec<Box<dyn CredentialProvider>> {
    let mut providers: Vec<Box<dyn CredentialProvider>> = Vec::new();
    if let Some(basic) = &auth.basic_auth {
        providers.push(Box::new(BasicAuthProvider::new(&basic.username, &basic.password)));
    }
    let session = SessionCredentials::new(auth.session_cookie.clone(), auth.nonce.clone());
    if !session.is_empty() {
        providers.push(Box::new(session));
    }
    providers
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::configuration(format!("Invalid credential header value: {e}")))
}
