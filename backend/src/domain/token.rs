//! Token endpoint request and payload types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::outcome::Outcome;
use super::wire;

/// Scope requested when the caller does not name one.
pub const DEFAULT_SCOPE: &str = "trapi";

/// Parameters for one token exchange.
///
/// With `use_refresh_token` set, the refresh token is exchanged and the
/// password is never sent. Otherwise a password grant is made with
/// `takeExclusiveSignOnControl=True`, which signs out every other active
/// session of the account: password grants are not idempotent.
///
/// # Examples
/// ```
/// use dp_gateway::domain::{DEFAULT_SCOPE, TokenRequest};
///
/// let request = TokenRequest::new("user", "secret", "app-key");
/// assert_eq!(request.scope, DEFAULT_SCOPE);
/// assert!(!request.use_refresh_token);
///
/// let refresh = request.with_refresh_token("refresh-123");
/// assert!(refresh.use_refresh_token);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct TokenRequest {
    /// Platform username or machine id.
    pub username: String,
    /// Platform password; unused for refresh grants.
    pub password: String,
    /// Client id (app key).
    pub client_id: String,
    /// Requested scope for password grants.
    pub scope: String,
    /// Refresh token; used only when `use_refresh_token` is set.
    pub refresh_token: String,
    /// Select the refresh-token grant instead of the password grant.
    pub use_refresh_token: bool,
}

impl TokenRequest {
    /// Password grant with the default scope.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            client_id: client_id.into(),
            scope: DEFAULT_SCOPE.to_owned(),
            refresh_token: String::new(),
            use_refresh_token: false,
        }
    }

    /// Switch to the refresh-token grant using `refresh_token`.
    #[must_use]
    pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
        self.refresh_token = refresh_token.into();
        self.use_refresh_token = true;
        self
    }

    /// Override the requested scope.
    #[must_use]
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// Grant name used in logs.
    pub fn grant_type(&self) -> &'static str {
        if self.use_refresh_token {
            "refresh_token"
        } else {
            "password"
        }
    }

    /// Form fields posted to the token endpoint, in wire order.
    pub(crate) fn form_fields(&self) -> Vec<(&str, &str)> {
        let mut fields = vec![
            ("username", self.username.as_str()),
            ("client_id", self.client_id.as_str()),
        ];
        if self.use_refresh_token {
            fields.push(("grant_type", "refresh_token"));
            fields.push(("refresh_token", self.refresh_token.as_str()));
        } else {
            fields.push(("takeExclusiveSignOnControl", "True"));
            fields.push(("scope", self.scope.as_str()));
            fields.push(("grant_type", "password"));
            fields.push(("password", self.password.as_str()));
        }
        fields
    }
}

impl fmt::Debug for TokenRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("scope", &self.scope)
            .field("refresh_token", &"<redacted>")
            .field("use_refresh_token", &self.use_refresh_token)
            .finish()
    }
}

/// Successful token response.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSuccess {
    /// Bearer credential for data requests. Absent only on malformed data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Lifetime of the access token in seconds.
    #[serde(default, deserialize_with = "wire::u64_or_zero")]
    pub expires_in: u64,
    /// Token for the next refresh grant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Granted scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Token type, conventionally `Bearer`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

impl fmt::Debug for TokenSuccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("TokenSuccess")
            .field("access_token", &redact(&self.access_token))
            .field("expires_in", &self.expires_in)
            .field("refresh_token", &redact(&self.refresh_token))
            .field("scope", &self.scope)
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// OAuth2 error payload from the token endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenError {
    /// OAuth2 error code such as `invalid_grant`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_description: Option<String>,
    /// Link to further documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_uri: Option<String>,
}

/// Outcome of a token exchange.
pub type TokenOutcome = Outcome<TokenSuccess, TokenError>;
