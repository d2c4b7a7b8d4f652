//! Driving port for exchanging credentials for an access token.

use async_trait::async_trait;

use super::ClientError;
use crate::domain::{ResponseStatus, TokenOutcome, TokenRequest, TokenSuccess};

/// Use-case port for token exchanges.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenService: Send + Sync {
    /// Exchange `request`'s credentials for a token.
    ///
    /// Upstream rejections arrive as `Ok(Outcome::Failure { .. })`.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use dp_gateway::domain::TokenRequest;
    /// use dp_gateway::domain::ports::{FixtureTokenService, TokenService};
    ///
    /// let outcome = FixtureTokenService
    ///     .fetch_token(&TokenRequest::new("user", "secret", "app"))
    ///     .await?;
    /// assert!(outcome.is_success());
    /// # Ok::<(), dp_gateway::domain::ports::ClientError>(())
    /// ```
    async fn fetch_token(&self, request: &TokenRequest) -> Result<TokenOutcome, ClientError>;
}

/// Fixture returning a fixed bearer token without network access.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureTokenService;

#[async_trait]
impl TokenService for FixtureTokenService {
    async fn fetch_token(&self, request: &TokenRequest) -> Result<TokenOutcome, ClientError> {
        Ok(TokenOutcome::Success {
            status: ResponseStatus::new(200, "OK"),
            payload: TokenSuccess {
                access_token: Some("fixture-access-token".to_owned()),
                expires_in: 600,
                refresh_token: Some("fixture-refresh-token".to_owned()),
                scope: Some(request.scope.clone()),
                token_type: Some("Bearer".to_owned()),
            },
        })
    }
}
