//! Data platform endpoint locations.

use url::Url;

/// Default data platform API host.
pub const DEFAULT_PLATFORM_HOST: &str = "api.refinitiv.com";
/// Default OAuth2 token path.
pub const DEFAULT_TOKEN_PATH: &str = "auth/oauth2/v1/token";
/// Default ESG universe path.
pub const DEFAULT_UNIVERSE_PATH: &str = "data/environmental-social-governance/v1/universe";

/// Resolved token and universe URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformEndpoints {
    /// Token endpoint.
    pub token: Url,
    /// Universe endpoint.
    pub universe: Url,
}

impl PlatformEndpoints {
    /// Resolve both paths against `host`.
    ///
    /// A bare host becomes `https://<host>/`; a value that already carries a
    /// scheme (`http://127.0.0.1:9000`) is used as the base as given.
    ///
    /// # Examples
    /// ```
    /// use dp_gateway::domain::PlatformEndpoints;
    ///
    /// let endpoints = PlatformEndpoints::resolve("api.example.test", "auth/token", "/data/universe")
    ///     .expect("valid endpoints");
    /// assert_eq!(endpoints.token.as_str(), "https://api.example.test/auth/token");
    /// assert_eq!(endpoints.universe.as_str(), "https://api.example.test/data/universe");
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] when the host or a path does not form a URL.
    pub fn resolve(
        host: &str,
        token_path: &str,
        universe_path: &str,
    ) -> Result<Self, url::ParseError> {
        let host = host.trim().trim_end_matches('/');
        let base = if host.contains("://") {
            Url::parse(&format!("{host}/"))?
        } else {
            Url::parse(&format!("https://{host}/"))?
        };
        Ok(Self {
            token: base.join(token_path.trim_start_matches('/'))?,
            universe: base.join(universe_path.trim_start_matches('/'))?,
        })
    }

    /// Endpoints on the default platform host and paths.
    ///
    /// # Errors
    ///
    /// Never fails for the built-in constants; the signature mirrors
    /// [`PlatformEndpoints::resolve`].
    pub fn platform_default() -> Result<Self, url::ParseError> {
        Self::resolve(
            DEFAULT_PLATFORM_HOST,
            DEFAULT_TOKEN_PATH,
            DEFAULT_UNIVERSE_PATH,
        )
    }
}
