//! Gateway configuration loaded via OrthoConfig.
//!
//! Values layer CLI flags over `DP_GATEWAY_*` environment variables over
//! configuration files; accessors fill in defaults for anything left unset.

use std::net::{AddrParseError, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::{
    DEFAULT_MAX_REDIRECTS, DEFAULT_PLATFORM_HOST, DEFAULT_TOKEN_PATH, DEFAULT_UNIVERSE_PATH,
    PlatformEndpoints,
};
use crate::outbound::http::DEFAULT_REQUEST_TIMEOUT;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings for the upstream platform and the inbound listener.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DP_GATEWAY")]
pub struct GatewaySettings {
    /// Platform host, or a base URL with scheme for local upstreams.
    pub host: Option<String>,
    /// Path of the OAuth2 token endpoint.
    pub token_path: Option<String>,
    /// Path of the ESG universe endpoint.
    pub universe_path: Option<String>,
    /// Per-request upstream timeout in seconds.
    pub request_timeout_secs: Option<u64>,
    /// Maximum redirect hops followed per call.
    pub max_redirects: Option<u32>,
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<String>,
}

impl GatewaySettings {
    /// Configured platform host, falling back to the default.
    pub fn host(&self) -> &str {
        self.host.as_deref().unwrap_or(DEFAULT_PLATFORM_HOST)
    }

    /// Token and universe URLs built from host and paths.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] when the configured values do not form URLs.
    pub fn endpoints(&self) -> Result<PlatformEndpoints, url::ParseError> {
        PlatformEndpoints::resolve(
            self.host(),
            self.token_path.as_deref().unwrap_or(DEFAULT_TOKEN_PATH),
            self.universe_path.as_deref().unwrap_or(DEFAULT_UNIVERSE_PATH),
        )
    }

    /// Upstream timeout, falling back to the default.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout_secs
            .map_or(DEFAULT_REQUEST_TIMEOUT, Duration::from_secs)
    }

    /// Redirect hop limit, falling back to the default.
    pub fn max_redirects(&self) -> u32 {
        self.max_redirects.unwrap_or(DEFAULT_MAX_REDIRECTS)
    }

    /// Listener address, falling back to the default.
    ///
    /// # Errors
    ///
    /// Returns [`AddrParseError`] when the configured address is invalid.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for gateway configuration parsing.

    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 6] = [
        "DP_GATEWAY_HOST",
        "DP_GATEWAY_TOKEN_PATH",
        "DP_GATEWAY_UNIVERSE_PATH",
        "DP_GATEWAY_REQUEST_TIMEOUT_SECS",
        "DP_GATEWAY_MAX_REDIRECTS",
        "DP_GATEWAY_BIND_ADDR",
    ];

    fn load_from_empty_args() -> GatewaySettings {
        GatewaySettings::load_from_iter([OsString::from("dp-gateway")])
            .expect("config should load")
    }

    #[rstest]
    fn default_values_are_used_when_missing() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.host(), DEFAULT_PLATFORM_HOST);
        assert_eq!(
            settings.endpoints().expect("default endpoints"),
            PlatformEndpoints::platform_default().expect("default endpoints")
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(30));
        assert_eq!(settings.max_redirects(), 5);
        assert_eq!(
            settings.bind_addr().expect("default bind address"),
            "0.0.0.0:8080".parse::<SocketAddr>().expect("socket address")
        );
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("DP_GATEWAY_HOST", Some("http://127.0.0.1:9000".to_owned())),
            ("DP_GATEWAY_TOKEN_PATH", Some("oauth/token".to_owned())),
            ("DP_GATEWAY_UNIVERSE_PATH", Some("esg/universe".to_owned())),
            ("DP_GATEWAY_REQUEST_TIMEOUT_SECS", Some("3".to_owned())),
            ("DP_GATEWAY_MAX_REDIRECTS", Some("1".to_owned())),
            ("DP_GATEWAY_BIND_ADDR", Some("127.0.0.1:18080".to_owned())),
        ]);

        let settings = load_from_empty_args();
        let endpoints = settings.endpoints().expect("endpoints resolve");
        assert_eq!(endpoints.token.as_str(), "http://127.0.0.1:9000/oauth/token");
        assert_eq!(
            endpoints.universe.as_str(),
            "http://127.0.0.1:9000/esg/universe"
        );
        assert_eq!(settings.request_timeout(), Duration::from_secs(3));
        assert_eq!(settings.max_redirects(), 1);
        assert_eq!(
            settings.bind_addr().expect("bind address"),
            "127.0.0.1:18080".parse::<SocketAddr>().expect("socket address")
        );
    }

    #[rstest]
    fn invalid_bind_address_is_reported() {
        let _guard = lock_env([("DP_GATEWAY_BIND_ADDR", Some("not-an-address".to_owned()))]);
        assert!(load_from_empty_args().bind_addr().is_err());
    }
}
