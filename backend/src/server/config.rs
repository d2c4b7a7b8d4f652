//! HTTP server configuration derived from gateway settings.

use std::net::SocketAddr;
use std::time::Duration;

use dp_gateway::config::GatewaySettings;
use dp_gateway::domain::PlatformEndpoints;

/// Resolved configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) endpoints: PlatformEndpoints,
    pub(crate) request_timeout: Duration,
    pub(crate) max_redirects: u32,
}

impl ServerConfig {
    /// Resolve settings into concrete addresses and URLs.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] when the bind address or the upstream URLs
    /// cannot be parsed.
    pub fn from_settings(settings: &GatewaySettings) -> std::io::Result<Self> {
        let bind_addr = settings
            .bind_addr()
            .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;
        let endpoints = settings
            .endpoints()
            .map_err(|e| std::io::Error::other(format!("invalid upstream endpoint: {e}")))?;
        Ok(Self {
            bind_addr,
            endpoints,
            request_timeout: settings.request_timeout(),
            max_redirects: settings.max_redirects(),
        })
    }

    /// Socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
