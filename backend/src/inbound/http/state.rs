//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FixtureTokenService, FixtureUniverseService, TokenService, UniverseService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub tokens: Arc<dyn TokenService>,
    pub universe: Arc<dyn UniverseService>,
}

impl HttpState {
    /// Construct state from port implementations.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use dp_gateway::domain::ports::{FixtureTokenService, FixtureUniverseService};
    /// use dp_gateway::inbound::http::state::HttpState;
    ///
    /// let state = HttpState::new(
    ///     Arc::new(FixtureTokenService),
    ///     Arc::new(FixtureUniverseService),
    /// );
    /// let _tokens = state.tokens.clone();
    /// ```
    pub fn new(tokens: Arc<dyn TokenService>, universe: Arc<dyn UniverseService>) -> Self {
        Self { tokens, universe }
    }

    /// State backed by the fixture ports; no network access.
    pub fn fixtures() -> Self {
        Self::new(Arc::new(FixtureTokenService), Arc::new(FixtureUniverseService))
    }
}
