//! Builder wiring the reqwest adapter into the data platform clients.

use std::sync::Arc;

use actix_web::web;

use dp_gateway::domain::ports::HttpInvoker;
use dp_gateway::domain::{RedirectFollower, TokenClient, UniverseClient};
use dp_gateway::inbound::http::state::HttpState;
use dp_gateway::outbound::http::ReqwestHttpInvoker;

use super::ServerConfig;

/// Build handler state backed by live platform clients.
///
/// Both clients share one invoker, so one connection pool, and the same
/// redirect bound.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub(crate) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let invoker: Arc<dyn HttpInvoker> = Arc::new(
        ReqwestHttpInvoker::new(config.request_timeout)
            .map_err(|e| std::io::Error::other(format!("http client construction failed: {e}")))?,
    );
    let follower = RedirectFollower::new(invoker).with_max_redirects(config.max_redirects);
    let tokens = TokenClient::new(follower.clone(), config.endpoints.token.clone());
    let universe = UniverseClient::new(follower, config.endpoints.universe.clone());
    Ok(web::Data::new(HttpState::new(
        Arc::new(tokens),
        Arc::new(universe),
    )))
}
