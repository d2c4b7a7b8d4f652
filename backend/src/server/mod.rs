//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use dp_gateway::Trace;
use dp_gateway::inbound::http::health::{HealthState, live, ready};
use dp_gateway::inbound::http::state::HttpState;
use dp_gateway::inbound::http::token::fetch_token;
use dp_gateway::inbound::http::universe::fetch_universe;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/api/v1")
        .service(fetch_token)
        .service(fetch_universe);

    App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live)
}

/// Construct an Actix HTTP server for the gateway.
///
/// # Errors
///
/// Propagates [`std::io::Error`] when the HTTP client cannot be built or the
/// socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: &ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(config)?;
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(config.bind_addr())?
        .run();

    info!(
        bind_addr = %config.bind_addr,
        token_endpoint = %config.endpoints.token,
        universe_endpoint = %config.endpoints.universe,
        max_redirects = config.max_redirects,
        "gateway listening"
    );
    health_state.mark_ready();
    Ok(server)
}
