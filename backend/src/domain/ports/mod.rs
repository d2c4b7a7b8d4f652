//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod client_error;
mod http_invoker;
mod token_service;
mod universe_service;

pub use client_error::ClientError;
#[cfg(test)]
pub use http_invoker::MockHttpInvoker;
pub use http_invoker::{HttpInvoker, HttpInvokerError, HttpMethod, HttpRequest, HttpResponse};
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{FixtureTokenService, TokenService};
#[cfg(test)]
pub use universe_service::MockUniverseService;
pub use universe_service::{FixtureUniverseService, UniverseService};
