//! Data platform gateway library.
//!
//! Exposes the token and ESG universe clients, the Actix inbound adapter that
//! serves them, and the reqwest outbound adapter they talk through.

pub mod config;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

pub use domain::TraceId;
pub use middleware::Trace;
