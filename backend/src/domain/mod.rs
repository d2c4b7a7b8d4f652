//! Domain types, clients and ports for the data platform gateway.
//!
//! Purpose: turn data platform responses (success payloads, structured error
//! payloads, redirect chains) into typed [`Outcome`]s. Transport concerns stay
//! behind the [`ports::HttpInvoker`] port.
//!
//! Public surface:
//! - Outcome / ResponseStatus: tagged upstream result with its final status.
//! - TokenClient / UniverseClient: implementations of the driving ports.
//! - RedirectFollower: bounded manual redirect handling.
//! - UniverseSearch: keyword filtering over fetched rows.

mod endpoints;
mod outcome;
pub mod ports;
mod redirect;
mod search;
mod token;
mod token_client;
mod trace_id;
mod universe;
mod universe_client;
mod wire;

pub use self::endpoints::{
    DEFAULT_PLATFORM_HOST, DEFAULT_TOKEN_PATH, DEFAULT_UNIVERSE_PATH, PlatformEndpoints,
};
pub use self::outcome::{Outcome, ResponseStatus};
pub use self::redirect::{DEFAULT_MAX_REDIRECTS, RedirectFollower};
pub use self::search::UniverseSearch;
pub use self::token::{DEFAULT_SCOPE, TokenError, TokenOutcome, TokenRequest, TokenSuccess};
pub use self::token_client::TokenClient;
pub use self::trace_id::TraceId;
pub use self::universe::{
    DEFAULT_TOKEN_TYPE, HeaderMeta, UniverseError, UniverseErrorDetail, UniverseOutcome,
    UniverseRequest, UniverseRow, UniverseSuccess,
};
pub use self::universe_client::UniverseClient;
