//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **http**: reqwest-backed `HttpInvoker` with redirects disabled and a
//!   per-request timeout.
//!
//! Adapters are thin translators between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod http;
