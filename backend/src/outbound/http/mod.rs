//! HTTP transport adapters.
//!
//! This module provides the reqwest implementation of the `HttpInvoker` port.

mod reqwest_invoker;

pub use reqwest_invoker::{DEFAULT_REQUEST_TIMEOUT, ReqwestHttpInvoker};
