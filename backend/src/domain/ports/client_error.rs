//! Gateway-level failures raised by the data platform clients.
//!
//! Upstream rejections (a token endpoint `invalid_grant`, a universe `403`)
//! are not errors at this level: they arrive as `Outcome::Failure`. These
//! variants cover everything that prevents an outcome from being produced.

use super::define_port_error;
use super::http_invoker::HttpInvokerError;

define_port_error! {
    /// Errors that stop a client call from producing an outcome.
    pub enum ClientError {
        /// The transport failed before a response arrived.
        Transport { message: String } =>
            "upstream transport failed: {message}",
        /// The upstream did not answer within the request deadline.
        Timeout { message: String } =>
            "upstream request timed out: {message}",
        /// A response body did not match the expected shape.
        MalformedResponse { message: String } =>
            "upstream response malformed: {message}",
        /// The redirect chain was longer than the configured bound.
        RedirectExhausted { max_redirects: u32, location: String } =>
            "redirect limit of {max_redirects} exceeded before {location}",
        /// A redirect carried a `Location` that cannot be turned into a URL.
        InvalidRedirect { location: String } =>
            "redirect location is not a usable URL: {location}",
        /// The request could not be built or sent as given.
        InvalidRequest { message: String } =>
            "upstream request invalid: {message}",
    }
}

impl From<HttpInvokerError> for ClientError {
    fn from(error: HttpInvokerError) -> Self {
        match error {
            HttpInvokerError::Transport { message } => Self::Transport { message },
            HttpInvokerError::Timeout { message } => Self::Timeout { message },
            HttpInvokerError::InvalidRequest { message } => Self::InvalidRequest { message },
        }
    }
}
