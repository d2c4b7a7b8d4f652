//! HTTP error envelope for gateway-level failures.
//!
//! Upstream rejections are not errors here: they travel as outcomes with a
//! 200 status. This module covers requests the gateway could not serve at all,
//! either because the caller sent unusable parameters or because no outcome
//! could be produced from the upstream.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::TraceId;
use crate::domain::ports::ClientError;
use crate::middleware::TRACE_ID_HEADER;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Stable machine-readable error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Caller parameters are missing or malformed.
    InvalidRequest,
    /// The upstream answered with something unusable or not at all.
    BadGateway,
    /// The upstream did not answer in time.
    GatewayTimeout,
    /// The upstream redirected more times than allowed.
    RedirectLoop,
    /// Anything else.
    InternalError,
}

/// JSON error body: `{"code", "message", "traceId"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ApiError {
    code: ErrorCode,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    trace_id: Option<String>,
}

impl ApiError {
    /// Build an error, capturing the trace id in scope.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            trace_id: TraceId::current().map(|id| id.to_string()),
        }
    }

    /// Shorthand for [`ErrorCode::InvalidRequest`].
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Shorthand for [`ErrorCode::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn trace_id(&self) -> Option<&str> {
        self.trace_id.as_deref()
    }

    /// Replace the captured trace id.
    #[must_use]
    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = Some(trace_id.into());
        self
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::BadGateway => StatusCode::BAD_GATEWAY,
        ErrorCode::GatewayTimeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorCode::RedirectLoop => StatusCode::LOOP_DETECTED,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        warn!(error_kind = err.kind(), error = %err, "upstream call produced no outcome");
        let code = match &err {
            ClientError::Transport { .. }
            | ClientError::MalformedResponse { .. }
            | ClientError::InvalidRedirect { .. } => ErrorCode::BadGateway,
            ClientError::Timeout { .. } => ErrorCode::GatewayTimeout,
            ClientError::RedirectExhausted { .. } => ErrorCode::RedirectLoop,
            ClientError::InvalidRequest { .. } => ErrorCode::InvalidRequest,
        };
        Self::new(code, err.to_string())
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(self.code)
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(self)
    }
}

#[cfg(test)]
mod tests;
