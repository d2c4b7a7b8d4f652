//! Reqwest-backed [`HttpInvoker`] adapter.
//!
//! This adapter owns transport details only: the shared connection pool, the
//! per-request timeout, and mapping reqwest failures onto port errors.
//! Redirects are never followed here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use reqwest::{Client, Method};

use crate::domain::ports::{HttpInvoker, HttpInvokerError, HttpMethod, HttpRequest, HttpResponse};

/// Request timeout applied when none is configured.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = concat!("dp-gateway/", env!("CARGO_PKG_VERSION"));

/// Invoker sharing one pooled reqwest client across all calls.
#[derive(Clone)]
pub struct ReqwestHttpInvoker {
    client: Client,
}

impl ReqwestHttpInvoker {
    /// Build an invoker whose requests time out after `timeout`.
    ///
    /// ```rust,ignore
    /// let invoker = ReqwestHttpInvoker::new(DEFAULT_REQUEST_TIMEOUT);
    /// assert!(invoker.is_ok() || invoker.is_err());
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpInvoker for ReqwestHttpInvoker {
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpInvokerError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let mut builder = self.client.request(method, request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let headers = collect_headers(response.headers());
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_owned(),
            headers,
            body: body.to_vec(),
        })
    }
}

fn collect_headers(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_owned(), value.to_owned()))
        })
        .collect()
}

fn map_transport_error(error: reqwest::Error) -> HttpInvokerError {
    if error.is_timeout() {
        HttpInvokerError::timeout(error.to_string())
    } else if error.is_builder() {
        HttpInvokerError::invalid_request(error.to_string())
    } else {
        HttpInvokerError::transport(error.to_string())
    }
}
