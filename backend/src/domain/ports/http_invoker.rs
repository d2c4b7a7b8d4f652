//! Driven port for sending one HTTP request and receiving one HTTP response.
//!
//! Implementations must not follow redirects on their own: a 3xx response is
//! returned to the caller as-is so the domain can apply its own bounded
//! redirect policy.

use async_trait::async_trait;
use url::Url;

use super::define_port_error;
use crate::domain::ResponseStatus;

/// HTTP methods used against the data platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
}

/// Outbound request handed to an [`HttpInvoker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Request method.
    pub method: HttpMethod,
    /// Absolute target URL.
    pub url: Url,
    /// Header name/value pairs in insertion order.
    pub headers: Vec<(String, String)>,
    /// Optional request body.
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Build a body-less `GET` request.
    pub fn get(url: Url) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            headers: Vec::new(),
            body: None,
        }
    }

    /// Build a `POST` request carrying an `application/x-www-form-urlencoded`
    /// body encoded from `fields`.
    ///
    /// # Examples
    ///
    /// ```
    /// use dp_gateway::domain::ports::HttpRequest;
    /// use url::Url;
    ///
    /// let url = Url::parse("https://api.example.test/token").expect("valid url");
    /// let request = HttpRequest::post_form(url, &[("grant_type", "password")]);
    /// assert_eq!(request.body.as_deref(), Some(&b"grant_type=password"[..]));
    /// ```
    pub fn post_form(url: Url, fields: &[(&str, &str)]) -> Self {
        let body = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(fields)
            .finish();
        Self {
            method: HttpMethod::Post,
            url,
            headers: vec![(
                "Content-Type".to_owned(),
                "application/x-www-form-urlencoded".to_owned(),
            )],
            body: Some(body.into_bytes()),
        }
    }

    /// Append a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Decode the form body back into pairs. Empty for non-form requests.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        self.body
            .as_deref()
            .map(|body| {
                url::form_urlencoded::parse(body)
                    .into_owned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default()
    }

    /// Same request re-targeted at `url`.
    #[must_use]
    pub fn retarget(&self, url: Url) -> Self {
        Self {
            url,
            ..self.clone()
        }
    }
}

/// Response returned by an [`HttpInvoker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Numeric status code.
    pub status: u16,
    /// Reason phrase, or the canonical phrase when the transport has none.
    pub reason: String,
    /// Header name/value pairs; values that are not valid UTF-8 are dropped.
    pub headers: Vec<(String, String)>,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Build a response with no headers.
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: reason.into(),
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Append a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// Status code and reason text of this response.
    pub fn response_status(&self) -> ResponseStatus {
        ResponseStatus::new(self.status, self.reason.as_str())
    }

    /// Whether the body holds anything other than whitespace.
    pub fn has_content(&self) -> bool {
        self.body.iter().any(|byte| !byte.is_ascii_whitespace())
    }
}

fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(candidate, _)| candidate.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

define_port_error! {
    /// Errors surfaced by the HTTP transport.
    pub enum HttpInvokerError {
        /// The request failed before a response was received.
        Transport { message: String } =>
            "http transport failed: {message}",
        /// The per-request deadline elapsed.
        Timeout { message: String } =>
            "http request timed out: {message}",
        /// The transport rejected the request before sending it.
        InvalidRequest { message: String } =>
            "http request invalid: {message}",
    }
}

/// Port for exchanging one HTTP request for one HTTP response.
///
/// Implementations are shared across concurrent calls and must be safe to use
/// from many tasks at once.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HttpInvoker: Send + Sync {
    /// Send `request` and return the upstream response, whatever its status.
    async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, HttpInvokerError>;
}
