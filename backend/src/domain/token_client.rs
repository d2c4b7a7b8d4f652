//! Token endpoint client.
//!
//! Builds the form-encoded grant, sends it through the redirect follower, and
//! turns the final response into a [`TokenOutcome`].

use async_trait::async_trait;
use tracing::{Instrument, info_span, warn};
use url::Url;

use super::redirect::{ALLOW_AUTO_REDIRECT_HEADER, RedirectFollower};
use super::token::{TokenError, TokenOutcome, TokenRequest, TokenSuccess};
use super::trace_id::current_trace_label;
use super::wire::{decode_body, decode_error_body};
use crate::domain::ports::{ClientError, HttpRequest, HttpResponse, TokenService};

/// [`TokenService`] backed by the platform's OAuth2 token endpoint.
#[derive(Clone)]
pub struct TokenClient {
    follower: RedirectFollower,
    endpoint: Url,
}

impl TokenClient {
    /// Client posting grants to `endpoint`.
    pub fn new(follower: RedirectFollower, endpoint: Url) -> Self {
        Self { follower, endpoint }
    }

    /// Token endpoint requests start at.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl TokenService for TokenClient {
    async fn fetch_token(&self, request: &TokenRequest) -> Result<TokenOutcome, ClientError> {
        let span = info_span!(
            "fetch_token",
            grant_type = request.grant_type(),
            trace_id = %current_trace_label(),
        );
        async move {
            let http_request = build_token_request(self.endpoint.clone(), request);
            let response = self.follower.send(&http_request).await?;
            interpret_token_response(&response)
        }
        .instrument(span)
        .await
    }
}

fn build_token_request(endpoint: Url, request: &TokenRequest) -> HttpRequest {
    let (name, value) = ALLOW_AUTO_REDIRECT_HEADER;
    HttpRequest::post_form(endpoint, &request.form_fields()).with_header(name, value)
}

fn interpret_token_response(response: &HttpResponse) -> Result<TokenOutcome, ClientError> {
    let status = response.response_status();
    if status.is_ok() {
        let payload: TokenSuccess = decode_body(&response.body, "token")?;
        return Ok(TokenOutcome::Success { status, payload });
    }

    let payload: TokenError = decode_error_body(response, "token error");
    warn!(
        status = status.code(),
        error = payload.error.as_deref().unwrap_or_default(),
        "token endpoint rejected grant"
    );
    Ok(TokenOutcome::Failure { status, payload })
}

#[cfg(test)]
mod tests {
    //! Request shape and response interpretation for token grants.

    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::MockHttpInvoker;
    use rstest::rstest;

    fn endpoint() -> Url {
        Url::parse("https://api.example.test/auth/oauth2/v1/token").expect("valid url")
    }

    fn client(invoker: MockHttpInvoker) -> TokenClient {
        TokenClient::new(RedirectFollower::new(Arc::new(invoker)), endpoint())
    }

    fn form_value(request: &HttpRequest, name: &str) -> Option<String> {
        request
            .form_fields()
            .into_iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    #[test]
    fn token_requests_are_form_posts_with_the_redirect_marker() {
        let request = build_token_request(endpoint(), &TokenRequest::new("u", "p", "app"));
        assert_eq!(request.url, endpoint());
        assert_eq!(request.header("AllowAutoRedirect"), Some("False"));
        assert_eq!(
            request.header("Content-Type"),
            Some("application/x-www-form-urlencoded")
        );
        assert_eq!(form_value(&request, "takeExclusiveSignOnControl").as_deref(), Some("True"));
        assert_eq!(form_value(&request, "scope").as_deref(), Some("trapi"));
    }

    #[tokio::test]
    async fn success_decodes_token_payload() {
        let mut invoker = MockHttpInvoker::new();
        invoker
            .expect_send()
            .withf(|request| form_value(request, "password").as_deref() == Some("p"))
            .times(1)
            .returning(|_| {
                Ok(HttpResponse::new(
                    200,
                    "OK",
                    br#"{"access_token":"a","expires_in":"300","refresh_token":"r","scope":"trapi","token_type":"Bearer"}"#.to_vec(),
                ))
            });

        let outcome = client(invoker)
            .fetch_token(&TokenRequest::new("u", "p", "app"))
            .await
            .expect("outcome");
        assert!(outcome.is_success());
        let payload = outcome.success().expect("success branch");
        assert_eq!(payload.access_token.as_deref(), Some("a"));
        assert_eq!(payload.expires_in, 300);
        assert_eq!(outcome.status().text(), "OK");
    }

    #[tokio::test]
    async fn refresh_grant_never_sends_password() {
        let mut invoker = MockHttpInvoker::new();
        invoker
            .expect_send()
            .withf(|request| {
                form_value(request, "password").is_none()
                    && form_value(request, "grant_type").as_deref() == Some("refresh_token")
                    && form_value(request, "refresh_token").as_deref() == Some("r1")
            })
            .times(1)
            .returning(|_| Ok(HttpResponse::new(200, "OK", br#"{"access_token":"a"}"#.to_vec())));

        let request = TokenRequest::new("u", "p", "app").with_refresh_token("r1");
        let outcome = client(invoker).fetch_token(&request).await.expect("outcome");
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn expired_refresh_token_is_a_failure_outcome() {
        let mut invoker = MockHttpInvoker::new();
        invoker.expect_send().times(1).returning(|_| {
            Ok(HttpResponse::new(
                400,
                "Bad Request",
                br#"{"error":"invalid_grant","error_description":"token expired"}"#.to_vec(),
            ))
        });

        let request = TokenRequest::new("u", "", "app").with_refresh_token("stale");
        let outcome = client(invoker).fetch_token(&request).await.expect("outcome");
        assert!(!outcome.is_success());
        assert_eq!(outcome.status().code(), 400);
        let error = outcome.failure().expect("failure branch");
        assert_eq!(error.error.as_deref(), Some("invalid_grant"));
        assert_eq!(error.error_description.as_deref(), Some("token expired"));
        assert!(error.error_uri.is_none());
    }

    #[rstest]
    #[case::empty(b"")]
    #[case::whitespace(b"\n")]
    #[case::html(b"<html>maintenance</html>")]
    #[case::error_object(br#"{"error":{"code":"E1"}}"#)]
    #[tokio::test]
    async fn unreadable_error_bodies_keep_only_the_status(#[case] body: &'static [u8]) {
        let mut invoker = MockHttpInvoker::new();
        invoker
            .expect_send()
            .times(1)
            .returning(move |_| Ok(HttpResponse::new(503, "Service Unavailable", body.to_vec())));

        let outcome = client(invoker)
            .fetch_token(&TokenRequest::new("u", "p", "app"))
            .await
            .expect("outcome");
        assert_eq!(outcome.failure(), Some(&TokenError::default()));
        assert_eq!(outcome.status().code(), 503);
    }

    #[rstest]
    #[case::html_success(200, b"<html></html>")]
    #[case::empty_success(200, b"")]
    #[tokio::test]
    async fn undecodable_success_bodies_are_malformed_responses(
        #[case] status: u16,
        #[case] body: &'static [u8],
    ) {
        let mut invoker = MockHttpInvoker::new();
        invoker
            .expect_send()
            .times(1)
            .returning(move |_| Ok(HttpResponse::new(status, "", body.to_vec())));

        let error = client(invoker)
            .fetch_token(&TokenRequest::new("u", "p", "app"))
            .await
            .expect_err("body cannot be decoded");
        assert!(matches!(error, ClientError::MalformedResponse { .. }));
    }
}
