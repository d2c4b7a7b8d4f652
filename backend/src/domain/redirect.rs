//! Manual, bounded redirect following on top of an [`HttpInvoker`].
//!
//! Transport-level redirects are disabled, so a 3xx reaches this layer. The
//! same request is re-issued at the `Location` target until a non-redirect
//! response arrives or the hop limit is reached.

use std::sync::Arc;

use tracing::debug;
use url::Url;

use crate::domain::ports::{ClientError, HttpInvoker, HttpRequest, HttpResponse};

/// Hop limit applied when none is configured.
pub const DEFAULT_MAX_REDIRECTS: u32 = 5;

const REDIRECT_STATUSES: [u16; 4] = [301, 302, 307, 308];

/// Header sent on every platform request to signal that redirects are handled
/// by the caller.
pub(crate) const ALLOW_AUTO_REDIRECT_HEADER: (&str, &str) = ("AllowAutoRedirect", "False");

/// Re-issues requests along a redirect chain with a fixed hop limit.
#[derive(Clone)]
pub struct RedirectFollower {
    invoker: Arc<dyn HttpInvoker>,
    max_redirects: u32,
}

impl RedirectFollower {
    /// Follow up to [`DEFAULT_MAX_REDIRECTS`] hops through `invoker`.
    pub fn new(invoker: Arc<dyn HttpInvoker>) -> Self {
        Self {
            invoker,
            max_redirects: DEFAULT_MAX_REDIRECTS,
        }
    }

    /// Override the hop limit. Zero disables following altogether.
    #[must_use]
    pub fn with_max_redirects(mut self, max_redirects: u32) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Configured hop limit.
    pub fn max_redirects(&self) -> u32 {
        self.max_redirects
    }

    /// Send `request`, following redirects, and return the response that
    /// ended the chain.
    ///
    /// A redirect status without a `Location` header ends the chain and is
    /// returned like any other response.
    ///
    /// # Errors
    ///
    /// - [`ClientError::RedirectExhausted`] once more than the configured
    ///   number of hops would be needed.
    /// - [`ClientError::InvalidRedirect`] when `Location` cannot be resolved.
    /// - Transport failures converted from the invoker.
    pub async fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ClientError> {
        let mut response = self.invoker.send(request).await?;
        let mut current = request.url.clone();
        let mut hops = 0_u32;
        while let Some(target) = redirect_target(&current, &response)? {
            if hops == self.max_redirects {
                return Err(ClientError::redirect_exhausted(
                    self.max_redirects,
                    target.as_str(),
                ));
            }
            hops += 1;
            debug!(
                from = %current,
                to = %target,
                status = response.status,
                hop = hops,
                "following upstream redirect"
            );
            response = self.invoker.send(&request.retarget(target.clone())).await?;
            current = target;
        }
        Ok(response)
    }
}

fn redirect_target(current: &Url, response: &HttpResponse) -> Result<Option<Url>, ClientError> {
    if !REDIRECT_STATUSES.contains(&response.status) {
        return Ok(None);
    }
    let Some(location) = response
        .header("location")
        .map(str::trim)
        .filter(|location| !location.is_empty())
    else {
        return Ok(None);
    };
    current
        .join(location)
        .map(Some)
        .map_err(|_| ClientError::invalid_redirect(location))
}

#[cfg(test)]
mod tests {
    //! Hop counting and `Location` handling against a mocked invoker.

    use super::*;
    use crate::domain::ports::{HttpInvokerError, MockHttpInvoker};
    use mockall::Sequence;
    use rstest::rstest;

    fn start() -> HttpRequest {
        HttpRequest::get(Url::parse("https://api.example.test/start").expect("valid url"))
    }

    fn redirect(status: u16, location: &str) -> HttpResponse {
        HttpResponse::new(status, "Redirect", Vec::new()).with_header("Location", location)
    }

    #[rstest]
    #[case(301)]
    #[case(302)]
    #[case(307)]
    #[case(308)]
    #[tokio::test]
    async fn follows_each_redirect_status_once(#[case] status: u16) {
        let mut invoker = MockHttpInvoker::new();
        let mut seq = Sequence::new();
        invoker
            .expect_send()
            .withf(|request| request.url.as_str() == "https://api.example.test/start")
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(redirect(status, "https://alt.example/x")));
        invoker
            .expect_send()
            .withf(|request| request.url.as_str() == "https://alt.example/x")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(HttpResponse::new(200, "OK", b"{}".to_vec())));

        let follower = RedirectFollower::new(Arc::new(invoker));
        let response = follower.send(&start()).await.expect("chain resolves");
        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn relative_locations_resolve_against_the_current_url() {
        let mut invoker = MockHttpInvoker::new();
        let mut seq = Sequence::new();
        invoker
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(redirect(307, "/moved?x=1")));
        invoker
            .expect_send()
            .withf(|request| request.url.as_str() == "https://api.example.test/moved?x=1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(HttpResponse::new(404, "Not Found", Vec::new())));

        let response = RedirectFollower::new(Arc::new(invoker))
            .send(&start())
            .await
            .expect("chain resolves");
        assert_eq!(response.status, 404);
    }

    #[tokio::test]
    async fn redirect_without_location_ends_the_chain() {
        let mut invoker = MockHttpInvoker::new();
        invoker
            .expect_send()
            .times(1)
            .returning(|_| Ok(HttpResponse::new(302, "Found", Vec::new())));

        let response = RedirectFollower::new(Arc::new(invoker))
            .send(&start())
            .await
            .expect("bare redirect is returned");
        assert_eq!(response.status, 302);
    }

    #[tokio::test]
    async fn loops_stop_after_the_hop_limit() {
        let mut invoker = MockHttpInvoker::new();
        invoker
            .expect_send()
            .times(3)
            .returning(|_| Ok(redirect(302, "https://api.example.test/start")));

        let error = RedirectFollower::new(Arc::new(invoker))
            .with_max_redirects(2)
            .send(&start())
            .await
            .expect_err("loop must be cut");
        assert_eq!(
            error,
            ClientError::redirect_exhausted(2_u32, "https://api.example.test/start")
        );
    }

    #[tokio::test]
    async fn zero_hop_limit_rejects_the_first_redirect() {
        let mut invoker = MockHttpInvoker::new();
        invoker
            .expect_send()
            .times(1)
            .returning(|_| Ok(redirect(301, "https://alt.example/x")));

        let error = RedirectFollower::new(Arc::new(invoker))
            .with_max_redirects(0)
            .send(&start())
            .await
            .expect_err("no hops allowed");
        assert!(matches!(error, ClientError::RedirectExhausted { .. }));
    }

    #[tokio::test]
    async fn unusable_locations_are_reported() {
        let mut invoker = MockHttpInvoker::new();
        invoker
            .expect_send()
            .times(1)
            .returning(|_| Ok(redirect(302, "https://bad host/")));

        let error = RedirectFollower::new(Arc::new(invoker))
            .send(&start())
            .await
            .expect_err("location cannot be parsed");
        assert_eq!(error, ClientError::invalid_redirect("https://bad host/"));
    }

    #[tokio::test]
    async fn transport_failures_mid_chain_fail_the_call() {
        let mut invoker = MockHttpInvoker::new();
        let mut seq = Sequence::new();
        invoker
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(redirect(302, "https://alt.example/x")));
        invoker
            .expect_send()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(HttpInvokerError::timeout("deadline elapsed")));

        let error = RedirectFollower::new(Arc::new(invoker))
            .send(&start())
            .await
            .expect_err("second hop fails");
        assert_eq!(error, ClientError::timeout("deadline elapsed"));
    }
}
