//! ESG universe client.
//!
//! Sends an authorised `GET` through the redirect follower and decodes the
//! columnar response into a [`UniverseOutcome`].

mod dto;

use async_trait::async_trait;
use tracing::{Instrument, debug, info_span, warn};
use url::Url;

use self::dto::{UniverseErrorEnvelopeDto, UniverseResponseDto};
use super::redirect::{ALLOW_AUTO_REDIRECT_HEADER, RedirectFollower};
use super::trace_id::current_trace_label;
use super::universe::{UniverseOutcome, UniverseRequest};
use super::wire::{decode_body, decode_error_body};
use crate::domain::ports::{ClientError, HttpRequest, HttpResponse, UniverseService};

/// [`UniverseService`] backed by the platform's ESG universe endpoint.
#[derive(Clone)]
pub struct UniverseClient {
    follower: RedirectFollower,
    endpoint: Url,
}

impl UniverseClient {
    /// Client fetching from `endpoint`.
    pub fn new(follower: RedirectFollower, endpoint: Url) -> Self {
        Self { follower, endpoint }
    }

    /// Universe endpoint requests start at.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl UniverseService for UniverseClient {
    async fn fetch_universe(
        &self,
        request: &UniverseRequest,
    ) -> Result<UniverseOutcome, ClientError> {
        let span = info_span!(
            "fetch_universe",
            token_type = request.token_type.as_str(),
            trace_id = %current_trace_label(),
        );
        async move {
            let http_request = build_universe_request(self.endpoint.clone(), request);
            let response = self.follower.send(&http_request).await?;
            interpret_universe_response(&response)
        }
        .instrument(span)
        .await
    }
}

fn build_universe_request(endpoint: Url, request: &UniverseRequest) -> HttpRequest {
    let (name, value) = ALLOW_AUTO_REDIRECT_HEADER;
    HttpRequest::get(endpoint)
        .with_header("Authorization", request.authorization())
        .with_header(name, value)
}

fn interpret_universe_response(response: &HttpResponse) -> Result<UniverseOutcome, ClientError> {
    let status = response.response_status();
    if status.is_ok() {
        let dto: UniverseResponseDto = decode_body(&response.body, "universe")?;
        let payload = dto.into_domain();
        debug!(count = payload.count, rows = payload.rows.len(), "universe decoded");
        return Ok(UniverseOutcome::Success { status, payload });
    }

    let payload =
        decode_error_body::<UniverseErrorEnvelopeDto>(response, "universe error").into_domain();
    warn!(
        status = status.code(),
        code = payload.code.as_deref().unwrap_or_default(),
        "universe endpoint rejected request"
    );
    Ok(UniverseOutcome::Failure { status, payload })
}
