//! Token trigger.
//!
//! ```text
//! GET  /api/v1/token?username=u&password=p&appid=k
//! POST /api/v1/token {"username":"u","appid":"k","userefreshtoken":"true","refreshtoken":"r"}
//! ```

use actix_web::{HttpRequest, route, web};

use crate::domain::{TokenOutcome, TokenRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::params::TriggerParams;
use crate::inbound::http::state::HttpState;

/// Map trigger parameters onto a token request.
///
/// `userefreshtoken` selects the refresh grant; `refreshtoken` defaults to
/// empty and the scope is always the platform default.
///
/// # Errors
///
/// Returns an `invalid_request` error when `userefreshtoken` is not a boolean.
pub fn token_request_from(params: &TriggerParams) -> ApiResult<TokenRequest> {
    let use_refresh_token = params.flag("userefreshtoken", false)?;
    let request = TokenRequest::new(
        params.text_or("username", ""),
        params.text_or("password", ""),
        params.text_or("appid", ""),
    );
    Ok(if use_refresh_token {
        request.with_refresh_token(params.text_or("refreshtoken", ""))
    } else {
        request
    })
}

/// Exchange credentials for a token and return the outcome verbatim.
///
/// Upstream rejections are returned with HTTP 200; only gateway failures
/// produce an error status.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use dp_gateway::inbound::http::token::fetch_token;
///
/// let app = App::new().service(fetch_token);
/// ```
#[route("/token", method = "GET", method = "POST")]
pub async fn fetch_token(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<web::Json<TokenOutcome>> {
    let params = TriggerParams::extract(&req, &body)?;
    let request = token_request_from(&params)?;
    let outcome = state.tokens.fetch_token(&request).await?;
    Ok(web::Json(outcome))
}
