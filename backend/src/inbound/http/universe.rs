//! ESG universe trigger.
//!
//! ```text
//! GET  /api/v1/universe?token=abc&showuniverse=false
//! POST /api/v1/universe {"token":"abc","tokentype":"Bearer"}
//! ```

use actix_web::{HttpRequest, route, web};

use crate::domain::{DEFAULT_TOKEN_TYPE, UniverseOutcome, UniverseRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::params::TriggerParams;
use crate::inbound::http::state::HttpState;

/// Whether the caller asked for rows and column metadata.
///
/// Any value containing lowercase `false` hides them.
fn shows_universe(params: &TriggerParams) -> bool {
    params
        .get("showuniverse")
        .is_none_or(|value| !value.contains("false"))
}

/// Fetch the ESG universe and return the outcome verbatim.
///
/// With `showuniverse=false` a successful outcome keeps only its count.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use dp_gateway::inbound::http::universe::fetch_universe;
///
/// let app = App::new().service(fetch_universe);
/// ```
#[route("/universe", method = "GET", method = "POST")]
pub async fn fetch_universe(
    state: web::Data<HttpState>,
    req: HttpRequest,
    body: web::Bytes,
) -> ApiResult<web::Json<UniverseOutcome>> {
    let params = TriggerParams::extract(&req, &body)?;
    let request = UniverseRequest::new(params.text_or("token", ""))
        .with_token_type(params.text_or("tokentype", DEFAULT_TOKEN_TYPE));
    let mut outcome = state.universe.fetch_universe(&request).await?;
    if !shows_universe(&params) {
        if let Some(payload) = outcome.success_mut() {
            payload.rows.clear();
            payload.header_metas.clear();
        }
    }
    Ok(web::Json(outcome))
}
