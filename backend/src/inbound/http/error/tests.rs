//! Tests for HTTP error mapping.

use super::*;
use actix_web::body::to_bytes;
use rstest::rstest;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[rstest]
#[case(ClientError::transport("reset"), StatusCode::BAD_GATEWAY, ErrorCode::BadGateway)]
#[case(
    ClientError::malformed_response("not json"),
    StatusCode::BAD_GATEWAY,
    ErrorCode::BadGateway
)]
#[case(
    ClientError::invalid_redirect("http://["),
    StatusCode::BAD_GATEWAY,
    ErrorCode::BadGateway
)]
#[case(ClientError::timeout("30s"), StatusCode::GATEWAY_TIMEOUT, ErrorCode::GatewayTimeout)]
#[case(
    ClientError::redirect_exhausted(5_u32, "https://alt.example/x"),
    StatusCode::LOOP_DETECTED,
    ErrorCode::RedirectLoop
)]
#[case(
    ClientError::invalid_request("bad header"),
    StatusCode::BAD_REQUEST,
    ErrorCode::InvalidRequest
)]
fn client_errors_map_to_gateway_statuses(
    #[case] source: ClientError,
    #[case] status: StatusCode,
    #[case] code: ErrorCode,
) {
    let message = source.to_string();
    let error = ApiError::from(source);
    assert_eq!(error.code(), code);
    assert_eq!(error.message(), message);
    assert_eq!(ResponseError::status_code(&error), status);
}

#[actix_web::test]
async fn error_response_carries_trace_id_header_and_body() {
    let error = ApiError::invalid_request("userefreshtoken must be true or false")
        .with_trace_id(TRACE_ID);
    let response = ResponseError::error_response(&error);
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response
            .headers()
            .get(TRACE_ID_HEADER)
            .and_then(|value| value.to_str().ok()),
        Some(TRACE_ID)
    );

    let bytes = to_bytes(response.into_body())
        .await
        .expect("reading response body succeeds");
    let value: serde_json::Value = serde_json::from_slice(&bytes).expect("JSON body");
    assert_eq!(
        value,
        serde_json::json!({
            "code": "invalid_request",
            "message": "userefreshtoken must be true or false",
            "traceId": TRACE_ID,
        })
    );
}

#[test]
fn trace_id_is_omitted_outside_a_request() {
    let error = ApiError::internal("boom");
    assert!(error.trace_id().is_none());
    let value = serde_json::to_value(&error).expect("serialises");
    assert!(value.get("traceId").is_none());
}

#[tokio::test]
async fn trace_id_is_captured_from_scope() {
    let trace_id: TraceId = TRACE_ID.parse().expect("valid UUID");
    let error = TraceId::scope(trace_id, async { ApiError::internal("boom") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}
