use std::time::Instant;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::info;
use walletmatrix_api::{ApiError, ApiErrorCode};

use crate::app::AppState;
use crate::handlers::{make_request_id, with_request_id};

/// Rejects oversized request lines, then emits one audit line per request
/// using the request id the handler stamped on the response.
pub(crate) async fn audit_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let started = Instant::now();
    if req.uri().to_string().len() > state.api.max_uri_bytes {
        let request_id = make_request_id(&state);
        let err = ApiError::new(
            ApiErrorCode::InvalidQueryParameter,
            "request uri exceeds the configured limit",
            json!({"max_uri_bytes": state.api.max_uri_bytes}),
            request_id.clone(),
        );
        let resp = (StatusCode::URI_TOO_LONG, Json(json!({"error": err}))).into_response();
        return with_request_id(resp, &request_id);
    }
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    info!(
        target: "walletmatrix_audit",
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        request_id = %request_id,
        "audit"
    );
    response
}
