//! Blocked-IP enforcement.
//!
//! Runs before the rate limiters: a blocked IP is rejected regardless of
//! request content. The client sees a generic 403; which list it is on
//! stays server-side.

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::request::client_ip;
use crate::http::server::AppState;
use crate::observability::metrics;

pub async fn ip_blocking(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    if state.reputation.is_blocked(&ip) {
        metrics::record_rejected("ip_blocked");
        tracing::warn!(ip = %ip, path = %request.uri().path(), "Request from blocked IP rejected");
        return (
            StatusCode::FORBIDDEN,
            Json(json!({ "error": "Tilgang nektet" })),
        )
            .into_response();
    }
    next.run(request).await
}
