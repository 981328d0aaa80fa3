//! Injection detection middleware.
//!
//! Applies the SQL and XSS signature sets to untrusted request surfaces.
//! The SQL unit covers body, query parameters and path segments; the XSS
//! unit covers the body. A hit ends the exchange with a generic 400 — the
//! matched pattern is logged server-side only, so probing responses do not
//! reveal what tripped.

use axum::{
    body::{to_bytes, Body},
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};

use crate::http::middleware::payload_too_large;
use crate::http::request::client_ip;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::detect::{contains_sql_injection, contains_xss, value_matches};

fn reject_sql(ip: &str, path: &str) -> Response {
    metrics::record_injection_detected("sql");
    tracing::warn!(ip = %ip, path = %path, "SQL injection attempt detected");
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Ugyldig forespørsel" })),
    )
        .into_response()
}

fn reject_xss(ip: &str, path: &str) -> Response {
    metrics::record_injection_detected("xss");
    tracing::warn!(ip = %ip, path = %path, "XSS attempt detected");
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Ugyldig innhold oppdaget" })),
    )
        .into_response()
}

pub async fn sql_injection_protection(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    let path = request.uri().path().to_string();

    let query_hit = request
        .uri()
        .query()
        .map(|query| {
            url::form_urlencoded::parse(query.as_bytes())
                .any(|(_, value)| contains_sql_injection(&value))
        })
        .unwrap_or(false);
    let path_hit = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .any(contains_sql_injection);
    if query_hit || path_hit {
        return reject_sql(&ip, &path);
    }

    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, state.config.security.max_body_size).await {
        Ok(bytes) => bytes,
        Err(_) => return payload_too_large(),
    };
    if let Ok(value) = serde_json::from_slice::<Value>(&bytes) {
        if value_matches(&value, contains_sql_injection) {
            return reject_sql(&ip, &path);
        }
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

pub async fn xss_protection(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    let path = request.uri().path().to_string();

    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, state.config.security.max_body_size).await {
        Ok(bytes) => bytes,
        Err(_) => return payload_too_large(),
    };
    if let Ok(value) = serde_json::from_slice::<Value>(&bytes) {
        if value_matches(&value, contains_xss) {
            return reject_xss(&ip, &path);
        }
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
