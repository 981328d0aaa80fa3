//! Request body sanitization middleware.
//!
//! JSON object bodies are rewritten with every string field trimmed,
//! control-stripped and length-capped before the upstream sees them.
//! Non-JSON bodies pass through untouched. This unit never rejects except
//! when the body exceeds the configured size cap.

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::State,
    http::{header::CONTENT_LENGTH, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use serde_json::Value;

use crate::http::middleware::payload_too_large;
use crate::http::server::AppState;
use crate::security::sanitize::sanitize_json;

pub async fn sanitize_body(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = request.into_parts();
    let bytes = match to_bytes(body, state.config.security.max_body_size).await {
        Ok(bytes) => bytes,
        Err(_) => return payload_too_large(),
    };

    let rewritten = match serde_json::from_slice::<Value>(&bytes) {
        Ok(value) if value.is_object() => {
            serde_json::to_vec(&sanitize_json(&value)).ok().map(Bytes::from)
        }
        _ => None,
    };

    let request = match rewritten {
        Some(sanitized) => {
            let mut parts = parts;
            // Keep Content-Length honest after the rewrite.
            parts
                .headers
                .insert(CONTENT_LENGTH, HeaderValue::from(sanitized.len()));
            Request::from_parts(parts, Body::from(sanitized))
        }
        None => Request::from_parts(parts, Body::from(bytes)),
    };
    next.run(request).await
}
