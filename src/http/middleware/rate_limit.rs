//! Rate limiting middleware.
//!
//! Selects the fixed-window limiter for the request's route class and
//! rejects with 429 once the window is exhausted. Allowed responses carry
//! the standard `RateLimit-*` headers; the auth class refunds requests
//! whose response status is below 400 so only failed logins burn the
//! budget.

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::http::request::client_ip;
use crate::http::server::AppState;
use crate::observability::metrics;
use crate::security::rate_limit::Decision;

fn limit_message(class: &str) -> &'static str {
    match class {
        "auth" => "For mange innloggingsforsøk. Vennligst prøv igjen om 15 minutter.",
        "password_reset" => "For mange tilbakestillingsforespørsler. Vennligst prøv igjen senere.",
        "booking" => "For mange bestillinger. Vennligst prøv igjen senere.",
        _ => "For mange forespørsler. Vennligst prøv igjen senere.",
    }
}

pub async fn rate_limit(
    State(state): State<AppState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let ip = client_ip(&request);
    let path = request.uri().path().to_string();
    let (limiter, class) = state
        .limiters
        .for_path(&path, &state.config.rate_limit.routes);

    match limiter.check(&ip) {
        Decision::Limited { retry_after_mins } => {
            metrics::record_rate_limited(class);
            tracing::warn!(ip = %ip, path = %path, class = class, "Rate limit exceeded");
            let mut response = (
                StatusCode::TOO_MANY_REQUESTS,
                Json(json!({
                    "error": limit_message(class),
                    "retryAfter": retry_after_mins,
                })),
            )
                .into_response();
            response
                .headers_mut()
                .insert("Retry-After", HeaderValue::from(retry_after_mins * 60));
            response
        }
        Decision::Allowed {
            limit,
            remaining,
            reset_secs,
        } => {
            let mut response = next.run(request).await;
            if limiter.skip_successful() && response.status().as_u16() < 400 {
                limiter.forgive(&ip);
            }
            let headers = response.headers_mut();
            headers.insert("RateLimit-Limit", HeaderValue::from(limit));
            headers.insert("RateLimit-Remaining", HeaderValue::from(remaining));
            headers.insert("RateLimit-Reset", HeaderValue::from(reset_secs));
            response
        }
    }
}
