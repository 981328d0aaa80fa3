//! Request identity helpers.
//!
//! # Responsibilities
//! - Resolve the client IP used as the key for rate limiting and blocking
//! - Stamp a unique request ID (UUID v4) as early as possible
//! - Mirror the request ID onto the response for correlation

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

pub const X_REQUEST_ID: &str = "x-request-id";

/// Resolve the client IP for a request: the connected peer address when
/// known, then the `x-forwarded-for` header, then the literal "unknown".
pub fn client_ip(request: &Request<Body>) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

/// Ensure every request carries an `x-request-id`, and echo it on the
/// response.
pub async fn request_id_middleware(mut request: Request<Body>, next: Next) -> Response {
    let id = match request.headers().get(X_REQUEST_ID) {
        Some(existing) => existing.clone(),
        None => {
            let generated = HeaderValue::from_str(&Uuid::new_v4().to_string())
                .unwrap_or_else(|_| HeaderValue::from_static("unknown"));
            request.headers_mut().insert(X_REQUEST_ID, generated.clone());
            generated
        }
    };

    let mut response = next.run(request).await;
    response.headers_mut().entry(X_REQUEST_ID).or_insert(id);
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_prefers_peer_address() {
        let mut request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo::<SocketAddr>("10.0.0.1:4711".parse().unwrap()));
        assert_eq!(client_ip(&request), "10.0.0.1");
    }

    #[test]
    fn test_client_ip_falls_back_to_forwarded_header() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.7")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&request), "203.0.113.7");
    }

    #[test]
    fn test_client_ip_unknown_without_any_source() {
        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&request), "unknown");
    }
}
