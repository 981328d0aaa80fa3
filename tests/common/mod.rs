//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::Bytes,
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use vakt::config::GatewayConfig;
use vakt::{AppState, HttpServer, Shutdown};

/// Start a mock business backend that echoes the request back as JSON.
/// `/api/auth/login` answers 401, standing in for a failed login.
pub async fn start_upstream(addr: SocketAddr) {
    async fn echo(uri: Uri, body: Bytes) -> Response {
        if uri.path().starts_with("/api/auth/login") {
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "unauthorized" })),
            )
                .into_response();
        }
        let body_json: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
        Json(json!({ "path": uri.path(), "body": body_json })).into_response()
    }

    let app = Router::new().fallback(echo);
    let listener = TcpListener::bind(addr).await.unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
}

/// A gateway running in the background, plus handles into its state.
pub struct TestGateway {
    pub base_url: String,
    pub state: AppState,
    pub shutdown: Shutdown,
}

/// Base config pointing the gateway at a mock upstream, with the admin API
/// enabled under a test key.
pub fn test_config(gateway_addr: SocketAddr, upstream_addr: SocketAddr) -> GatewayConfig {
    let mut config = GatewayConfig::default();
    config.listener.bind_address = gateway_addr.to_string();
    config.upstream.address = upstream_addr.to_string();
    config.observability.metrics_enabled = false;
    config.admin.enabled = true;
    config.admin.api_key = "test-admin-key".to_string();
    config
}

/// Boot a gateway on the configured address and wait for it to accept.
pub async fn start_gateway(config: GatewayConfig) -> TestGateway {
    let addr = config.listener.bind_address.clone();
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let state = server.state().clone();

    let listener = TcpListener::bind(&addr).await.unwrap();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });
    tokio::time::sleep(Duration::from_millis(100)).await;

    TestGateway {
        base_url: format!("http://{}", addr),
        state,
        shutdown,
    }
}

/// Client that never reuses pooled connections, so each request observes
/// middleware state changes made between calls.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
