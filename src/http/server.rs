//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the defense middleware stack
//! - Wire the admin API when enabled
//! - Forward surviving requests to the upstream business backend
//! - Serve with graceful shutdown

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{
        header,
        uri::{Authority, Scheme},
        Request, StatusCode, Uri,
    },
    middleware,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::http::middleware::{
    headers::security_headers,
    injection::{sql_injection_protection, xss_protection},
    ip_block::ip_blocking,
    rate_limit::rate_limit,
    sanitize::sanitize_body,
};
use crate::http::request::{request_id_middleware, X_REQUEST_ID};
use crate::observability::metrics;
use crate::security::{AuditLog, LimiterSet, ReputationTracker};

/// Application state injected into middleware and handlers. This is the
/// shared-state bundle of the defense layer; business code holding a clone
/// can feed failed attempts and audit events back into it.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub limiters: Arc<LimiterSet>,
    pub reputation: Arc<ReputationTracker>,
    pub audit: Arc<AuditLog>,
    pub client: Client<HttpConnector, Body>,
}

/// HTTP server for the defense gateway.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let config = Arc::new(config);

        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());

        let state = AppState {
            limiters: Arc::new(LimiterSet::new(&config.rate_limit)),
            reputation: Arc::new(ReputationTracker::new(&config.reputation)),
            audit: Arc::new(AuditLog::new(
                config.audit.capacity,
                config.environment.is_development(),
            )),
            client,
            config: config.clone(),
        };

        let router = Self::build_router(&config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with the defense stack. Layers added later
    /// wrap the ones added earlier, so the list below reads inside-out:
    /// at request time the order is trace → timeout → request id →
    /// security headers → ip blocking → rate limiter → sanitize → SQL →
    /// XSS → forward.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler));

        if config.admin.enabled {
            router = router.merge(crate::admin::router(state.clone()));
        }

        let mut router = router.with_state(state.clone());

        if config.security.block_xss {
            router = router.layer(middleware::from_fn_with_state(state.clone(), xss_protection));
        }
        if config.security.block_sql_injection {
            router = router.layer(middleware::from_fn_with_state(
                state.clone(),
                sql_injection_protection,
            ));
        }
        if config.security.sanitize_body {
            router = router.layer(middleware::from_fn_with_state(state.clone(), sanitize_body));
        }
        if config.rate_limit.enabled {
            router = router.layer(middleware::from_fn_with_state(state.clone(), rate_limit));
        }
        router = router.layer(middleware::from_fn_with_state(state, ip_blocking));
        if config.security.enable_headers {
            router = router.layer(middleware::from_fn(security_headers));
        }

        router.layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.timeouts.request_secs,
                )))
                .layer(middleware::from_fn(request_id_middleware)),
        )
    }

    /// Shared defense state, for business code and tests.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.state.config.upstream.address,
            "HTTP server starting"
        );

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Forward a request that survived the defense stack to the upstream
/// backend.
async fn forward_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let path = request.uri().path().to_string();

    let (mut parts, body) = request.into_parts();

    let mut uri_parts = parts.uri.clone().into_parts();
    uri_parts.scheme = Some(Scheme::HTTP);
    let authority = match Authority::from_str(&state.config.upstream.address) {
        Ok(authority) => authority,
        Err(e) => {
            tracing::error!(error = %e, "Invalid upstream address");
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };
    uri_parts.authority = Some(authority);
    parts.uri = match Uri::from_parts(uri_parts) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Failed to build upstream URI");
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };

    if let Ok(value) = header::HeaderValue::from_str(&request_id) {
        parts.headers.insert(X_REQUEST_ID, value);
    }

    match state.client.request(Request::from_parts(parts, body)).await {
        Ok(response) => {
            metrics::record_forwarded(response.status().as_u16());
            tracing::debug!(
                request_id = %request_id,
                path = %path,
                status = %response.status(),
                "Forwarded request"
            );
            let (parts, body) = response.into_parts();
            Response::from_parts(parts, Body::new(body)).into_response()
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, path = %path, error = %e, "Upstream error");
            metrics::record_forwarded(502);
            (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
        }
    }
}
