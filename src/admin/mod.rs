//! Admin API.
//!
//! Operational handles for the defense layer: audit queries, the blocked
//! IP list, and explicit unblocking. Bearer-token protected and disabled
//! by default; there is no automatic unblock, so this is the only way out
//! of the block set.

pub mod auth;
pub mod handlers;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use self::auth::admin_auth_middleware;
use self::handlers::*;
use crate::http::server::AppState;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/admin/status", get(get_status))
        .route("/admin/audit", get(get_audit))
        .route("/admin/blocked", get(get_blocked))
        .route("/admin/unblock/{ip}", post(unblock_ip))
        .layer(middleware::from_fn_with_state(state, admin_auth_middleware))
}
