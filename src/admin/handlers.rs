use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Serialize;

use crate::http::server::AppState;
use crate::security::audit::{AuditEntry, AuditFilter};
use crate::security::reputation::BlockedIp;

#[derive(Serialize)]
pub struct SystemStatus {
    pub version: &'static str,
    pub status: &'static str,
    pub environment: String,
}

#[derive(Serialize)]
pub struct BlockedSummary {
    /// IPs with a live attempt record; the map is never pruned below the
    /// block threshold, so this doubles as a growth gauge.
    pub tracked_ips: usize,
    pub blocked: Vec<BlockedIp>,
}

#[derive(Serialize)]
pub struct UnblockResult {
    pub ip: String,
    pub unblocked: bool,
}

pub async fn get_status(State(state): State<AppState>) -> Json<SystemStatus> {
    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
        environment: format!("{:?}", state.config.environment).to_lowercase(),
    })
}

pub async fn get_audit(
    State(state): State<AppState>,
    Query(filter): Query<AuditFilter>,
) -> Json<Vec<AuditEntry>> {
    Json(state.audit.query(&filter))
}

pub async fn get_blocked(State(state): State<AppState>) -> Json<BlockedSummary> {
    Json(BlockedSummary {
        tracked_ips: state.reputation.tracked_ips(),
        blocked: state.reputation.blocked_ips(),
    })
}

pub async fn unblock_ip(
    State(state): State<AppState>,
    Path(ip): Path<String>,
) -> Json<UnblockResult> {
    let was_blocked = state.reputation.is_blocked(&ip);
    state.reputation.unblock(&ip);
    tracing::info!(ip = %ip, was_blocked, "IP unblocked via admin API");
    Json(UnblockResult {
        ip,
        unblocked: was_blocked,
    })
}
