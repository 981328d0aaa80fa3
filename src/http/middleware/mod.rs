//! Request defense middleware.
//!
//! Each unit inspects the request and either passes it to the next handler
//! or ends the exchange with a 4xx JSON response. Units are independent;
//! the stack order is wired in `http::server`.

pub mod headers;
pub mod injection;
pub mod ip_block;
pub mod rate_limit;
pub mod sanitize;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::observability::metrics;

/// Shared 413 for the body-buffering units.
pub(crate) fn payload_too_large() -> Response {
    metrics::record_rejected("body_too_large");
    (
        StatusCode::PAYLOAD_TOO_LARGE,
        Json(json!({ "error": "Forespørselen er for stor" })),
    )
        .into_response()
}
