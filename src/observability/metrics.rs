//! Metrics collection and exposition.
//!
//! # Metrics
//! - `vakt_requests_forwarded_total` (counter): responses relayed, by status class
//! - `vakt_requests_rejected_total` (counter): requests stopped by the
//!   defense layer, by reason
//! - `vakt_rate_limited_total` (counter): rate limiter rejections, by class
//! - `vakt_injection_detected_total` (counter): detector hits, by kind
//! - `vakt_failed_attempts_total` (counter): tracked auth failures
//! - `vakt_audit_events_total` (counter): recorded audit entries

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
pub fn init_metrics(addr: SocketAddr) {
    let builder = PrometheusBuilder::new().with_http_listener(addr);
    match builder.install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_forwarded(status: u16) {
    let class = match status {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        _ => "5xx",
    };
    counter!("vakt_requests_forwarded_total", "status" => class).increment(1);
}

pub fn record_rejected(reason: &'static str) {
    counter!("vakt_requests_rejected_total", "reason" => reason).increment(1);
}

pub fn record_rate_limited(class: &'static str) {
    counter!("vakt_rate_limited_total", "class" => class).increment(1);
}

pub fn record_injection_detected(kind: &'static str) {
    counter!("vakt_injection_detected_total", "kind" => kind).increment(1);
}

pub fn record_failed_attempt() {
    counter!("vakt_failed_attempts_total").increment(1);
}

pub fn record_audit_event() {
    counter!("vakt_audit_events_total").increment(1);
}
