//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Respect RUST_LOG when set, config level otherwise

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;

/// Initialize the logging subsystem. RUST_LOG takes precedence over the
/// configured level so operators can raise verbosity without a config
/// change.
pub fn init_logging(config: &ObservabilityConfig) {
    let default_filter = format!("vakt={},tower_http=warn", config.log_level);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
