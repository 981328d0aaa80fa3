//! Configuration validation.
//!
//! Semantic checks on top of what serde guarantees syntactically. Returns
//! every violation, not just the first, so an operator fixes the file in
//! one pass.

use thiserror::Error;

use crate::config::schema::GatewayConfig;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    BindAddress(String),

    #[error("upstream.address '{0}' is not a valid socket address")]
    UpstreamAddress(String),

    #[error("observability.metrics_address '{0}' is not a valid socket address")]
    MetricsAddress(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("security.max_body_size must be greater than zero")]
    ZeroBodySize,

    #[error("rate_limit.{0}.window_secs must be greater than zero")]
    ZeroWindow(&'static str),

    #[error("rate_limit.{0}.max_requests must be greater than zero")]
    ZeroLimit(&'static str),

    #[error("reputation.max_failed_attempts must be greater than zero")]
    ZeroAttemptThreshold,

    #[error("reputation.decay_window_secs must be greater than zero")]
    ZeroDecayWindow,

    #[error("audit.capacity must be greater than zero")]
    ZeroAuditCapacity,

    #[error("admin.api_key must be changed from the placeholder when the admin API is enabled")]
    PlaceholderAdminKey,
}

fn is_socket_address(addr: &str) -> bool {
    addr.parse::<std::net::SocketAddr>().is_ok()
}

/// Validate a configuration, collecting every violation.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if !is_socket_address(&config.listener.bind_address) {
        errors.push(ValidationError::BindAddress(
            config.listener.bind_address.clone(),
        ));
    }
    if !is_socket_address(&config.upstream.address) {
        errors.push(ValidationError::UpstreamAddress(
            config.upstream.address.clone(),
        ));
    }
    if config.observability.metrics_enabled && !is_socket_address(&config.observability.metrics_address)
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.security.max_body_size == 0 {
        errors.push(ValidationError::ZeroBodySize);
    }

    let rules = [
        ("general", &config.rate_limit.general),
        ("auth", &config.rate_limit.auth),
        ("password_reset", &config.rate_limit.password_reset),
        ("booking", &config.rate_limit.booking),
    ];
    for (name, rule) in rules {
        if rule.window_secs == 0 {
            errors.push(ValidationError::ZeroWindow(name));
        }
        if rule.max_requests == 0 {
            errors.push(ValidationError::ZeroLimit(name));
        }
    }

    if config.reputation.max_failed_attempts == 0 {
        errors.push(ValidationError::ZeroAttemptThreshold);
    }
    if config.reputation.decay_window_secs == 0 {
        errors.push(ValidationError::ZeroDecayWindow);
    }
    if config.audit.capacity == 0 {
        errors.push(ValidationError::ZeroAuditCapacity);
    }

    if config.admin.enabled
        && (config.admin.api_key.is_empty() || config.admin.api_key == "CHANGE_ME_IN_PRODUCTION")
    {
        errors.push(ValidationError::PlaceholderAdminKey);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
