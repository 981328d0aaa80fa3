//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the
//! gateway. All types derive Serde traits for deserialization from config
//! files, and every field has a default so a minimal config is valid.

use serde::{Deserialize, Serialize};

/// Root configuration for the defense gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Deployment environment; development echoes audit entries to the log.
    pub environment: Environment,

    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Upstream business backend the gateway forwards to.
    pub upstream: UpstreamConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Security hardening settings.
    pub security: SecurityConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Failed-attempt tracking and IP blocking.
    pub reputation: ReputationConfig,

    /// Audit trail settings.
    pub audit: AuditConfig,

    /// Admin API settings.
    pub admin: AdminConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Deployment environment flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    #[default]
    Production,
}

impl Environment {
    pub fn is_development(self) -> bool {
        self == Environment::Development
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Upstream backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Backend address (e.g., "127.0.0.1:3000").
    pub address: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Set the standard security response headers.
    pub enable_headers: bool,

    /// Sanitize JSON request bodies before forwarding.
    pub sanitize_body: bool,

    /// Reject requests matching SQL injection signatures.
    pub block_sql_injection: bool,

    /// Reject requests matching XSS signatures.
    pub block_xss: bool,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            enable_headers: true,
            sanitize_body: true,
            block_sql_injection: true,
            block_xss: true,
            max_body_size: 2 * 1024 * 1024, // 2MB
        }
    }
}

/// A single fixed-window rate limit rule.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitRule {
    /// Window length in seconds.
    pub window_secs: u64,

    /// Maximum requests per window per client IP.
    pub max_requests: u32,

    /// Refund requests whose response status is below 400.
    pub skip_successful: bool,
}

impl Default for RateLimitRule {
    fn default() -> Self {
        Self {
            window_secs: 15 * 60,
            max_requests: 100,
            skip_successful: false,
        }
    }
}

/// Rate limiting configuration: one rule per route class.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// General API traffic.
    pub general: RateLimitRule,

    /// Auth endpoints (login, token refresh).
    pub auth: RateLimitRule,

    /// Password reset requests.
    pub password_reset: RateLimitRule,

    /// Public booking endpoints.
    pub booking: RateLimitRule,

    /// Path prefixes selecting the route class.
    pub routes: RouteClassConfig,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            general: RateLimitRule::default(),
            auth: RateLimitRule {
                window_secs: 15 * 60,
                max_requests: 10,
                skip_successful: true,
            },
            password_reset: RateLimitRule {
                window_secs: 60 * 60,
                max_requests: 3,
                skip_successful: false,
            },
            booking: RateLimitRule {
                window_secs: 60 * 60,
                max_requests: 20,
                skip_successful: false,
            },
            routes: RouteClassConfig::default(),
        }
    }
}

/// Path prefixes mapping requests to rate limit classes. Longest prefix
/// wins, so the password-reset prefix may nest under the auth prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteClassConfig {
    pub auth_prefix: String,
    pub password_reset_prefix: String,
    pub booking_prefix: String,
}

impl Default for RouteClassConfig {
    fn default() -> Self {
        Self {
            auth_prefix: "/api/auth".to_string(),
            password_reset_prefix: "/api/auth/reset-password".to_string(),
            booking_prefix: "/api/public/booking".to_string(),
        }
    }
}

/// Failed-attempt tracking configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReputationConfig {
    /// Failed attempts before an IP is blocked.
    pub max_failed_attempts: u32,

    /// Idle seconds after which an IP's attempt count restarts.
    pub decay_window_secs: u64,
}

impl Default for ReputationConfig {
    fn default() -> Self {
        Self {
            max_failed_attempts: 10,
            decay_window_secs: 60 * 60,
        }
    }
}

/// Audit trail configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Maximum retained entries; oldest are evicted first.
    pub capacity: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { capacity: 10_000 }
    }
}

/// Admin API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AdminConfig {
    /// Enable the admin API under /admin.
    pub enabled: bool,

    /// API key for authentication (Bearer token).
    pub api_key: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            // WARNING: This is a placeholder! Change this in production.
            api_key: "CHANGE_ME_IN_PRODUCTION".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
