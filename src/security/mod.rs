//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → reputation.rs (reject blocked IPs)
//!     → rate_limit.rs (per-IP fixed windows, per route class)
//!     → sanitize.rs (normalize string fields in the body)
//!     → detect.rs (SQL injection / XSS signatures)
//!     → Forward to upstream
//!
//! Business handlers feed back:
//!     → reputation.rs (track_failed_attempt on auth failures)
//!     → audit.rs (record security-relevant events)
//! ```
//!
//! # Design Decisions
//! - Detectors are defense in depth, not a substitute for parameterized
//!   queries at the data layer
//! - Reject responses carry a generic message; pattern details stay in the
//!   server log
//! - All shared state is owned by explicit structs handed to the middleware
//!   layer; no module-level singletons

pub mod audit;
pub mod csrf;
pub mod detect;
pub mod rate_limit;
pub mod reputation;
pub mod sanitize;
pub mod validate;

pub use audit::{AuditEntry, AuditEvent, AuditFilter, AuditLog};
pub use csrf::generate_csrf_token;
pub use detect::{contains_sql_injection, contains_xss};
pub use rate_limit::{Decision, FixedWindowLimiter, LimiterSet};
pub use reputation::ReputationTracker;
pub use sanitize::{escape_html, sanitize_json, sanitize_string};
pub use validate::{check_password_strength, is_valid_email, is_valid_norwegian_phone};
