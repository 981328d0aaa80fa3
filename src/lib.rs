//! Request defense gateway for the salon platform.
//!
//! Every inbound request passes the defense stack — security headers, IP
//! blocking, rate limiting, body sanitization, injection detection —
//! before it is forwarded to the business backend. The security module is
//! also usable as a library: handlers behind the gateway call back into
//! the shared state to track failed logins and record audit events.

pub mod admin;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod security;

pub use config::GatewayConfig;
pub use http::{AppState, HttpServer};
pub use lifecycle::Shutdown;
