//! HTTP subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, defense middleware stack)
//!     → middleware/* (headers, ip block, rate limit, sanitize, detect)
//!     → server.rs forward handler
//!     → Upstream business backend
//! ```

pub mod middleware;
pub mod request;
pub mod server;

pub use request::{client_ip, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
