//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Load config → Validate → Initialize subsystems → Start listener
//!
//! Shutdown:
//!     Ctrl+C → broadcast → server drains connections → Exit
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
