//! Tracing setup for gshell.
//!
//! Structured logging goes through the `tracing` crate and is written to
//! stderr so it never mixes with git's own output.
//!
//! # Feature Flags
//!
//! - `release-logs`: Strip debug/trace at compile time
//! - `max-perf`: Disable all tracing for maximum performance

mod init;

pub use init::{init_telemetry, TelemetryConfig, TelemetryGuard};
