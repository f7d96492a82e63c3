//! # Bolt Telemetry
//!
//! Structured logging for services embedding the security core.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bolt_telemetry::{init_logging, TelemetryConfig};
//!
//! fn main() {
//!     let config = TelemetryConfig::from_env();
//!     init_logging(&config).expect("Failed to init logging");
//!
//!     // `tracing` events from bolt-security are now emitted
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BOLT_SERVICE_NAME` | `bolt` | Service name attached to the startup event |
//! | `BOLT_LOG_LEVEL` | `RUST_LOG`, then `info` | Log level filter |
//! | `BOLT_JSON_LOGS` | `true` in containers | JSON output instead of pretty output |
//! | `BOLT_CONSOLE_OUTPUT` | `true` | Write events to stdout |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}
