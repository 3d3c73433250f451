//! # Name Auction Telemetry
//!
//! Structured logging for the name auction subsystems.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use na_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() {
//!     let _guard = init_telemetry(TelemetryConfig::from_env()).expect("telemetry");
//!     // Registrar code runs here
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `NA_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `NA_JSON_LOGS` | `false` | JSON formatted output |
//! | `NA_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `NA_SERVICE_NAME` | `name-auction` | Service name attached to the startup line |
//! | `NA_NETWORK` | `testnet` | Network identifier |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::{init_logging, LoggingGuard};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// A global subscriber is already installed.
    #[error("Telemetry already initialized: {0}")]
    AlreadyInitialized(String),

    /// The log filter or another setting could not be parsed.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Install the global subscriber.
///
/// Returns a guard describing what was installed. Calling this twice in one
/// process yields `TelemetryError::AlreadyInitialized`.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let logging = logging::init_logging(&config)?;
    Ok(TelemetryGuard {
        service_name: config.service_name,
        logging,
    })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    service_name: String,
    logging: LoggingGuard,
}

impl TelemetryGuard {
    /// Service name the subscriber was installed for.
    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!(
            service = %self.service_name,
            json_logs = self.logging.is_json(),
            "Shutting down telemetry..."
        );
    }
}

/// Convenience macro for creating a span with subsystem context.
///
/// ```rust,ignore
/// let span = na_telemetry::subsystem_span!("reveal", subsystem = "na-02", name = "foo.eth");
/// ```
#[macro_export]
macro_rules! subsystem_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, $($field)*)
    };
}
