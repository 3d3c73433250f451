//! Structured logging.
//!
//! Every lifecycle log line carries the same field set so log aggregation can
//! group by name or transaction:
//! - `subsystem`: Subsystem identifier (`na-02`)
//! - `name`: Normalized name the event concerns
//! - `tx_hash`: Submitted transaction reference, when there is one

use crate::{TelemetryConfig, TelemetryError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Marker that a global subscriber was installed.
#[derive(Debug)]
pub struct LoggingGuard {
    json: bool,
}

impl LoggingGuard {
    /// True if JSON output was selected.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Build the env filter: `RUST_LOG` wins, then the configured level.
fn build_filter(config: &TelemetryConfig) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::Config(e.to_string()))
}

/// Install the global tracing subscriber.
pub fn init_logging(config: &TelemetryConfig) -> Result<LoggingGuard, TelemetryError> {
    let env_filter = build_filter(config)?;
    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match (config.console_output, config.json_logs) {
        (true, true) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .try_init(),
        (true, false) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .with_ansi(true),
            )
            .try_init(),
        (false, _) => registry.try_init(),
    };
    result.map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;

    tracing::info!(
        service = %config.service_name,
        network = %config.network,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(LoggingGuard {
        json: config.json_logs,
    })
}

/// Log a name lifecycle event with standard fields.
///
/// ```rust,ignore
/// log_name_event!(info, "na-02", "Auction started", name.as_str(), state = %state);
/// ```
#[macro_export]
macro_rules! log_name_event {
    ($level:ident, $subsystem:expr, $msg:expr, $name:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            name = %$name,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a transaction-related event with standard fields.
#[macro_export]
macro_rules! log_tx_event {
    ($level:ident, $subsystem:expr, $msg:expr, $name:expr, $tx_hash:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            subsystem = $subsystem,
            name = %$name,
            tx_hash = %$tx_hash,
            $($($field)*,)?
            $msg
        )
    };
}
