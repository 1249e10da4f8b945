//! Tracing subscriber installation.

use tracing_subscriber::{EnvFilter, fmt};

use steplog_core::config::logging::LoggingConfig;
use steplog_core::error::StepError;

/// Installs the global tracing subscriber described by `config`.
///
/// `RUST_LOG` takes precedence over the configured level. Returns
/// `Ok(false)` when a global subscriber was already installed, so test
/// harnesses may call this once per test.
pub fn init_logging(config: &LoggingConfig) -> Result<bool, StepError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level).map_err(|e| {
            StepError::configuration(format!("Invalid log level '{}': {e}", config.level))
        })?,
    };

    let installed = match config.format.as_str() {
        "json" => fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .try_init()
            .is_ok(),
        "compact" => fmt()
            .compact()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .is_ok(),
        _ => fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .try_init()
            .is_ok(),
    };

    Ok(installed)
}
