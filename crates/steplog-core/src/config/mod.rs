//! Configuration schemas.
//!
//! Configuration is deserialized via the `config` crate from optional
//! TOML files plus `STEPLOG__*` environment variables. Each sub-module
//! represents a logical configuration section; every field has a default,
//! so an empty source still yields a usable configuration.

pub mod dispatch;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::dispatch::DispatchConfig;
use self::logging::LoggingConfig;

use crate::error::StepError;

/// Root steplog configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepLogConfig {
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Listener dispatch settings.
    #[serde(default)]
    pub dispatch: DispatchConfig,
}

impl StepLogConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/steplog`, then `config/steplog.{env}`, then
    /// environment variables prefixed with `STEPLOG` (for example
    /// `STEPLOG__LOGGING__LEVEL=debug`). Missing files are skipped.
    pub fn load(env: &str) -> Result<Self, StepError> {
        Self::load_with(env, environment())
    }

    fn load_with(env: &str, environment: config::Environment) -> Result<Self, StepError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/steplog").required(false))
            .add_source(config::File::with_name(&format!("config/steplog.{env}")).required(false))
            .add_source(environment)
            .build()
            .map_err(|e| StepError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| StepError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// Parse configuration from an inline TOML document.
    pub fn from_toml(source: &str) -> Result<Self, StepError> {
        let config = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(config.try_deserialize()?)
    }
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("STEPLOG")
        .separator("__")
        .try_parsing(true)
}
