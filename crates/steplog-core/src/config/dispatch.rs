//! Listener dispatch configuration.

use serde::{Deserialize, Serialize};

/// Controls how the step dispatcher reports what it does.
///
/// Listener failures are always contained; nothing here can make a
/// listener error or panic reach the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchConfig {
    /// Emit a `debug!` line whenever a step begins or is committed.
    #[serde(default)]
    pub log_step_lifecycle: bool,
}
