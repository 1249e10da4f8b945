//! Step logger: wires the registry and dispatcher together and hands out
//! execution contexts.

use std::sync::Arc;

use tracing::info;

use steplog_core::config::StepLogConfig;
use steplog_core::config::dispatch::DispatchConfig;
use steplog_core::types::ContextId;

use crate::context::ExecutionContext;
use crate::dispatcher::StepDispatcher;
use crate::registry::ListenerRegistry;

/// Entry point of steplog. Cheap to clone; clones share the registry.
///
/// One logger is typically created by the test harness and every worker
/// obtains its own [`ExecutionContext`] from it.
#[derive(Debug, Clone)]
pub struct StepLogger {
    /// Step dispatcher (owns the listener registry).
    dispatcher: Arc<StepDispatcher>,
}

impl StepLogger {
    /// Creates a logger with default dispatch settings.
    pub fn new() -> Self {
        Self::with_config(DispatchConfig::default())
    }

    /// Creates a logger with explicit dispatch settings.
    pub fn with_config(config: DispatchConfig) -> Self {
        let registry = Arc::new(ListenerRegistry::new());
        Self {
            dispatcher: Arc::new(StepDispatcher::with_config(registry, config)),
        }
    }

    /// Creates a logger from the root configuration.
    pub fn from_config(config: &StepLogConfig) -> Self {
        info!(
            log_step_lifecycle = config.dispatch.log_step_lifecycle,
            "Step logger initialized"
        );
        Self::with_config(config.dispatch.clone())
    }

    /// Opens a new execution context with a fresh id.
    pub fn context(&self) -> ExecutionContext {
        self.context_for(ContextId::new())
    }

    /// Re-attaches to the context identified by `id`, e.g. after a test task
    /// moved to another worker thread.
    pub fn context_for(&self, id: ContextId) -> ExecutionContext {
        ExecutionContext::new(id, self.dispatcher.clone())
    }

    /// Returns the context confined to the calling thread.
    pub fn current_thread(&self) -> ExecutionContext {
        self.context_for(ContextId::current_thread())
    }

    /// Returns the step dispatcher.
    pub fn dispatcher(&self) -> &Arc<StepDispatcher> {
        &self.dispatcher
    }

    /// Returns the listener registry.
    pub fn registry(&self) -> &Arc<ListenerRegistry> {
        self.dispatcher.registry()
    }
}

impl Default for StepLogger {
    fn default() -> Self {
        Self::new()
    }
}
