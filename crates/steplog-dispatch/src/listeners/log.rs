//! Listener that writes every step to the `tracing` subscriber.

use tracing::{info, warn};

use steplog_core::StepResult;
use steplog_core::events::{StepEvent, StepStatus};
use steplog_core::traits::StepListener;

/// Logs step start at `info`, passed steps at `info` and failed steps at
/// `warn`, with the step fields attached.
#[derive(Debug, Clone, Default)]
pub struct TracingListener {
    _private: (),
}

impl TracingListener {
    /// Creates a new tracing listener.
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepListener for TracingListener {
    fn before_event(&self, event: &StepEvent) -> StepResult<()> {
        info!(
            context_id = %event.context_id(),
            step_id = %event.id(),
            source = %event.source(),
            subject = %event.subject(),
            "Step started"
        );
        Ok(())
    }

    fn after_event(&self, event: &StepEvent) -> StepResult<()> {
        let duration_ms = event.duration().map(|d| d.num_milliseconds());
        let error = event.error().map(|e| e.to_string());

        match event.status() {
            StepStatus::Fail => warn!(
                context_id = %event.context_id(),
                step_id = %event.id(),
                source = %event.source(),
                subject = %event.subject(),
                duration_ms,
                error = error.as_deref(),
                "Step failed"
            ),
            status => info!(
                context_id = %event.context_id(),
                step_id = %event.id(),
                source = %event.source(),
                subject = %event.subject(),
                status = %status,
                duration_ms,
                "Step passed"
            ),
        }
        Ok(())
    }
}
