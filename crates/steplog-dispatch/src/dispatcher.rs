//! Step dispatcher: drives the begin/commit protocol around a step.
//!
//! `begin_*` creates a pending [`StepEvent`] and calls `before_event` on
//! every listener of the step's context. `commit_step` / `fail_step` record
//! the outcome and call `after_event` on the same context's listeners.
//!
//! Every listener call is guarded on its own: an error or a panic from one
//! listener is logged and the remaining listeners are still notified. The
//! step's outcome and the caller never see listener failures.

use std::any::Any;
use std::fmt;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tracing::{debug, error, trace};

use steplog_core::StepResult;
use steplog_core::config::dispatch::DispatchConfig;
use steplog_core::events::{StepEvent, StepFailure, StepStatus};
use steplog_core::format;
use steplog_core::types::{ContextId, StepArg};

use crate::registry::{ListenerEntry, ListenerRegistry};

/// Which listener hook is being called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Before,
    After,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Before => f.write_str("before"),
            Self::After => f.write_str("after"),
        }
    }
}

/// Notifies the listeners of a step's execution context.
#[derive(Debug)]
pub struct StepDispatcher {
    /// Listener registry.
    registry: Arc<ListenerRegistry>,
    /// Dispatch settings.
    config: DispatchConfig,
}

impl StepDispatcher {
    /// Creates a dispatcher with default settings.
    pub fn new(registry: Arc<ListenerRegistry>) -> Self {
        Self::with_config(registry, DispatchConfig::default())
    }

    /// Creates a dispatcher with explicit settings.
    pub fn with_config(registry: Arc<ListenerRegistry>, config: DispatchConfig) -> Self {
        Self { registry, config }
    }

    /// Begins a step described by `subject` and notifies `before_event`.
    ///
    /// Always returns the pending event, whatever the listeners do.
    pub fn begin_step(
        &self,
        context: ContextId,
        source: impl Into<String>,
        subject: impl Into<String>,
    ) -> StepEvent {
        let event = StepEvent::new(context, source, subject);

        if self.config.log_step_lifecycle {
            debug!(
                context_id = %context,
                step_id = %event.id(),
                step = %event,
                "Step started"
            );
        }

        self.notify(&event, Phase::Before);
        event
    }

    /// Begins a step for a method-style call; the subject becomes e.g.
    /// `should have text(Hello)`.
    pub fn begin_call(
        &self,
        context: ContextId,
        source: impl Into<String>,
        identifier: &str,
        args: &[StepArg],
    ) -> StepEvent {
        self.begin_step(context, source, format::step_label(identifier, args))
    }

    /// Commits `event` with a terminal `status` and notifies `after_event`.
    ///
    /// Committing with `Pending`, or committing an event that is already
    /// terminal, is a contract violation: the error is returned and no
    /// listener is notified.
    pub fn commit_step(&self, event: &mut StepEvent, status: StepStatus) -> StepResult<()> {
        event.finish(status)?;
        self.after_commit(event);
        Ok(())
    }

    /// Commits `event` as failed with `error` and notifies `after_event`.
    pub fn fail_step(
        &self,
        event: &mut StepEvent,
        error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> StepResult<()> {
        let error: Box<dyn std::error::Error + Send + Sync> = error.into();
        self.fail_step_shared(event, Arc::from(error))
    }

    /// Like [`fail_step`](Self::fail_step) for an error the caller keeps a
    /// handle to.
    pub fn fail_step_shared(&self, event: &mut StepEvent, error: StepFailure) -> StepResult<()> {
        event.finish_with_error(error)?;
        self.after_commit(event);
        Ok(())
    }

    /// Returns a reference to the listener registry.
    pub fn registry(&self) -> &Arc<ListenerRegistry> {
        &self.registry
    }

    /// Returns the dispatch settings.
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    fn after_commit(&self, event: &StepEvent) {
        if self.config.log_step_lifecycle {
            debug!(
                context_id = %event.context_id(),
                step_id = %event.id(),
                step = %event,
                status = %event.status(),
                duration_ms = event.duration().map(|d| d.num_milliseconds()),
                "Step committed"
            );
        }

        self.notify(event, Phase::After);
    }

    fn notify(&self, event: &StepEvent, phase: Phase) {
        let listeners = self.registry.snapshot(event.context_id());

        trace!(
            context_id = %event.context_id(),
            phase = %phase,
            listener_count = listeners.len(),
            "Notifying step listeners"
        );

        for entry in &listeners {
            self.notify_one(entry, event, phase);
        }
    }

    fn notify_one(&self, entry: &ListenerEntry, event: &StepEvent, phase: Phase) {
        let call = || match phase {
            Phase::Before => entry.listener.before_event(event),
            Phase::After => entry.listener.after_event(event),
        };

        let outcome = match catch_unwind(AssertUnwindSafe(call)) {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(payload) => Err(format!("listener panicked: {}", panic_message(&*payload))),
        };

        if let Err(reason) = outcome {
            error!(
                listener = %entry.name,
                listener_impl = ?entry.listener,
                context_id = %event.context_id(),
                step_id = %event.id(),
                step = %event,
                phase = %phase,
                error = %reason,
                "Failed to call step listener"
            );
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
