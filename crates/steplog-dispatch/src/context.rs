//! Execution context handle: the registration and step surface for one
//! logical unit of concurrent test execution.

use std::panic::{AssertUnwindSafe, catch_unwind, resume_unwind};
use std::sync::Arc;

use steplog_core::StepResult;
use steplog_core::events::{StepEvent, StepFailure, StepStatus};
use steplog_core::traits::StepListener;
use steplog_core::types::{ContextId, StepArg};

use crate::dispatcher::{StepDispatcher, panic_message};

/// A handle bound to one [`ContextId`].
///
/// Cloning the handle does not create a new context: every clone, on any
/// thread or task, sees the same registrations. Dropping it does not clear
/// them; call [`clear_listeners`](Self::clear_listeners) at teardown.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    id: ContextId,
    dispatcher: Arc<StepDispatcher>,
}

impl ExecutionContext {
    /// Binds `id` to a dispatcher.
    pub fn new(id: ContextId, dispatcher: Arc<StepDispatcher>) -> Self {
        Self { id, dispatcher }
    }

    /// Returns this context's identifier.
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Registers `listener` under `name`, replacing a previous one.
    pub fn add_listener(&self, name: impl Into<String>, listener: Arc<dyn StepListener>) {
        self.dispatcher.registry().add(self.id, name, listener);
    }

    /// Removes and returns the listener registered under `name`.
    pub fn remove_listener(&self, name: &str) -> Option<Arc<dyn StepListener>> {
        self.dispatcher.registry().remove(self.id, name)
    }

    /// Returns whether a listener is registered under `name`.
    pub fn has_listener(&self, name: &str) -> bool {
        self.dispatcher.registry().has(self.id, name)
    }

    /// Removes every listener of this context.
    pub fn clear_listeners(&self) {
        self.dispatcher.registry().clear(self.id);
    }

    /// Returns the registered listener names in registration order.
    pub fn listener_names(&self) -> Vec<String> {
        self.dispatcher.registry().listener_names(self.id)
    }

    /// See [`StepDispatcher::begin_step`].
    pub fn begin_step(&self, source: impl Into<String>, subject: impl Into<String>) -> StepEvent {
        self.dispatcher.begin_step(self.id, source, subject)
    }

    /// See [`StepDispatcher::begin_call`].
    pub fn begin_call(
        &self,
        source: impl Into<String>,
        identifier: &str,
        args: &[StepArg],
    ) -> StepEvent {
        self.dispatcher.begin_call(self.id, source, identifier, args)
    }

    /// See [`StepDispatcher::commit_step`].
    pub fn commit_step(&self, event: &mut StepEvent, status: StepStatus) -> StepResult<()> {
        self.dispatcher.commit_step(event, status)
    }

    /// See [`StepDispatcher::fail_step`].
    pub fn fail_step(
        &self,
        event: &mut StepEvent,
        error: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> StepResult<()> {
        self.dispatcher.fail_step(event, error)
    }

    /// Runs `action` as one step: begins it, runs the action, and commits
    /// `Pass` or `Fail` depending on the result.
    ///
    /// The action's error is recorded on the event and returned to the
    /// caller as the same shared value. If the action panics, the step is
    /// committed as `Fail` with the panic message and the panic resumes.
    pub fn step<T, E, F>(
        &self,
        source: impl Into<String>,
        subject: impl Into<String>,
        action: F,
    ) -> Result<T, StepFailure>
    where
        F: FnOnce() -> Result<T, E>,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        let mut event = self.begin_step(source, subject);

        match catch_unwind(AssertUnwindSafe(action)) {
            Ok(Ok(value)) => {
                let committed = self.dispatcher.commit_step(&mut event, StepStatus::Pass);
                debug_assert!(committed.is_ok(), "fresh step rejected its commit");
                Ok(value)
            }
            Ok(Err(e)) => {
                let boxed: Box<dyn std::error::Error + Send + Sync> = e.into();
                let failure: StepFailure = Arc::from(boxed);
                let committed = self.dispatcher.fail_step_shared(&mut event, failure.clone());
                debug_assert!(committed.is_ok(), "fresh step rejected its commit");
                Err(failure)
            }
            Err(payload) => {
                let message = format!("step panicked: {}", panic_message(&*payload));
                let committed = self.dispatcher.fail_step(&mut event, message);
                debug_assert!(committed.is_ok(), "fresh step rejected its commit");
                resume_unwind(payload)
            }
        }
    }
}
