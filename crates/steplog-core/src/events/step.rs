//! The step event: one instrumented step and its outcome.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize, Serializer};

use crate::error::StepError;
use crate::result::StepResult;
use crate::types::id::{ContextId, StepId};

/// Error attached to a failed step. Shared so clones of the event handed
/// to listeners observe the very same error value.
pub type StepFailure = Arc<dyn std::error::Error + Send + Sync>;

/// Status of a step.
///
/// Valid transitions are `Pending -> Pass` and `Pending -> Fail`; both
/// targets are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StepStatus {
    /// The step has begun and is not committed yet.
    Pending,
    /// The step action succeeded.
    Pass,
    /// The step action failed.
    Fail,
}

impl StepStatus {
    /// Returns the upper-case name of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }

    /// Returns whether no further transition is allowed.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for StepStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One instrumented step.
///
/// Created by the dispatcher in `Pending` state and handed back to the
/// caller, who passes it unchanged to the commit call. Once a terminal
/// status is set the event never changes again.
#[derive(Clone, Serialize)]
pub struct StepEvent {
    id: StepId,
    context_id: ContextId,
    source: String,
    subject: String,
    status: StepStatus,
    #[serde(serialize_with = "serialize_failure")]
    error: Option<StepFailure>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl StepEvent {
    /// Create a pending event for a step begun in `context_id`.
    pub fn new(
        context_id: ContextId,
        source: impl Into<String>,
        subject: impl Into<String>,
    ) -> Self {
        Self {
            id: StepId::new(),
            context_id,
            source: source.into(),
            subject: subject.into(),
            status: StepStatus::Pending,
            error: None,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Unique id of this step.
    pub fn id(&self) -> StepId {
        self.id
    }

    /// Execution context the step was begun in.
    pub fn context_id(&self) -> ContextId {
        self.context_id
    }

    /// Identifier of the subject under test, e.g. a locator.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Human-readable description of the action.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Current status.
    pub fn status(&self) -> StepStatus {
        self.status
    }

    /// Failure detail, present only for steps committed with an error.
    pub fn error(&self) -> Option<&StepFailure> {
        self.error.as_ref()
    }

    /// When the step began.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// When the step was committed.
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    /// Time between begin and commit; `None` while pending.
    pub fn duration(&self) -> Option<TimeDelta> {
        self.finished_at.map(|end| end - self.started_at)
    }

    /// Serializes the event for reporters.
    pub fn to_json(&self) -> StepResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    /// Moves the event to a terminal status.
    ///
    /// This only records the outcome; the dispatcher's commit calls it and
    /// then notifies listeners. Fails with a contract error when `status` is
    /// `Pending` or the event is already terminal.
    pub fn finish(&mut self, status: StepStatus) -> StepResult<()> {
        if !status.is_terminal() {
            return Err(StepError::contract(format!(
                "step '{}' cannot be committed with status {}",
                self.subject, status
            )));
        }
        self.ensure_pending()?;

        self.status = status;
        self.finished_at = Some(Utc::now());
        Ok(())
    }

    /// Records `error` and moves the event to `Fail`.
    pub fn finish_with_error(&mut self, error: StepFailure) -> StepResult<()> {
        self.ensure_pending()?;

        self.error = Some(error);
        self.finish(StepStatus::Fail)
    }

    fn ensure_pending(&self) -> StepResult<()> {
        if self.status.is_terminal() {
            return Err(StepError::contract(format!(
                "step '{}' is already committed as {}",
                self.subject, self.status
            )));
        }
        Ok(())
    }
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$(\"{}\") {}", self.source, self.subject)
    }
}

impl fmt::Debug for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepEvent")
            .field("id", &self.id)
            .field("context_id", &self.context_id)
            .field("source", &self.source)
            .field("subject", &self.subject)
            .field("status", &self.status)
            .field("error", &self.error.as_ref().map(|e| e.to_string()))
            .field("started_at", &self.started_at)
            .field("finished_at", &self.finished_at)
            .finish()
    }
}

fn serialize_failure<S: Serializer>(
    error: &Option<StepFailure>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match error {
        Some(e) => serializer.serialize_some(&e.to_string()),
        None => serializer.serialize_none(),
    }
}
