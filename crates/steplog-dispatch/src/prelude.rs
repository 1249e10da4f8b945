//! Prelude for convenient imports.

pub use steplog_core::StepError;
pub use steplog_core::StepResult;
pub use steplog_core::events::{StepEvent, StepFailure, StepStatus};
pub use steplog_core::traits::StepListener;
pub use steplog_core::types::{ContextId, StepArg};

pub use crate::context::ExecutionContext;
pub use crate::listeners::TracingListener;
pub use crate::manager::StepLogger;

pub use crate::step_args;
