//! Convenience result type alias for steplog.

use crate::error::StepError;

/// A specialized `Result` type for steplog operations and listener hooks.
pub type StepResult<T> = Result<T, StepError>;
