//! Step events delivered to listeners.

pub mod step;

pub use step::{StepEvent, StepFailure, StepStatus};
