//! The listener capability consumed by the step dispatcher.

use std::fmt;

use crate::events::StepEvent;
use crate::result::StepResult;

/// Observer notified before and after every step of the execution context it
/// is registered in.
///
/// Hooks are called synchronously on the caller's thread. An `Err` (or a
/// panic) from a hook is logged by the dispatcher and otherwise ignored: it
/// never changes the step outcome and never stops other listeners from
/// being notified. Listeners must not rely on being called in any order
/// relative to each other.
pub trait StepListener: Send + Sync + fmt::Debug {
    /// Called once when a step begins; `event.status()` is `Pending`.
    fn before_event(&self, event: &StepEvent) -> StepResult<()>;

    /// Called once when a step is committed; `event.status()` is terminal.
    fn after_event(&self, event: &StepEvent) -> StepResult<()>;
}
