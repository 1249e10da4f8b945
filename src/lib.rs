//! # steplog
//!
//! Step instrumentation for browser-automation tests. Wrap every user
//! action or assertion in a begin/commit pair and every listener
//! registered in the running test's execution context is told when the
//! step starts and how it ended.
//!
//! ```rust
//! use std::sync::Arc;
//! use steplog::prelude::*;
//!
//! let logger = StepLogger::new();
//! let ctx = logger.context();
//! ctx.add_listener("log", Arc::new(TracingListener::new()));
//!
//! let mut event = ctx.begin_call("#submit", "click", &step_args![]);
//! // ... perform the click ...
//! ctx.commit_step(&mut event, StepStatus::Pass).expect("fresh event");
//! assert_eq!(event.subject(), "click()");
//! ctx.clear_listeners();
//! ```

pub mod telemetry;

pub use steplog_core::{config, error, events, format, result, traits, types};
pub use steplog_core::{StepError, StepResult};
pub use steplog_dispatch::{
    ExecutionContext, ListenerEntry, ListenerRegistry, StepDispatcher, StepLogger,
    TracingListener, step_args,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use steplog_dispatch::prelude::*;
}
