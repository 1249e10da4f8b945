//! # steplog-dispatch
//!
//! Step notification runtime for steplog. Provides:
//!
//! - Listener registry partitioned per execution context
//! - Step dispatcher implementing the begin/commit protocol with
//!   per-listener failure isolation
//! - Execution context handles and the `StepLogger` entry point
//! - A built-in listener that logs steps through `tracing`

pub mod context;
pub mod dispatcher;
pub mod listeners;
pub mod macros;
pub mod manager;
pub mod prelude;
pub mod registry;

pub use context::ExecutionContext;
pub use dispatcher::StepDispatcher;
pub use listeners::TracingListener;
pub use manager::StepLogger;
pub use registry::{ListenerEntry, ListenerRegistry};
