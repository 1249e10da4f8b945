//! Built-in step listeners.

pub mod log;

pub use log::TracingListener;
