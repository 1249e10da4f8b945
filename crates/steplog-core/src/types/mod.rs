//! Core type definitions used across the steplog workspace.

pub mod args;
pub mod id;

pub use args::StepArg;
pub use id::*;
