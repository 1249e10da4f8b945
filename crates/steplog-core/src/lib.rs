//! # steplog-core
//!
//! Core crate for steplog. Contains configuration schemas, typed
//! identifiers, the step event model, step label formatting, the listener
//! trait, and the unified error system.
//!
//! This crate has **no** internal dependencies on other steplog crates.

pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod result;
pub mod traits;
pub mod types;

pub use error::StepError;
pub use result::StepResult;
