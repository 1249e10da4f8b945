//! Trait definitions at the seams between steplog and its consumers.

pub mod listener;

pub use listener::StepListener;
