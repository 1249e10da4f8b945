//! Newtype wrappers around [`uuid::Uuid`] for steplog identifiers.
//!
//! Using distinct types prevents accidentally passing a `StepId` where a
//! `ContextId` is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Defines a copyable uuid-backed identifier.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

define_id!(
    /// Identity of one logical execution context (a test worker, thread, or
    /// task). Listener registrations are partitioned by this key.
    ContextId
);

define_id!(
    /// Unique identifier of a single instrumented step.
    StepId
);

impl ContextId {
    /// Returns the identifier lazily assigned to the calling OS thread.
    ///
    /// Repeated calls on the same thread return the same id; different
    /// threads never share one. Only meaningful for hosts that confine an
    /// execution context to one thread.
    pub fn current_thread() -> Self {
        thread_local! {
            static THREAD_CONTEXT: ContextId = ContextId::new();
        }
        THREAD_CONTEXT.with(|id| *id)
    }
}
