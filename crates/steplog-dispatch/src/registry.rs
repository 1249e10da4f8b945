//! Listener registry: named listeners partitioned by execution context.
//!
//! Each context owns an insertion-ordered `name → listener` map. The
//! partition index is a sharded concurrent map, so contexts running on
//! different threads never contend on each other's registrations and a
//! context may hop between threads as long as it keeps its [`ContextId`].

use std::sync::Arc;

use dashmap::DashMap;
use indexmap::IndexMap;
use tracing::debug;

use steplog_core::traits::StepListener;
use steplog_core::types::ContextId;

/// A listener together with the name it was registered under.
#[derive(Debug, Clone)]
pub struct ListenerEntry {
    /// Registration name, unique within its context.
    pub name: String,
    /// The listener.
    pub listener: Arc<dyn StepListener>,
}

type ContextListeners = IndexMap<String, Arc<dyn StepListener>>;

/// Registry of step listeners, scoped per execution context.
#[derive(Debug, Default)]
pub struct ListenerRegistry {
    /// Context → that context's listeners, in registration order.
    contexts: DashMap<ContextId, ContextListeners>,
}

impl ListenerRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            contexts: DashMap::new(),
        }
    }

    /// Registers `listener` under `name` in `context`, replacing any listener
    /// already registered there under that name.
    pub fn add(
        &self,
        context: ContextId,
        name: impl Into<String>,
        listener: Arc<dyn StepListener>,
    ) {
        let name = name.into();
        let replaced = self
            .contexts
            .entry(context)
            .or_default()
            .insert(name.clone(), listener)
            .is_some();

        debug!(
            context_id = %context,
            listener = %name,
            replaced,
            "Step listener registered"
        );
    }

    /// Removes and returns the listener registered under `name`, if any.
    pub fn remove(&self, context: ContextId, name: &str) -> Option<Arc<dyn StepListener>> {
        let removed = self
            .contexts
            .get_mut(&context)
            .and_then(|mut listeners| listeners.shift_remove(name));

        if removed.is_some() {
            debug!(context_id = %context, listener = %name, "Step listener removed");
        }
        removed
    }

    /// Returns whether a listener named `name` is registered in `context`.
    pub fn has(&self, context: ContextId, name: &str) -> bool {
        self.contexts
            .get(&context)
            .map(|listeners| listeners.contains_key(name))
            .unwrap_or(false)
    }

    /// Discards every registration of `context`.
    pub fn clear(&self, context: ContextId) {
        if let Some((_, listeners)) = self.contexts.remove(&context) {
            debug!(
                context_id = %context,
                listener_count = listeners.len(),
                "Step listeners cleared"
            );
        }
    }

    /// Returns the listeners of `context` in registration order.
    ///
    /// The context's map is created if it does not exist yet. The returned
    /// entries are detached from the registry, so listeners may register or
    /// remove listeners while being notified.
    pub fn snapshot(&self, context: ContextId) -> Vec<ListenerEntry> {
        self.contexts
            .entry(context)
            .or_default()
            .iter()
            .map(|(name, listener)| ListenerEntry {
                name: name.clone(),
                listener: listener.clone(),
            })
            .collect()
    }

    /// Returns the registration names of `context` in registration order.
    pub fn listener_names(&self, context: ContextId) -> Vec<String> {
        self.contexts
            .get(&context)
            .map(|listeners| listeners.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the number of listeners registered in `context`.
    pub fn listener_count(&self, context: ContextId) -> usize {
        self.contexts
            .get(&context)
            .map(|listeners| listeners.len())
            .unwrap_or(0)
    }

    /// Returns the number of contexts with a listener map.
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }
}
