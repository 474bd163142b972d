//! Named inline partials.
//!
//! `{{#extend "name"}}...{{/extend}}` queues rendered fragments under a name
//! and `{{{include "name"}}}` drains them, so a page can declare blocks
//! anywhere and a shared layout can pull them in at a fixed point regardless
//! of document order.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

/// Write-many, read-once mailbox of rendered fragments keyed by name.
#[derive(Debug, Default, Clone)]
pub struct PartialRegistry {
    pending: HashMap<String, Vec<String>>,
}

impl PartialRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment to the queue for `name`.
    pub fn define(&mut self, name: &str, fragment: impl Into<String>) {
        self.pending
            .entry(name.to_string())
            .or_default()
            .push(fragment.into());
    }

    /// Every fragment queued for `name` since the last consume, newline
    /// joined in definition order. The queue is left empty.
    pub fn consume(&mut self, name: &str) -> String {
        self.pending
            .get_mut(name)
            .map(|fragments| std::mem::take(fragments).join("\n"))
            .unwrap_or_default()
    }

    /// Number of fragments waiting under `name`.
    pub fn pending(&self, name: &str) -> usize {
        self.pending.get(name).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.pending.values().all(Vec::is_empty)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

/// Handle to a [`PartialRegistry`] shared between the `extend` and `include`
/// helpers of one [`crate::HelperLibrary`].
#[derive(Debug, Default, Clone)]
pub struct SharedPartials {
    inner: Arc<Mutex<PartialRegistry>>,
}

impl SharedPartials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&self, name: &str, fragment: impl Into<String>) {
        let fragment = fragment.into();
        debug!("Queueing inline partial '{}' ({} bytes)", name, fragment.len());
        self.lock().define(name, fragment);
    }

    pub fn consume(&self, name: &str) -> String {
        let content = self.lock().consume(name);
        debug!("Draining inline partial '{}' ({} bytes)", name, content.len());
        content
    }

    pub fn pending(&self, name: &str) -> usize {
        self.lock().pending(name)
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    // Poisoning is ignored: the registry only holds strings.
    fn lock(&self) -> MutexGuard<'_, PartialRegistry> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
