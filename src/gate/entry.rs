//! Named entry points for configuration-driven gates.

use super::DeferredCallback;
use std::collections::HashMap;
use std::fmt;

/// Callbacks an extension exposes, looked up by the name its config uses.
#[derive(Default)]
pub struct EntryPoints {
    callbacks: HashMap<String, DeferredCallback>,
}

impl EntryPoints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the callback for `name`.
    pub fn register<F>(&mut self, name: &str, callback: F)
    where
        F: FnOnce() -> anyhow::Result<()> + 'static,
    {
        self.callbacks.insert(name.to_string(), Box::new(callback));
    }

    /// Remove and return the callback for `name`.
    pub fn take(&mut self, name: &str) -> Option<DeferredCallback> {
        self.callbacks.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.callbacks.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.callbacks.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for EntryPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntryPoints").field("names", &self.names()).finish()
    }
}
