//! Live environment facts consulted by built-in requirements.
//!
//! The engine never caches these values; each `check()` asks the
//! [`Environment`] again, so facts established late in the host's
//! bootstrap (a companion product announcing itself, for instance) are
//! observed as long as they land before the gate's trigger fires.

use std::cell::RefCell;

/// Environment variable holding the runtime version for [`HostEnvironment::from_env`].
pub const RUNTIME_VERSION_VAR: &str = "EXTENSION_GATE_RUNTIME_VERSION";
/// Environment variable holding the host application version.
pub const HOST_VERSION_VAR: &str = "EXTENSION_GATE_HOST_VERSION";
/// Environment variable holding the companion product version.
pub const COMPANION_VERSION_VAR: &str = "EXTENSION_GATE_COMPANION_VERSION";

/// Source of the facts built-in requirements are resolved against.
pub trait Environment {
    /// Version of the runtime the extension executes on.
    fn runtime_version(&self) -> Option<String>;

    /// Version of the hosting application.
    fn host_version(&self) -> Option<String>;

    /// Version announced by the companion product, if it has announced itself.
    fn companion_version(&self) -> Option<String>;
}

/// In-process environment populated by the host.
#[derive(Debug, Default)]
pub struct HostEnvironment {
    runtime: RefCell<Option<String>>,
    host: RefCell<Option<String>>,
    companion: RefCell<Option<String>>,
}

impl HostEnvironment {
    /// Create an environment with no facts established.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read facts from `EXTENSION_GATE_*` environment variables.
    ///
    /// Unset or blank variables leave the fact unestablished.
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read facts through `lookup`, keyed by the `*_VERSION_VAR` names.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Self {
            runtime: RefCell::new(read(RUNTIME_VERSION_VAR)),
            host: RefCell::new(read(HOST_VERSION_VAR)),
            companion: RefCell::new(read(COMPANION_VERSION_VAR)),
        }
    }

    /// Set the runtime version.
    pub fn with_runtime(self, version: impl Into<String>) -> Self {
        *self.runtime.borrow_mut() = Some(version.into());
        self
    }

    /// Set the host application version.
    pub fn with_host(self, version: impl Into<String>) -> Self {
        *self.host.borrow_mut() = Some(version.into());
        self
    }

    /// Set the companion product version.
    pub fn with_companion(self, version: impl Into<String>) -> Self {
        self.announce_companion(version);
        self
    }

    /// Record that the companion product has loaded with `version`.
    pub fn announce_companion(&self, version: impl Into<String>) {
        let version = version.into();
        tracing::debug!("Companion product announced version {}", version);
        *self.companion.borrow_mut() = Some(version);
    }

    /// Forget the companion product announcement.
    pub fn withdraw_companion(&self) {
        *self.companion.borrow_mut() = None;
    }

    /// Replace the runtime version after construction.
    pub fn set_runtime(&self, version: Option<String>) {
        *self.runtime.borrow_mut() = version;
    }

    /// Replace the host version after construction.
    pub fn set_host(&self, version: Option<String>) {
        *self.host.borrow_mut() = version;
    }
}

impl Environment for HostEnvironment {
    fn runtime_version(&self) -> Option<String> {
        self.runtime.borrow().clone()
    }

    fn host_version(&self) -> Option<String> {
        self.host.borrow().clone()
    }

    fn companion_version(&self) -> Option<String> {
        self.companion.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_environment_has_no_facts() {
        let env = HostEnvironment::new();
        assert!(env.runtime_version().is_none());
        assert!(env.host_version().is_none());
        assert!(env.companion_version().is_none());
    }

    #[test]
    fn builder_sets_facts() {
        let env = HostEnvironment::new()
            .with_runtime("8.1")
            .with_host("6.4")
            .with_companion("3.2");
        assert_eq!(env.runtime_version().as_deref(), Some("8.1"));
        assert_eq!(env.host_version().as_deref(), Some("6.4"));
        assert_eq!(env.companion_version().as_deref(), Some("3.2"));
    }

    #[test]
    fn companion_can_announce_and_withdraw() {
        let env = HostEnvironment::new();
        env.announce_companion("3.0");
        assert_eq!(env.companion_version().as_deref(), Some("3.0"));
        env.withdraw_companion();
        assert!(env.companion_version().is_none());
    }

    #[test]
    fn setters_replace_versions() {
        let env = HostEnvironment::new().with_runtime("7.2");
        env.set_runtime(Some("8.0".into()));
        env.set_host(Some("6.0".into()));
        assert_eq!(env.runtime_version().as_deref(), Some("8.0"));
        assert_eq!(env.host_version().as_deref(), Some("6.0"));
    }

    #[test]
    fn from_lookup_reads_version_vars() {
        let vars = std::collections::HashMap::from([
            (RUNTIME_VERSION_VAR, " 8.1 "),
            (HOST_VERSION_VAR, ""),
            (COMPANION_VERSION_VAR, "3.2"),
        ]);
        let env = HostEnvironment::from_lookup(|var| vars.get(var).map(|v| v.to_string()));
        assert_eq!(env.runtime_version().as_deref(), Some("8.1"));
        assert!(env.host_version().is_none());
        assert_eq!(env.companion_version().as_deref(), Some("3.2"));
    }

    #[test]
    fn from_env_reads_process_environment() {
        // Only the runtime variable is touched; other tests read the rest.
        std::env::set_var(RUNTIME_VERSION_VAR, "9.0");
        let env = HostEnvironment::from_env();
        std::env::remove_var(RUNTIME_VERSION_VAR);
        assert_eq!(env.runtime_version().as_deref(), Some("9.0"));
    }
}
