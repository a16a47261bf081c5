//! Command probes for generic requirements.
//!
//! A probe runs a version command (e.g. `node --version`) once and feeds
//! both the `current` and `exists` fields of a descriptor. The command is
//! split on whitespace and executed directly, without a shell.
//!
//! # Example
//!
//! ```no_run
//! use extension_gate::requirements::probe::CommandProbe;
//!
//! let probe = CommandProbe::new("node --version");
//! let outcome = probe.run();
//! if outcome.ran {
//!     println!("node {}", outcome.version.as_deref().unwrap_or("?"));
//! }
//! ```

use crate::requirements::descriptor::RequirementOverride;
use regex::Regex;
use std::cell::OnceCell;
use std::process::Command;
use std::rc::Rc;
use std::sync::LazyLock;

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:\.\d+)+(?:-?(?:dev|alpha|beta|rc)\.?\d*)?").unwrap()
});

/// What a probe observed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// The command started and exited successfully.
    pub ran: bool,
    /// First version found in the command's output.
    pub version: Option<String>,
}

/// A memoized version command.
#[derive(Debug)]
pub struct CommandProbe {
    command: String,
    outcome: OnceCell<ProbeOutcome>,
}

impl CommandProbe {
    /// Create a shared probe for `command`.
    pub fn new(command: impl Into<String>) -> Rc<Self> {
        Rc::new(Self {
            command: command.into(),
            outcome: OnceCell::new(),
        })
    }

    /// The command line this probe runs.
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Run the command on first use and return the cached outcome.
    pub fn run(&self) -> &ProbeOutcome {
        self.outcome.get_or_init(|| self.execute())
    }

    /// Wire this probe into a requirement's `current` and `exists` fields.
    ///
    /// Fields already set on `spec` are left alone.
    pub fn apply_to(self: Rc<Self>, mut spec: RequirementOverride) -> RequirementOverride {
        if spec.current.is_none() {
            let probe = Rc::clone(&self);
            spec = spec.current_with(move || probe.run().version.clone());
        }
        if spec.exists.is_none() {
            spec = spec.exists_with(move || self.run().ran);
        }
        spec
    }

    fn execute(&self) -> ProbeOutcome {
        let mut parts = self.command.split_whitespace();
        let Some(program) = parts.next() else {
            tracing::debug!("Empty probe command");
            return ProbeOutcome::default();
        };

        match Command::new(program).args(parts).output() {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                let stderr = String::from_utf8_lossy(&output.stderr);
                let version = extract_version(&stdout).or_else(|| extract_version(&stderr));
                tracing::debug!(
                    "Probe '{}' exited with {:?}, version {:?}",
                    self.command,
                    output.status.code(),
                    version
                );
                ProbeOutcome {
                    ran: output.status.success(),
                    version,
                }
            }
            Err(e) => {
                tracing::debug!("Probe '{}' could not start: {}", self.command, e);
                ProbeOutcome::default()
            }
        }
    }
}

/// Extract the first dotted version number from free-form text.
pub fn extract_version(text: &str) -> Option<String> {
    VERSION_PATTERN
        .find(text)
        .map(|m| m.as_str().to_string())
}
