//! Command dispatching.
//!
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, writing user-facing output to `out`.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: 0,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    color: bool,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            color: false,
        }
    }

    /// Enable or disable styled output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        match &cli.command {
            Commands::Check(args) => {
                let cmd = super::check::CheckCommand::new(&self.project_root, args.clone())
                    .with_color(self.color);
                cmd.execute(out)
            }
            Commands::Compare(args) => {
                let cmd = super::compare::CompareCommand::new(args.clone());
                cmd.execute(out)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(1);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_creation() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/test"));
        assert_eq!(dispatcher.project_root(), Path::new("/test"));
    }

    #[test]
    fn dispatches_compare() {
        let cli = Cli::try_parse_from(["extension-gate", "compare", "2.0", "1.9"]).unwrap();
        let mut out = Vec::new();
        let result = CommandDispatcher::new(PathBuf::from("."))
            .dispatch(&cli, &mut out)
            .unwrap();
        assert!(result.success);
        assert!(!out.is_empty());
    }
}
