//! Command-line interface for extension-gate.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{CheckArgs, Cli, Commands, CompareArgs};
pub use commands::{Command, CommandDispatcher, CommandResult};
