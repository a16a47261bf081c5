//! CLI argument definitions.
//!
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Check whether an extension's requirements are met before it boots.
#[derive(Debug, Parser)]
#[command(name = "extension-gate")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate the configured requirements
    Check(CheckArgs),

    /// Compare a version against a minimum
    Compare(CompareArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct CheckArgs {
    /// Path to config file (overrides extension-gate.yml in the project root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Version of the language runtime [default: $EXTENSION_GATE_RUNTIME_VERSION]
    #[arg(long, value_name = "VERSION")]
    pub runtime_version: Option<String>,

    /// Version of the host application [default: $EXTENSION_GATE_HOST_VERSION]
    #[arg(long, value_name = "VERSION")]
    pub host_version: Option<String>,

    /// Version of the companion product, if installed [default: $EXTENSION_GATE_COMPANION_VERSION]
    #[arg(long, value_name = "VERSION")]
    pub companion_version: Option<String>,

    /// Print unmet requirements as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `compare` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompareArgs {
    /// Version to test
    pub current: String,

    /// Minimum required version
    pub minimum: String,
}
