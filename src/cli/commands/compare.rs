//! Compare command implementation.
//!
//! `extension-gate compare <CURRENT> <MINIMUM>` applies the same version
//! ordering the requirement checks use.

use std::io::Write;

use crate::cli::args::CompareArgs;
use crate::error::Result;
use crate::requirements::version::{is_comparable, meets_minimum};

use super::dispatcher::{Command, CommandResult};

/// The compare command implementation.
pub struct CompareCommand {
    args: CompareArgs,
}

impl CompareCommand {
    pub fn new(args: CompareArgs) -> Self {
        Self { args }
    }
}

impl Command for CompareCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let CompareArgs { current, minimum } = &self.args;

        for version in [current, minimum] {
            if !is_comparable(version) {
                writeln!(out, "unmet: '{}' is not a comparable version", version)?;
                return Ok(CommandResult::failure(1));
            }
        }

        if meets_minimum(current, minimum) {
            writeln!(out, "met: {} satisfies minimum {}", current, minimum)?;
            Ok(CommandResult::success())
        } else {
            writeln!(out, "unmet: {} is below minimum {}", current, minimum)?;
            Ok(CommandResult::failure(1))
        }
    }
}
