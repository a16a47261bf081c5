//! Check command implementation.
//!
//! `extension-gate check` loads the project's gate config, runs the gate
//! through a simulated host bootstrap and reports the outcome.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::cli::args::CheckArgs;
use crate::config::{load_config, load_project_config, GateConfig};
use crate::diagnostics::SharedBuffer;
use crate::error::Result;
use crate::gate::{EntryPoints, ExtensionGate, GateState};
use crate::hooks::{HookPoint, HookRegistry, EXTENSIONS_LOADED};
use crate::requirements::HostEnvironment;

use super::dispatcher::{Command, CommandResult};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    args: CheckArgs,
    color: bool,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            args,
            color: false,
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn load(&self) -> Result<GateConfig> {
        match &self.args.config {
            Some(path) => load_config(&self.project_root.join(path)),
            None => load_project_config(&self.project_root),
        }
    }

    /// Layer the version arguments over `base`.
    fn environment_over(&self, base: HostEnvironment) -> HostEnvironment {
        if let Some(version) = &self.args.runtime_version {
            base.set_runtime(Some(version.clone()));
        }
        if let Some(version) = &self.args.host_version {
            base.set_host(Some(version.clone()));
        }
        if let Some(version) = &self.args.companion_version {
            base.announce_companion(version.as_str());
        }
        base
    }
}

impl Command for CheckCommand {
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult> {
        let config = self.load()?;
        let bus = Rc::new(HookRegistry::new());

        let context = config.extension.context();
        let mut entry_points = EntryPoints::new();
        let name = context.display_name().to_string();
        entry_points.register(config.extension.entry_point(), move || {
            tracing::info!("Booting '{}'", name);
            Ok(())
        });

        let gate = ExtensionGate::from_config(
            &config,
            &mut entry_points,
            Rc::new(self.environment_over(HostEnvironment::from_env())),
            bus.clone(),
        )?;

        let rendered = SharedBuffer::new();
        if !self.args.json {
            gate.add_sink(config.presentation.sink(rendered.clone(), self.color));
        }
        gate.register();

        bus.fire(EXTENSIONS_LOADED)?;
        let state = gate.state();

        if state == GateState::Unmet {
            let points = [
                HookPoint::Notices,
                HookPoint::ExtensionRow {
                    extension: context.extension_id.clone(),
                },
                HookPoint::Styles,
            ];
            for point in points {
                bus.fire(&point.event_name())?;
            }
        }

        if self.args.json {
            let report = serde_json::json!({
                "extension": context.extension_id,
                "state": state.to_string(),
                "unmet": gate.errors(),
            });
            let text = serde_json::to_string_pretty(&report).map_err(anyhow::Error::from)?;
            writeln!(out, "{}", text)?;
        } else if state == GateState::Met {
            writeln!(out, "{}: all requirements met", context.display_name())?;
        } else {
            write!(out, "{}", rendered.contents())?;
        }

        Ok(match state {
            GateState::Met => CommandResult::success(),
            _ => CommandResult::failure(1),
        })
    }
}
