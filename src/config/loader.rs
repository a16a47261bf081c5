//! Configuration file discovery and loading.

use crate::config::schema::GateConfig;
use crate::error::{GateError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file looked up in a project root.
pub const DEFAULT_CONFIG_FILE: &str = "extension-gate.yml";

/// Alternative names, checked after [`DEFAULT_CONFIG_FILE`].
const ALTERNATE_CONFIG_FILES: &[&str] = &["extension-gate.yaml", ".extension-gate.yml"];

/// Find the config file in `project_root`, if any.
pub fn find_config(project_root: &Path) -> Option<PathBuf> {
    std::iter::once(DEFAULT_CONFIG_FILE)
        .chain(ALTERNATE_CONFIG_FILES.iter().copied())
        .map(|name| project_root.join(name))
        .find(|path| path.is_file())
}

/// Load the config for `project_root`.
///
/// # Errors
///
/// Returns `ConfigNotFound` naming the default file when no config exists.
pub fn load_project_config(project_root: &Path) -> Result<GateConfig> {
    match find_config(project_root) {
        Some(path) => load_config(&path),
        None => Err(GateError::ConfigNotFound {
            path: project_root.join(DEFAULT_CONFIG_FILE),
        }),
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config(path: &Path) -> Result<GateConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            GateError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            GateError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse config text. `source_path` is only used in error messages.
///
/// An empty document yields the default config.
pub fn parse_config(content: &str, source_path: &Path) -> Result<GateConfig> {
    if content.trim().is_empty() {
        tracing::debug!("Config at {} is empty", source_path.display());
        return Ok(GateConfig::default());
    }

    let config: GateConfig =
        serde_yaml::from_str(content).map_err(|e| GateError::ConfigParseError {
            path: source_path.to_path_buf(),
            message: e.to_string(),
        })?;

    tracing::debug!(
        "Loaded config from {} with {} requirements",
        source_path.display(),
        config.requirements.len()
    );
    Ok(config)
}
