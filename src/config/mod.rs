//! Configuration loading and parsing for extension gates.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//!
//! # Example
//!
//! ```
//! use extension_gate::config::{load_project_config, PresentationMode};
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(
//!     temp.path().join("extension-gate.yml"),
//!     "extension: { id: reports }\npresentation: row\nrequirements: { runtime: \"7.4\" }",
//! )
//! .unwrap();
//!
//! let config = load_project_config(temp.path()).unwrap();
//! assert_eq!(config.presentation, PresentationMode::Row);
//! assert_eq!(config.requirement_specs().len(), 1);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{find_config, load_config, load_project_config, parse_config, DEFAULT_CONFIG_FILE};
pub use schema::{
    ExtensionConfig, GateConfig, PresentationMode, RequirementConfig, RequirementList,
    RequirementTable, VersionValue, DEFAULT_ENTRY_POINT,
};
