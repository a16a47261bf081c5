//! Extension gate - defer an extension's bootstrap until its requirements are met.
//!
//! An extension declares the minimum versions of the runtime, the host
//! application, a companion product or anything else it depends on. The
//! [`gate::ExtensionGate`] wraps the extension's bootstrap callback and, once
//! the host has finished loading extensions, either runs it or explains to
//! the user what is missing.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Gate configuration loading and parsing
//! - [`diagnostics`] - Presentation of unmet requirements
//! - [`error`] - Error types and result aliases
//! - [`gate`] - The extension gate and its lifecycle
//! - [`hooks`] - Host event bus and hook points
//! - [`requirements`] - Requirement declaration, resolution and comparison
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use extension_gate::requirements::{HostEnvironment, RequirementsEngine};
//!
//! let env = Rc::new(HostEnvironment::new().with_runtime("7.2"));
//! let mut engine = RequirementsEngine::from_specs(env, [("runtime", "7.4")]);
//!
//! assert!(!engine.met());
//! let errors = engine.errors();
//! assert_eq!(
//!     errors.get("runtime").unwrap().message(),
//!     "Runtime: minimum required 7.4 (you have 7.2)"
//! );
//! ```

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod gate;
pub mod hooks;
pub mod requirements;

pub use error::{GateError, Result};
