//! Requirement declaration and evaluation.
//!
//! This module decides whether the environment satisfies the requirements
//! an extension declares, and explains any that it does not.
//!
//! # Modules
//!
//! - [`descriptor`] - Requirement descriptors and the specs they are built from
//! - [`engine`] - The requirements engine
//! - [`environment`] - Live environment facts for built-in requirements
//! - [`probe`] - Command probes feeding generic requirements
//! - [`resolver`] - Built-in and fallback resolvers
//! - [`status`] - Diagnostic records for unmet requirements
//! - [`value`] - Literal-or-computed requirement fields
//! - [`version`] - Dotted release version comparison

pub mod descriptor;
pub mod engine;
pub mod environment;
pub mod probe;
pub mod resolver;
pub mod status;
pub mod value;
pub mod version;

pub use descriptor::{RequirementDescriptor, RequirementOverride, RequirementSpec};
pub use engine::RequirementsEngine;
pub use environment::{Environment, HostEnvironment};
pub use resolver::{Resolution, ResolverRegistry, COMPANION_PRODUCT, HOST, RUNTIME};
pub use status::{Diagnostics, UnmetKind, UnmetRequirement};
pub use value::Resolvable;
