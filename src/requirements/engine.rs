//! Requirements engine.
//!
//! The `RequirementsEngine` holds the declared requirements for one
//! extension and evaluates them against the live environment.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use extension_gate::requirements::{HostEnvironment, RequirementsEngine};
//!
//! let env = Rc::new(HostEnvironment::new().with_runtime("8.1"));
//! let mut engine = RequirementsEngine::new(env);
//! engine.add_requirement("runtime", "7.4");
//! assert!(engine.met());
//! assert!(engine.errors().is_empty());
//! ```

use crate::requirements::descriptor::{sanitize_key, RequirementDescriptor, RequirementSpec};
use crate::requirements::environment::Environment;
use crate::requirements::resolver::ResolverRegistry;
use crate::requirements::status::{Diagnostics, UnmetRequirement};
use std::fmt;
use std::rc::Rc;

/// Evaluates a set of requirement descriptors.
pub struct RequirementsEngine {
    environment: Rc<dyn Environment>,
    resolvers: ResolverRegistry,
    requirements: Vec<RequirementDescriptor>,
}

impl RequirementsEngine {
    /// Create an engine with the built-in resolvers.
    pub fn new(environment: Rc<dyn Environment>) -> Self {
        Self::with_resolvers(environment, ResolverRegistry::new())
    }

    /// Create an engine with a custom resolver registry.
    pub fn with_resolvers(environment: Rc<dyn Environment>, resolvers: ResolverRegistry) -> Self {
        Self {
            environment,
            resolvers,
            requirements: Vec::new(),
        }
    }

    /// Create an engine and register every `(id, spec)` pair in order.
    pub fn from_specs<I, K, S>(environment: Rc<dyn Environment>, specs: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: AsRef<str>,
        S: Into<RequirementSpec>,
    {
        let mut engine = Self::new(environment);
        for (id, spec) in specs {
            engine.add_requirement(id.as_ref(), spec);
        }
        engine
    }

    /// Register or overwrite the requirement for `id`.
    ///
    /// An overwritten requirement keeps its original position.
    pub fn add_requirement(&mut self, id: &str, spec: impl Into<RequirementSpec>) {
        let key = sanitize_key(id);
        let default_name = self.resolvers.display_name(&key).unwrap_or_default();
        let descriptor = RequirementDescriptor::from_spec(&key, spec.into(), default_name);

        match self
            .requirements
            .iter()
            .position(|d| d.id() == descriptor.id())
        {
            Some(index) => {
                tracing::debug!("Replacing requirement '{}'", descriptor.id());
                self.requirements[index] = descriptor;
            }
            None => {
                tracing::debug!("Adding requirement '{}'", descriptor.id());
                self.requirements.push(descriptor);
            }
        }
    }

    /// Look up a descriptor by id.
    pub fn get(&self, id: &str) -> Option<&RequirementDescriptor> {
        self.requirements.iter().find(|d| d.id() == id)
    }

    /// All descriptors in registration order.
    pub fn requirements(&self) -> &[RequirementDescriptor] {
        &self.requirements
    }

    pub fn len(&self) -> usize {
        self.requirements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requirements.is_empty()
    }

    /// Resolve and evaluate every descriptor.
    pub fn check(&mut self) {
        for descriptor in &mut self.requirements {
            let resolution = self
                .resolvers
                .resolve(self.environment.as_ref(), descriptor);
            descriptor.apply(resolution);
        }
    }

    /// Check, then report whether every requirement is met.
    ///
    /// An engine with no requirements is met.
    pub fn met(&mut self) -> bool {
        self.check();
        self.requirements.iter().all(|d| d.met())
    }

    /// Diagnostics for every descriptor that is not met.
    pub fn errors(&self) -> Diagnostics {
        Diagnostics::new(
            self.requirements
                .iter()
                .filter(|d| !d.met())
                .map(UnmetRequirement::from_descriptor)
                .collect(),
        )
    }
}

impl fmt::Debug for RequirementsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequirementsEngine")
            .field("resolvers", &self.resolvers)
            .field("requirements", &self.requirements)
            .finish_non_exhaustive()
    }
}
