//! Resolver registry for requirement evaluation.
//!
//! Built-in requirement ids read their facts from the live [`Environment`]
//! instead of the stored descriptor. Every other id falls back to the
//! descriptor's own literal-or-computed fields.

use crate::requirements::descriptor::RequirementDescriptor;
use crate::requirements::environment::Environment;
use std::collections::HashMap;

/// Requirement id for the runtime version.
pub const RUNTIME: &str = "runtime";
/// Requirement id for the hosting application version.
pub const HOST: &str = "host";
/// Requirement id for the companion product version.
pub const COMPANION_PRODUCT: &str = "companion-product";

/// Facts produced for a single requirement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Version found, if any.
    pub current: Option<String>,
    /// Whether the dependency is present at all.
    pub exists: bool,
}

/// Resolver signature shared by built-ins and the fallback.
pub type ResolveFn = fn(&dyn Environment, &RequirementDescriptor) -> Resolution;

/// A named resolver with its default display label.
#[derive(Debug, Clone)]
struct NamedResolver {
    name: String,
    resolve: ResolveFn,
}

/// Registry of resolvers keyed by requirement id.
#[derive(Debug, Clone)]
pub struct ResolverRegistry {
    resolvers: HashMap<String, NamedResolver>,
    fallback: ResolveFn,
}

impl ResolverRegistry {
    /// Create a registry with the built-in resolvers.
    pub fn new() -> Self {
        Self::empty()
            .with_resolver(RUNTIME, "Runtime", resolve_runtime)
            .with_resolver(HOST, "Host", resolve_host)
            .with_resolver(COMPANION_PRODUCT, "Companion product", resolve_companion)
    }

    /// Create a registry where every id uses the declared resolver.
    pub fn empty() -> Self {
        Self {
            resolvers: HashMap::new(),
            fallback: resolve_declared,
        }
    }

    /// Register (or replace) a resolver for `id`.
    pub fn with_resolver(mut self, id: &str, name: &str, resolve: ResolveFn) -> Self {
        self.resolvers.insert(
            id.to_string(),
            NamedResolver {
                name: name.to_string(),
                resolve,
            },
        );
        self
    }

    /// Change the default display label of a registered resolver.
    pub fn with_display_name(mut self, id: &str, name: &str) -> Self {
        if let Some(resolver) = self.resolvers.get_mut(id) {
            resolver.name = name.to_string();
        }
        self
    }

    /// Default display label for `id`, if it is a registered id.
    pub fn display_name(&self, id: &str) -> Option<&str> {
        self.resolvers.get(id).map(|r| r.name.as_str())
    }

    /// Whether `id` has a dedicated resolver.
    pub fn is_builtin(&self, id: &str) -> bool {
        self.resolvers.contains_key(id)
    }

    /// All ids with a dedicated resolver.
    pub fn known_ids(&self) -> Vec<&str> {
        self.resolvers.keys().map(|s| s.as_str()).collect()
    }

    /// Resolve the facts for one descriptor.
    pub fn resolve(&self, env: &dyn Environment, descriptor: &RequirementDescriptor) -> Resolution {
        let resolve = self
            .resolvers
            .get(descriptor.id())
            .map(|r| r.resolve)
            .unwrap_or(self.fallback);
        resolve(env, descriptor)
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_runtime(env: &dyn Environment, _: &RequirementDescriptor) -> Resolution {
    Resolution {
        current: env.runtime_version(),
        exists: true,
    }
}

fn resolve_host(env: &dyn Environment, _: &RequirementDescriptor) -> Resolution {
    Resolution {
        current: env.host_version(),
        exists: true,
    }
}

fn resolve_companion(env: &dyn Environment, _: &RequirementDescriptor) -> Resolution {
    let current = env.companion_version();
    Resolution {
        exists: current.is_some(),
        current,
    }
}

/// Resolve from the descriptor's own literal-or-computed fields.
pub fn resolve_declared(_: &dyn Environment, descriptor: &RequirementDescriptor) -> Resolution {
    Resolution {
        current: descriptor.current_source().resolve(),
        exists: descriptor.exists_source().resolve(),
    }
}
