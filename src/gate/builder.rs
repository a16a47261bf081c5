//! Builder for extension gates.

use super::{DeferredCallback, ExtensionGate, HostContext};
use crate::diagnostics::DiagnosticSink;
use crate::error::{GateError, Result};
use crate::hooks::EventBus;
use crate::requirements::{Environment, RequirementSpec, RequirementsEngine, ResolverRegistry};
use std::rc::Rc;

/// Collects the parts of an [`ExtensionGate`].
///
/// [`build`](Self::build) fails with [`GateError::InvalidCallback`] when no
/// callback was supplied.
pub struct GateBuilder {
    environment: Rc<dyn Environment>,
    bus: Rc<dyn EventBus>,
    resolvers: ResolverRegistry,
    requirements: Vec<(String, RequirementSpec)>,
    callback: Option<DeferredCallback>,
    context: HostContext,
    sinks: Vec<Rc<dyn DiagnosticSink>>,
}

impl GateBuilder {
    pub fn new(environment: Rc<dyn Environment>, bus: Rc<dyn EventBus>) -> Self {
        Self {
            environment,
            bus,
            resolvers: ResolverRegistry::new(),
            requirements: Vec::new(),
            callback: None,
            context: HostContext::default(),
            sinks: Vec::new(),
        }
    }

    /// The callback to run once requirements are met.
    pub fn callback<F>(self, callback: F) -> Self
    where
        F: FnOnce() -> anyhow::Result<()> + 'static,
    {
        self.boxed_callback(Box::new(callback))
    }

    /// Like [`callback`](Self::callback), for an already boxed callback.
    pub fn boxed_callback(mut self, callback: DeferredCallback) -> Self {
        self.callback = Some(callback);
        self
    }

    /// Declare a requirement.
    pub fn requirement(mut self, id: &str, spec: impl Into<RequirementSpec>) -> Self {
        self.requirements.push((id.to_string(), spec.into()));
        self
    }

    /// Declare several requirements in order.
    pub fn requirements<I, K, S>(mut self, specs: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<RequirementSpec>,
    {
        self.requirements
            .extend(specs.into_iter().map(|(id, spec)| (id.into(), spec.into())));
        self
    }

    pub fn context(mut self, context: HostContext) -> Self {
        self.context = context;
        self
    }

    /// Replace the resolver registry (built-ins by default).
    pub fn resolvers(mut self, resolvers: ResolverRegistry) -> Self {
        self.resolvers = resolvers;
        self
    }

    /// Add a diagnostic sink.
    pub fn sink(self, sink: impl DiagnosticSink + 'static) -> Self {
        self.shared_sink(Rc::new(sink))
    }

    /// Add a shared diagnostic sink.
    pub fn shared_sink(mut self, sink: Rc<dyn DiagnosticSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Build the gate.
    pub fn build(self) -> Result<ExtensionGate> {
        let Some(callback) = self.callback else {
            return Err(GateError::InvalidCallback {
                extension: self.context.extension_id,
                reason: "no callback supplied".to_string(),
            });
        };

        let mut engine = RequirementsEngine::with_resolvers(self.environment, self.resolvers);
        for (id, spec) in self.requirements {
            engine.add_requirement(&id, spec);
        }

        Ok(ExtensionGate::from_parts(
            callback,
            engine,
            self.context,
            self.sinks,
            self.bus,
        ))
    }

    /// Build the gate and subscribe it to the bus in one step.
    pub fn register(self) -> Result<ExtensionGate> {
        let gate = self.build()?;
        gate.register();
        Ok(gate)
    }
}
