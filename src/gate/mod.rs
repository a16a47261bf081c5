//! Extension gate.
//!
//! An [`ExtensionGate`] wraps the callback that boots an extension. When the
//! host fires [`EXTENSIONS_LOADED`], the gate asks its
//! [`RequirementsEngine`] whether everything is in place. If it is, the
//! callback runs exactly once. If not, the callback never runs and the gate
//! subscribes its diagnostic sinks to the host's presentation hooks instead.
//!
//! # Example
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use extension_gate::gate::{ExtensionGate, GateState};
//! use extension_gate::hooks::{HookRegistry, EXTENSIONS_LOADED};
//! use extension_gate::requirements::HostEnvironment;
//!
//! let bus = Rc::new(HookRegistry::new());
//! let env = Rc::new(HostEnvironment::new().with_runtime("8.1"));
//! let booted = Rc::new(Cell::new(false));
//! let flag = Rc::clone(&booted);
//!
//! let gate = ExtensionGate::builder(env, bus.clone())
//!     .callback(move || {
//!         flag.set(true);
//!         Ok(())
//!     })
//!     .requirement("runtime", "7.4")
//!     .register()
//!     .unwrap();
//!
//! bus.fire(EXTENSIONS_LOADED).unwrap();
//! assert!(booted.get());
//! assert_eq!(gate.state(), GateState::Met);
//! ```

pub mod builder;
pub mod context;
pub mod entry;
pub mod state;

pub use builder::GateBuilder;
pub use context::HostContext;
pub use entry::EntryPoints;
pub use state::GateState;

use crate::config::GateConfig;
use crate::diagnostics::{DiagnosticReport, DiagnosticSink};
use crate::error::{GateError, Result};
use crate::hooks::{EventBus, DEFAULT_PRIORITY, EXTENSIONS_LOADED, GATE_PRIORITY};
use crate::requirements::{Diagnostics, Environment, RequirementsEngine};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// The protected callback.
pub type DeferredCallback = Box<dyn FnOnce() -> anyhow::Result<()>>;

struct GateInner {
    /// `None` only while requirements are being checked.
    engine: Option<RequirementsEngine>,
    callback: Option<DeferredCallback>,
    state: GateState,
    context: HostContext,
    sinks: Vec<Rc<dyn DiagnosticSink>>,
    registered: bool,
    presentation_hooks: usize,
}

impl GateInner {
    fn diagnostics(&self) -> Diagnostics {
        self.engine
            .as_ref()
            .map(RequirementsEngine::errors)
            .unwrap_or_default()
    }
}

/// Runs a callback only once its requirements are met.
///
/// Cloning yields another handle to the same gate.
#[derive(Clone)]
pub struct ExtensionGate {
    inner: Rc<RefCell<GateInner>>,
    bus: Rc<dyn EventBus>,
}

impl ExtensionGate {
    /// Create a gate around `callback`, evaluated by `engine`.
    pub fn new<F>(
        callback: F,
        engine: RequirementsEngine,
        context: Option<HostContext>,
        bus: Rc<dyn EventBus>,
    ) -> Self
    where
        F: FnOnce() -> anyhow::Result<()> + 'static,
    {
        Self::from_parts(
            Box::new(callback),
            engine,
            context.unwrap_or_default(),
            Vec::new(),
            bus,
        )
    }

    /// Start building a gate from requirement specs.
    pub fn builder(environment: Rc<dyn Environment>, bus: Rc<dyn EventBus>) -> GateBuilder {
        GateBuilder::new(environment, bus)
    }

    /// Build a gate from a loaded configuration.
    ///
    /// The configured entry point is taken from `entry_points`; it is an
    /// error for it to be missing. Sinks are left to the caller.
    pub fn from_config(
        config: &GateConfig,
        entry_points: &mut EntryPoints,
        environment: Rc<dyn Environment>,
        bus: Rc<dyn EventBus>,
    ) -> Result<Self> {
        let context = config.extension.context();
        let entry_point = config.extension.entry_point();
        let callback = entry_points
            .take(entry_point)
            .ok_or_else(|| GateError::InvalidCallback {
                extension: context.extension_id.clone(),
                reason: format!("entry point '{}' is not registered", entry_point),
            })?;

        GateBuilder::new(environment, bus)
            .context(context)
            .boxed_callback(callback)
            .requirements(config.requirement_specs())
            .build()
    }

    pub(crate) fn from_parts(
        callback: DeferredCallback,
        engine: RequirementsEngine,
        context: HostContext,
        sinks: Vec<Rc<dyn DiagnosticSink>>,
        bus: Rc<dyn EventBus>,
    ) -> Self {
        Self {
            inner: Rc::new(RefCell::new(GateInner {
                engine: Some(engine),
                callback: Some(callback),
                state: GateState::Pending,
                context,
                sinks,
                registered: false,
                presentation_hooks: 0,
            })),
            bus,
        }
    }

    /// Add a diagnostic sink.
    pub fn with_sink(self, sink: impl DiagnosticSink + 'static) -> Self {
        self.add_sink(Rc::new(sink));
        self
    }

    /// Add a shared diagnostic sink.
    pub fn add_sink(&self, sink: Rc<dyn DiagnosticSink>) {
        self.inner.borrow_mut().sinks.push(sink);
    }

    /// Subscribe evaluation to the host's late bootstrap event.
    ///
    /// Returns `false` if this gate was already registered.
    pub fn register(&self) -> bool {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.registered {
                tracing::debug!(
                    "Gate for '{}' is already registered",
                    inner.context.display_name()
                );
                return false;
            }
            inner.registered = true;
        }

        let inner = Rc::clone(&self.inner);
        let bus = Rc::downgrade(&self.bus);
        self.bus.subscribe(
            EXTENSIONS_LOADED,
            GATE_PRIORITY,
            Box::new(move || {
                let Some(bus) = bus.upgrade() else {
                    return Ok(());
                };
                let gate = ExtensionGate {
                    inner: Rc::clone(&inner),
                    bus,
                };
                gate.evaluate().map(|_| ())
            }),
        );
        true
    }

    /// Decide whether to run the callback.
    ///
    /// Only the first call decides; later calls return the recorded state.
    /// Calls made while the requirements are being checked (from a
    /// requirement producer) return [`GateState::Pending`]. An error from
    /// the callback is returned as-is.
    pub fn evaluate(&self) -> anyhow::Result<GateState> {
        let mut engine = {
            let mut inner = self.inner.borrow_mut();
            if inner.state.is_decided() {
                tracing::debug!(
                    "Gate for '{}' already decided: {}",
                    inner.context.display_name(),
                    inner.state
                );
                return Ok(inner.state);
            }
            match inner.engine.take() {
                Some(engine) => engine,
                None => {
                    tracing::debug!(
                        "Gate for '{}' is checking its requirements",
                        inner.context.display_name()
                    );
                    return Ok(GateState::Pending);
                }
            }
        };

        // producers may call back into this gate
        let met = engine.met();

        let callback = {
            let mut inner = self.inner.borrow_mut();
            inner.engine = Some(engine);
            if met {
                inner.state = GateState::Met;
                inner.callback.take()
            } else {
                inner.state = GateState::Unmet;
                inner.callback = None;
                None
            }
        };

        if met {
            tracing::info!("Requirements met for '{}'", self.context().display_name());
            if let Some(callback) = callback {
                callback()?;
            }
            return Ok(GateState::Met);
        }

        let diagnostics = self.errors();
        for entry in &diagnostics {
            tracing::warn!(requirement = %entry.id, "{}", entry.message());
        }
        self.register_presentation();
        Ok(GateState::Unmet)
    }

    fn register_presentation(&self) {
        let (sinks, context) = {
            let inner = self.inner.borrow();
            (inner.sinks.clone(), inner.context.clone())
        };

        let mut registered = 0;
        for sink in sinks {
            for point in sink.hook_points(&context) {
                let event = point.event_name();
                let inner = Rc::clone(&self.inner);
                let sink = Rc::clone(&sink);
                self.bus.subscribe(
                    &event,
                    DEFAULT_PRIORITY,
                    Box::new(move || {
                        let report = {
                            let inner = inner.borrow();
                            DiagnosticReport {
                                context: inner.context.clone(),
                                diagnostics: inner.diagnostics(),
                            }
                        };
                        sink.render(&point, &report)
                    }),
                );
                registered += 1;
            }
        }

        tracing::debug!(
            "Registered {} presentation hooks for '{}'",
            registered,
            context.display_name()
        );
        self.inner.borrow_mut().presentation_hooks += registered;
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GateState {
        self.inner.borrow().state
    }

    /// Diagnostics for the requirements that are not met.
    ///
    /// Empty while requirements are being checked.
    pub fn errors(&self) -> Diagnostics {
        self.inner.borrow().diagnostics()
    }

    /// Identity of the gated extension.
    pub fn context(&self) -> HostContext {
        self.inner.borrow().context.clone()
    }

    /// Number of presentation hooks this gate has subscribed.
    pub fn presentation_hooks(&self) -> usize {
        self.inner.borrow().presentation_hooks
    }

    /// Run `f` against the gate's engine.
    ///
    /// Returns `None` while requirements are being checked.
    pub fn inspect<R>(&self, f: impl FnOnce(&RequirementsEngine) -> R) -> Option<R> {
        self.inner.borrow().engine.as_ref().map(f)
    }
}

impl fmt::Debug for ExtensionGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ExtensionGate")
            .field("context", &inner.context)
            .field("state", &inner.state)
            .field("registered", &inner.registered)
            .field("engine", &inner.engine)
            .finish_non_exhaustive()
    }
}
