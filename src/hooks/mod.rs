//! Host lifecycle events.
//!
//! The gate never reaches into a global hook system. It is handed an
//! [`EventBus`] and subscribes handlers to named events on it. The
//! in-process [`HookRegistry`] is the implementation hosts and tests use.
//!
//! # Example
//!
//! ```
//! use extension_gate::hooks::{EventBus, HookRegistry, DEFAULT_PRIORITY};
//!
//! let bus = HookRegistry::new();
//! bus.subscribe("ready", DEFAULT_PRIORITY, Box::new(|| Ok(())));
//! assert_eq!(bus.fire("ready").unwrap(), 1);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

/// Fired once the host and everything it depends on has loaded.
pub const EXTENSIONS_LOADED: &str = "extensions_loaded";
/// General notice area.
pub const NOTICES: &str = "notices";
/// Style injection point.
pub const STYLES: &str = "styles";
/// Prefix of the per-extension listing row event.
pub const EXTENSION_ROW_PREFIX: &str = "extension_row:";

/// Priority the host uses for its own bootstrap work.
pub const DEFAULT_PRIORITY: i32 = 10;
/// Priority of gate evaluation; larger values run later.
pub const GATE_PRIORITY: i32 = 98;

/// A subscribed handler. Errors stop the event and reach the host.
pub type Handler = Box<dyn Fn() -> anyhow::Result<()>>;

/// Capability to subscribe handlers to host events.
pub trait EventBus {
    /// Run `handler` whenever `event` fires, ordered by `priority`.
    fn subscribe(&self, event: &str, priority: i32, handler: Handler);
}

/// A host extension point diagnostics can be rendered into.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HookPoint {
    /// General notice area.
    Notices,
    /// The extension's row in the host's extension listing.
    ExtensionRow { extension: String },
    /// Style injection.
    Styles,
}

impl HookPoint {
    /// Event name the host fires for this point.
    pub fn event_name(&self) -> String {
        match self {
            HookPoint::Notices => NOTICES.to_string(),
            HookPoint::ExtensionRow { extension } => {
                format!("{}{}", EXTENSION_ROW_PREFIX, extension)
            }
            HookPoint::Styles => STYLES.to_string(),
        }
    }
}

struct Subscription {
    event: String,
    priority: i32,
    seq: u64,
    handler: Rc<dyn Fn() -> anyhow::Result<()>>,
}

/// In-process event bus.
///
/// Handlers run in ascending priority, then subscription order. A handler
/// may subscribe further handlers while an event is firing; they run the
/// next time their event fires.
#[derive(Default)]
pub struct HookRegistry {
    subscriptions: RefCell<Vec<Subscription>>,
    next_seq: Cell<u64>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every handler subscribed to `event`.
    ///
    /// Returns the number of handlers run, or the first handler error.
    pub fn fire(&self, event: &str) -> anyhow::Result<usize> {
        let handlers = {
            let subscriptions = self.subscriptions.borrow();
            let mut matching: Vec<&Subscription> =
                subscriptions.iter().filter(|s| s.event == event).collect();
            matching.sort_by_key(|s| (s.priority, s.seq));
            matching
                .into_iter()
                .map(|s| Rc::clone(&s.handler))
                .collect::<Vec<_>>()
        };

        tracing::debug!("Firing '{}' ({} handlers)", event, handlers.len());
        for handler in &handlers {
            handler()?;
        }
        Ok(handlers.len())
    }

    /// Number of handlers subscribed to `event`.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.subscriptions
            .borrow()
            .iter()
            .filter(|s| s.event == event)
            .count()
    }

    /// Whether anything is subscribed to `event`.
    pub fn has_subscribers(&self, event: &str) -> bool {
        self.subscriber_count(event) > 0
    }
}

impl EventBus for HookRegistry {
    fn subscribe(&self, event: &str, priority: i32, handler: Handler) {
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        tracing::debug!("Subscribed to '{}' at priority {}", event, priority);
        self.subscriptions.borrow_mut().push(Subscription {
            event: event.to_string(),
            priority,
            seq,
            handler: Rc::from(handler),
        });
    }
}

impl fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let events: Vec<(String, i32)> = self
            .subscriptions
            .borrow()
            .iter()
            .map(|s| (s.event.clone(), s.priority))
            .collect();
        f.debug_struct("HookRegistry").field("subscriptions", &events).finish()
    }
}
