//! Gate lifecycle state.

use std::fmt;

/// Where a gate is in its lifecycle. `Met` and `Unmet` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GateState {
    /// The trigger has not fired yet.
    #[default]
    Pending,
    /// Every requirement was met; the callback has run.
    Met,
    /// At least one requirement was unmet; diagnostics are registered.
    Unmet,
}

impl GateState {
    /// Whether the gate has reached its final decision.
    pub fn is_decided(&self) -> bool {
        !matches!(self, GateState::Pending)
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GateState::Pending => "pending",
            GateState::Met => "met",
            GateState::Unmet => "unmet",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_is_undecided() {
        assert!(!GateState::Pending.is_decided());
        assert!(GateState::Met.is_decided());
        assert!(GateState::Unmet.is_decided());
        assert_eq!(GateState::default(), GateState::Pending);
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(GateState::Unmet.to_string(), "unmet");
    }
}
