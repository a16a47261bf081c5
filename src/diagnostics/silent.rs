//! Sink that presents nothing.

use super::{DiagnosticReport, DiagnosticSink};
use crate::gate::HostContext;
use crate::hooks::HookPoint;

/// Registers no hook points. Unmet requirements are only logged by the gate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl DiagnosticSink for SilentSink {
    fn hook_points(&self, _context: &HostContext) -> Vec<HookPoint> {
        Vec::new()
    }

    fn render(&self, _point: &HookPoint, _report: &DiagnosticReport) -> anyhow::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_sink_has_no_hook_points() {
        assert!(SilentSink.hook_points(&HostContext::default()).is_empty());
    }
}
