//! Presentation of unmet requirements.
//!
//! This module provides:
//! - [`DiagnosticSink`] trait the gate renders through
//! - [`SilentSink`] that registers nothing
//! - [`BannerSink`] for a notice listing every unmet requirement
//! - [`RowAnnotationSink`] for the extension's listing row plus a style block
//!
//! Sinks receive a fresh [`DiagnosticReport`] each time the host fires one of
//! their hook points, so what they render reflects the engine at render time.

pub mod banner;
pub mod row;
pub mod silent;
pub mod theme;

pub use banner::BannerSink;
pub use row::RowAnnotationSink;
pub use silent::SilentSink;
pub use theme::DiagnosticTheme;

use crate::gate::HostContext;
use crate::hooks::HookPoint;
use crate::requirements::Diagnostics;
use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

/// Capability to present unmet requirements at host extension points.
pub trait DiagnosticSink {
    /// Extension points this sink renders into.
    fn hook_points(&self, context: &HostContext) -> Vec<HookPoint>;

    /// Render `report` for one of the points returned by [`hook_points`](Self::hook_points).
    fn render(&self, point: &HookPoint, report: &DiagnosticReport) -> anyhow::Result<()>;
}

/// Everything a sink needs to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticReport {
    pub context: HostContext,
    pub diagnostics: Diagnostics,
}

impl DiagnosticReport {
    /// Opening sentence naming the extension.
    pub fn headline(&self) -> String {
        format!(
            "{} is not fully active. The following requirements have not been met:",
            self.context.display_name()
        )
    }

    /// One message per unmet requirement, in registration order.
    pub fn messages(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.message()).collect()
    }
}

/// Cloneable in-memory writer, for capturing sink output.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, lossily decoded.
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::{UnmetKind, UnmetRequirement};

    #[test]
    fn headline_uses_extension_name() {
        let report = DiagnosticReport {
            context: HostContext::new("reports", "Advanced Reports"),
            diagnostics: Diagnostics::default(),
        };
        assert_eq!(
            report.headline(),
            "Advanced Reports is not fully active. The following requirements have not been met:"
        );
    }

    #[test]
    fn messages_follow_diagnostics() {
        let report = DiagnosticReport {
            context: HostContext::default(),
            diagnostics: Diagnostics::new(vec![UnmetRequirement {
                id: "runtime".into(),
                kind: UnmetKind::BelowMinimum,
                name: "Runtime".into(),
                minimum: "8.0".into(),
                current: Some("7.4".into()),
                exists: true,
            }]),
        };
        assert_eq!(
            report.messages(),
            vec!["Runtime: minimum required 8.0 (you have 7.4)".to_string()]
        );
    }

    #[test]
    fn shared_buffer_clones_share_contents() {
        let buffer = SharedBuffer::new();
        let mut writer = buffer.clone();
        write!(writer, "hello").unwrap();
        assert_eq!(buffer.contents(), "hello");
    }
}
