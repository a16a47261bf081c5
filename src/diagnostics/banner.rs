//! Notice banner listing every unmet requirement.

use super::{DiagnosticReport, DiagnosticSink, DiagnosticTheme};
use crate::gate::HostContext;
use crate::hooks::HookPoint;
use std::cell::RefCell;
use std::io::Write;

/// Renders a notice in the host's general notice area.
///
/// ```text
/// Advanced Reports is not fully active. The following requirements have not been met:
///   - Missing Companion product: minimum required 3.0
///   - Runtime: minimum required 8.0 (you have 7.4)
/// ```
pub struct BannerSink<W: Write> {
    writer: RefCell<W>,
    theme: DiagnosticTheme,
}

impl<W: Write> BannerSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
            theme: DiagnosticTheme::plain(),
        }
    }

    /// Use colored output.
    pub fn with_color(mut self, color: bool) -> Self {
        self.theme = DiagnosticTheme::for_color(color);
        self
    }

    /// Consume the sink, returning its writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W: Write> DiagnosticSink for BannerSink<W> {
    fn hook_points(&self, _context: &HostContext) -> Vec<HookPoint> {
        vec![HookPoint::Notices]
    }

    fn render(&self, point: &HookPoint, report: &DiagnosticReport) -> anyhow::Result<()> {
        if *point != HookPoint::Notices || report.diagnostics.is_empty() {
            return Ok(());
        }

        let mut out = self.writer.borrow_mut();
        writeln!(out, "{}", self.theme.headline.apply_to(report.headline()))?;
        for message in report.messages() {
            writeln!(out, "  {} {}", self.theme.dim.apply_to("-"), message)?;
        }
        out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::SharedBuffer;
    use crate::requirements::{Diagnostics, UnmetKind, UnmetRequirement};

    fn report() -> DiagnosticReport {
        DiagnosticReport {
            context: HostContext::new("reports", "Advanced Reports"),
            diagnostics: Diagnostics::new(vec![
                UnmetRequirement {
                    id: "companion-product".into(),
                    kind: UnmetKind::Missing,
                    name: "Companion product".into(),
                    minimum: "3.0".into(),
                    current: None,
                    exists: false,
                },
                UnmetRequirement {
                    id: "runtime".into(),
                    kind: UnmetKind::BelowMinimum,
                    name: "Runtime".into(),
                    minimum: "8.0".into(),
                    current: Some("7.4".into()),
                    exists: true,
                },
            ]),
        }
    }

    #[test]
    fn banner_registers_on_notices() {
        let sink = BannerSink::new(Vec::new());
        assert_eq!(
            sink.hook_points(&HostContext::default()),
            vec![HookPoint::Notices]
        );
    }

    #[test]
    fn banner_lists_every_message() {
        let buffer = SharedBuffer::new();
        let sink = BannerSink::new(buffer.clone());
        sink.render(&HookPoint::Notices, &report()).unwrap();

        insta::assert_snapshot!(buffer.contents(), @r"
        Advanced Reports is not fully active. The following requirements have not been met:
          - Missing Companion product: minimum required 3.0
          - Runtime: minimum required 8.0 (you have 7.4)
        ");
    }

    #[test]
    fn banner_ignores_other_points() {
        let sink = BannerSink::new(Vec::new());
        sink.render(&HookPoint::Styles, &report()).unwrap();
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn banner_renders_nothing_without_diagnostics() {
        let sink = BannerSink::new(Vec::new());
        let empty = DiagnosticReport {
            context: HostContext::default(),
            diagnostics: Diagnostics::default(),
        };
        sink.render(&HookPoint::Notices, &empty).unwrap();
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn colored_banner_styles_headline() {
        let sink = BannerSink::new(Vec::new()).with_color(true);
        sink.render(&HookPoint::Notices, &report()).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.starts_with('\u{1b}'));
        assert!(out.contains("Advanced Reports is not fully active"));
    }
}
