//! Inline annotation under the extension's listing row.

use super::{DiagnosticReport, DiagnosticSink, DiagnosticTheme};
use crate::gate::HostContext;
use crate::hooks::HookPoint;
use std::cell::RefCell;
use std::io::{self, Write};

/// Style block marking the row of an inactive extension. `{id}` is replaced
/// with the extension id.
pub const DEFAULT_ROW_STYLE: &str =
    r#"[data-extension="{id}"] { border-left: 4px solid #d63638; }"#;

/// Annotates the extension's listing row and injects a matching style block.
pub struct RowAnnotationSink<W: Write> {
    writer: RefCell<W>,
    style: String,
    theme: DiagnosticTheme,
}

impl<W: Write> RowAnnotationSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: RefCell::new(writer),
            style: DEFAULT_ROW_STYLE.to_string(),
            theme: DiagnosticTheme::plain(),
        }
    }

    /// Replace the injected style template.
    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self
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

    fn render_row(&self, out: &mut W, report: &DiagnosticReport) -> io::Result<()> {
        let count = report.diagnostics.len();
        writeln!(
            out,
            "{} {} unmet requirement{}",
            self.theme.highlight.apply_to(report.context.display_name()),
            count,
            if count == 1 { "" } else { "s" }
        )?;
        for message in report.messages() {
            writeln!(out, "    {} {}", self.theme.dim.apply_to("!"), message)?;
        }
        Ok(())
    }
}

impl<W: Write> DiagnosticSink for RowAnnotationSink<W> {
    fn hook_points(&self, context: &HostContext) -> Vec<HookPoint> {
        vec![
            HookPoint::ExtensionRow {
                extension: context.extension_id.clone(),
            },
            HookPoint::Styles,
        ]
    }

    fn render(&self, point: &HookPoint, report: &DiagnosticReport) -> anyhow::Result<()> {
        if report.diagnostics.is_empty() {
            return Ok(());
        }

        let mut out = self.writer.borrow_mut();
        match point {
            HookPoint::ExtensionRow { .. } => self.render_row(&mut out, report)?,
            HookPoint::Styles => {
                let style = self.style.replace("{id}", &report.context.extension_id);
                writeln!(out, "{}", style)?;
            }
            HookPoint::Notices => return Ok(()),
        }
        out.flush()?;
        Ok(())
    }
}
