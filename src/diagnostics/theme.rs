//! Styling for rendered diagnostics.

use console::Style;

/// Styles used by the text sinks.
#[derive(Debug, Clone)]
pub struct DiagnosticTheme {
    /// Headline naming the inactive extension (red bold).
    pub headline: Style,
    /// Requirement names and versions (bold).
    pub highlight: Style,
    /// Bullets and secondary text (dim).
    pub dim: Style,
}

impl Default for DiagnosticTheme {
    fn default() -> Self {
        Self::plain()
    }
}

impl DiagnosticTheme {
    /// Colored theme. Styling is forced so output does not depend on the terminal.
    pub fn colored() -> Self {
        Self {
            headline: Style::new().red().bold().force_styling(true),
            highlight: Style::new().bold().force_styling(true),
            dim: Style::new().dim().force_styling(true),
        }
    }

    /// Theme without colors (for non-TTY or --no-color).
    pub fn plain() -> Self {
        Self {
            headline: Style::new(),
            highlight: Style::new(),
            dim: Style::new(),
        }
    }

    /// Pick a theme for the given color preference.
    pub fn for_color(color: bool) -> Self {
        if color {
            Self::colored()
        } else {
            Self::plain()
        }
    }
}
