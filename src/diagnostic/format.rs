//! Diagnostic formatting utilities.

use std::fmt::Write;

use super::info::{Diagnostic, Severity};

// ============================================================================
// Options
// ============================================================================

/// Display style for diagnostic output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayStyle {
    /// Header line followed by a location gutter.
    #[default]
    Rich,
    /// Single line: `line 3: warning[code]: message`.
    Short,
}

/// Options for controlling diagnostic formatting.
///
/// # Example
///
/// ```
/// use nodecfg::diagnostic::{DiagnosticOptions, DisplayStyle};
///
/// // Default: colored rich output
/// let opts = DiagnosticOptions::default();
///
/// // Plain text (no ANSI colors) for log files
/// let opts = DiagnosticOptions::plain();
///
/// // One line per diagnostic
/// let opts = DiagnosticOptions::short().with_colored(false);
/// assert_eq!(opts.style, DisplayStyle::Short);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticOptions {
    /// Whether to use ANSI colors in output.
    pub colored: bool,
    /// Display style (rich or short).
    pub style: DisplayStyle,
}

impl Default for DiagnosticOptions {
    fn default() -> Self {
        Self {
            colored: true,
            style: DisplayStyle::Rich,
        }
    }
}

impl DiagnosticOptions {
    /// Create options for colored terminal output.
    pub fn colored() -> Self {
        Self::default()
    }

    /// Create options for plain text output (no ANSI colors).
    pub fn plain() -> Self {
        Self {
            colored: false,
            ..Self::default()
        }
    }

    /// Create options for short single-line output.
    pub fn short() -> Self {
        Self {
            style: DisplayStyle::Short,
            ..Self::default()
        }
    }

    /// Set whether to use colors.
    pub fn with_colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    /// Set display style.
    pub fn with_style(mut self, style: DisplayStyle) -> Self {
        self.style = style;
        self
    }
}

// ============================================================================
// Gutter Characters
// ============================================================================

/// Box-drawing characters for the location block.
mod gutter {
    pub const HEADER: &str = "┌─";
    pub const BAR: &str = "│";
}

// ============================================================================
// Coloring
// ============================================================================

/// Apply color to text based on severity.
#[cfg(feature = "colored-diagnostics")]
fn colorize(text: &str, severity: Severity) -> String {
    use owo_colors::OwoColorize;
    match severity {
        Severity::Error => text.red().to_string(),
        Severity::Warning => text.yellow().to_string(),
    }
}

#[cfg(feature = "colored-diagnostics")]
fn colorize_note(text: &str) -> String {
    use owo_colors::OwoColorize;
    text.cyan().to_string()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn colorize(text: &str, _severity: Severity) -> String {
    text.to_owned()
}

#[cfg(not(feature = "colored-diagnostics"))]
fn colorize_note(text: &str) -> String {
    text.to_owned()
}

/// Get paint function based on options.
fn get_paint_fn(options: &DiagnosticOptions, severity: Severity) -> Box<dyn Fn(&str) -> String> {
    if options.colored {
        Box::new(move |s: &str| colorize(s, severity))
    } else {
        Box::new(|s: &str| s.to_owned())
    }
}

fn get_note_paint_fn(options: &DiagnosticOptions) -> Box<dyn Fn(&str) -> String> {
    if options.colored {
        Box::new(colorize_note)
    } else {
        Box::new(|s: &str| s.to_owned())
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// Format a single diagnostic.
///
/// Rich style:
///
/// ```text
/// warning[dropped-line]: comment before '{' cannot be preserved
///   ┌─ line 3
///   │ field: engines[1]
/// ```
pub fn format_diagnostic(diagnostic: &Diagnostic, options: &DiagnosticOptions) -> String {
    let paint = get_paint_fn(options, diagnostic.severity);
    let label = paint(&format!(
        "{}[{}]",
        diagnostic.severity.as_str(),
        diagnostic.kind.code()
    ));

    match options.style {
        DisplayStyle::Short => {
            let mut out = String::new();
            if let Some(line) = diagnostic.line {
                _ = write!(out, "line {line}: ");
            }
            if let Some(path) = &diagnostic.path {
                _ = write!(out, "{path}: ");
            }
            _ = write!(out, "{label}: {}", diagnostic.message);
            out
        }
        DisplayStyle::Rich => {
            let note = get_note_paint_fn(options);
            let mut out = format!("{label}: {}", diagnostic.message);
            if let Some(line) = diagnostic.line {
                _ = write!(out, "\n  {} line {line}", note(gutter::HEADER));
            }
            if let Some(path) = &diagnostic.path {
                _ = write!(out, "\n  {} field: {path}", note(gutter::BAR));
            }
            out
        }
    }
}

/// Format a list of diagnostics, separated by blank lines.
pub fn format_diagnostics(diagnostics: &[Diagnostic], options: &DiagnosticOptions) -> String {
    diagnostics
        .iter()
        .map(|d| format_diagnostic(d, options))
        .collect::<Vec<_>>()
        .join("\n\n")
}
