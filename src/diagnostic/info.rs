//! Structured diagnostic information.

use std::fmt;

use crate::config::{Config, Verbosity};

use super::filter::DiagnosticFilter;
use super::format::{format_diagnostic, format_diagnostics, DiagnosticOptions};

/// Log target for everything reported through [`Diagnostics::report`].
pub const LOG_TARGET: &str = "nodecfg";

// ============================================================================
// Severity and Kind
// ============================================================================

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    /// Something was lost or left unchanged.
    Error,
    /// Input was accepted but cannot be reproduced exactly.
    Warning,
}

impl Severity {
    /// Lowercase label used in formatted output.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
        }
    }
}

/// What produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// A blank or comment line between a node name and its `{` was dropped.
    DroppedLine,
    /// A node name was not followed by a `{` block and was dropped.
    MissingBody,
    /// A node was still open when input ended.
    UnclosedNode,
    /// Values on an unnamed wrapper root were not serialized.
    WrapperValues,
    /// A field or node name is not an identifier and was not serialized.
    InvalidName,
    /// A field could not be mapped between an object and a node.
    Mapping,
}

impl DiagnosticKind {
    /// Short kebab-case code shown next to the severity.
    pub fn code(self) -> &'static str {
        match self {
            Self::DroppedLine => "dropped-line",
            Self::MissingBody => "missing-body",
            Self::UnclosedNode => "unclosed-node",
            Self::WrapperValues => "wrapper-values",
            Self::InvalidName => "invalid-name",
            Self::Mapping => "mapping",
        }
    }

    /// Default severity for this kind.
    pub fn severity(self) -> Severity {
        match self {
            Self::DroppedLine | Self::MissingBody | Self::UnclosedNode | Self::WrapperValues => {
                Severity::Warning
            }
            Self::InvalidName | Self::Mapping => Severity::Error,
        }
    }
}

// ============================================================================
// Diagnostic
// ============================================================================

/// One non-fatal report from the parser, serializer or mapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Error or warning.
    pub severity: Severity,
    /// What produced it.
    pub kind: DiagnosticKind,
    /// Source line (1-indexed), for parser diagnostics.
    pub line: Option<usize>,
    /// Dotted field path, for mapper diagnostics (e.g. `engines[1].power`).
    pub path: Option<String>,
    /// Human-readable message.
    pub message: String,
}

impl Diagnostic {
    /// Create a diagnostic with the kind's default severity.
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            severity: kind.severity(),
            kind,
            line: None,
            path: None,
            message: message.into(),
        }
    }

    /// Attach a source line.
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach a field path.
    pub fn at_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Whether this is an error.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_diagnostic(self, &DiagnosticOptions::short().with_colored(false)))
    }
}

// ============================================================================
// DiagnosticSummary
// ============================================================================

/// Summary of diagnostic counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticSummary {
    /// Number of errors.
    pub errors: usize,
    /// Number of warnings.
    pub warnings: usize,
}

impl DiagnosticSummary {
    /// Total number of diagnostics.
    pub fn total(&self) -> usize {
        self.errors + self.warnings
    }

    /// Whether there are any errors.
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Whether there are any diagnostics at all.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for DiagnosticSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        match (self.errors, self.warnings) {
            (0, 0) => write!(f, "no diagnostics"),
            (e, 0) => write!(f, "{e} error{}", plural(e)),
            (0, w) => write!(f, "{w} warning{}", plural(w)),
            (e, w) => write!(f, "{e} error{}, {w} warning{}", plural(e), plural(w)),
        }
    }
}

// ============================================================================
// Diagnostics (Collection)
// ============================================================================

/// An ordered collection of diagnostics.
///
/// Parsers, serializers and mappers collect into one of these while they run.
/// Each item is also sent to the `log` facade as it is reported, subject to
/// the configured [`Verbosity`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a diagnostic and log it according to `config`.
    pub fn report(&mut self, config: &Config, diagnostic: Diagnostic) {
        log_diagnostic(config.verbosity, &diagnostic);
        self.items.push(diagnostic);
    }

    /// Record a diagnostic without logging it.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    /// Move all diagnostics from `other` into this collection.
    pub fn extend(&mut self, other: Diagnostics) {
        self.items.extend(other.items);
    }

    /// Check if there are no diagnostics.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the number of diagnostics.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.items.iter().any(Diagnostic::is_error)
    }

    /// Get a summary of diagnostic counts.
    pub fn summary(&self) -> DiagnosticSummary {
        let errors = self.errors().count();
        DiagnosticSummary {
            errors,
            warnings: self.items.len() - errors,
        }
    }

    /// Iterate over all diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Iterate over errors only.
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Error)
    }

    /// Iterate over warnings only.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(|d| d.severity == Severity::Warning)
    }

    /// Iterate over diagnostics of one kind.
    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter().filter(move |d| d.kind == kind)
    }

    /// Keep only diagnostics not matched by any of `filters`.
    pub fn filter_out(&self, filters: &[DiagnosticFilter]) -> Self {
        Self {
            items: self
                .items
                .iter()
                .filter(|d| !filters.iter().any(|f| f.matches(d)))
                .cloned()
                .collect(),
        }
    }

    /// Format all diagnostics with the given options, blank line between items.
    pub fn format(&self, options: &DiagnosticOptions) -> String {
        format_diagnostics(&self.items, options)
    }

    /// Get a slice of all diagnostics.
    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format(&DiagnosticOptions::plain()))
    }
}

/// Forward a diagnostic to the `log` facade.
fn log_diagnostic(verbosity: Verbosity, diagnostic: &Diagnostic) {
    let shown = match verbosity {
        Verbosity::Quiet => false,
        Verbosity::Errors => diagnostic.is_error(),
        Verbosity::All => true,
    };

    if !shown {
        log::debug!(target: LOG_TARGET, "{diagnostic}");
    } else if diagnostic.is_error() {
        log::error!(target: LOG_TARGET, "{diagnostic}");
    } else {
        log::warn!(target: LOG_TARGET, "{diagnostic}");
    }
}
