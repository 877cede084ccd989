//! Diagnostic filtering utilities.

use super::info::{Diagnostic, DiagnosticKind, Severity};

/// Filter type for matching diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterType {
    /// Match all diagnostics.
    All,
    /// Match diagnostics of one kind.
    Kind(DiagnosticKind),
    /// Match mapper diagnostics whose field path starts with the given prefix.
    PathPrefix(String),
    /// Match diagnostics containing specific text in message.
    MessageContains(String),
}

impl FilterType {
    /// Check if a diagnostic matches this filter type.
    fn matches(&self, diag: &Diagnostic) -> bool {
        match self {
            FilterType::All => true,
            FilterType::Kind(kind) => diag.kind == *kind,
            FilterType::PathPrefix(prefix) => diag
                .path
                .as_deref()
                .is_some_and(|p| p.starts_with(prefix.as_str())),
            FilterType::MessageContains(text) => diag.message.contains(text.as_str()),
        }
    }
}

/// Filter for excluding diagnostics.
///
/// Combines severity and filter type for precise control.
///
/// # Example
///
/// ```
/// use nodecfg::diagnostic::{DiagnosticFilter, DiagnosticKind, FilterType, Severity};
///
/// // Drop all warnings
/// let filter = DiagnosticFilter::new(Severity::Warning, FilterType::All);
///
/// // Drop notices about comments lost before an opening brace
/// let filter = DiagnosticFilter::new(
///     Severity::Warning,
///     FilterType::Kind(DiagnosticKind::DroppedLine),
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticFilter {
    /// The severity to match (Error or Warning).
    pub severity: Severity,
    /// The filter type to apply.
    pub filter: FilterType,
}

impl DiagnosticFilter {
    /// Create a new diagnostic filter.
    pub fn new(severity: Severity, filter: FilterType) -> Self {
        Self { severity, filter }
    }

    /// Check if a diagnostic should be filtered out.
    pub(crate) fn matches(&self, diag: &Diagnostic) -> bool {
        diag.severity == self.severity && self.filter.matches(diag)
    }
}

/// Drop the round-trip notices about blank and comment lines before `{`.
pub fn filter_dropped_lines(diagnostics: &[Diagnostic]) -> Vec<Diagnostic> {
    let filter = DiagnosticFilter::new(
        Severity::Warning,
        FilterType::Kind(DiagnosticKind::DroppedLine),
    );
    diagnostics
        .iter()
        .filter(|d| !filter.matches(d))
        .cloned()
        .collect()
}
