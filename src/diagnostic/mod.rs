//! Diagnostics for parsing, serialization and object mapping.
//!
//! Fatal problems are returned as errors ([`Error`], [`ParseError`](crate::codec::ParseError)).
//! Everything else (comments lost before a brace, nodes without a body, fields
//! that could not be mapped) is collected as a [`Diagnostic`] and logged.

mod error;
mod filter;
mod format;
mod info;

// Re-export all public types
pub use error::Error;
pub use filter::{filter_dropped_lines, DiagnosticFilter, FilterType};
pub use format::{format_diagnostic, format_diagnostics, DiagnosticOptions, DisplayStyle};
pub use info::{
    Diagnostic, DiagnosticKind, DiagnosticSummary, Diagnostics, Severity, LOG_TARGET,
};
