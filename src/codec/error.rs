//! Error types for the text codec and JSON bridge.

use thiserror::Error;

/// Fatal parse failure: the text cannot be resolved to a balanced tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A `}` with no open node to close.
    #[error("line {line}: unexpected '}}' with no open node")]
    UnbalancedClose {
        /// 1-indexed source line.
        line: usize,
    },

    /// A line that is neither a value, a node, a brace nor a comment.
    #[error("line {line}: unexpected text '{text}'")]
    UnexpectedText {
        /// 1-indexed source line.
        line: usize,
        /// The offending text, trimmed.
        text: String,
    },
}

impl ParseError {
    /// Source line the error was found on.
    pub fn line(&self) -> usize {
        match self {
            Self::UnbalancedClose { line } | Self::UnexpectedText { line, .. } => *line,
        }
    }
}

/// JSON value that has no node representation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
    /// The top-level value must be an object.
    #[error("expected a JSON object, found {0}")]
    NotObject(&'static str),

    /// A value that cannot be stored under a field.
    #[error("field '{field}': unsupported {kind}")]
    UnsupportedValue {
        /// Field name.
        field: String,
        /// Kind of JSON value that was rejected.
        kind: &'static str,
    },
}
