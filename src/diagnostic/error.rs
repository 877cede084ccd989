//! Crate-level error type.

use std::path::PathBuf;

use thiserror::Error;

use crate::codec::ParseError;

/// Error type for the propagating file API.
///
/// Non-fatal problems never show up here; they are collected as
/// [`Diagnostics`](super::Diagnostics) instead.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use nodecfg::{file, Config, Error};
///
/// match file::try_load(Path::new("ship.cfg"), &Config::default()) {
///     Ok(parsed) => println!("{} top-level nodes", parsed.root.node_fields().count()),
///     Err(Error::NotFound(path)) => eprintln!("no such file: {}", path.display()),
///     Err(e) => eprintln!("{e}"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum Error {
    /// The text could not be resolved to a balanced tree.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Reading or writing failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        /// The file that was being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

impl Error {
    /// Wrap an I/O error, mapping `NotFound` to [`Error::NotFound`].
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound(path)
        } else {
            Self::Io { path, source }
        }
    }

    /// Whether this error means the file was missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
