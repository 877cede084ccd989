//! Roundtrip tests for text ↔ tree conversion.
//!
//! Tests verify that:
//! - tree → text → tree produces an equal tree
//! - text → tree → text → tree → text is stable after the first pass
//! - layout variations, comments and recoverable errors are handled

#[cfg(test)]
pub(crate) mod common;

#[cfg(test)]
mod edge;

#[cfg(test)]
mod object;

#[cfg(test)]
mod text;

#[cfg(test)]
mod tree;
