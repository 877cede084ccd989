//! Text codec for node trees.
//!
//! Provides the human-editable text format and a JSON bridge.
//!
//! # Format
//!
//! ```text
//! // comment
//! Ship
//! {
//! 	name = Enterprise
//! 	url = http://example.com // trailing comment
//! 	Engine
//! 	{
//! 		power = 100
//! 	}
//! 	Engine { power = 50 }
//! 	Shield {}
//! }
//! ```
//!
//! # Modules
//!
//! - [`Parser`] - text → tree, forgiving about layout
//! - [`Serializer`] - tree → text, stable output
//! - [`escape_value`] / [`unescape_value`] - value escaping
//! - [`node_to_json`] / [`json_to_node`] - JSON bridge
//! - [`ParseError`] / [`JsonError`] - error types

mod error;
mod escape;
mod json;
mod parse;
mod roundtrip;
mod serialize;

// Errors
pub use error::{JsonError, ParseError};

// Escaping
pub use escape::{escape_value, unescape_value};

// JSON bridge
pub use json::{json_to_node, node_to_json};

// Text codec
pub use parse::{Parsed, Parser};
pub use serialize::{Serialized, Serializer};

use crate::config::Config;
use crate::node::Node;

/// Serialize a tree with the default configuration.
pub fn serialize(node: &Node) -> String {
    Serializer::new(&Config::default()).serialize(node).text
}

/// Parse text with the default configuration, returning the wrapper root.
pub fn deserialize(text: &str) -> Result<Node, ParseError> {
    Parser::new(&Config::default())
        .parse(text.lines())
        .map(|parsed| parsed.root)
}
