//! # nodecfg
//!
//! A human-editable configuration format for nested, repeated data.
//!
//! Documents are trees of named nodes. Each node holds `key = value` lines and
//! child nodes, and any name may repeat:
//!
//! ```text
//! Ship
//! {
//! 	name = Enterprise
//! 	Engine
//! 	{
//! 		power = 100
//! 	}
//! 	Engine
//! 	{
//! 		power = 50
//! 	}
//! }
//! ```
//!
//! The crate has three layers:
//!
//! - **Tree**: [`Node`], an ordered, in-memory document
//! - **Codec**: a forgiving [`Parser`] and a stable [`Serializer`]
//! - **Mapper**: moves data between Rust objects and nodes, driven by static
//!   field descriptors ([`Persist`], [`Describe`]) and a [`ConverterRegistry`]
//!
//! ## Quick Start
//!
//! ```
//! use nodecfg::{deserialize, load_from_node, persist, serialize, to_node};
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Engine { power: f32 }
//!
//! #[derive(Debug, Default, PartialEq)]
//! struct Ship { name: String, engines: Vec<Engine> }
//!
//! persist!(Engine { power });
//! persist!(Ship { name, engines });
//!
//! let ship = Ship {
//!     name: "Enterprise".into(),
//!     engines: vec![Engine { power: 100.0 }, Engine { power: 50.0 }],
//! };
//!
//! let (node, _) = to_node("Ship", &ship);
//! let text = serialize(&node);
//!
//! let root = deserialize(&text)?;
//! let mut loaded = Ship::default();
//! let diagnostics = load_from_node(&mut loaded, root.node("Ship").unwrap());
//!
//! assert!(diagnostics.is_empty());
//! assert_eq!(loaded, ship);
//! # Ok::<(), nodecfg::ParseError>(())
//! ```
//!
//! ## Modules
//!
//! - [`node`]: the document tree
//! - [`codec`]: text parser and serializer, value escaping, JSON bridge
//! - [`mapper`]: object ⇄ node mapping
//! - [`convert`]: scalar converters and the global registry
//! - [`config`]: runtime configuration
//! - [`diagnostic`]: non-fatal reports and the crate error type
//! - [`mod@file`]: load and save files

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod codec;
pub mod config;
pub mod convert;
pub mod diagnostic;
pub mod file;
pub mod mapper;
pub mod node;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use nodecfg::prelude::*;
/// ```
pub mod prelude {
    // Tree and codec
    pub use crate::{deserialize, serialize, Node, ParseError, Parser, Serializer};

    // Mapping
    pub use crate::{
        load_from_node, merge_to_node, persist, to_node, CustomTypeHook, Describe, Mapper,
        Persist, TypeInfo,
    };

    // Configuration and diagnostics
    pub use crate::{Config, ConfigBuilder, Diagnostic, Diagnostics, Error, Verbosity};
}

// =============================================================================
// Tree and Codec
// =============================================================================

pub use codec::{
    deserialize, json_to_node, node_to_json, serialize, JsonError, ParseError, Parsed, Parser,
    Serialized, Serializer,
};
pub use node::Node;

// =============================================================================
// Mapping
// =============================================================================

pub use convert::{ConverterRegistry, Scalar};
pub use mapper::{
    load_from_node, merge_to_node, to_node, CustomTypeHook, Describe, Field, Mapper,
    MappingError, Persist, TypeInfo,
};

// =============================================================================
// Infrastructure
// =============================================================================

pub use config::{Config, ConfigBuilder, Verbosity};
pub use diagnostic::{
    // Error type
    Error,
    // Reports
    Diagnostic, DiagnosticKind, Diagnostics, Severity,
    // Options for formatting
    DiagnosticOptions, DisplayStyle,
    // Filtering and summary
    DiagnosticFilter, DiagnosticSummary,
};
