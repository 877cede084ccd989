//! Descriptor-driven mapping between objects and nodes.
//!
//! # Overview
//!
//! A type opts in by implementing [`Persist`], which lists its fields, and
//! [`Describe`], which tells the mapper what shape the type has. The
//! [`persist!`](crate::persist) macro does both for plain structs.
//!
//! | Field type                      | Node representation                   |
//! |---------------------------------|---------------------------------------|
//! | scalar (number, bool, `String`) | one value                             |
//! | [`Persist`] object              | one child node                        |
//! | `Vec<scalar>`                   | repeated values under one name        |
//! | `Vec<object>`                   | repeated child nodes under one name   |
//! | `Option<T>`                     | as `T` when `Some`, omitted when `None` |
//!
//! # Example
//!
//! ```
//! use nodecfg::{load_from_node, persist, to_node};
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Engine { power: f32 }
//!
//! #[derive(Default, Debug, PartialEq)]
//! struct Ship { name: String, engines: Vec<Engine> }
//!
//! persist!(Engine { power });
//! persist!(Ship { name, engines });
//!
//! let ship = Ship {
//!     name: "Enterprise".into(),
//!     engines: vec![Engine { power: 100.0 }, Engine { power: 50.0 }],
//! };
//! let (node, diagnostics) = to_node("Ship", &ship);
//! assert!(diagnostics.is_empty());
//! assert_eq!(node.nodes("engines").len(), 2);
//!
//! let mut loaded = Ship::default();
//! load_from_node(&mut loaded, &node);
//! assert_eq!(loaded, ship);
//! ```

mod context;
mod describe;
mod error;
mod load;
mod persist;
mod store;

#[cfg(test)]
mod tests;

pub use context::{CustomTypeHook, Mapper};
pub use describe::{CollectionOps, Describe, Factory, ObjectOps, OptionalOps, Shape, TypeInfo};
pub use error::MappingError;
pub use persist::{Field, Persist};

use crate::config::Config;
use crate::convert::global_converters;
use crate::diagnostic::Diagnostics;
use crate::node::Node;

/// Load `node` into `object` using the global converters and default config.
pub fn load_from_node<T: Persist>(object: &mut T, node: &Node) -> Diagnostics {
    let config = Config::default();
    let registry = global_converters();
    let mut mapper = Mapper::new(&config, &registry);
    mapper.load_from_node(object, node);
    mapper.into_diagnostics()
}

/// Store `object` into `node` using the global converters and default config.
pub fn merge_to_node<T: Persist>(object: &T, node: &mut Node) -> Diagnostics {
    let config = Config::default();
    let registry = global_converters();
    let mut mapper = Mapper::new(&config, &registry);
    mapper.merge_to_node(object, node);
    mapper.into_diagnostics()
}

/// Store `object` into a fresh node called `name`.
pub fn to_node<T: Persist>(name: &str, object: &T) -> (Node, Diagnostics) {
    let config = Config::default();
    let registry = global_converters();
    let mut mapper = Mapper::new(&config, &registry);
    let node = mapper.to_node(name, object);
    (node, mapper.into_diagnostics())
}
