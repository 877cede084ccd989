//! In-memory document tree.
//!
//! A [`Node`] holds two kinds of fields, keyed by name:
//!
//! - **value fields**: name → ordered list of strings
//! - **node fields**: name → ordered list of child nodes
//!
//! A name is never both at once: writing one kind clears the other kind under
//! that name. Distinct names iterate in insertion order, repeated entries under
//! one name keep the order they were added in.
//!
//! ```text
//! Node ("Ship")
//! ├── values: name → ["Enterprise"]
//! └── nodes:  Engine → [Node { power → ["100"] }, Node { power → ["50"] }]
//! ```

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;

use crate::codec::{self, ParseError};

/// Insertion-ordered field map.
type FieldMap<V> = IndexMap<String, V, FxBuildHasher>;

/// A named container of value fields and node fields.
///
/// The name is assigned by the parent when the node is attached through
/// [`set_node`](Self::set_node) or [`add_node`](Self::add_node). A root with an
/// empty name is a *wrapper*: serializing it emits only its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
    name: String,
    values: FieldMap<Vec<String>>,
    nodes: FieldMap<Vec<Node>>,
}

impl Node {
    /// Create an empty, unnamed node (a wrapper root).
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty node with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create an unnamed node holding exactly one value under `name`.
    pub fn single_value(name: impl Into<String>, value: impl Into<String>) -> Self {
        let mut node = Self::new();
        node.add_value(name, value);
        node
    }

    /// The node's name; empty for a wrapper root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this node is an unnamed wrapper.
    pub fn is_wrapper(&self) -> bool {
        self.name.is_empty()
    }

    // =========================================================================
    // Value fields
    // =========================================================================

    /// Replace all values under `name` with a single value.
    pub fn set_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.nodes.shift_remove(&name);
        self.values.insert(name, vec![value.into()]);
    }

    /// Append a value under `name`.
    pub fn add_value(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.nodes.shift_remove(&name);
        self.values.entry(name).or_default().push(value.into());
    }

    /// First value under `name`.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values(name).first().map(String::as_str)
    }

    /// All values under `name`, in insertion order. Empty if there are none.
    pub fn values(&self, name: &str) -> &[String] {
        self.values.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterate over value fields in insertion order.
    pub fn value_fields(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    // =========================================================================
    // Node fields
    // =========================================================================

    /// Replace all children under `name` with `node`.
    pub fn set_node(&mut self, name: impl Into<String>, mut node: Node) -> &mut Node {
        let name = name.into();
        self.values.shift_remove(&name);
        node.name.clone_from(&name);
        let slot = self.nodes.entry(name).or_default();
        slot.clear();
        slot.push(node);
        &mut slot[0]
    }

    /// Append `node` as a child under `name`, renaming it.
    pub fn add_node(&mut self, name: impl Into<String>, mut node: Node) -> &mut Node {
        let name = name.into();
        self.values.shift_remove(&name);
        node.name.clone_from(&name);
        let slot = self.nodes.entry(name).or_default();
        let index = slot.len();
        slot.push(node);
        &mut slot[index]
    }

    /// Append a new empty child under `name` and return it.
    pub fn add_new_node(&mut self, name: impl Into<String>) -> &mut Node {
        self.add_node(name, Node::new())
    }

    /// First child under `name`.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes(name).first()
    }

    /// First child under `name`, mutably.
    pub fn node_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes.get_mut(name).and_then(|slot| slot.first_mut())
    }

    /// First child under `name`, created empty if missing.
    pub fn node_or_insert(&mut self, name: &str) -> &mut Node {
        self.values.shift_remove(name);
        let slot = self.nodes.entry(name.to_owned()).or_default();
        if slot.is_empty() {
            slot.push(Node::named(name));
        }
        &mut slot[0]
    }

    /// All children under `name`, in insertion order. Empty if there are none.
    pub fn nodes(&self, name: &str) -> &[Node] {
        self.nodes.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Iterate over node fields in insertion order.
    pub fn node_fields(&self) -> impl Iterator<Item = (&str, &[Node])> {
        self.nodes.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    // =========================================================================
    // Whole-node operations
    // =========================================================================

    /// Whether `name` holds any values or children.
    pub fn has_field(&self, name: &str) -> bool {
        !self.values(name).is_empty() || !self.nodes(name).is_empty()
    }

    /// Remove everything stored under `name`, of either kind.
    pub fn clear_field(&mut self, name: &str) {
        self.values.shift_remove(name);
        self.nodes.shift_remove(name);
    }

    /// Remove all fields. The name is kept.
    pub fn clear_data(&mut self) {
        self.values.clear();
        self.nodes.clear();
    }

    /// A node with no value fields and no node fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.nodes.is_empty()
    }
}

/// Renders the serialized text form.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&codec::serialize(self))
    }
}

/// Parses text into a wrapper root.
impl FromStr for Node {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        codec::deserialize(s)
    }
}
