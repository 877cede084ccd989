//! Node tree ⇄ JSON.
//!
//! Every field becomes an array, since any field may repeat: value fields as
//! arrays of strings, node fields as arrays of objects. Node names are implied
//! by the key they sit under.

use serde_json::{Map, Value as JsonValue};

use crate::node::Node;

use super::error::JsonError;

/// Convert a node to a JSON object.
///
/// # Example
///
/// ```
/// use nodecfg::Node;
/// use nodecfg::codec::node_to_json;
/// use serde_json::json;
///
/// let mut ship = Node::named("Ship");
/// ship.set_value("name", "Enterprise");
/// ship.add_new_node("Engine").set_value("power", "100");
///
/// assert_eq!(
///     node_to_json(&ship),
///     json!({ "name": ["Enterprise"], "Engine": [{ "power": ["100"] }] })
/// );
/// ```
pub fn node_to_json(node: &Node) -> JsonValue {
    let mut object = Map::new();
    for (key, values) in node.value_fields() {
        let values = values.iter().cloned().map(JsonValue::String).collect();
        object.insert(key.to_owned(), JsonValue::Array(values));
    }
    for (key, children) in node.node_fields() {
        let children = children.iter().map(node_to_json).collect();
        object.insert(key.to_owned(), JsonValue::Array(children));
    }
    JsonValue::Object(object)
}

/// Convert a JSON object to an unnamed node.
///
/// Scalars become values (numbers and booleans in their JSON spelling),
/// objects become child nodes, arrays repeat the field and `null` is skipped.
/// Arrays nested directly in arrays are rejected.
pub fn json_to_node(json: &JsonValue) -> Result<Node, JsonError> {
    let JsonValue::Object(object) = json else {
        return Err(JsonError::NotObject(kind_name(json)));
    };
    let mut node = Node::new();
    fill(&mut node, object)?;
    Ok(node)
}

fn fill(node: &mut Node, object: &Map<String, JsonValue>) -> Result<(), JsonError> {
    for (key, value) in object {
        match value {
            JsonValue::Array(items) => {
                for item in items {
                    add_item(node, key, item)?;
                }
            }
            other => add_item(node, key, other)?,
        }
    }
    Ok(())
}

fn add_item(node: &mut Node, key: &str, item: &JsonValue) -> Result<(), JsonError> {
    match item {
        JsonValue::Null => {}
        JsonValue::Object(child) => fill(node.add_new_node(key), child)?,
        JsonValue::Array(_) => {
            return Err(JsonError::UnsupportedValue {
                field: key.to_owned(),
                kind: "nested array",
            });
        }
        JsonValue::String(s) => node.add_value(key, s.as_str()),
        JsonValue::Bool(b) => node.add_value(key, b.to_string()),
        JsonValue::Number(n) => node.add_value(key, n.to_string()),
    }
    Ok(())
}

fn kind_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
