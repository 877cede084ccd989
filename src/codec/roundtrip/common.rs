//! Test infrastructure for roundtrip tests.

use crate::codec::{Parsed, Parser, Serializer};
use crate::config::{Config, ConfigBuilder, Verbosity};
use crate::node::Node;

/// Quiet config so expected warnings don't clutter test logs.
pub fn quiet() -> Config {
    ConfigBuilder::new().verbosity(Verbosity::Quiet).build()
}

/// Parse text, panicking on fatal errors.
pub fn parse(text: &str) -> Parsed {
    Parser::new(&quiet())
        .parse(text.lines())
        .unwrap_or_else(|e| panic!("parse failed: {e}\n{text}"))
}

/// Serialize a tree.
pub fn emit(node: &Node) -> String {
    Serializer::new(&quiet()).serialize(node).text
}

/// Wrap `node` in an unnamed root, as the parser returns it.
pub fn wrapped(node: Node) -> Node {
    let mut root = Node::new();
    let name = node.name().to_owned();
    root.add_node(name, node);
    root
}

/// Test tree → text → tree.
pub fn assert_roundtrip(node: &Node) {
    let text = emit(node);
    let parsed = parse(&text);
    assert!(
        parsed.diagnostics.is_empty(),
        "serializer output produced diagnostics:\n{}\n{text}",
        parsed.diagnostics
    );

    let expected = if node.is_wrapper() {
        node.clone()
    } else {
        wrapped(node.clone())
    };
    assert_eq!(parsed.root, expected, "roundtrip mismatch for:\n{text}");
}

/// Test that re-serializing parsed text is stable.
pub fn assert_idempotent(text: &str) -> String {
    let first = emit(&parse(text).root);
    let second = emit(&parse(&first).root);
    assert_eq!(first, second, "serializer output not stable for:\n{text}");
    first
}

/// The end-to-end sample: a ship with two engines.
pub fn ship() -> Node {
    let mut ship = Node::named("Ship");
    ship.set_value("name", "Enterprise");
    ship.add_new_node("Engine").set_value("power", "100");
    ship.add_new_node("Engine").set_value("power", "50");
    ship
}

pub const SHIP_TEXT: &str = "\
Ship
{
\tname = Enterprise
\tEngine
\t{
\t\tpower = 100
\t}
\tEngine
\t{
\t\tpower = 50
\t}
}
";
