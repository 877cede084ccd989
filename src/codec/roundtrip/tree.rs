//! Tree → text → tree roundtrips.

use crate::codec::Serializer;
use crate::diagnostic::DiagnosticKind;
use crate::node::Node;

use super::common::{assert_roundtrip, emit, parse, quiet, ship, SHIP_TEXT};

#[test]
fn empty_node() {
    assert_roundtrip(&Node::named("A"));
}

#[test]
fn ship_sample() {
    let ship = ship();
    assert_eq!(emit(&ship), SHIP_TEXT);
    assert_roundtrip(&ship);
}

#[test]
fn repeated_values_keep_order() {
    let mut node = Node::named("List");
    for v in ["c", "a", "b", "a"] {
        node.add_value("item", v);
    }
    assert_roundtrip(&node);

    let parsed = parse(&emit(&node)).root;
    assert_eq!(parsed.node("List").unwrap().values("item"), ["c", "a", "b", "a"]);
}

#[test]
fn repeated_nodes_keep_order() {
    let mut node = Node::named("Fleet");
    for name in ["one", "two", "three"] {
        node.add_new_node("Ship").set_value("name", name);
    }
    assert_roundtrip(&node);
}

#[test]
fn empty_children_survive() {
    let mut node = Node::named("A");
    node.add_new_node("B");
    node.add_new_node("B");
    node.add_new_node("C").add_new_node("D");
    assert_roundtrip(&node);
}

#[test]
fn deeply_nested() {
    let mut root = Node::named("L0");
    let mut current = &mut root;
    for depth in 1..8 {
        current = current.add_new_node(format!("L{depth}"));
        current.set_value("depth", depth.to_string());
    }
    assert_roundtrip(&root);
}

#[test]
fn wrapper_with_many_roots() {
    let mut root = Node::new();
    root.add_new_node("A").set_value("x", "1");
    root.add_new_node("B");
    root.add_new_node("A").set_value("x", "2");
    assert_roundtrip(&root);
}

#[test]
fn awkward_values() {
    let mut node = Node::named("Values");
    node.set_value("lead", "  two spaces");
    node.set_value("trail", "tab\t");
    node.set_value("nbsp", "\u{a0}x\u{a0}");
    node.set_value("lines", "one\ntwo\n");
    node.set_value("empty", "");
    node.set_value("space", " ");
    node.set_value("url", "http://example.com/a//b");
    node.set_value("unicode", "Ünïcödé ✓");
    node.set_value("equals", "a = b");
    assert_roundtrip(&node);
}

#[test]
fn values_with_terminators() {
    let mut node = Node::named("Values");
    node.set_value("close", "a}b");
    node.set_value("open", "{x");
    node.set_value("block", "A { x = 1 }");
    node.set_value("comment", "a // b");
    node.set_value("lead_comment", "//x");
    node.set_value("url", "http://example.com");
    assert_roundtrip(&node);
}

#[test]
fn invalid_names_leave_readable_text() {
    let mut node = Node::named("A");
    node.set_value("max-speed", "1");
    node.set_value("speed", "2");
    node.add_new_node("two words");

    let out = Serializer::new(&quiet()).serialize(&node);
    assert_eq!(out.diagnostics.of_kind(DiagnosticKind::InvalidName).count(), 2);

    let a = parse(&out.text).root.node("A").cloned().unwrap();
    assert_eq!(a.value("speed"), Some("2"));
    assert!(!a.has_field("max-speed"));
    assert!(!a.has_field("two words"));
}
