//! Text → tree → text: layout variants normalize to the canonical form.

use crate::diagnostic::DiagnosticKind;

use super::common::{assert_idempotent, parse, ship, wrapped, SHIP_TEXT};

#[test]
fn canonical_text_is_fixed_point() {
    assert_eq!(assert_idempotent(SHIP_TEXT), SHIP_TEXT);
}

#[test]
fn compact_layout() {
    let text = "Ship { name = Enterprise\nEngine { power = 100 }\nEngine { power = 50 } }";
    let parsed = parse(text);
    assert!(parsed.diagnostics.is_empty());
    assert_eq!(parsed.root, wrapped(ship()));
    assert_eq!(assert_idempotent(text), SHIP_TEXT);
}

#[test]
fn spaces_and_comments() {
    let text = "
// fleet registry
Ship   // the flagship
{
    name   =   Enterprise   // NCC-1701
    Engine
    {
        power = 100
    }

    // second engine
    Engine
    {
        power=50
    }
}
";
    let parsed = parse(text);
    assert!(parsed.diagnostics.is_empty(), "{}", parsed.diagnostics);
    assert_eq!(parsed.root, wrapped(ship()));
}

#[test]
fn wrapper_unwrap() {
    let text = "A {}\nB {}\n";
    assert_eq!(assert_idempotent(text), text);

    let root = parse(text).root;
    assert!(root.node("A").unwrap().is_empty());
    assert!(root.node("B").unwrap().is_empty());
}

#[test]
fn escaped_boundaries() {
    let text = "A\n{\n\tv = \\u0020a b\\u0020\n}\n";
    let root = parse(text).root;
    assert_eq!(root.node("A").unwrap().value("v"), Some(" a b "));
    assert_eq!(assert_idempotent(text), text);
}

#[test]
fn lowercase_hex_normalizes() {
    let text = "A\n{\n\tv = \\u00a0x\n}\n";
    let out = assert_idempotent(text);
    assert_eq!(out, "A\n{\n\tv = \\u00A0x\n}\n");
}

#[test]
fn values_after_children_move_up() {
    let text = "A\n{\n\tB {}\n\tx = 1\n}\n";
    assert_eq!(assert_idempotent(text), "A\n{\n\tx = 1\n\tB {}\n}\n");
}

#[test]
fn comment_before_brace_is_dropped() {
    let text = "A\n// about A\n\n{\n\tx = 1\n}\n";
    let parsed = parse(text);
    assert_eq!(parsed.root.node("A").and_then(|a| a.value("x")), Some("1"));

    let dropped: Vec<_> = parsed.diagnostics.of_kind(DiagnosticKind::DroppedLine).collect();
    assert_eq!(dropped.len(), 2);
    assert_eq!(dropped[0].line, Some(2));
    assert_eq!(dropped[1].line, Some(3));
}
