//! Edge case and error handling tests.

use crate::codec::{deserialize, serialize, ParseError, Parser};
use crate::diagnostic::{DiagnosticKind, Severity};
use crate::node::Node;

use super::common::{assert_idempotent, parse, quiet, ship, wrapped, SHIP_TEXT};

#[test]
fn empty_input() {
    let parsed = parse("");
    assert!(parsed.root.is_empty());
    assert!(parsed.diagnostics.is_empty());
    assert_eq!(assert_idempotent("\n\n// only comments\n"), "");
}

#[test]
fn unclosed_nodes_fold_into_parents() {
    let parsed = parse("A\n{\n\tx = 1\n\tB\n\t{\n\t\ty = 2\n");

    let a = parsed.root.node("A").unwrap();
    assert_eq!(a.value("x"), Some("1"));
    assert_eq!(a.node("B").and_then(|b| b.value("y")), Some("2"));

    let unclosed: Vec<_> = parsed.diagnostics.of_kind(DiagnosticKind::UnclosedNode).collect();
    assert_eq!(unclosed.len(), 2);
    assert_eq!(unclosed[0].line, Some(4));
    assert_eq!(unclosed[1].line, Some(1));
    assert!(unclosed.iter().all(|d| d.severity == Severity::Warning));
}

#[test]
fn missing_body_requeues_next_line() {
    let parsed = parse("A\nx = 1\nB {}\n");

    assert!(parsed.root.node("A").is_none());
    assert_eq!(parsed.root.value("x"), Some("1"));
    assert!(parsed.root.node("B").is_some());

    let missing: Vec<_> = parsed.diagnostics.of_kind(DiagnosticKind::MissingBody).collect();
    assert_eq!(missing.len(), 1);
    assert_eq!(missing[0].line, Some(1));
}

#[test]
fn missing_body_at_end_of_input() {
    let parsed = parse("A {}\nB\n// trailing\n");
    assert!(parsed.root.node("B").is_none());
    assert_eq!(parsed.diagnostics.of_kind(DiagnosticKind::MissingBody).count(), 1);
    assert_eq!(parsed.diagnostics.of_kind(DiagnosticKind::DroppedLine).count(), 1);
}

#[test]
fn fatal_errors() {
    let config = quiet();
    let parser = || Parser::new(&config);

    assert_eq!(
        parser().parse(["}"]).unwrap_err(),
        ParseError::UnbalancedClose { line: 1 }
    );
    assert_eq!(
        parser().parse(["A {", "}", "}"]).unwrap_err(),
        ParseError::UnbalancedClose { line: 3 }
    );
    assert!(matches!(
        parser().parse(["A {", "not a field", "}"]),
        Err(ParseError::UnexpectedText { line: 2, .. })
    ));
    assert!(matches!(
        parser().parse(["{"]),
        Err(ParseError::UnexpectedText { line: 1, .. })
    ));
}

#[test]
fn braces_end_values() {
    let root = parse("A { x = 1 } B { y = 2 }").root;
    assert_eq!(root.node("A").and_then(|a| a.value("x")), Some("1"));
    assert_eq!(root.node("B").and_then(|b| b.value("y")), Some("2"));
}

#[test]
fn line_numbers_survive_requeue() {
    let err = Parser::new(&quiet())
        .parse(["A {", "x = 1 } } B {}"])
        .unwrap_err();
    assert_eq!(err, ParseError::UnbalancedClose { line: 2 });
}

#[test]
fn name_and_value_kind_exclusive() {
    let root = parse("A\n{\n\tx = 1\n\tx {}\n}\n").root;
    let a = root.node("A").unwrap();
    assert!(a.value("x").is_none());
    assert!(a.node("x").is_some());
}

#[test]
fn in_memory_interface() {
    let text = serialize(&ship());
    assert_eq!(text, SHIP_TEXT);
    assert_eq!(deserialize(&text).unwrap(), wrapped(ship()));

    let node: Node = SHIP_TEXT.parse().unwrap();
    assert_eq!(node.to_string(), SHIP_TEXT);
}
