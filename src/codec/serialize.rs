//! Node tree → text.

use std::fmt::Write;

use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::node::Node;

use super::escape::escape_value;
use super::parse::is_identifier;

/// Result of serialization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Serialized {
    /// The document text.
    pub text: String,
    /// Non-fatal problems, e.g. values on a wrapper root.
    pub diagnostics: Diagnostics,
}

/// Writes nodes with tab indentation, braces on their own lines.
///
/// Output is stable: serializing, parsing and serializing again produces the
/// same text.
///
/// # Example
///
/// ```
/// use nodecfg::{Config, Node, Serializer};
///
/// let mut ship = Node::named("Ship");
/// ship.set_value("name", "Enterprise");
/// ship.add_new_node("Engine");
///
/// let out = Serializer::new(&Config::default()).serialize(&ship);
/// assert_eq!(out.text, "Ship\n{\n\tname = Enterprise\n\tEngine {}\n}\n");
/// ```
pub struct Serializer<'a> {
    config: &'a Config,
    diagnostics: Diagnostics,
}

impl<'a> Serializer<'a> {
    /// Create a serializer.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            diagnostics: Diagnostics::new(),
        }
    }

    /// Serialize `node`.
    ///
    /// An unnamed wrapper root emits only its children, unindented. Its own
    /// values have nowhere to go and are dropped with a warning.
    pub fn serialize(mut self, node: &Node) -> Serialized {
        let mut text = String::new();

        if node.is_wrapper() {
            let dropped: usize = node.value_fields().map(|(_, values)| values.len()).sum();
            if dropped > 0 {
                let diagnostic = Diagnostic::new(
                    DiagnosticKind::WrapperValues,
                    format!("{dropped} value(s) on the unnamed root are not serialized"),
                );
                self.diagnostics.report(self.config, diagnostic);
            }
            for (name, children) in node.node_fields() {
                for child in children {
                    self.write_node(&mut text, name, child, 0);
                }
            }
        } else {
            self.write_node(&mut text, node.name(), node, 0);
        }

        Serialized {
            text,
            diagnostics: self.diagnostics,
        }
    }

    fn write_node(&mut self, out: &mut String, name: &str, node: &Node, depth: usize) {
        if !self.check_name(name) {
            return;
        }
        let indent = "\t".repeat(depth);

        if node.is_empty() {
            _ = writeln!(out, "{indent}{name} {{}}");
            return;
        }

        _ = writeln!(out, "{indent}{name}");
        _ = writeln!(out, "{indent}{{");
        for (key, values) in node.value_fields() {
            if !self.check_name(key) {
                continue;
            }
            for value in values {
                _ = writeln!(out, "{indent}\t{key} = {}", escape_value(value));
            }
        }
        for (key, children) in node.node_fields() {
            for child in children {
                self.write_node(out, key, child, depth + 1);
            }
        }
        _ = writeln!(out, "{indent}}}");
    }

    /// Whether `name` reads back as an identifier. Reports it if not.
    fn check_name(&mut self, name: &str) -> bool {
        if is_identifier(name) {
            return true;
        }
        let diagnostic = Diagnostic::new(
            DiagnosticKind::InvalidName,
            format!("field name `{name}` is not an identifier and was not serialized"),
        );
        self.diagnostics.report(self.config, diagnostic);
        false
    }
}
