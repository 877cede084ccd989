//! Text → node tree.
//!
//! The parser is line-driven. Each trimmed line is matched against, in order:
//!
//! 1. `}`: close the current node
//! 2. blank or `// comment`: skip
//! 3. `key = value`: add a value to the current node
//! 4. `Name {`: open a child
//! 5. `Name` alone: look ahead for the `{` on a following line
//!
//! Whatever follows a brace or a value on the same line is queued and parsed
//! as if it were the next line, so `A { x = 1 }` is accepted.

use crate::config::Config;
use crate::diagnostic::{Diagnostic, DiagnosticKind, Diagnostics};
use crate::node::Node;

use super::error::ParseError;
use super::escape::unescape_value;

/// Result of a successful parse.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Parsed {
    /// Unnamed wrapper root holding the top-level nodes.
    pub root: Node,
    /// Non-fatal problems found along the way.
    pub diagnostics: Diagnostics,
}

/// Line-driven parser.
///
/// # Example
///
/// ```
/// use nodecfg::{Config, Parser};
///
/// let text = "Ship\n{\n\tname = Enterprise\n\tEngine { power = 100 }\n}\n";
/// let parsed = Parser::new(&Config::default()).parse(text.lines()).unwrap();
///
/// let ship = parsed.root.node("Ship").unwrap();
/// assert_eq!(ship.value("name"), Some("Enterprise"));
/// assert_eq!(ship.node("Engine").and_then(|e| e.value("power")), Some("100"));
/// assert!(parsed.diagnostics.is_empty());
/// ```
pub struct Parser<'a> {
    config: &'a Config,
    diagnostics: Diagnostics,
    root: Node,
    /// Open nodes with the line they were opened on, innermost last.
    open: Vec<(usize, Node)>,
}

impl<'a> Parser<'a> {
    /// Create a parser.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            diagnostics: Diagnostics::new(),
            root: Node::new(),
            open: Vec::new(),
        }
    }

    /// Parse a sequence of lines.
    pub fn parse<I, S>(mut self, lines: I) -> Result<Parsed, ParseError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut input = LineQueue::new(lines.into_iter());
        while let Some((number, line)) = input.next() {
            self.step(number, &line, &mut input)?;
        }
        Ok(self.finish())
    }

    fn step<I, S>(
        &mut self,
        number: usize,
        raw: &str,
        input: &mut LineQueue<I>,
    ) -> Result<(), ParseError>
    where
        I: Iterator<Item = S>,
        S: AsRef<str>,
    {
        let line = raw.trim();

        if let Some(rest) = line.strip_prefix('}') {
            self.close(number)?;
            input.requeue_unless_blank(number, rest);
            return Ok(());
        }

        if line.is_empty() || is_comment(line) {
            return Ok(());
        }

        if let Some((key, value, rest)) = split_value_line(line) {
            self.current().add_value(key, unescape_value(value));
            if let Some(rest) = rest {
                input.requeue(number, rest);
            }
            return Ok(());
        }

        if let Some((name, rest)) = split_node_open(line) {
            self.open(number, name);
            input.requeue_unless_blank(number, rest);
            return Ok(());
        }

        if let Some(name) = node_header(line) {
            self.open_deferred(number, name, input);
            return Ok(());
        }

        Err(ParseError::UnexpectedText {
            line: number,
            text: line.to_owned(),
        })
    }

    /// Look past blank and comment lines for the `{` of a bare `Name` line.
    fn open_deferred<I, S>(&mut self, number: usize, name: &str, input: &mut LineQueue<I>)
    where
        I: Iterator<Item = S>,
        S: AsRef<str>,
    {
        while let Some((next_number, next_raw)) = input.next() {
            let next = next_raw.trim();

            if next.is_empty() || is_comment(next) {
                let what = if next.is_empty() { "blank line" } else { "comment" };
                self.report(
                    Diagnostic::new(
                        DiagnosticKind::DroppedLine,
                        format!("{what} between node `{name}` and its `{{` is not preserved"),
                    )
                    .at_line(next_number),
                );
                continue;
            }

            if let Some(rest) = next.strip_prefix('{') {
                self.open(number, name);
                input.requeue_unless_blank(next_number, rest);
                return;
            }

            self.report_missing_body(number, name);
            input.requeue(next_number, next);
            return;
        }

        self.report_missing_body(number, name);
    }

    fn report_missing_body(&mut self, number: usize, name: &str) {
        self.report(
            Diagnostic::new(
                DiagnosticKind::MissingBody,
                format!("node `{name}` has no `{{` block and was dropped"),
            )
            .at_line(number),
        );
    }

    fn open(&mut self, number: usize, name: &str) {
        self.open.push((number, Node::named(name)));
    }

    fn close(&mut self, number: usize) -> Result<(), ParseError> {
        let Some((_, node)) = self.open.pop() else {
            return Err(ParseError::UnbalancedClose { line: number });
        };
        let name = node.name().to_owned();
        self.current().add_node(name, node);
        Ok(())
    }

    fn current(&mut self) -> &mut Node {
        match self.open.last_mut() {
            Some((_, node)) => node,
            None => &mut self.root,
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.report(self.config, diagnostic);
    }

    /// Fold nodes left open at end of input into their parents.
    fn finish(mut self) -> Parsed {
        while let Some((number, node)) = self.open.pop() {
            let name = node.name().to_owned();
            self.report(
                Diagnostic::new(
                    DiagnosticKind::UnclosedNode,
                    format!("node `{name}` opened here is never closed"),
                )
                .at_line(number),
            );
            self.current().add_node(name, node);
        }

        Parsed {
            root: self.root,
            diagnostics: self.diagnostics,
        }
    }
}

// ============================================================================
// Line queue
// ============================================================================

/// Source lines plus at most one pending remainder of an already-read line.
struct LineQueue<I> {
    lines: std::iter::Enumerate<I>,
    pending: Option<(usize, String)>,
}

impl<I, S> LineQueue<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    fn new(lines: I) -> Self {
        Self {
            lines: lines.enumerate(),
            pending: None,
        }
    }

    /// Next line with its 1-indexed number.
    fn next(&mut self) -> Option<(usize, String)> {
        if let Some(pending) = self.pending.take() {
            return Some(pending);
        }
        self.lines
            .next()
            .map(|(index, line)| (index + 1, line.as_ref().to_owned()))
    }

    fn requeue(&mut self, number: usize, text: &str) {
        self.pending = Some((number, text.to_owned()));
    }

    fn requeue_unless_blank(&mut self, number: usize, text: &str) {
        let text = text.trim_start();
        if !text.is_empty() && !is_comment(text) {
            self.requeue(number, text);
        }
    }
}

// ============================================================================
// Line classification
// ============================================================================

fn is_comment(line: &str) -> bool {
    line.starts_with("//")
}

/// Length of the leading identifier (`[A-Za-z0-9_]+`).
fn ident_len(line: &str) -> usize {
    line.bytes()
        .take_while(|b| b.is_ascii_alphanumeric() || *b == b'_')
        .count()
}

/// Whether `name` parses back as a key or node name.
pub(super) fn is_identifier(name: &str) -> bool {
    !name.is_empty() && ident_len(name) == name.len()
}

/// `key = value`, plus any text after a brace that ends the value.
fn split_value_line(line: &str) -> Option<(&str, &str, Option<&str>)> {
    let len = ident_len(line);
    if len == 0 {
        return None;
    }
    let (key, after) = line.split_at(len);
    let value = after.trim_start().strip_prefix('=')?;
    let (value, rest) = split_value(value);
    Some((key, value, rest))
}

/// Cut a value at the first brace or inline comment.
///
/// `//` only starts a comment at the start of the value or after whitespace,
/// so URLs survive.
fn split_value(text: &str) -> (&str, Option<&str>) {
    for (i, c) in text.char_indices() {
        match c {
            '{' | '}' => return (text[..i].trim(), Some(&text[i..])),
            '/' if text[i..].starts_with("//")
                && (i == 0 || text[..i].ends_with(char::is_whitespace)) =>
            {
                return (text[..i].trim(), None);
            }
            _ => {}
        }
    }
    (text.trim(), None)
}

/// `Name {` with the text after the brace.
fn split_node_open(line: &str) -> Option<(&str, &str)> {
    let len = ident_len(line);
    if len == 0 {
        return None;
    }
    let (name, after) = line.split_at(len);
    let rest = after.trim_start().strip_prefix('{')?;
    Some((name, rest))
}

/// `Name` alone, optionally followed by a comment.
fn node_header(line: &str) -> Option<&str> {
    let len = ident_len(line);
    if len == 0 {
        return None;
    }
    let (name, after) = line.split_at(len);
    let after = after.trim_start();
    (after.is_empty() || is_comment(after)).then_some(name)
}
