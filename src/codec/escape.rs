//! Value escaping.
//!
//! Values are trimmed when parsed, so leading and trailing whitespace has to
//! be written as `\uXXXX`. Line breaks and tabs are escaped everywhere so a
//! value always fits on one line. Braces and a `//` that would start a comment
//! are written as `\uXXXX` too, since the parser ends a value at either.

use std::fmt::Write;

/// Escape a value for writing after `key = `.
///
/// # Example
///
/// ```
/// use nodecfg::codec::escape_value;
///
/// assert_eq!(escape_value(" a b "), r"\u0020a b\u0020");
/// assert_eq!(escape_value("one\ntwo"), r"one\ntwo");
/// ```
pub fn escape_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let chars: Vec<char> = value.chars().collect();
    let last = chars.len().saturating_sub(1);

    for (i, &c) in chars.iter().enumerate() {
        let opens_comment = c == '/'
            && chars.get(i + 1) == Some(&'/')
            && (i == 0 || chars[i - 1].is_whitespace());
        match c {
            ' ' | '\u{a0}' | '\t' if i == 0 || i == last => push_code(&mut out, c),
            '{' | '}' => push_code(&mut out, c),
            '/' if opens_comment => push_code(&mut out, c),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out
}

fn push_code(out: &mut String, c: char) {
    _ = write!(out, "\\u{:04X}", c as u32);
}

/// Reverse [`escape_value`]: `\uXXXX`, `\n` and `\t`.
///
/// Any other backslash is kept as-is.
pub fn unescape_value(text: &str) -> String {
    if !text.contains('\\') {
        return text.to_owned();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('\\') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if let Some(after) = tail.strip_prefix("\\n") {
            out.push('\n');
            rest = after;
        } else if let Some(after) = tail.strip_prefix("\\t") {
            out.push('\t');
            rest = after;
        } else if let Some(c) = unicode_escape(tail) {
            out.push(c);
            rest = &tail[6..];
        } else {
            out.push('\\');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}

/// Decode a leading `\uXXXX`.
fn unicode_escape(text: &str) -> Option<char> {
    let hex = text.strip_prefix("\\u")?.get(..4)?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
}
