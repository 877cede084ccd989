//! Scalar ⇄ string conversion for leaf values.
//!
//! Every value field in a node is a string. This module defines how Rust
//! scalars are read from and written to those strings:
//!
//! - `bool`: `true` / `false`, case-insensitive on input
//! - integers and floats: standard decimal notation, surrounding whitespace ignored
//! - `char`: exactly one character
//! - `String`: taken verbatim
//! - `[T; N]` of numbers: `1, 2, 3`, optionally wrapped in parentheses on input

use std::any::Any;

/// Category of a converter, used for reporting and for registry inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConverterKind {
    /// Numbers, booleans and characters.
    Primitive,
    /// Named enumeration variants.
    Enum,
    /// Free text.
    Text,
    /// Fixed-arity numeric arrays.
    Tuple,
    /// Anything registered by the caller.
    Custom,
}

/// A value that converts to and from a single string.
///
/// # Example
///
/// ```
/// use nodecfg::convert::Scalar;
///
/// assert_eq!(i32::parse_scalar(" 42 "), Some(42));
/// assert_eq!(<[f32; 3]>::parse_scalar("(1, 2.5, -3)"), Some([1.0, 2.5, -3.0]));
/// assert_eq!([1u8, 2, 3].format_scalar(), "1, 2, 3");
/// assert_eq!(bool::parse_scalar("TRUE"), Some(true));
/// ```
pub trait Scalar: Any + Sized {
    /// Parse from text, `None` if the text is not a valid value.
    fn parse_scalar(text: &str) -> Option<Self>;

    /// Render as text.
    fn format_scalar(&self) -> String;

    /// Converter category reported by the registry.
    fn kind() -> ConverterKind {
        ConverterKind::Custom
    }
}

/// Marker for numeric element types usable in fixed-arity arrays.
pub trait Numeric: Scalar + Copy + Default {}

// ---------------------------------------------------------------------------
// Primitive implementations
// ---------------------------------------------------------------------------

macro_rules! impl_numeric {
    ($($t:ty),* $(,)?) => {
        $(
            impl Scalar for $t {
                fn parse_scalar(text: &str) -> Option<Self> {
                    text.trim().parse().ok()
                }

                fn format_scalar(&self) -> String {
                    self.to_string()
                }

                fn kind() -> ConverterKind {
                    ConverterKind::Primitive
                }
            }

            impl Numeric for $t {}
        )*
    };
}

impl_numeric!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);

impl Scalar for bool {
    fn parse_scalar(text: &str) -> Option<Self> {
        let text = text.trim();
        if text.eq_ignore_ascii_case("true") {
            Some(true)
        } else if text.eq_ignore_ascii_case("false") {
            Some(false)
        } else {
            None
        }
    }

    fn format_scalar(&self) -> String {
        self.to_string()
    }

    fn kind() -> ConverterKind {
        ConverterKind::Primitive
    }
}

impl Scalar for char {
    fn parse_scalar(text: &str) -> Option<Self> {
        let mut chars = text.chars();
        let c = chars.next()?;
        chars.next().is_none().then_some(c)
    }

    fn format_scalar(&self) -> String {
        self.to_string()
    }

    fn kind() -> ConverterKind {
        ConverterKind::Primitive
    }
}

impl Scalar for String {
    fn parse_scalar(text: &str) -> Option<Self> {
        Some(text.to_owned())
    }

    fn format_scalar(&self) -> String {
        self.clone()
    }

    fn kind() -> ConverterKind {
        ConverterKind::Text
    }
}

// ---------------------------------------------------------------------------
// Fixed-arity numeric arrays
// ---------------------------------------------------------------------------

impl<T: Numeric, const N: usize> Scalar for [T; N] {
    fn parse_scalar(text: &str) -> Option<Self> {
        let text = text.trim();
        let inner = text
            .strip_prefix('(')
            .and_then(|s| s.strip_suffix(')'))
            .unwrap_or(text);

        let items: Vec<T> = inner
            .split(',')
            .map(T::parse_scalar)
            .collect::<Option<_>>()?;
        items.try_into().ok()
    }

    fn format_scalar(&self) -> String {
        self.iter()
            .map(T::format_scalar)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn kind() -> ConverterKind {
        ConverterKind::Tuple
    }
}
