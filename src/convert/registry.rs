//! Converter registry keyed by type.
//!
//! The mapper looks up a converter by [`TypeId`] for every scalar field. A
//! process-wide registry ([`GLOBAL_CONVERTERS`]) is pre-populated with the
//! built-in scalars; callers can add their own types to it, or build a local
//! [`ConverterRegistry`] and hand that to a [`Mapper`](crate::mapper::Mapper).

use std::any::{type_name, Any, TypeId};
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;
use std::sync::LazyLock;

use parking_lot::{RwLock, RwLockReadGuard};
use rustc_hash::FxHashMap;

use crate::diagnostic::LOG_TARGET;

use super::scalar::{ConverterKind, Scalar};

// ============================================================================
// Converter trait
// ============================================================================

/// Type-erased string conversion for one Rust type.
pub trait Converter: Send + Sync {
    /// Category of the converted type.
    fn kind(&self) -> ConverterKind;

    /// Name of the converted type, for messages.
    fn type_name(&self) -> &'static str;

    /// Parse `text` and overwrite `slot` with the result.
    ///
    /// Returns `false` and leaves `slot` untouched if the text is invalid or
    /// `slot` is not of the converted type.
    fn parse_into(&self, text: &str, slot: &mut dyn Any) -> bool;

    /// Render `value`, `None` if it is not of the converted type.
    fn format(&self, value: &dyn Any) -> Option<String>;
}

struct ScalarConverter<T>(PhantomData<fn() -> T>);

impl<T: Scalar> Converter for ScalarConverter<T> {
    fn kind(&self) -> ConverterKind {
        T::kind()
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn parse_into(&self, text: &str, slot: &mut dyn Any) -> bool {
        match (slot.downcast_mut::<T>(), T::parse_scalar(text)) {
            (Some(slot), Some(value)) => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    fn format(&self, value: &dyn Any) -> Option<String> {
        value.downcast_ref::<T>().map(T::format_scalar)
    }
}

/// Named variants of an enumeration; names match case-insensitively on input.
struct EnumConverter<T> {
    variants: Vec<(&'static str, T)>,
}

impl<T> Converter for EnumConverter<T>
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    fn kind(&self) -> ConverterKind {
        ConverterKind::Enum
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn parse_into(&self, text: &str, slot: &mut dyn Any) -> bool {
        let text = text.trim();
        let found = self
            .variants
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(text));
        match (slot.downcast_mut::<T>(), found) {
            (Some(slot), Some((_, value))) => {
                *slot = *value;
                true
            }
            _ => false,
        }
    }

    fn format(&self, value: &dyn Any) -> Option<String> {
        let value = value.downcast_ref::<T>()?;
        self.variants
            .iter()
            .find(|(_, v)| v == value)
            .map(|(name, _)| (*name).to_owned())
    }
}

struct FnConverter<T> {
    kind: ConverterKind,
    parse: fn(&str) -> Option<T>,
    format: fn(&T) -> String,
}

impl<T: Any> Converter for FnConverter<T> {
    fn kind(&self) -> ConverterKind {
        self.kind
    }

    fn type_name(&self) -> &'static str {
        type_name::<T>()
    }

    fn parse_into(&self, text: &str, slot: &mut dyn Any) -> bool {
        match (slot.downcast_mut::<T>(), (self.parse)(text)) {
            (Some(slot), Some(value)) => {
                *slot = value;
                true
            }
            _ => false,
        }
    }

    fn format(&self, value: &dyn Any) -> Option<String> {
        value.downcast_ref::<T>().map(self.format)
    }
}

fn parse_from_str<T: FromStr>(text: &str) -> Option<T> {
    text.trim().parse().ok()
}

fn format_display<T: Display>(value: &T) -> String {
    value.to_string()
}

// ============================================================================
// Registry
// ============================================================================

/// Map from type to converter.
///
/// # Example
///
/// ```
/// use nodecfg::convert::{ConverterKind, ConverterRegistry};
///
/// #[derive(Debug, Clone, Copy, PartialEq)]
/// enum Class { Light, Heavy }
///
/// let mut registry = ConverterRegistry::with_defaults();
/// registry.register_enum(&[("Light", Class::Light), ("Heavy", Class::Heavy)]);
///
/// let mut class = Class::Light;
/// let converter = registry.get_for::<Class>().unwrap();
/// assert_eq!(converter.kind(), ConverterKind::Enum);
/// assert!(converter.parse_into("heavy", &mut class));
/// assert_eq!(class, Class::Heavy);
/// ```
#[derive(Default)]
pub struct ConverterRegistry {
    converters: FxHashMap<TypeId, Box<dyn Converter>>,
}

impl ConverterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with every built-in scalar registered.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    /// Register a [`Scalar`] type.
    pub fn register<T: Scalar>(&mut self) -> &mut Self {
        self.insert::<T>(Box::new(ScalarConverter::<T>(PhantomData)))
    }

    /// Register an enumeration by its variant names.
    pub fn register_enum<T>(&mut self, variants: &[(&'static str, T)]) -> &mut Self
    where
        T: Copy + PartialEq + Send + Sync + 'static,
    {
        self.insert::<T>(Box::new(EnumConverter {
            variants: variants.to_vec(),
        }))
    }

    /// Register a type through its `FromStr` and `Display` impls.
    pub fn register_from_str<T>(&mut self) -> &mut Self
    where
        T: FromStr + Display + Any,
    {
        self.register_fn::<T>(parse_from_str::<T>, format_display::<T>)
    }

    /// Register a type with explicit parse and format functions.
    pub fn register_fn<T: Any>(
        &mut self,
        parse: fn(&str) -> Option<T>,
        format: fn(&T) -> String,
    ) -> &mut Self {
        self.insert::<T>(Box::new(FnConverter {
            kind: ConverterKind::Custom,
            parse,
            format,
        }))
    }

    fn insert<T: Any>(&mut self, converter: Box<dyn Converter>) -> &mut Self {
        if self.converters.insert(TypeId::of::<T>(), converter).is_some() {
            log::debug!(target: LOG_TARGET, "replaced converter for {}", type_name::<T>());
        }
        self
    }

    /// Look up the converter for a type id.
    pub fn get(&self, id: TypeId) -> Option<&dyn Converter> {
        self.converters.get(&id).map(Box::as_ref)
    }

    /// Look up the converter for `T`.
    pub fn get_for<T: Any>(&self) -> Option<&dyn Converter> {
        self.get(TypeId::of::<T>())
    }

    /// Whether `T` has a converter.
    pub fn contains<T: Any>(&self) -> bool {
        self.converters.contains_key(&TypeId::of::<T>())
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}

impl std::fmt::Debug for ConverterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set()
            .entries(self.converters.values().map(|c| c.type_name()))
            .finish()
    }
}

fn register_builtins(registry: &mut ConverterRegistry) {
    macro_rules! register_all {
        ($($t:ty),* $(,)?) => {
            $(registry.register::<$t>();)*
        };
    }

    register_all!(
        bool, char, String,
        i8, i16, i32, i64, i128, isize,
        u8, u16, u32, u64, u128, usize,
        f32, f64,
        [f32; 2], [f32; 3], [f32; 4],
        [f64; 2], [f64; 3], [f64; 4],
        [i32; 2], [i32; 3], [i32; 4],
        [u32; 2], [u32; 3], [u32; 4],
        [u8; 3], [u8; 4],
    );
}

// ============================================================================
// Global registry
// ============================================================================

/// Process-wide converter registry, pre-populated with the built-in scalars.
///
/// Mappers created through the convenience functions read from this.
/// Registration takes the write lock; do it at startup, not from inside a
/// custom hook while a mapping is in progress.
pub static GLOBAL_CONVERTERS: LazyLock<RwLock<ConverterRegistry>> =
    LazyLock::new(|| RwLock::new(ConverterRegistry::with_defaults()));

/// Read access to the global registry.
pub fn global_converters() -> RwLockReadGuard<'static, ConverterRegistry> {
    GLOBAL_CONVERTERS.read()
}

/// Register a [`Scalar`] type globally.
pub fn register_global<T: Scalar>() {
    GLOBAL_CONVERTERS.write().register::<T>();
}

/// Register an enumeration globally.
pub fn register_global_enum<T>(variants: &[(&'static str, T)])
where
    T: Copy + PartialEq + Send + Sync + 'static,
{
    GLOBAL_CONVERTERS.write().register_enum(variants);
}

/// Register a `FromStr + Display` type globally.
pub fn register_global_from_str<T>()
where
    T: FromStr + Display + Any,
{
    GLOBAL_CONVERTERS.write().register_from_str::<T>();
}

/// Register a type globally with explicit parse and format functions.
pub fn register_global_fn<T: Any>(parse: fn(&str) -> Option<T>, format: fn(&T) -> String) {
    GLOBAL_CONVERTERS.write().register_fn(parse, format);
}
