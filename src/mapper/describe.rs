//! Type descriptors.
//!
//! A [`TypeInfo`] tells the mapper what shape a field has and how to reach
//! into it without knowing its static type: how to build a default value,
//! how to walk a collection, how to look through an `Option`.

use std::any::{type_name, Any, TypeId};
use std::collections::VecDeque;
use std::fmt;

use crate::node::Node;

use super::context::Mapper;
use super::persist::Persist;

/// Builds a boxed default value.
pub type Factory = fn() -> Box<dyn Any>;

/// Runtime description of a field type.
#[derive(Clone, Copy)]
pub struct TypeInfo {
    id: TypeId,
    name: &'static str,
    shape: Shape,
    factory: Option<Factory>,
    vacant: Option<fn(&dyn Any) -> bool>,
}

/// How the mapper treats a type.
#[derive(Clone, Copy)]
pub enum Shape {
    /// Stored as a single string through a converter or custom hook.
    Scalar,
    /// Stored as a child node, field by field.
    Object(ObjectOps),
    /// Stored as repeated values or repeated child nodes.
    Collection(CollectionOps),
    /// Stored like the inner type when present, omitted when absent.
    Optional(OptionalOps),
}

/// Entry points into a [`Persist`] type.
#[derive(Clone, Copy)]
pub struct ObjectOps {
    pub(crate) load: fn(&mut dyn Any, &Node, &mut Mapper<'_>),
    pub(crate) store: fn(&dyn Any, &mut Node, &mut Mapper<'_>),
}

/// Type-erased sequence access.
#[derive(Clone, Copy)]
pub struct CollectionOps {
    pub(crate) element: fn() -> TypeInfo,
    pub(crate) len: fn(&dyn Any) -> usize,
    pub(crate) get: fn(&dyn Any, usize) -> Option<&dyn Any>,
    pub(crate) clear: fn(&mut dyn Any),
    pub(crate) push: fn(&mut dyn Any, Box<dyn Any>) -> bool,
}

/// Type-erased `Option` access.
#[derive(Clone, Copy)]
pub struct OptionalOps {
    pub(crate) inner: fn() -> TypeInfo,
    pub(crate) get: fn(&dyn Any) -> Option<&dyn Any>,
    pub(crate) get_mut: fn(&mut dyn Any) -> Option<&mut dyn Any>,
    pub(crate) set: fn(&mut dyn Any, Box<dyn Any>) -> bool,
}

impl TypeInfo {
    /// A scalar with a default value.
    pub fn scalar<T: Any + Default>() -> Self {
        Self::scalar_with::<T>(default_box::<T>)
    }

    /// A scalar that cannot be default-constructed.
    pub fn scalar_without_default<T: Any>() -> Self {
        Self::new::<T>(Shape::Scalar, None)
    }

    /// A scalar built by `factory` when the mapper needs a fresh value.
    pub fn scalar_with<T: Any>(factory: Factory) -> Self {
        Self::new::<T>(Shape::Scalar, Some(factory))
    }

    /// A [`Persist`] object with a default value.
    pub fn object<T: Persist + Default>() -> Self {
        Self::new::<T>(Shape::Object(object_ops::<T>()), Some(default_box::<T>))
    }

    /// A [`Persist`] object that cannot be default-constructed.
    ///
    /// It loads fine in place, but an `Option` or collection of it cannot
    /// be populated from a node.
    pub fn object_without_default<T: Persist>() -> Self {
        Self::new::<T>(Shape::Object(object_ops::<T>()), None)
    }

    /// `Option<T>`.
    pub fn optional<T: Describe>() -> Self {
        let ops = OptionalOps {
            inner: T::type_info,
            get: option_get::<T>,
            get_mut: option_get_mut::<T>,
            set: option_set::<T>,
        };
        Self::new::<Option<T>>(Shape::Optional(ops), Some(default_box::<Option<T>>))
            .with_vacancy(option_is_none::<T>)
    }

    pub(crate) fn collection<S: Sequence>() -> Self {
        let ops = CollectionOps {
            element: <S::Item as Describe>::type_info,
            len: seq_len::<S>,
            get: seq_get::<S>,
            clear: seq_clear::<S>,
            push: seq_push::<S>,
        };
        Self::new::<S>(Shape::Collection(ops), Some(default_box::<S>)).with_vacancy(seq_is_empty::<S>)
    }

    fn new<T: Any>(shape: Shape, factory: Option<Factory>) -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: type_name::<T>(),
            shape,
            factory,
            vacant: None,
        }
    }

    /// Mark values for which `vacant` returns true as unset.
    ///
    /// Read-only fields only accept a loaded value while vacant.
    pub fn with_vacancy(mut self, vacant: fn(&dyn Any) -> bool) -> Self {
        self.vacant = Some(vacant);
        self
    }

    /// Type id of the described type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Full type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Shape of the type.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Whether a fresh value can be built.
    pub fn can_construct(&self) -> bool {
        self.factory.is_some()
    }

    /// Build a fresh value.
    pub fn construct(&self) -> Option<Box<dyn Any>> {
        self.factory.map(|factory| factory())
    }

    /// Whether `value` counts as unset.
    pub fn is_vacant(&self, value: &dyn Any) -> bool {
        self.vacant.is_some_and(|vacant| vacant(value))
    }

    /// Whether this is a collection, looking through `Option`.
    pub fn is_collection(&self) -> bool {
        match self.shape {
            Shape::Collection(_) => true,
            Shape::Optional(ops) => (ops.inner)().is_collection(),
            _ => false,
        }
    }

    /// Whether this is an object, looking through `Option`.
    pub fn is_object(&self) -> bool {
        match self.shape {
            Shape::Object(_) => true,
            Shape::Optional(ops) => (ops.inner)().is_object(),
            _ => false,
        }
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shape = match self.shape {
            Shape::Scalar => "scalar",
            Shape::Object(_) => "object",
            Shape::Collection(_) => "collection",
            Shape::Optional(_) => "optional",
        };
        f.debug_struct("TypeInfo")
            .field("name", &self.name)
            .field("shape", &shape)
            .field("constructible", &self.factory.is_some())
            .finish()
    }
}

// ============================================================================
// Describe
// ============================================================================

/// A type the mapper can handle as a field.
///
/// Implemented here for the built-in scalars, `Option`, `Vec` and `VecDeque`.
/// [`persist!`](crate::persist) implements it for object types. Custom scalars
/// implement it with [`TypeInfo::scalar`] and register a converter or handle
/// the type in a [`CustomTypeHook`](super::CustomTypeHook).
pub trait Describe: Any {
    /// Descriptor for `Self`.
    fn type_info() -> TypeInfo;
}

macro_rules! describe_scalar {
    ($($t:ty),* $(,)?) => {
        $(
            impl Describe for $t {
                fn type_info() -> TypeInfo {
                    TypeInfo::scalar::<Self>()
                }
            }
        )*
    };
}

describe_scalar!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64,
);

impl Describe for String {
    fn type_info() -> TypeInfo {
        TypeInfo::scalar::<Self>().with_vacancy(string_is_empty)
    }
}

impl<T: crate::convert::Numeric, const N: usize> Describe for [T; N] {
    fn type_info() -> TypeInfo {
        TypeInfo::scalar_with::<Self>(array_default::<T, N>)
    }
}

impl<T: Describe> Describe for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::optional::<T>()
    }
}

impl<T: Describe> Describe for Vec<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::collection::<Self>()
    }
}

impl<T: Describe> Describe for VecDeque<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::collection::<Self>()
    }
}

// ============================================================================
// Erased operations
// ============================================================================

fn default_box<T: Any + Default>() -> Box<dyn Any> {
    Box::new(T::default())
}

fn array_default<T: crate::convert::Numeric, const N: usize>() -> Box<dyn Any> {
    Box::new([T::default(); N])
}

fn string_is_empty(value: &dyn Any) -> bool {
    value.downcast_ref::<String>().is_some_and(String::is_empty)
}

fn object_ops<T: Persist>() -> ObjectOps {
    ObjectOps {
        load: load_object::<T>,
        store: store_object::<T>,
    }
}

fn load_object<T: Persist>(slot: &mut dyn Any, node: &Node, mapper: &mut Mapper<'_>) {
    if let Some(object) = slot.downcast_mut::<T>() {
        mapper.load_fields(object, node);
    }
}

fn store_object<T: Persist>(value: &dyn Any, node: &mut Node, mapper: &mut Mapper<'_>) {
    if let Some(object) = value.downcast_ref::<T>() {
        mapper.store_fields(object, node);
    }
}

fn option_get<T: Any>(slot: &dyn Any) -> Option<&dyn Any> {
    slot.downcast_ref::<Option<T>>()?
        .as_ref()
        .map(|value| value as &dyn Any)
}

fn option_get_mut<T: Any>(slot: &mut dyn Any) -> Option<&mut dyn Any> {
    slot.downcast_mut::<Option<T>>()?
        .as_mut()
        .map(|value| value as &mut dyn Any)
}

fn option_set<T: Any>(slot: &mut dyn Any, value: Box<dyn Any>) -> bool {
    match (slot.downcast_mut::<Option<T>>(), value.downcast::<T>()) {
        (Some(slot), Ok(value)) => {
            *slot = Some(*value);
            true
        }
        _ => false,
    }
}

fn option_is_none<T: Any>(slot: &dyn Any) -> bool {
    slot.downcast_ref::<Option<T>>().is_some_and(Option::is_none)
}

/// Growable sequence the mapper can clear and refill.
pub(crate) trait Sequence: Any + Default {
    type Item: Describe;

    fn seq_len(&self) -> usize;
    fn seq_get(&self, index: usize) -> Option<&Self::Item>;
    fn seq_clear(&mut self);
    fn seq_push(&mut self, item: Self::Item);
}

impl<T: Describe> Sequence for Vec<T> {
    type Item = T;

    fn seq_len(&self) -> usize {
        self.len()
    }

    fn seq_get(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    fn seq_clear(&mut self) {
        self.clear();
    }

    fn seq_push(&mut self, item: T) {
        self.push(item);
    }
}

impl<T: Describe> Sequence for VecDeque<T> {
    type Item = T;

    fn seq_len(&self) -> usize {
        self.len()
    }

    fn seq_get(&self, index: usize) -> Option<&T> {
        self.get(index)
    }

    fn seq_clear(&mut self) {
        self.clear();
    }

    fn seq_push(&mut self, item: T) {
        self.push_back(item);
    }
}

fn seq_len<S: Sequence>(slot: &dyn Any) -> usize {
    slot.downcast_ref::<S>().map_or(0, S::seq_len)
}

fn seq_get<S: Sequence>(slot: &dyn Any, index: usize) -> Option<&dyn Any> {
    slot.downcast_ref::<S>()?
        .seq_get(index)
        .map(|item| item as &dyn Any)
}

fn seq_clear<S: Sequence>(slot: &mut dyn Any) {
    if let Some(seq) = slot.downcast_mut::<S>() {
        seq.seq_clear();
    }
}

fn seq_push<S: Sequence>(slot: &mut dyn Any, item: Box<dyn Any>) -> bool {
    match (slot.downcast_mut::<S>(), item.downcast::<S::Item>()) {
        (Some(seq), Ok(item)) => {
            seq.seq_push(*item);
            true
        }
        _ => false,
    }
}

fn seq_is_empty<S: Sequence>(slot: &dyn Any) -> bool {
    seq_len::<S>(slot) == 0
}
