//! Field selection for persistable objects.

use std::any::Any;

use super::describe::{Describe, TypeInfo};

/// An object whose fields map to a node.
///
/// The list of fields is static per type and usually generated with
/// [`persist!`](crate::persist). Field order is the order values and child
/// nodes are written in.
pub trait Persist: Any + Sized {
    /// The persisted fields, in serialization order.
    fn fields() -> &'static [Field<Self>];
}

/// Read and write access to one field of `T`.
trait Accessor<T>: Send + Sync {
    fn get<'a>(&self, object: &'a T) -> &'a dyn Any;
    fn get_mut<'a>(&self, object: &'a mut T) -> &'a mut dyn Any;
}

struct FnAccessor<T, V> {
    get: fn(&T) -> &V,
    get_mut: fn(&mut T) -> &mut V,
}

impl<T: 'static, V: Any> Accessor<T> for FnAccessor<T, V> {
    fn get<'a>(&self, object: &'a T) -> &'a dyn Any {
        (self.get)(object)
    }

    fn get_mut<'a>(&self, object: &'a mut T) -> &'a mut dyn Any {
        (self.get_mut)(object)
    }
}

/// One persisted field of `T`.
pub struct Field<T> {
    name: &'static str,
    readonly: bool,
    type_info: fn() -> TypeInfo,
    access: Box<dyn Accessor<T>>,
}

impl<T: 'static> Field<T> {
    /// Describe a field by name and accessor pair.
    pub fn new<V: Describe>(
        name: &'static str,
        get: fn(&T) -> &V,
        get_mut: fn(&mut T) -> &mut V,
    ) -> Self {
        Self {
            name,
            readonly: false,
            type_info: V::type_info,
            access: Box::new(FnAccessor { get, get_mut }),
        }
    }

    /// Only load this field while its current value is vacant.
    pub fn readonly(mut self) -> Self {
        self.readonly = true;
        self
    }

    /// Field name, also the node field name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the field is read-only.
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    /// Descriptor of the field type.
    pub fn type_info(&self) -> TypeInfo {
        (self.type_info)()
    }

    /// Borrow the field of `object`.
    pub fn get<'a>(&self, object: &'a T) -> &'a dyn Any {
        self.access.get(object)
    }

    /// Mutably borrow the field of `object`.
    pub fn get_mut<'a>(&self, object: &'a mut T) -> &'a mut dyn Any {
        self.access.get_mut(object)
    }
}

impl<T> std::fmt::Debug for Field<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("readonly", &self.readonly)
            .finish_non_exhaustive()
    }
}

/// Implement [`Persist`] and [`Describe`] for a struct.
///
/// Fields listed after `readonly:` only load while vacant. The struct must
/// implement `Default`; for types without one, implement the traits by hand
/// with [`TypeInfo::object_without_default`].
///
/// # Example
///
/// ```
/// use nodecfg::persist;
///
/// #[derive(Default)]
/// struct Engine { power: f32, name: String }
///
/// #[derive(Default)]
/// struct Ship { name: String, engines: Vec<Engine>, id: String }
///
/// persist!(Engine { power, name });
/// persist!(Ship { name, engines; readonly: id });
/// ```
#[macro_export]
macro_rules! persist {
    ($ty:ty { $($field:ident),* $(,)? $(; readonly: $($ro:ident),+ $(,)?)? }) => {
        impl $crate::mapper::Persist for $ty {
            fn fields() -> &'static [$crate::mapper::Field<Self>] {
                static FIELDS: ::std::sync::LazyLock<::std::vec::Vec<$crate::mapper::Field<$ty>>> =
                    ::std::sync::LazyLock::new(|| {
                        ::std::vec![
                            $(
                                $crate::mapper::Field::<$ty>::new(
                                    ::std::stringify!($field),
                                    |o: &$ty| &o.$field,
                                    |o: &mut $ty| &mut o.$field,
                                ),
                            )*
                            $($(
                                $crate::mapper::Field::<$ty>::new(
                                    ::std::stringify!($ro),
                                    |o: &$ty| &o.$ro,
                                    |o: &mut $ty| &mut o.$ro,
                                )
                                .readonly(),
                            )+)?
                        ]
                    });
                &FIELDS
            }
        }

        impl $crate::mapper::Describe for $ty {
            fn type_info() -> $crate::mapper::TypeInfo {
                $crate::mapper::TypeInfo::object::<Self>()
            }
        }
    };
}
