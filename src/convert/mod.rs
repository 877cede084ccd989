//! String conversion for scalar field values.

mod registry;
mod scalar;

pub use registry::{
    global_converters, register_global, register_global_enum, register_global_fn,
    register_global_from_str, Converter, ConverterRegistry, GLOBAL_CONVERTERS,
};
pub use scalar::{ConverterKind, Numeric, Scalar};
