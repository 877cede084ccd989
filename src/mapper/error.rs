//! Per-field mapping errors.

use thiserror::Error;

/// Why one field could not be mapped.
///
/// Mapping never aborts: each of these is reported as a
/// [`DiagnosticKind::Mapping`](crate::diagnostic::DiagnosticKind::Mapping)
/// diagnostic at the field's path, and the field is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// No converter is registered and no custom hook handled the type.
    #[error("no converter for type `{type_name}`")]
    UnknownType {
        /// Full type name.
        type_name: &'static str,
    },

    /// A fresh value was needed but the type has no factory.
    #[error("cannot construct a value of type `{type_name}`")]
    ConstructionFailed {
        /// Full type name.
        type_name: &'static str,
    },

    /// Collections of collections cannot be represented in a node.
    #[error("nested collections are not supported (`{type_name}`)")]
    NestedCollection {
        /// Full type name of the outer collection.
        type_name: &'static str,
    },

    /// A read-only field already holds a value.
    #[error("field `{field}` is read-only and already set")]
    ReadonlyField {
        /// Field name.
        field: &'static str,
    },

    /// The stored text is not a valid value of the type.
    #[error("invalid value '{value}' for type `{type_name}`")]
    InvalidValue {
        /// Full type name.
        type_name: &'static str,
        /// The rejected text.
        value: String,
    },

    /// The converter could not render the value.
    #[error("cannot format value of type `{type_name}`")]
    Unformattable {
        /// Full type name.
        type_name: &'static str,
    },
}
