//! Error types for the data model, option construction, and kernel dispatch.

use thiserror::Error;

use crate::datum::DataType;

/// Data model errors (conversion, shape, lookup).
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    /// A plain value cannot be represented in the requested type.
    #[error("cannot convert {value} to {data_type}")]
    Conversion {
        /// Rendering of the offending value.
        value: String,
        /// The requested type.
        data_type: DataType,
    },

    /// Columns of a table have different lengths.
    #[error("column '{column}' has length {actual}, expected {expected}")]
    LengthMismatch {
        /// The offending column.
        column: String,
        /// Length of the first column.
        expected: usize,
        /// Length of the offending column.
        actual: usize,
    },

    /// A slice exceeds the bounds of its input.
    #[error("slice [{offset}, {end}) out of bounds for length {len}")]
    SliceOutOfBounds {
        /// Slice start.
        offset: usize,
        /// Slice end (exclusive).
        end: usize,
        /// Length of the sliced value.
        len: usize,
    },

    /// A named column does not exist.
    #[error("column not found: {0}")]
    ColumnNotFound(String),

    /// The operation does not apply to this kind of datum.
    #[error("{operation} is not supported for {kind}")]
    Unsupported {
        /// The attempted operation.
        operation: &'static str,
        /// The datum kind, e.g. `"table"`.
        kind: &'static str,
    },
}

/// Failures while constructing a configuration value.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
    /// More positional arguments than the class has fields.
    #[error("{class} takes at most {max} positional argument(s) but {given} were given")]
    TooManyPositional {
        /// Options class name.
        class: &'static str,
        /// Number of fields.
        max: usize,
        /// Number of positionals supplied.
        given: usize,
    },

    /// A keyword that does not name a field.
    #[error("{class} got an unexpected keyword argument '{field}'")]
    UnexpectedKeyword {
        /// Options class name.
        class: &'static str,
        /// The unknown keyword.
        field: String,
    },

    /// A field supplied both positionally and by keyword.
    #[error("{class} got multiple values for argument '{field}'")]
    DuplicateArgument {
        /// Options class name.
        class: &'static str,
        /// The duplicated field.
        field: String,
    },

    /// A required field was not supplied.
    #[error("{class} missing required argument '{field}'")]
    MissingField {
        /// Options class name.
        class: &'static str,
        /// The missing field.
        field: &'static str,
    },

    /// The field values do not deserialize into the options type.
    #[error("invalid {class}: {message}")]
    Invalid {
        /// Options class name.
        class: &'static str,
        /// Deserializer message.
        message: String,
    },
}

/// Errors raised by a kernel engine.
///
/// The binding layer passes these through untouched.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum KernelError {
    /// No kernel is registered under this name.
    #[error("function not found: {0}")]
    FunctionNotFound(String),

    /// The function exists but has no kernel for these inputs.
    #[error("function '{function}' has no kernel matching input types ({inputs})")]
    NotImplemented {
        /// Function name.
        function: String,
        /// Comma-separated input type description.
        inputs: String,
    },

    /// Invalid call (missing options, bad argument count, bad option values).
    #[error("invalid: {0}")]
    Invalid(String),

    /// Type mismatch between inputs.
    #[error("type error: {0}")]
    TypeError(String),

    /// Index outside the bounds of the input.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The offending index.
        index: i64,
        /// Input length.
        len: usize,
    },

    /// A data model error inside the kernel.
    #[error(transparent)]
    Data(#[from] DataError),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}
