//! Error and warning types for the binding layer.

use compute_core::{Arity, KernelError, OptionsError};
use thiserror::Error;

/// Errors raised while building a namespace or calling a bound function.
///
/// Validation failures are raised before anything is dispatched. Kernel
/// failures pass through as [`BindError::Kernel`] without extra context.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum BindError {
    /// Wrong number of positional data arguments.
    #[error("{function} takes {expected} positional argument(s), but {given} were given")]
    Arity {
        /// Exposed function name.
        function: String,
        /// Declared arity.
        expected: Arity,
        /// Number of data arguments supplied.
        given: usize,
    },

    /// A ready configuration value and loose construction arguments together.
    #[error(
        "function '{function}' called with both an 'options' argument and additional arguments"
    )]
    ConflictingOptions {
        /// Exposed function name.
        function: String,
    },

    /// The configuration value is not of the function's configuration type.
    #[error("function '{function}' expected a {expected} parameter, got {actual}")]
    InvalidOptions {
        /// Exposed function name.
        function: String,
        /// Expected class name, or `none` for functions without options.
        expected: String,
        /// What was supplied instead.
        actual: String,
    },

    /// The configuration constructor rejected the supplied fields.
    #[error("function '{function}': {source}")]
    OptionsConstruction {
        /// Exposed function name.
        function: String,
        /// Constructor failure.
        #[source]
        source: OptionsError,
    },

    /// An adapter precondition does not hold.
    #[error("{function}: {message}")]
    InvalidArgument {
        /// Adapter name.
        function: String,
        /// What was wrong.
        message: String,
    },

    /// No function is bound under this name.
    #[error("function not found: {0}")]
    FunctionNotFound(String),

    /// Two registry functions map to the same exposed name.
    #[error("name '{name}' is already bound (while binding '{function}')")]
    DuplicateName {
        /// The colliding exposed name.
        name: String,
        /// Registry name of the function being bound.
        function: String,
    },

    /// Failure inside the kernel engine, passed through untouched.
    #[error(transparent)]
    Kernel(#[from] KernelError),
}

impl BindError {
    /// Whether this is a configuration error: wrong type or failed construction.
    #[must_use]
    pub fn is_invalid_options(&self) -> bool {
        matches!(
            self,
            Self::InvalidOptions { .. } | Self::OptionsConstruction { .. }
        )
    }

    /// The function the error is about, if this layer raised it.
    pub fn function(&self) -> Option<&str> {
        match self {
            Self::Arity { function, .. }
            | Self::ConflictingOptions { function }
            | Self::InvalidOptions { function, .. }
            | Self::OptionsConstruction { function, .. }
            | Self::InvalidArgument { function, .. }
            | Self::DuplicateName { function, .. } => Some(function.as_str()),
            Self::FunctionNotFound(name) => Some(name.as_str()),
            Self::Kernel(_) => None,
        }
    }

    pub(crate) fn invalid_argument(function: &str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            function: function.to_owned(),
            message: message.into(),
        }
    }
}

/// Non-fatal findings from namespace construction.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BindWarning {
    /// A descriptor names a configuration type the catalog does not know.
    /// The function is still bound, without options support.
    #[error("binding for options class {class} not exposed (function '{function}')")]
    UnknownOptionsClass {
        /// Registry function name.
        function: String,
        /// The unresolved class name.
        class: String,
    },
}
