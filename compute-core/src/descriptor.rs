//! Function descriptors: the read-only metadata a registry publishes per function.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Marker prefix for a variadic argument name, e.g. `"*values"`.
pub const VARIADIC_MARKER: char = '*';

/// Execution shape of a registered function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionKind {
    /// Element-wise over arrays and scalars.
    Scalar,
    /// Whole-array operations (sorting, selection, take).
    Vector,
    /// Reduces an array to a scalar.
    ScalarAggregate,
    /// Grouped reduction; only usable inside a group-by facility.
    HashAggregate,
}

impl FunctionKind {
    /// The kind's registry name, e.g. `"scalar_aggregate"`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Vector => "vector",
            Self::ScalarAggregate => "scalar_aggregate",
            Self::HashAggregate => "hash_aggregate",
        }
    }
}

impl fmt::Display for FunctionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Number of data arguments a function takes.
///
/// A variadic function accepts `num_args` or more.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Arity {
    /// Fixed count, or the minimum for variadic functions.
    pub num_args: usize,
    /// Whether additional data arguments are accepted.
    pub is_variadic: bool,
}

impl Arity {
    /// Nullary.
    pub const fn nullary() -> Self {
        Self::fixed(0)
    }

    /// One data argument.
    pub const fn unary() -> Self {
        Self::fixed(1)
    }

    /// Two data arguments.
    pub const fn binary() -> Self {
        Self::fixed(2)
    }

    /// Exactly `n` data arguments.
    pub const fn fixed(n: usize) -> Self {
        Self {
            num_args: n,
            is_variadic: false,
        }
    }

    /// `min` or more data arguments.
    pub const fn variadic(min: usize) -> Self {
        Self {
            num_args: min,
            is_variadic: true,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_variadic {
            write!(f, "at least {}", self.num_args)
        } else {
            write!(f, "{}", self.num_args)
        }
    }
}

/// Immutable metadata for one registered function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    /// Registry name.
    pub name: String,
    /// Execution shape.
    pub kind: FunctionKind,
    /// Data argument count.
    pub arity: Arity,
    /// Argument names in order. The last may carry [`VARIADIC_MARKER`].
    pub arg_names: Vec<String>,
    /// Name of the configuration type, if the function takes one.
    #[serde(default)]
    pub options_class: Option<String>,
    /// Whether a configuration value must be supplied.
    #[serde(default)]
    pub options_required: bool,
    /// One-line summary; may be empty.
    #[serde(default)]
    pub summary: String,
    /// Longer description; may be empty.
    #[serde(default)]
    pub description: String,
}

impl FunctionDescriptor {
    /// Start a descriptor with no options and no documentation.
    pub fn new(name: impl Into<String>, kind: FunctionKind, arity: Arity) -> Self {
        Self {
            name: name.into(),
            kind,
            arity,
            arg_names: Vec::new(),
            options_class: None,
            options_required: false,
            summary: String::new(),
            description: String::new(),
        }
    }

    /// Set the argument names.
    #[must_use]
    pub fn with_args<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.arg_names = names.into_iter().map(Into::into).collect();
        self
    }

    /// Set the configuration type.
    #[must_use]
    pub fn with_options(mut self, class: impl Into<String>, required: bool) -> Self {
        self.options_class = Some(class.into());
        self.options_required = required;
        self
    }

    /// Set summary and description.
    #[must_use]
    pub fn with_doc(mut self, summary: impl Into<String>, description: impl Into<String>) -> Self {
        self.summary = summary.into();
        self.description = description.into();
        self
    }

    /// Split argument names into the fixed names and the variadic tail name.
    ///
    /// The marker is stripped from the tail name.
    pub fn split_arg_names(&self) -> (Vec<&str>, Option<&str>) {
        let mut fixed: Vec<&str> = self.arg_names.iter().map(String::as_str).collect();
        let tail = if fixed
            .last()
            .is_some_and(|name| name.starts_with(VARIADIC_MARKER))
        {
            fixed
                .pop()
                .map(|name| name.trim_start_matches(VARIADIC_MARKER))
        } else {
            None
        };
        (fixed, tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_strips_variadic_marker() {
        let d = FunctionDescriptor::new("coalesce", FunctionKind::Scalar, Arity::variadic(1))
            .with_args(["*values"]);
        assert_eq!(d.split_arg_names(), (vec![], Some("values")));

        let d = FunctionDescriptor::new("add", FunctionKind::Scalar, Arity::binary())
            .with_args(["x", "y"]);
        assert_eq!(d.split_arg_names(), (vec!["x", "y"], None));
    }

    #[test]
    fn descriptor_deserializes_with_defaults() {
        let d: FunctionDescriptor = serde_json::from_value(serde_json::json!({
            "name": "and",
            "kind": "scalar",
            "arity": {"num_args": 2, "is_variadic": false},
            "arg_names": ["x", "y"],
        }))
        .unwrap();
        assert_eq!(d.kind, FunctionKind::Scalar);
        assert!(d.options_class.is_none());
        assert!(d.summary.is_empty());
    }

    #[test]
    fn arity_display() {
        assert_eq!(Arity::binary().to_string(), "2");
        assert_eq!(Arity::variadic(1).to_string(), "at least 1");
    }
}
