//! InMemoryRegistry: BTreeMap-backed FunctionRegistry for testing.

use std::collections::BTreeMap;

use crate::descriptor::{Arity, FunctionDescriptor, FunctionKind};
use crate::registry::FunctionRegistry;

/// A registry holding descriptors in a `BTreeMap`, so names list sorted.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRegistry {
    functions: BTreeMap<String, FunctionDescriptor>,
}

impl InMemoryRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding [`standard_descriptors`].
    pub fn with_standard_functions() -> Self {
        Self::from(standard_descriptors())
    }

    /// Add or replace a descriptor.
    pub fn register(&mut self, descriptor: FunctionDescriptor) -> &mut Self {
        self.functions.insert(descriptor.name.clone(), descriptor);
        self
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl From<Vec<FunctionDescriptor>> for InMemoryRegistry {
    fn from(descriptors: Vec<FunctionDescriptor>) -> Self {
        let mut registry = Self::new();
        for descriptor in descriptors {
            registry.register(descriptor);
        }
        registry
    }
}

impl FunctionRegistry for InMemoryRegistry {
    fn list_functions(&self) -> Vec<String> {
        self.functions.keys().cloned().collect()
    }

    fn get_function(&self, name: &str) -> Option<FunctionDescriptor> {
        self.functions.get(name).cloned()
    }
}

/// Descriptors for every function [`ReferenceEngine`](super::ReferenceEngine)
/// implements, plus `hash_sum` (hash aggregate) and `strptime` (unknown
/// options class).
pub fn standard_descriptors() -> Vec<FunctionDescriptor> {
    use FunctionKind::*;

    vec![
        FunctionDescriptor::new("add", Scalar, Arity::binary())
            .with_args(["x", "y"])
            .with_doc("Add the arguments element-wise.", ""),
        FunctionDescriptor::new("and", Scalar, Arity::binary())
            .with_args(["x", "y"])
            .with_doc(
                "Logical 'and' boolean values.",
                "When a null is encountered in either input, a null is output.",
            ),
        FunctionDescriptor::new("array_sort_indices", Vector, Arity::unary())
            .with_args(["array"])
            .with_options("ArraySortOptions", false)
            .with_doc(
                "Return the indices that would sort an array.",
                "Null values are placed according to `null_placement`.",
            ),
        FunctionDescriptor::new("cast", Scalar, Arity::unary())
            .with_args(["input"])
            .with_options("CastOptions", true)
            .with_doc("Cast values to another data type.", ""),
        FunctionDescriptor::new("coalesce", Scalar, Arity::variadic(1))
            .with_args(["*values"])
            .with_doc(
                "Select the first non-null value.",
                "Each row of the output will be the value from the first\n\
                 corresponding input for which the value is not null.",
            ),
        FunctionDescriptor::new("count", ScalarAggregate, Arity::unary())
            .with_args(["array"])
            .with_options("CountOptions", false)
            .with_doc("Count the number of null / non-null values.", ""),
        FunctionDescriptor::new("filter", Vector, Arity::binary())
            .with_args(["input", "selection_filter"])
            .with_options("FilterOptions", false)
            .with_doc("Filter with a boolean selection filter.", ""),
        FunctionDescriptor::new("hash_sum", HashAggregate, Arity::binary())
            .with_args(["array", "group_id_array"])
            .with_options("ScalarAggregateOptions", false)
            .with_doc("Sum values in each group.", ""),
        FunctionDescriptor::new("index", ScalarAggregate, Arity::unary())
            .with_args(["array"])
            .with_options("IndexOptions", true)
            .with_doc("Find the index of the first occurrence of a given value.", ""),
        FunctionDescriptor::new("is_null", Scalar, Arity::unary())
            .with_args(["values"])
            .with_options("NullOptions", false)
            .with_doc("Return true if null (and optionally NaN).", ""),
        FunctionDescriptor::new("match_substring", Scalar, Arity::unary())
            .with_args(["strings"])
            .with_options("MatchSubstringOptions", true)
            .with_doc(
                "Match strings against literal pattern.",
                "For each string in `strings`, emit true iff it contains a given pattern.",
            ),
        FunctionDescriptor::new("max_element_wise", Scalar, Arity::variadic(1))
            .with_args(["*args"])
            .with_options("ElementWiseAggregateOptions", false)
            .with_doc("Find the element-wise maximum value.", ""),
        FunctionDescriptor::new("or", Scalar, Arity::binary())
            .with_args(["x", "y"])
            .with_doc("Logical 'or' boolean values.", ""),
        FunctionDescriptor::new("round", Scalar, Arity::unary())
            .with_args(["x"])
            .with_options("RoundOptions", false)
            .with_doc("Round to a given precision.", ""),
        FunctionDescriptor::new("select_k_unstable", Vector, Arity::unary())
            .with_args(["input"])
            .with_options("SelectKOptions", true)
            .with_doc("Select the indices of the first `k` ordered elements.", ""),
        FunctionDescriptor::new("strptime", Scalar, Arity::unary())
            .with_args(["strings"])
            .with_options("StrptimeOptions", true)
            .with_doc("Parse timestamps.", ""),
        FunctionDescriptor::new("sum", ScalarAggregate, Arity::unary())
            .with_args(["array"])
            .with_options("ScalarAggregateOptions", false)
            .with_doc("Compute the sum of a numeric array.", ""),
        FunctionDescriptor::new("take", Vector, Arity::binary())
            .with_args(["data", "indices"])
            .with_options("TakeOptions", false)
            .with_doc("Select values from an input based on indices from another array.", ""),
        FunctionDescriptor::new("utf8_trim", Scalar, Arity::unary())
            .with_args(["strings"])
            .with_options("TrimOptions", true)
            .with_doc("Trim leading and trailing characters.", ""),
        FunctionDescriptor::new("utf8_upper", Scalar, Arity::unary()).with_args(["strings"]),
    ]
}
