//! Registry and documentation-addenda collaborators.

use std::collections::{BTreeMap, HashMap};

use crate::descriptor::FunctionDescriptor;

/// Enumerates the functions a kernel engine can execute.
///
/// Implementations must be deterministic: the same contents always list
/// the same names in the same order.
pub trait FunctionRegistry: Send + Sync {
    /// All registered function names, in registry order.
    fn list_functions(&self) -> Vec<String>;

    /// Metadata for one function.
    fn get_function(&self, name: &str) -> Option<FunctionDescriptor>;
}

/// Extra, hand-written documentation keyed by function name (usually examples).
pub trait DocAddenda: Send + Sync {
    /// Text to append to the generated help for `name`, if any.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// An addenda table with no entries.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAddenda;

impl DocAddenda for NoAddenda {
    fn lookup(&self, _name: &str) -> Option<String> {
        None
    }
}

impl DocAddenda for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl DocAddenda for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
