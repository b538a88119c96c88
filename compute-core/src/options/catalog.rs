//! Registry of options factories, keyed by class name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use super::families::*;
use super::{OptionsClass, OptionsType, class_of};

/// Maps the class names that descriptors reference to factories.
///
/// A descriptor whose class is missing here is still bound, just without
/// options support.
#[derive(Clone, Default)]
pub struct OptionsCatalog {
    classes: HashMap<&'static str, Arc<dyn OptionsClass>>,
}

impl OptionsCatalog {
    /// An empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog holding every standard family.
    pub fn standard() -> Self {
        let mut catalog = Self::new();
        catalog
            .register::<CastOptions>()
            .register::<IndexOptions>()
            .register::<TakeOptions>()
            .register::<SelectKOptions>()
            .register::<ArraySortOptions>()
            .register::<RoundOptions>()
            .register::<ScalarAggregateOptions>()
            .register::<CountOptions>()
            .register::<ElementWiseAggregateOptions>()
            .register::<FilterOptions>()
            .register::<MatchSubstringOptions>()
            .register::<NullOptions>()
            .register::<TrimOptions>();
        catalog
    }

    /// Register a typed options struct.
    pub fn register<T: OptionsType>(&mut self) -> &mut Self {
        self.classes.insert(T::NAME, class_of::<T>());
        self
    }

    /// Register a pre-erased factory.
    pub fn register_dyn(&mut self, class: Arc<dyn OptionsClass>) -> &mut Self {
        self.classes.insert(class.name(), class);
        self
    }

    /// Look up a factory by class name.
    pub fn get(&self, name: &str) -> Option<Arc<dyn OptionsClass>> {
        self.classes.get(name).cloned()
    }

    /// Whether a class is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Registered class names, sorted.
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.classes.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered classes.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no classes are registered.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl fmt::Debug for OptionsCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsCatalog")
            .field("classes", &self.names())
            .finish()
    }
}
