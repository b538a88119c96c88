//! Configuration values ("options") and the factories that build them.
//!
//! Two layers, the same way a typed/erased trait pair usually works:
//!
//! - [`OptionsType`] is implemented by each concrete options struct. It names
//!   the type and lists its constructor fields.
//! - [`FunctionOptions`] is the object-safe view every `OptionsType` gets for
//!   free. Kernel engines receive `&dyn FunctionOptions` and downcast.
//! - [`OptionsClass`] is the erased *factory*: it builds a boxed value from
//!   positional and keyword arguments, or checks whether a ready value is of
//!   its type. [`OptionsCatalog`] maps class names to factories.

mod catalog;
mod families;

pub use catalog::OptionsCatalog;
pub use families::*;

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value as Json};

use crate::error::OptionsError;

/// One constructor field of an options type.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    /// Field name, also the keyword accepted by the constructor.
    pub name: &'static str,
    /// Default value; `None` marks a required field.
    pub default: Option<Json>,
}

impl FieldSpec {
    /// A field that must be supplied.
    pub fn required(name: &'static str) -> Self {
        Self {
            name,
            default: None,
        }
    }

    /// A field with a default.
    pub fn optional(name: &'static str, default: impl Serialize) -> Self {
        Self {
            name,
            default: Some(serde_json::to_value(default).unwrap_or(Json::Null)),
        }
    }

    /// Whether the field has no default.
    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

/// A concrete, typed options struct.
///
/// Implementors should use `#[serde(deny_unknown_fields)]` so a misspelled
/// field surfaces as a construction error.
pub trait OptionsType:
    Serialize + DeserializeOwned + Clone + fmt::Debug + Send + Sync + 'static
{
    /// Class name, as referenced by function descriptors.
    const NAME: &'static str;

    /// Constructor fields in positional order.
    fn fields() -> Vec<FieldSpec>;
}

/// Object-safe view of a configuration value.
///
/// Blanket-implemented for every [`OptionsType`].
pub trait FunctionOptions: fmt::Debug + Send + Sync + 'static {
    /// The class name of this value.
    fn type_name(&self) -> &'static str;
    /// Field values as a JSON object.
    fn to_fields(&self) -> Json;
    /// For downcasting to the concrete type.
    fn as_any(&self) -> &dyn Any;
    /// Clone into a new box.
    fn clone_box(&self) -> Box<dyn FunctionOptions>;
}

impl<T: OptionsType> FunctionOptions for T {
    fn type_name(&self) -> &'static str {
        T::NAME
    }

    fn to_fields(&self) -> Json {
        serde_json::to_value(self).unwrap_or(Json::Null)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn clone_box(&self) -> Box<dyn FunctionOptions> {
        Box::new(self.clone())
    }
}

impl dyn FunctionOptions {
    /// Downcast to a concrete options type.
    pub fn downcast_ref<T: OptionsType>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }
}

impl PartialEq for dyn FunctionOptions {
    fn eq(&self, other: &Self) -> bool {
        self.type_name() == other.type_name() && self.to_fields() == other.to_fields()
    }
}

impl Clone for Box<dyn FunctionOptions> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

/// Erased factory for one options type.
pub trait OptionsClass: Send + Sync {
    /// Class name.
    fn name(&self) -> &'static str;

    /// Constructor fields in positional order.
    fn fields(&self) -> Vec<FieldSpec>;

    /// Build a value from positional and keyword arguments.
    fn construct(
        &self,
        positional: Vec<Json>,
        keyword: Map<String, Json>,
    ) -> Result<Box<dyn FunctionOptions>, OptionsError>;

    /// Build a value from named fields only.
    fn from_mapping(
        &self,
        mapping: Map<String, Json>,
    ) -> Result<Box<dyn FunctionOptions>, OptionsError> {
        self.construct(Vec::new(), mapping)
    }

    /// Whether `options` is a value of this class.
    fn is_instance(&self, options: &dyn FunctionOptions) -> bool;
}

/// The [`OptionsClass`] of a concrete [`OptionsType`].
pub struct OptionsClassOf<T>(PhantomData<fn() -> T>);

impl<T> OptionsClassOf<T> {
    /// Create the factory.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for OptionsClassOf<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: OptionsType> fmt::Debug for OptionsClassOf<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OptionsClassOf").field(&T::NAME).finish()
    }
}

impl<T: OptionsType> OptionsClass for OptionsClassOf<T> {
    fn name(&self) -> &'static str {
        T::NAME
    }

    fn fields(&self) -> Vec<FieldSpec> {
        T::fields()
    }

    fn construct(
        &self,
        positional: Vec<Json>,
        keyword: Map<String, Json>,
    ) -> Result<Box<dyn FunctionOptions>, OptionsError> {
        let fields = bind_fields(T::NAME, &T::fields(), positional, keyword)?;
        let value: T =
            serde_json::from_value(Json::Object(fields)).map_err(|e| OptionsError::Invalid {
                class: T::NAME,
                message: e.to_string(),
            })?;
        Ok(Box::new(value))
    }

    fn is_instance(&self, options: &dyn FunctionOptions) -> bool {
        options.as_any().is::<T>()
    }
}

/// Shorthand for an erased factory of `T`.
pub fn class_of<T: OptionsType>() -> Arc<dyn OptionsClass> {
    Arc::new(OptionsClassOf::<T>::new())
}

/// Assign positionals in field order, merge keywords, fill defaults.
fn bind_fields(
    class: &'static str,
    fields: &[FieldSpec],
    positional: Vec<Json>,
    keyword: Map<String, Json>,
) -> Result<Map<String, Json>, OptionsError> {
    if positional.len() > fields.len() {
        return Err(OptionsError::TooManyPositional {
            class,
            max: fields.len(),
            given: positional.len(),
        });
    }
    let mut bound = Map::new();
    for (field, value) in fields.iter().zip(positional) {
        bound.insert(field.name.to_owned(), value);
    }
    for (name, value) in keyword {
        if !fields.iter().any(|f| f.name == name) {
            return Err(OptionsError::UnexpectedKeyword { class, field: name });
        }
        if bound.contains_key(&name) {
            return Err(OptionsError::DuplicateArgument { class, field: name });
        }
        bound.insert(name, value);
    }
    for field in fields {
        if bound.contains_key(field.name) {
            continue;
        }
        match &field.default {
            Some(default) => {
                bound.insert(field.name.to_owned(), default.clone());
            }
            None => {
                return Err(OptionsError::MissingField {
                    class,
                    field: field.name,
                });
            }
        }
    }
    Ok(bound)
}
