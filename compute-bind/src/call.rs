//! Call arguments and the dispatch primitive every binding ends in.

use std::sync::Arc;

use compute_core::{Datum, FunctionOptions, KernelEngine, MemoryPool, OptionsType};
use serde_json::{Map, Value as Json};

use crate::error::BindError;

/// A ready configuration value as the caller supplied it.
#[derive(Debug, Clone)]
pub enum OptionsInput {
    /// An already constructed value.
    Ready(Box<dyn FunctionOptions>),
    /// Named fields to construct a value from.
    Mapping(Map<String, Json>),
    /// Anything else; always rejected.
    Other(Json),
}

impl OptionsInput {
    /// Short description of what was supplied, for error messages.
    pub fn describe(&self) -> String {
        match self {
            Self::Ready(options) => options.type_name().to_owned(),
            Self::Mapping(_) => "mapping".to_owned(),
            Self::Other(value) => json_type_name(value).to_owned(),
        }
    }
}

impl From<Json> for OptionsInput {
    fn from(value: Json) -> Self {
        match value {
            Json::Object(map) => Self::Mapping(map),
            other => Self::Other(other),
        }
    }
}

/// Arguments for one call of a bound function.
///
/// Data arguments are positional. Configuration comes either from a ready
/// value ([`options`](Self::options) and friends) or from loose constructor
/// arguments ([`option_arg`](Self::option_arg), [`option_kwarg`](Self::option_kwarg)),
/// never both.
#[derive(Debug, Clone, Default)]
pub struct CallArgs {
    pub(crate) data: Vec<Datum>,
    pub(crate) option_args: Vec<Json>,
    pub(crate) option_kwargs: Map<String, Json>,
    pub(crate) options: Option<OptionsInput>,
    pub(crate) pool: Option<Arc<dyn MemoryPool>>,
}

impl CallArgs {
    /// Empty arguments.
    pub fn new() -> Self {
        Self::default()
    }

    /// Arguments holding the given data.
    pub fn with_data<D: Into<Datum>>(data: impl IntoIterator<Item = D>) -> Self {
        Self {
            data: data.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append a data argument.
    #[must_use]
    pub fn arg(mut self, datum: impl Into<Datum>) -> Self {
        self.data.push(datum.into());
        self
    }

    /// Append a positional configuration-constructor argument.
    #[must_use]
    pub fn option_arg(mut self, value: impl Into<Json>) -> Self {
        self.option_args.push(value.into());
        self
    }

    /// Set a keyword configuration-constructor argument.
    #[must_use]
    pub fn option_kwarg(mut self, name: impl Into<String>, value: impl Into<Json>) -> Self {
        self.option_kwargs.insert(name.into(), value.into());
        self
    }

    /// Pass a ready, typed configuration value.
    #[must_use]
    pub fn options<T: OptionsType>(self, options: T) -> Self {
        self.options_boxed(Box::new(options))
    }

    /// Pass a ready, erased configuration value.
    #[must_use]
    pub fn options_boxed(mut self, options: Box<dyn FunctionOptions>) -> Self {
        self.options = Some(OptionsInput::Ready(options));
        self
    }

    /// Pass configuration as JSON. An object is treated as named fields.
    #[must_use]
    pub fn options_value(mut self, value: Json) -> Self {
        self.options = Some(value.into());
        self
    }

    /// Allocate from `pool` instead of the default pool.
    #[must_use]
    pub fn pool(mut self, pool: Arc<dyn MemoryPool>) -> Self {
        self.pool = Some(pool);
        self
    }

    /// The data arguments.
    pub fn data(&self) -> &[Datum] {
        &self.data
    }

    /// Whether loose constructor arguments were supplied.
    pub fn has_option_arguments(&self) -> bool {
        !self.option_args.is_empty() || !self.option_kwargs.is_empty()
    }
}

/// Dispatch `name` to the kernel engine.
///
/// No validation happens here; engine failures come back as
/// [`BindError::Kernel`].
pub fn call_function(
    engine: &dyn KernelEngine,
    name: &str,
    args: &[Datum],
    options: Option<&dyn FunctionOptions>,
    pool: Option<&dyn MemoryPool>,
) -> Result<Datum, BindError> {
    tracing::debug!(
        function = name,
        args = args.len(),
        options = ?options.map(|o| o.type_name()),
        pool = ?pool.map(|p| p.backend_name()),
        "dispatching compute function"
    );
    Ok(engine.dispatch(name, args, options, pool)?)
}

pub(crate) fn json_type_name(value: &Json) -> &'static str {
    match value {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compute_core::options::TakeOptions;
    use compute_core::test_utils::RecordingEngine;
    use compute_core::{Array, SystemPool};
    use serde_json::json;

    #[test]
    fn options_value_splits_mapping_from_other() {
        let args = CallArgs::new().options_value(json!({"boundscheck": false}));
        assert!(matches!(args.options, Some(OptionsInput::Mapping(_))));
        let args = CallArgs::new().options_value(json!(3));
        assert_eq!(args.options.unwrap().describe(), "number");
    }

    #[test]
    fn builder_collects_everything() {
        let args = CallArgs::with_data([Array::int64([Some(1)])])
            .arg(Array::int64([Some(2)]))
            .option_arg(2)
            .option_kwarg("round_mode", "half_up")
            .options(TakeOptions::default());
        assert_eq!(args.data().len(), 2);
        assert!(args.has_option_arguments());
        assert_eq!(args.options.unwrap().describe(), "TakeOptions");
    }

    #[test]
    fn call_function_forwards_everything() {
        let engine = RecordingEngine::reference();
        let pool = SystemPool::new();
        let data = [Datum::from(Array::int64([Some(1), None]))];
        call_function(&engine, "count", &data, None, Some(&pool)).unwrap();
        let call = engine.last().unwrap();
        assert_eq!(call.function, "count");
        assert_eq!(call.pool.as_deref(), Some("system"));
    }

    #[test]
    fn call_function_passes_kernel_errors_through() {
        let engine = RecordingEngine::reference();
        let err = call_function(&engine, "missing", &[], None, None).unwrap_err();
        assert!(matches!(
            err,
            BindError::Kernel(compute_core::KernelError::FunctionNotFound(_))
        ));
    }
}
