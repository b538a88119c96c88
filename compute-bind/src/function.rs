//! Bound functions: one validated, documented callable per descriptor.

use std::fmt;
use std::sync::Arc;

use compute_core::{Arity, Datum, FunctionDescriptor, KernelEngine, OptionsClass};
use serde::Serialize;

use crate::call::{CallArgs, call_function};
use crate::doc;
use crate::error::BindError;
use crate::resolve::{ensure_exclusive, resolve_options};
use crate::signature::Signature;

/// Introspection metadata attached to every bound function.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionMetadata {
    /// Registry name.
    pub name: String,
    /// Declared arity.
    pub arity: Arity,
    /// Configuration class named by the descriptor, resolved or not.
    pub options_class: Option<String>,
    /// Whether the descriptor requires a configuration value.
    pub options_required: bool,
}

impl From<&FunctionDescriptor> for FunctionMetadata {
    fn from(d: &FunctionDescriptor) -> Self {
        Self {
            name: d.name.clone(),
            arity: d.arity,
            options_class: d.options_class.clone(),
            options_required: d.options_required,
        }
    }
}

/// A callable synthesized from one [`FunctionDescriptor`].
///
/// Holds nothing from previous calls; calling it from several threads at
/// once is fine.
pub struct ComputeFunction {
    exposed_name: String,
    descriptor: FunctionDescriptor,
    metadata: FunctionMetadata,
    options: Option<Arc<dyn OptionsClass>>,
    signature: Signature,
    doc: String,
}

impl ComputeFunction {
    /// Bind `descriptor` under `exposed_name`.
    ///
    /// `options` is the resolved configuration class, `None` when the
    /// function takes none or its class is unknown.
    pub fn new(
        exposed_name: impl Into<String>,
        descriptor: FunctionDescriptor,
        options: Option<Arc<dyn OptionsClass>>,
        addendum: Option<&str>,
    ) -> Self {
        let (fixed, var_arg) = descriptor.split_arg_names();
        let signature = Signature::synthesize(&fixed, var_arg, options.as_deref());
        let doc = doc::assemble(&descriptor, options.as_deref(), addendum);
        Self {
            exposed_name: exposed_name.into(),
            metadata: FunctionMetadata::from(&descriptor),
            descriptor,
            options,
            signature,
            doc,
        }
    }

    /// Name this function is exposed under.
    pub fn exposed_name(&self) -> &str {
        &self.exposed_name
    }

    /// Registry name; this is what gets dispatched.
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    /// Introspection metadata.
    pub fn metadata(&self) -> &FunctionMetadata {
        &self.metadata
    }

    /// The descriptor this function was built from.
    pub fn descriptor(&self) -> &FunctionDescriptor {
        &self.descriptor
    }

    /// Parameter signature.
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Help text.
    pub fn doc(&self) -> &str {
        &self.doc
    }

    /// The resolved configuration class, if any.
    pub fn options_class(&self) -> Option<&dyn OptionsClass> {
        self.options.as_deref()
    }

    /// Validate `args`, resolve the configuration value and dispatch.
    ///
    /// Nothing reaches `engine` unless every check passes.
    pub fn call(&self, engine: &dyn KernelEngine, args: CallArgs) -> Result<Datum, BindError> {
        let CallArgs {
            mut data,
            mut option_args,
            option_kwargs,
            options,
            pool,
        } = args;

        self.check_arity(data.len())?;
        let arity = self.metadata.arity;
        if self.options.is_some() && !arity.is_variadic && data.len() > arity.num_args {
            let surplus = data.split_off(arity.num_args);
            let mut leading: Vec<_> = surplus.iter().map(Datum::to_json).collect();
            leading.append(&mut option_args);
            option_args = leading;
        }

        ensure_exclusive(
            &self.exposed_name,
            options.is_some(),
            !option_args.is_empty() || !option_kwargs.is_empty(),
        )?;
        self.signature.check(
            &self.exposed_name,
            option_args.len(),
            option_kwargs.keys().map(String::as_str),
        )?;

        let resolved = resolve_options(
            &self.exposed_name,
            self.options.as_deref(),
            options,
            option_args,
            option_kwargs,
        )?;
        call_function(
            engine,
            &self.descriptor.name,
            &data,
            resolved.as_deref(),
            pool.as_deref(),
        )
    }

    /// Fixed arity without options must match exactly; otherwise the data
    /// count must reach the declared arity.
    fn check_arity(&self, given: usize) -> Result<(), BindError> {
        let arity = self.metadata.arity;
        let ok = if arity.is_variadic || self.options.is_some() {
            given >= arity.num_args
        } else {
            given == arity.num_args
        };
        if ok {
            Ok(())
        } else {
            Err(BindError::Arity {
                function: self.exposed_name.clone(),
                expected: arity,
                given,
            })
        }
    }
}

impl fmt::Debug for ComputeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComputeFunction")
            .field("exposed_name", &self.exposed_name)
            .field("metadata", &self.metadata)
            .field("signature", &self.signature.to_string())
            .finish()
    }
}

impl fmt::Display for ComputeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.exposed_name, self.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compute_core::options::{IndexOptions, RoundMode, RoundOptions, TakeOptions};
    use compute_core::test_utils::{RecordingEngine, standard_descriptors};
    use compute_core::{Array, FunctionKind, OptionsCatalog, OptionsError, Scalar, class_of};

    fn bind(name: &str) -> ComputeFunction {
        let descriptor = standard_descriptors()
            .into_iter()
            .find(|d| d.name == name)
            .unwrap();
        let class = descriptor
            .options_class
            .as_deref()
            .and_then(|c| OptionsCatalog::standard().get(c));
        ComputeFunction::new(name, descriptor, class, None)
    }

    fn float(values: &[f64]) -> Array {
        Array::float64(values.iter().copied().map(Some))
    }

    #[test]
    fn metadata_mirrors_descriptor() {
        let f = bind("round");
        assert_eq!(
            *f.metadata(),
            FunctionMetadata {
                name: "round".into(),
                arity: Arity::unary(),
                options_class: Some("RoundOptions".into()),
                options_required: false,
            }
        );
        assert_eq!(
            f.to_string(),
            "round(x, /, ndigits=0, round_mode='half_to_even', *, options=None, memory_pool=None)"
        );
    }

    #[test]
    fn exact_arity_without_options() {
        let engine = RecordingEngine::reference();
        let f = bind("add");
        let one = CallArgs::new().arg(Array::int64([Some(1)]));
        let three = one.clone().arg(Array::int64([Some(1)])).arg(Array::int64([Some(1)]));
        assert!(matches!(f.call(&engine, one), Err(BindError::Arity { given: 1, .. })));
        assert!(matches!(f.call(&engine, three), Err(BindError::Arity { given: 3, .. })));
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn surplus_data_becomes_option_positionals() {
        let engine = RecordingEngine::reference();
        let f = bind("round");
        let args = CallArgs::new()
            .arg(float(&[1.234]))
            .arg(Scalar::int64(1))
            .option_kwarg("round_mode", "up");
        f.call(&engine, args).unwrap();
        let options = engine.last().unwrap().options.unwrap();
        let round = options.downcast_ref::<RoundOptions>().unwrap();
        assert_eq!((round.ndigits, round.round_mode), (1, RoundMode::Up));
        assert_eq!(engine.last().unwrap().args.len(), 1);
    }

    #[test]
    fn index_value_from_data_keyword_or_mapping() {
        let engine = RecordingEngine::reference();
        let f = bind("index");
        let letters = || Array::utf8([Some("a"), Some("b"), Some("c")]);
        let calls = [
            CallArgs::new().arg(letters()).arg(Scalar::utf8("c")),
            CallArgs::new().arg(letters()).option_kwarg("value", "c"),
            CallArgs::new()
                .arg(letters())
                .options_value(serde_json::json!({"value": "c"})),
            CallArgs::new().arg(letters()).options(IndexOptions {
                value: Scalar::utf8("c"),
            }),
        ];
        for args in calls {
            assert_eq!(f.call(&engine, args).unwrap(), Datum::from(Scalar::int64(2)));
        }
        let records = engine.calls();
        assert!(records.iter().all(|r| r.args.len() == 1));
        let expected = records[3].options.clone().unwrap();
        for record in &records[..3] {
            assert!(*record.options.clone().unwrap() == *expected);
        }
    }

    #[test]
    fn data_split_follows_declared_arity() {
        let descriptor = FunctionDescriptor::new("take", FunctionKind::Vector, Arity::binary())
            .with_options("TakeOptions", false);
        let f = ComputeFunction::new("take", descriptor, Some(class_of::<TakeOptions>()), None);
        let engine = RecordingEngine::reference();
        let args = CallArgs::with_data([Array::int64([Some(5), Some(6)]), Array::int64([Some(1)])]);
        assert_eq!(f.call(&engine, args).unwrap(), Datum::from(Array::int64([Some(6)])));

        let args = CallArgs::with_data([Array::int64([Some(5)]), Array::int64([Some(0)])])
            .option_arg(false);
        f.call(&engine, args).unwrap();
        let options = engine.last().unwrap().options.unwrap();
        assert_eq!(
            options.downcast_ref::<TakeOptions>(),
            Some(&TakeOptions { boundscheck: false })
        );
    }

    #[test]
    fn variadic_rejects_option_positionals() {
        let engine = RecordingEngine::reference();
        let f = bind("max_element_wise");
        let args = CallArgs::with_data([float(&[1.0]), float(&[2.0])]).option_arg(false);
        let err = f.call(&engine, args).unwrap_err();
        assert!(matches!(
            err,
            BindError::OptionsConstruction {
                source: OptionsError::TooManyPositional { max: 0, given: 1, .. },
                ..
            }
        ));
        assert!(engine.calls().is_empty());
    }

    #[test]
    fn ready_options_reach_the_engine_unchanged() {
        let engine = RecordingEngine::reference();
        let f = bind("take");
        let args = CallArgs::new()
            .arg(Array::int64([Some(1), Some(2)]))
            .arg(Array::int64([Some(0)]))
            .options(TakeOptions { boundscheck: false });
        f.call(&engine, args).unwrap();
        let call = engine.last().unwrap();
        assert_eq!(
            call.options.unwrap().downcast_ref::<TakeOptions>(),
            Some(&TakeOptions { boundscheck: false })
        );
    }

    #[test]
    fn variadic_takes_all_positionals_as_data() {
        let engine = RecordingEngine::reference();
        let f = bind("max_element_wise");
        let args = CallArgs::with_data([float(&[1.0]), float(&[3.0]), float(&[2.0])])
            .option_kwarg("skip_nulls", false);
        let out = f.call(&engine, args).unwrap();
        assert_eq!(out, Datum::from(float(&[3.0])));
        assert_eq!(engine.last().unwrap().args.len(), 3);

        let err = f.call(&engine, CallArgs::new()).unwrap_err();
        assert!(matches!(err, BindError::Arity { given: 0, .. }));
    }

    #[test]
    fn unknown_options_class_binds_without_options() {
        let descriptor = standard_descriptors()
            .into_iter()
            .find(|d| d.name == "strptime")
            .unwrap();
        let f = ComputeFunction::new("strptime", descriptor, None, None);
        assert_eq!(f.metadata().options_class.as_deref(), Some("StrptimeOptions"));
        assert!(f.options_class().is_none());
        assert!(f.signature().get("options").is_none());

        let engine = RecordingEngine::reference();
        let err = f
            .call(
                &engine,
                CallArgs::new()
                    .arg(Array::utf8([Some("2020-01-01")]))
                    .option_kwarg("format", "%Y"),
            )
            .unwrap_err();
        assert!(err.is_invalid_options());
    }

    #[test]
    fn conflict_is_detected_before_shape_checks() {
        let engine = RecordingEngine::reference();
        let f = bind("take");
        let args = CallArgs::with_data([Array::int64([Some(1)]), Array::int64([Some(0)])])
            .option_kwarg("not_a_field", 1)
            .options(TakeOptions::default());
        assert!(matches!(
            f.call(&engine, args),
            Err(BindError::ConflictingOptions { .. })
        ));
    }
}
