//! The public namespace: every registry function, bound once.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, OnceLock};

use compute_core::{
    Datum, DocAddenda, FunctionKind, FunctionRegistry, KernelEngine, NoAddenda, OptionsCatalog,
};
use serde::{Deserialize, Serialize};

use crate::call::CallArgs;
use crate::error::{BindError, BindWarning};
use crate::function::ComputeFunction;

/// Naming and filtering rules applied while building a [`Namespace`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceConfig {
    /// Registry name to alternate exposed name, for names that collide with
    /// reserved identifiers. Both names are bound.
    pub rewrites: BTreeMap<String, String>,
    /// Function kinds left out of the namespace.
    pub excluded_kinds: Vec<FunctionKind>,
}

impl Default for NamespaceConfig {
    fn default() -> Self {
        Self {
            rewrites: BTreeMap::from([
                ("and".to_owned(), "and_".to_owned()),
                ("or".to_owned(), "or_".to_owned()),
            ]),
            excluded_kinds: vec![FunctionKind::HashAggregate],
        }
    }
}

impl NamespaceConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The name `registry_name` is exposed under.
    pub fn exposed_name<'a>(&'a self, registry_name: &'a str) -> &'a str {
        self.rewrites
            .get(registry_name)
            .map_or(registry_name, String::as_str)
    }

    /// Whether functions of `kind` are left out.
    pub fn excludes(&self, kind: FunctionKind) -> bool {
        self.excluded_kinds.contains(&kind)
    }
}

/// Builds a [`Namespace`] from a registry snapshot.
pub struct NamespaceBuilder<'a> {
    registry: &'a dyn FunctionRegistry,
    engine: Arc<dyn KernelEngine>,
    catalog: OptionsCatalog,
    addenda: &'a dyn DocAddenda,
    config: NamespaceConfig,
}

impl<'a> NamespaceBuilder<'a> {
    /// Start with the standard options catalog, no addenda and the default config.
    pub fn new(registry: &'a dyn FunctionRegistry, engine: Arc<dyn KernelEngine>) -> Self {
        Self {
            registry,
            engine,
            catalog: OptionsCatalog::standard(),
            addenda: &NoAddenda,
            config: NamespaceConfig::default(),
        }
    }

    /// Resolve configuration classes from `catalog`.
    #[must_use]
    pub fn catalog(mut self, catalog: OptionsCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Append hand-written documentation from `addenda`.
    #[must_use]
    pub fn addenda(mut self, addenda: &'a dyn DocAddenda) -> Self {
        self.addenda = addenda;
        self
    }

    /// Use `config` for naming and filtering.
    #[must_use]
    pub fn config(mut self, config: NamespaceConfig) -> Self {
        self.config = config;
        self
    }

    /// Bind every registry function.
    ///
    /// Fails on the first exposed name that is already taken, or when the
    /// registry lists a name it cannot describe.
    pub fn build(self) -> Result<Namespace, BindError> {
        let registry_names = self.registry.list_functions();
        let mut functions: HashMap<String, Arc<ComputeFunction>> =
            HashMap::with_capacity(registry_names.len() * 2);
        let mut names = Vec::with_capacity(registry_names.len());
        let mut warnings = Vec::new();

        for registry_name in &registry_names {
            let descriptor = self
                .registry
                .get_function(registry_name)
                .ok_or_else(|| BindError::FunctionNotFound(registry_name.clone()))?;
            if self.config.excludes(descriptor.kind) {
                tracing::trace!(
                    function = %registry_name,
                    kind = %descriptor.kind,
                    "skipping excluded kind"
                );
                continue;
            }

            let exposed = self.config.exposed_name(registry_name).to_owned();
            let mut bound_names = vec![registry_name.clone()];
            if exposed != *registry_name {
                bound_names.push(exposed.clone());
            }
            if let Some(taken) = bound_names.iter().find(|n| functions.contains_key(*n)) {
                return Err(BindError::DuplicateName {
                    name: taken.clone(),
                    function: registry_name.clone(),
                });
            }

            let options = match descriptor.options_class.as_deref() {
                None => None,
                Some(class) => {
                    let resolved = self.catalog.get(class);
                    if resolved.is_none() {
                        tracing::warn!(
                            function = %registry_name,
                            class,
                            "options class not exposed; binding without options"
                        );
                        warnings.push(BindWarning::UnknownOptionsClass {
                            function: registry_name.clone(),
                            class: class.to_owned(),
                        });
                    }
                    resolved
                }
            };

            let addendum = self.addenda.lookup(registry_name);
            let function = Arc::new(ComputeFunction::new(
                exposed,
                descriptor,
                options,
                addendum.as_deref(),
            ));
            for name in bound_names {
                functions.insert(name.clone(), Arc::clone(&function));
                names.push(name);
            }
        }

        tracing::debug!(
            functions = names.len(),
            warnings = warnings.len(),
            "compute namespace built"
        );
        Ok(Namespace {
            engine: self.engine,
            functions,
            names,
            registry_names,
            warnings,
        })
    }
}

/// Every bound function by exposed name, plus the adapters.
///
/// Immutable once built.
pub struct Namespace {
    engine: Arc<dyn KernelEngine>,
    functions: HashMap<String, Arc<ComputeFunction>>,
    names: Vec<String>,
    registry_names: Vec<String>,
    warnings: Vec<BindWarning>,
}

impl Namespace {
    /// Names of the hand-written adapters, available as methods.
    pub const ADAPTERS: &'static [&'static str] = &[
        "cast",
        "index",
        "take",
        "fill_null",
        "top_k_unstable",
        "bottom_k_unstable",
    ];

    /// Start building a namespace.
    pub fn builder(
        registry: &dyn FunctionRegistry,
        engine: Arc<dyn KernelEngine>,
    ) -> NamespaceBuilder<'_> {
        NamespaceBuilder::new(registry, engine)
    }

    /// Build with the standard catalog, no addenda and the default config.
    pub fn build(
        registry: &dyn FunctionRegistry,
        engine: Arc<dyn KernelEngine>,
    ) -> Result<Self, BindError> {
        NamespaceBuilder::new(registry, engine).build()
    }

    /// Look up a bound function by exposed or registry name.
    pub fn get(&self, name: &str) -> Option<Arc<ComputeFunction>> {
        self.functions.get(name).cloned()
    }

    /// Whether `name` is bound.
    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Every bound name, in registry order. A rewritten function appears
    /// under its registry name followed by its exposed name.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Registry names as listed at build time, excluded kinds included.
    pub fn list_functions(&self) -> &[String] {
        &self.registry_names
    }

    /// Number of bound names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing is bound.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Non-fatal findings from the build.
    pub fn warnings(&self) -> &[BindWarning] {
        &self.warnings
    }

    /// The kernel engine calls are dispatched to.
    pub fn engine(&self) -> &Arc<dyn KernelEngine> {
        &self.engine
    }

    /// Call a bound function by name.
    pub fn call(&self, name: &str, args: CallArgs) -> Result<Datum, BindError> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| BindError::FunctionNotFound(name.to_owned()))?;
        function.call(self.engine.as_ref(), args)
    }
}

impl fmt::Debug for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Namespace")
            .field("names", &self.names)
            .field("warnings", &self.warnings)
            .finish()
    }
}

static GLOBAL_NAMESPACE: OnceLock<Namespace> = OnceLock::new();

/// Install the process-wide namespace.
///
/// Only the first install takes effect; later calls log a warning, drop
/// their argument and return the namespace already installed.
pub fn install(namespace: Namespace) -> &'static Namespace {
    let mut installed = false;
    let global = GLOBAL_NAMESPACE.get_or_init(|| {
        installed = true;
        namespace
    });
    if !installed {
        tracing::warn!("compute namespace already installed; keeping the existing one");
    }
    global
}

/// The process-wide namespace, if one was installed.
pub fn global() -> Option<&'static Namespace> {
    GLOBAL_NAMESPACE.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use compute_core::test_utils::{InMemoryRegistry, ReferenceEngine, StaticAddenda};
    use compute_core::{Arity, Array, FunctionDescriptor};

    fn standard() -> Namespace {
        Namespace::build(
            &InMemoryRegistry::with_standard_functions(),
            Arc::new(ReferenceEngine::new()),
        )
        .unwrap()
    }

    #[test]
    fn hash_aggregates_are_skipped() {
        let ns = standard();
        assert!(!ns.contains("hash_sum"));
        assert!(ns.list_functions().iter().any(|n| n == "hash_sum"));
        assert!(ns.contains("sum"));
    }

    #[test]
    fn rewritten_names_share_one_function() {
        let ns = standard();
        let and = ns.get("and").unwrap();
        let and_ = ns.get("and_").unwrap();
        assert!(Arc::ptr_eq(&and, &and_));
        assert_eq!(and.exposed_name(), "and_");
        assert_eq!(and.name(), "and");
        let pos = |n: &str| ns.names().iter().position(|x| x == n).unwrap();
        assert_eq!(pos("and") + 1, pos("and_"));
    }

    #[test]
    fn unknown_options_class_is_a_warning() {
        let ns = standard();
        assert_eq!(
            ns.warnings(),
            &[BindWarning::UnknownOptionsClass {
                function: "strptime".into(),
                class: "StrptimeOptions".into(),
            }]
        );
        assert!(ns.contains("strptime"));
    }

    #[test]
    fn duplicate_exposed_name_fails_fast() {
        let registry = InMemoryRegistry::from(vec![
            FunctionDescriptor::new("and", FunctionKind::Scalar, Arity::binary()),
            FunctionDescriptor::new("and_", FunctionKind::Scalar, Arity::binary()),
        ]);
        let err = Namespace::build(&registry, Arc::new(ReferenceEngine::new())).unwrap_err();
        assert!(matches!(
            err,
            BindError::DuplicateName { ref name, ref function }
                if name == "and_" && function == "and_"
        ));
    }

    #[test]
    fn config_controls_rewrites_and_exclusions() {
        let config = NamespaceConfig::from_json(
            r#"{"rewrites": {"sum": "total"}, "excluded_kinds": ["vector"]}"#,
        )
        .unwrap();
        let ns = Namespace::builder(
            &InMemoryRegistry::with_standard_functions(),
            Arc::new(ReferenceEngine::new()),
        )
        .config(config)
        .build()
        .unwrap();
        assert!(ns.contains("total"));
        assert!(ns.contains("hash_sum"));
        assert!(!ns.contains("take"));
        assert!(!ns.contains("and_"));
    }

    #[test]
    fn config_defaults_fill_missing_fields() {
        let config = NamespaceConfig::from_json("{}").unwrap();
        assert_eq!(config, NamespaceConfig::default());
        assert_eq!(config.exposed_name("or"), "or_");
        assert_eq!(config.exposed_name("xor"), "xor");
    }

    #[test]
    fn addenda_are_appended() {
        let addenda = StaticAddenda::standard();
        let ns = Namespace::builder(
            &InMemoryRegistry::with_standard_functions(),
            Arc::new(ReferenceEngine::new()),
        )
        .addenda(&addenda)
        .build()
        .unwrap();
        assert!(ns.get("coalesce").unwrap().doc().ends_with("[2, 1]\n"));
    }

    #[test]
    fn call_by_name() {
        let ns = standard();
        let out = ns
            .call(
                "or_",
                CallArgs::new()
                    .arg(Array::boolean([Some(true), Some(false)]))
                    .arg(Array::boolean([Some(false), Some(false)])),
            )
            .unwrap();
        assert_eq!(out, Datum::from(Array::boolean([Some(true), Some(false)])));
        assert!(matches!(
            ns.call("hash_sum", CallArgs::new()),
            Err(BindError::FunctionNotFound(_))
        ));
    }
}
