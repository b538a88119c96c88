//! Parameter signatures synthesized from descriptor metadata.

use std::fmt;

use compute_core::{OptionsClass, OptionsError};
use serde::Serialize;
use serde_json::Value as Json;

use crate::error::BindError;

/// Name of the ready-configuration parameter.
pub const OPTIONS_PARAM: &str = "options";
/// Name of the allocator-selection parameter.
pub const MEMORY_POOL_PARAM: &str = "memory_pool";

/// How a parameter may be passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Positional only (data arguments).
    PositionalOnly,
    /// Zero or more trailing positionals.
    VarPositional,
    /// Positional or by name (configuration fields of fixed-arity functions).
    PositionalOrKeyword,
    /// By name only.
    KeywordOnly,
}

/// One entry of a [`Signature`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Passing convention.
    pub kind: ParameterKind,
    /// Default value; `None` when the parameter is required.
    pub default: Option<Json>,
}

impl Parameter {
    fn new(name: impl Into<String>, kind: ParameterKind, default: Option<Json>) -> Self {
        Self {
            name: name.into(),
            kind,
            default,
        }
    }

    fn accepts_keyword(&self) -> bool {
        matches!(
            self.kind,
            ParameterKind::PositionalOrKeyword | ParameterKind::KeywordOnly
        )
    }
}

/// The introspectable parameter list of a bound function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signature {
    parameters: Vec<Parameter>,
    #[serde(skip)]
    options_class: Option<&'static str>,
}

impl Signature {
    /// Build a signature.
    ///
    /// Data arguments come first, positional only, then the variadic tail.
    /// Configuration fields follow; they become keyword only after a
    /// variadic tail. `options` and `memory_pool` close the list, the
    /// former only when there is a configuration class.
    pub fn synthesize(
        arg_names: &[&str],
        var_arg: Option<&str>,
        options: Option<&dyn OptionsClass>,
    ) -> Self {
        let mut parameters: Vec<Parameter> = arg_names
            .iter()
            .map(|name| Parameter::new(*name, ParameterKind::PositionalOnly, None))
            .collect();
        if let Some(name) = var_arg {
            parameters.push(Parameter::new(name, ParameterKind::VarPositional, None));
        }
        if let Some(class) = options {
            let field_kind = if var_arg.is_some() {
                ParameterKind::KeywordOnly
            } else {
                ParameterKind::PositionalOrKeyword
            };
            for field in class.fields() {
                parameters.push(Parameter::new(field.name, field_kind, field.default));
            }
            parameters.push(Parameter::new(
                OPTIONS_PARAM,
                ParameterKind::KeywordOnly,
                Some(Json::Null),
            ));
        }
        parameters.push(Parameter::new(
            MEMORY_POOL_PARAM,
            ParameterKind::KeywordOnly,
            Some(Json::Null),
        ));
        Self {
            parameters,
            options_class: options.map(|class| class.name()),
        }
    }

    /// All parameters in order.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }

    /// Names of the positional-only parameters.
    pub fn positional_names(&self) -> impl Iterator<Item = &str> {
        self.parameters
            .iter()
            .filter(|p| p.kind == ParameterKind::PositionalOnly)
            .map(|p| p.name.as_str())
    }

    /// Whether there is a variadic tail.
    pub fn is_variadic(&self) -> bool {
        self.parameters
            .iter()
            .any(|p| p.kind == ParameterKind::VarPositional)
    }

    /// Check the configuration part of a call: `option_positional`
    /// constructor positionals (data already split off at the declared
    /// arity) and the given constructor keywords.
    ///
    /// A variadic signature takes no constructor positionals. `options` and
    /// `memory_pool` are passed out of band and are not accepted as
    /// constructor keywords.
    pub fn check<'k>(
        &self,
        function: &str,
        option_positional: usize,
        keywords: impl IntoIterator<Item = &'k str>,
    ) -> Result<(), BindError> {
        let optional = if self.is_variadic() {
            0
        } else {
            self.count(ParameterKind::PositionalOrKeyword)
        };
        if option_positional > optional {
            return Err(self.too_many(function, optional, option_positional));
        }
        let by_position: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.kind == ParameterKind::PositionalOrKeyword)
            .take(option_positional)
            .map(|p| p.name.as_str())
            .collect();

        for keyword in keywords {
            let known = keyword != OPTIONS_PARAM
                && keyword != MEMORY_POOL_PARAM
                && self
                    .get(keyword)
                    .is_some_and(Parameter::accepts_keyword);
            let error = match self.options_class {
                None => BindError::InvalidOptions {
                    function: function.to_owned(),
                    expected: "none".to_owned(),
                    actual: format!("keyword argument '{keyword}'"),
                },
                Some(class) if !known => BindError::OptionsConstruction {
                    function: function.to_owned(),
                    source: OptionsError::UnexpectedKeyword {
                        class,
                        field: keyword.to_owned(),
                    },
                },
                Some(class) if by_position.iter().any(|p| *p == keyword) => {
                    BindError::OptionsConstruction {
                        function: function.to_owned(),
                        source: OptionsError::DuplicateArgument {
                            class,
                            field: keyword.to_owned(),
                        },
                    }
                }
                Some(_) => continue,
            };
            return Err(error);
        }
        Ok(())
    }

    fn count(&self, kind: ParameterKind) -> usize {
        self.parameters.iter().filter(|p| p.kind == kind).count()
    }

    fn too_many(&self, function: &str, max: usize, given: usize) -> BindError {
        match self.options_class {
            Some(class) => BindError::OptionsConstruction {
                function: function.to_owned(),
                source: OptionsError::TooManyPositional { class, max, given },
            },
            None => BindError::InvalidOptions {
                function: function.to_owned(),
                expected: "none".to_owned(),
                actual: format!("{given} positional argument(s) beyond the data arguments"),
            },
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::with_capacity(self.parameters.len() + 2);
        let mut previous = None;
        for p in &self.parameters {
            if previous == Some(ParameterKind::PositionalOnly)
                && p.kind != ParameterKind::PositionalOnly
            {
                parts.push("/".to_owned());
            }
            let opens_keywords = p.kind == ParameterKind::KeywordOnly
                && !matches!(
                    previous,
                    Some(ParameterKind::KeywordOnly | ParameterKind::VarPositional)
                );
            if opens_keywords {
                parts.push("*".to_owned());
            }
            parts.push(match (&p.kind, &p.default) {
                (ParameterKind::VarPositional, _) => format!("*{}", p.name),
                (_, Some(default)) => format!("{}={}", p.name, render_default(default)),
                (_, None) => p.name.clone(),
            });
            previous = Some(p.kind);
        }
        if previous == Some(ParameterKind::PositionalOnly) {
            parts.push("/".to_owned());
        }
        write!(f, "({})", parts.join(", "))
    }
}

fn render_default(value: &Json) -> String {
    match value {
        Json::Null => "None".to_owned(),
        Json::Bool(true) => "True".to_owned(),
        Json::Bool(false) => "False".to_owned(),
        Json::String(s) => format!("'{s}'"),
        other => other.to_string(),
    }
}
