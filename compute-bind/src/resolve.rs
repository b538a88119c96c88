//! Configuration resolution: turn what the caller supplied into one value.

use compute_core::{FunctionOptions, OptionsClass};
use serde_json::{Map, Value as Json};

use crate::call::OptionsInput;
use crate::error::BindError;

/// Resolve the configuration value for one call of `function`.
///
/// - Loose constructor arguments build a fresh value, unless a ready value
///   was also supplied.
/// - A mapping builds a value from its named fields.
/// - A ready value of the right class passes through unchanged.
/// - Nothing supplied resolves to `None`.
///
/// A function without a configuration class accepts no configuration at all.
pub fn resolve_options(
    function: &str,
    class: Option<&dyn OptionsClass>,
    explicit: Option<OptionsInput>,
    positional: Vec<Json>,
    keyword: Map<String, Json>,
) -> Result<Option<Box<dyn FunctionOptions>>, BindError> {
    let has_loose = !positional.is_empty() || !keyword.is_empty();
    ensure_exclusive(function, explicit.is_some(), has_loose)?;

    let Some(class) = class else {
        return match explicit {
            Some(input) => Err(invalid(function, "none", input.describe())),
            None if has_loose => Err(invalid(function, "none", "additional arguments")),
            None => Ok(None),
        };
    };

    if has_loose {
        return construct(function, class, positional, keyword).map(Some);
    }
    match explicit {
        None => Ok(None),
        Some(OptionsInput::Mapping(fields)) => {
            construct(function, class, Vec::new(), fields).map(Some)
        }
        Some(OptionsInput::Ready(options)) if class.is_instance(options.as_ref()) => {
            Ok(Some(options))
        }
        Some(other) => Err(invalid(function, class.name(), other.describe())),
    }
}

/// Reject a ready value combined with loose constructor arguments.
pub(crate) fn ensure_exclusive(
    function: &str,
    has_explicit: bool,
    has_loose: bool,
) -> Result<(), BindError> {
    if has_explicit && has_loose {
        return Err(BindError::ConflictingOptions {
            function: function.to_owned(),
        });
    }
    Ok(())
}

fn construct(
    function: &str,
    class: &dyn OptionsClass,
    positional: Vec<Json>,
    keyword: Map<String, Json>,
) -> Result<Box<dyn FunctionOptions>, BindError> {
    class
        .construct(positional, keyword)
        .map_err(|source| BindError::OptionsConstruction {
            function: function.to_owned(),
            source,
        })
}

fn invalid(function: &str, expected: &str, actual: impl Into<String>) -> BindError {
    BindError::InvalidOptions {
        function: function.to_owned(),
        expected: expected.to_owned(),
        actual: actual.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compute_core::options::{NullOptions, RoundMode, RoundOptions, TakeOptions};
    use compute_core::{OptionsError, class_of};
    use serde_json::json;

    fn kwargs(v: Json) -> Map<String, Json> {
        match v {
            Json::Object(m) => m,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn nothing_supplied_resolves_to_none() {
        let class = class_of::<RoundOptions>();
        let resolved =
            resolve_options("round", Some(class.as_ref()), None, vec![], Map::new()).unwrap();
        assert!(resolved.is_none());
    }

    #[test]
    fn loose_arguments_construct() {
        let class = class_of::<RoundOptions>();
        let resolved = resolve_options(
            "round",
            Some(class.as_ref()),
            None,
            vec![json!(2)],
            kwargs(json!({"round_mode": "down"})),
        )
        .unwrap()
        .unwrap();
        let round = resolved.downcast_ref::<RoundOptions>().unwrap();
        assert_eq!((round.ndigits, round.round_mode), (2, RoundMode::Down));
    }

    #[test]
    fn ready_and_loose_conflict() {
        let class = class_of::<TakeOptions>();
        let err = resolve_options(
            "take",
            Some(class.as_ref()),
            Some(OptionsInput::Ready(Box::new(TakeOptions::default()))),
            vec![],
            kwargs(json!({"boundscheck": false})),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BindError::ConflictingOptions { ref function } if function == "take"
        ));
    }

    #[test]
    fn ready_value_passes_through_unchanged() {
        let class = class_of::<TakeOptions>();
        let ready = TakeOptions { boundscheck: false };
        let resolved = resolve_options(
            "take",
            Some(class.as_ref()),
            Some(OptionsInput::Ready(Box::new(ready.clone()))),
            vec![],
            Map::new(),
        )
        .unwrap()
        .unwrap();
        assert_eq!(resolved.downcast_ref::<TakeOptions>(), Some(&ready));
    }

    #[test]
    fn wrong_ready_type_names_expected_and_actual() {
        let class = class_of::<TakeOptions>();
        let err = resolve_options(
            "take",
            Some(class.as_ref()),
            Some(OptionsInput::Ready(Box::new(NullOptions::default()))),
            vec![],
            Map::new(),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "function 'take' expected a TakeOptions parameter, got NullOptions"
        );
    }

    #[test]
    fn bad_mapping_is_a_construction_error() {
        let class = class_of::<TakeOptions>();
        let err = resolve_options(
            "take",
            Some(class.as_ref()),
            Some(OptionsInput::Mapping(kwargs(json!({"bounds": true})))),
            vec![],
            Map::new(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            BindError::OptionsConstruction {
                source: OptionsError::UnexpectedKeyword { .. },
                ..
            }
        ));
    }

    #[test]
    fn options_on_options_less_function() {
        let err = resolve_options("add", None, None, vec![json!(1)], Map::new()).unwrap_err();
        assert!(matches!(
            err,
            BindError::InvalidOptions { ref expected, .. } if expected == "none"
        ));

        let err = resolve_options(
            "add",
            None,
            Some(OptionsInput::Other(json!("x"))),
            vec![],
            Map::new(),
        )
        .unwrap_err();
        assert!(err.is_invalid_options());
    }
}
