//! End-to-end binding properties across the data model, the binding layer and
//! the reference kernel engine.

use std::sync::Arc;

use compute::prelude::*;
use compute_bind::BindWarning;
use compute_core::options::{SelectKOptions, SortOrder, TakeOptions};
use compute_core::test_utils::{StaticAddenda, standard_descriptors};
use compute_core::{FunctionOptions, Value};
use serde_json::json;

fn standard() -> (Namespace, Arc<RecordingEngine>) {
    let engine = Arc::new(RecordingEngine::reference());
    let registry = InMemoryRegistry::with_standard_functions();
    let ns = Namespace::build(&registry, engine.clone()).unwrap();
    (ns, engine)
}

fn indices(out: &Datum) -> Vec<usize> {
    out.as_array()
        .unwrap()
        .values()
        .iter()
        .map(|v| v.as_ref().and_then(Value::as_i64).unwrap() as usize)
        .collect()
}

#[test]
fn every_registry_function_is_bound_with_matching_metadata() {
    let (ns, _) = standard();
    for descriptor in standard_descriptors() {
        if descriptor.kind == FunctionKind::HashAggregate {
            assert!(!ns.contains(&descriptor.name), "{} should be skipped", descriptor.name);
            continue;
        }
        let function = ns.get(&descriptor.name).unwrap();
        let metadata = function.metadata();
        assert_eq!(metadata.name, descriptor.name);
        assert_eq!(metadata.arity, descriptor.arity);
        assert_eq!(metadata.options_class, descriptor.options_class);
        assert_eq!(metadata.options_required, descriptor.options_required);
    }
}

#[test]
fn reserved_names_resolve_to_the_same_wrapper() {
    let (ns, _) = standard();
    for (name, alias) in [("and", "and_"), ("or", "or_")] {
        assert!(Arc::ptr_eq(&ns.get(name).unwrap(), &ns.get(alias).unwrap()));
    }
}

#[test]
fn mapping_dispatches_like_a_ready_value() {
    let (ns, engine) = standard();
    let data = Array::int64([Some(3), Some(1), Some(2)]);
    let indices = Array::int64([Some(2), Some(0)]);

    ns.call(
        "take",
        CallArgs::with_data([data.clone(), indices.clone()])
            .options_value(json!({"boundscheck": false})),
    )
    .unwrap();
    ns.call(
        "take",
        CallArgs::with_data([data, indices]).options(TakeOptions { boundscheck: false }),
    )
    .unwrap();

    let calls = engine.calls();
    assert_eq!(calls[0].args, calls[1].args);
    let first: &dyn FunctionOptions = calls[0].options.as_deref().unwrap();
    let second: &dyn FunctionOptions = calls[1].options.as_deref().unwrap();
    assert!(first == second);
}

#[test]
fn index_adjusts_for_start_offset() {
    let (ns, _) = standard();
    let letters = Array::utf8([Some("a"), Some("b"), Some("c"), Some("d")]);

    let found = ns.index(letters.clone(), "c", Some(1), None, None).unwrap();
    assert_eq!(found, Scalar::int64(2));

    let missing = ns.index(letters.clone(), "z", Some(1), None, None).unwrap();
    assert_eq!(missing, Scalar::int64(-1));

    let outside_window = ns.index(letters, "d", Some(1), Some(3), None).unwrap();
    assert_eq!(outside_window, Scalar::int64(-1));
}

#[test]
fn index_coerces_the_search_value() {
    let (ns, engine) = standard();
    let small = Array::int8([Some(4), Some(7)]);
    assert_eq!(ns.index(small, 7i64, None, None, None).unwrap(), Scalar::int64(1));
    let call = engine.last().unwrap();
    let options = call.options.unwrap();
    assert_eq!(options.to_fields()["value"]["type"], json!("int8"));
}

#[test]
fn top_k_returns_non_null_indices() {
    let (ns, engine) = standard();
    let values = Array::utf8([Some("a"), Some("b"), Some("c"), None, Some("e"), Some("f")]);
    let out = ns.top_k_unstable(values.clone(), 3, &[], None).unwrap();

    let mut picked = indices(&out);
    assert_eq!(picked.len(), 3);
    assert!(picked.iter().all(|&i| values.values()[i].is_some()));
    picked.sort_unstable();
    assert_eq!(picked, vec![2, 4, 5]);

    let options = engine.last().unwrap().options.unwrap();
    let select = options.downcast_ref::<SelectKOptions>().unwrap();
    assert_eq!(select.sort_keys.len(), 1);
    assert_eq!(select.sort_keys[0].name, "dummy");
    assert_eq!(select.sort_keys[0].order, SortOrder::Descending);
}

#[test]
fn bottom_k_on_a_table_uses_caller_keys() {
    let (ns, engine) = standard();
    let table = Table::new([
        ("score", Array::int64([Some(5), Some(1), Some(3)])),
        ("name", Array::utf8([Some("x"), Some("y"), Some("z")])),
    ])
    .unwrap();
    let out = ns.bottom_k_unstable(table, 2, &["score"], None).unwrap();
    assert_eq!(indices(&out), vec![1, 2]);

    let options = engine.last().unwrap().options.unwrap();
    let select = options.downcast_ref::<SelectKOptions>().unwrap();
    assert_eq!(select.sort_keys[0].name, "score");
    assert_eq!(select.sort_keys[0].order, SortOrder::Ascending);
}

#[test]
fn fill_null_preserves_element_type() {
    let (ns, _) = standard();
    let out = ns.fill_null(Array::int8([Some(1), Some(2), None, Some(3)]), 5i64).unwrap();
    assert_eq!(out, Datum::from(Array::int8([Some(1), Some(2), Some(5), Some(3)])));
    assert_eq!(out.data_type(), Some(DataType::Int8));
}

#[test]
fn cast_rejects_a_missing_target_type() {
    let (ns, engine) = standard();
    let err = ns.cast(Array::int64([Some(1)]), None, true).unwrap_err();
    assert!(matches!(err, BindError::InvalidArgument { .. }));
    assert!(engine.calls().is_empty());

    let out = ns.cast(Array::int64([Some(1), None]), Some(DataType::Utf8), true).unwrap();
    assert_eq!(out, Datum::from(Array::utf8([Some("1"), None])));
}

#[test]
fn unsafe_cast_truncates_floats() {
    let (ns, _) = standard();
    let floats = Array::float64([Some(1.9), Some(-2.5)]);
    assert!(ns.cast(floats.clone(), Some(DataType::Int64), true).is_err());
    let out = ns.cast(floats, Some(DataType::Int64), false).unwrap();
    assert_eq!(out, Datum::from(Array::int64([Some(1), Some(-2)])));
}

#[test]
fn take_forwards_boundscheck() {
    let (ns, engine) = standard();
    let data = Array::int64([Some(10), Some(20)]);
    let err = ns
        .take(data.clone(), Array::int64([Some(9)]), true, None)
        .unwrap_err();
    assert!(matches!(err, BindError::Kernel(_)));

    ns.take(data, Array::int64([Some(1), None]), false, None).unwrap();
    let options = engine.last().unwrap().options.unwrap();
    assert_eq!(
        options.downcast_ref::<TakeOptions>(),
        Some(&TakeOptions { boundscheck: false })
    );
}

#[test]
fn kernel_failures_pass_through_unchanged() {
    let (ns, _) = standard();
    let err = ns
        .call("strptime", CallArgs::new().arg(Array::utf8([Some("2020")])))
        .unwrap_err();
    match err {
        BindError::Kernel(inner) => assert!(inner.to_string().contains("strptime")),
        other => panic!("expected a kernel error, got {other:?}"),
    }
    assert_eq!(ns.warnings().len(), 1);
    assert!(matches!(ns.warnings()[0], BindWarning::UnknownOptionsClass { .. }));
}

#[test]
fn documentation_and_signatures_are_introspectable() {
    let addenda = StaticAddenda::standard();
    let engine: Arc<dyn KernelEngine> = Arc::new(ReferenceEngine::new());
    let ns = Namespace::builder(&InMemoryRegistry::with_standard_functions(), engine)
        .addenda(&addenda)
        .build()
        .unwrap();

    let round = ns.get("round").unwrap();
    assert_eq!(
        round.signature().to_string(),
        "(x, /, ndigits=0, round_mode='half_to_even', *, options=None, memory_pool=None)"
    );
    assert!(round.doc().contains("options : RoundOptions, optional"));

    let coalesce = ns.get("coalesce").unwrap();
    assert!(coalesce.signature().is_variadic());
    assert!(coalesce.doc().contains("Examples"));
}

#[test]
fn installed_namespace_is_global() {
    let (first, _) = standard();
    let first_len = first.len();
    let installed = compute_bind::install(first);
    assert!(std::ptr::eq(installed, compute_bind::global().unwrap()));

    let (second, _) = standard();
    let again = compute_bind::install(second);
    assert!(std::ptr::eq(installed, again));
    assert_eq!(again.len(), first_len);
}
