//! End-to-end tests for compiling and applying mapping tables
//!
//! These tests exercise the public API the way callers use it: build a
//! shifter once, apply it to documents, inspect the reshaped result.

use serde_json::{json, Value};
use std::cell::Cell;
use treeshift_core::{Error, MappingTable, NodeKind, ShiftOptions, Shifter};

fn apply(table: MappingTable, source: Value) -> Value {
    Shifter::new(table)
        .expect("mapping should compile")
        .apply(&source, ShiftOptions::default())
        .expect("apply should succeed")
}

#[test]
fn test_identity_mapping_copies_subtree() {
    let source = json!({"config": {"servers": [{"host": "a", "ports": [80, 443]}], "debug": null}});
    let result = apply(MappingTable::new().with("config", "config"), source.clone());
    assert_eq!(result, source);
}

#[test]
fn test_rename_and_restructure() {
    let result = apply(
        MappingTable::new()
            .with("user.first_name", "person.name.given")
            .with("user.last_name", "person.name.family")
            .with("user.address.city", "person.city"),
        json!({
            "user": {
                "first_name": "Grace",
                "last_name": "Hopper",
                "address": {"city": "Arlington", "zip": "22201"}
            }
        }),
    );
    assert_eq!(
        result,
        json!({"person": {"name": {"given": "Grace", "family": "Hopper"}, "city": "Arlington"}})
    );
}

#[test]
fn test_flattening_skips_intermediate_levels() {
    let result = apply(
        MappingTable::new().with("a.b.c.d", "x.y"),
        json!({"a": {"b": {"c": {"d": 42}}}}),
    );
    assert_eq!(result, json!({"x": {"y": 42}}));
}

#[test]
fn test_single_leaf_expands_into_nested_destination() {
    let result = apply(MappingTable::new().with("id", "meta.ids.primary"), json!({"id": 7}));
    assert_eq!(result, json!({"meta": {"ids": {"primary": 7}}}));
}

#[test]
fn test_fan_out_preserves_order() {
    let result = apply(
        MappingTable::new().with("orders[].total", "totals[].amount"),
        json!({"orders": [{"total": 3}, {"total": 1}, {"total": 2}]}),
    );
    assert_eq!(
        result,
        json!({"totals": [{"amount": 3}, {"amount": 1}, {"amount": 2}]})
    );
}

#[test]
fn test_fan_out_into_prefixed_destination() {
    let result = apply(
        MappingTable::new().with("items[].name", "catalog.entries[].label"),
        json!({"items": [{"name": "pen"}, {"name": "ink"}]}),
    );
    assert_eq!(
        result,
        json!({"catalog": {"entries": [{"label": "pen"}, {"label": "ink"}]}})
    );
}

#[test]
fn test_sequence_marker_at_path_start_keeps_destination_prefix() {
    let result = apply(
        MappingTable::new().with("tags[]", "meta.labels[]"),
        json!({"tags": ["a", "b"]}),
    );
    assert_eq!(result, json!({"meta": {"labels": ["a", "b"]}}));
}

#[test]
fn test_nested_fan_out() {
    let result = apply(
        MappingTable::new().with("groups[].members[].id", "teams[].people[].ref"),
        json!({
            "groups": [
                {"members": [{"id": 1}, {"id": 2}]},
                {"members": []},
                {"members": [{"id": 3}]}
            ]
        }),
    );
    assert_eq!(
        result,
        json!({
            "teams": [
                {"people": [{"ref": 1}, {"ref": 2}]},
                {},
                {"people": [{"ref": 3}]}
            ]
        })
    );
}

#[test]
fn test_fields_of_one_sequence_merge_per_element() {
    let result = apply(
        MappingTable::new()
            .with("rows[].a", "out[].first")
            .with("rows[].b", "out[].second"),
        json!({"rows": [{"a": 1, "b": 2}, {"a": 3, "b": 4}]}),
    );
    assert_eq!(
        result,
        json!({"out": [{"first": 1, "second": 2}, {"first": 3, "second": 4}]})
    );
}

#[test]
fn test_multi_destination_mapping() {
    let table = MappingTable::new()
        .with("user.email", "contact.email")
        .with("user.email", "audit.login");
    let result = apply(table, json!({"user": {"email": "a@b.c"}}));
    assert_eq!(
        result,
        json!({"contact": {"email": "a@b.c"}, "audit": {"login": "a@b.c"}})
    );
}

#[test]
fn test_absent_keys_write_nothing() {
    let result = apply(
        MappingTable::new()
            .with("a.b.c", "x")
            .with("a.list[].v", "y[].v")
            .with("z", "w"),
        json!({"a": {"other": 1}}),
    );
    assert_eq!(result, json!({}));
}

#[test]
fn test_explicit_null_is_not_written() {
    let result = apply(MappingTable::new().with("a", "b"), json!({"a": null}));
    assert_eq!(result, json!({}));
}

#[test]
fn test_reporter_sees_missing_and_null_leaves_alike() {
    let shifter = Shifter::new(MappingTable::new().with("a.b", "x.y")).unwrap();

    for source in [json!({"a": {}}), json!({"a": {"b": null}}), json!({"a": null})] {
        let mut seen = Vec::new();
        let result = shifter
            .apply(
                &source,
                ShiftOptions::new().with_reporter(|_, _, value| {
                    seen.push(value.cloned());
                    match value {
                        None => Some(json!("filled")),
                        Some(v) => Some(v.clone()),
                    }
                }),
            )
            .unwrap();
        assert_eq!(seen, vec![None], "source {source}");
        assert_eq!(result, json!({"x": {"y": "filled"}}), "source {source}");
    }
}

#[test]
fn test_lenient_first_element_for_unmarked_sequence() {
    let result = apply(
        MappingTable::new().with("results.score", "best"),
        json!({"results": [{"score": 9}, {"score": 4}]}),
    );
    assert_eq!(result, json!({"best": 9}));
}

#[test]
fn test_reporter_suppresses_and_replaces() {
    let shifter = Shifter::new(
        MappingTable::new()
            .with("secret", "out.secret")
            .with("count", "out.count"),
    )
    .unwrap();

    let result = shifter
        .apply(
            &json!({"secret": "hunter2", "count": 2}),
            ShiftOptions::new().with_reporter(|source, _, value| match source {
                "secret" => None,
                "count" => value.and_then(Value::as_i64).map(|n| json!(n * 10)),
                _ => value.cloned(),
            }),
        )
        .unwrap();
    assert_eq!(result, json!({"out": {"count": 20}}));
}

#[test]
fn test_reporter_receives_table_paths() {
    let shifter = Shifter::new(MappingTable::new().with("list[].v", "out[].w")).unwrap();
    let mut seen = Vec::new();
    shifter
        .apply(
            &json!({"list": [{"v": 1}, {"v": 2}]}),
            ShiftOptions::new().with_reporter(|source, destination, value| {
                seen.push((source.to_string(), destination.to_string(), value.cloned()));
                value.cloned()
            }),
        )
        .unwrap();
    assert_eq!(
        seen,
        vec![
            ("list[].v".to_string(), "out[].w".to_string(), Some(json!(1))),
            ("list[].v".to_string(), "out[].w".to_string(), Some(json!(2))),
        ]
    );
}

#[test]
fn test_merge_into_existing_destination() {
    let shifter = Shifter::new(MappingTable::new().with("name", "profile.name")).unwrap();
    let result = shifter
        .apply(
            &json!({"name": "Ada"}),
            ShiftOptions::new().with_destination(json!({"profile": {"id": 1}, "version": 2})),
        )
        .unwrap();
    assert_eq!(
        result,
        json!({"profile": {"id": 1, "name": "Ada"}, "version": 2})
    );
}

#[test]
fn test_structural_error_aborts_by_default() {
    let shifter = Shifter::new(MappingTable::new().with("a.b", "x")).unwrap();
    let err = shifter
        .apply(&json!({"a": "flat"}), ShiftOptions::default())
        .unwrap_err();
    match err {
        Error::StructuralMismatch { expected, found, .. } => {
            assert_eq!(expected, NodeKind::Object);
            assert_eq!(found, NodeKind::String);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_error_policy_continues_with_next_element() {
    let shifter = Shifter::new(
        MappingTable::new()
            .with("a.b", "x")
            .with("c", "y"),
    )
    .unwrap();

    let calls = Cell::new(0);
    let (result, stats) = shifter
        .apply_with_stats(
            &json!({"a": 5, "c": "kept"}),
            ShiftOptions::new().with_error_policy(|err| {
                calls.set(calls.get() + 1);
                err.is_structural()
            }),
        )
        .unwrap();
    assert_eq!(result, json!({"y": "kept"}));
    assert_eq!(calls.get(), 1);
    assert_eq!(stats.skipped, 1);
}

#[test]
fn test_error_policy_can_still_abort() {
    let shifter = Shifter::new(MappingTable::new().with("a.b", "x")).unwrap();
    let result = shifter.apply(
        &json!({"a": true}),
        ShiftOptions::new().with_error_policy(|_| false),
    );
    assert!(result.is_err());
}

#[test]
fn test_abort_keeps_earlier_writes_only_in_caller_document() {
    let shifter = Shifter::new(
        MappingTable::new()
            .with("a", "out.a")
            .with("b.x", "out.x"),
    )
    .unwrap();
    let source = json!({"a": 1, "b": "flat"});

    let mut destination = json!({"keep": true});
    let err = shifter
        .apply_into(&source, &mut destination, ShiftOptions::new())
        .unwrap_err();
    assert!(err.is_structural());
    assert_eq!(destination, json!({"keep": true, "out": {"a": 1}}));

    let result = shifter.apply(
        &source,
        ShiftOptions::new().with_destination(json!({"keep": true})),
    );
    assert!(result.is_err());
}

#[test]
fn test_continuation_keeps_emissions_before_failure() {
    let shifter = Shifter::new(MappingTable::new().with("items[].v.w", "out[].w")).unwrap();
    let result = shifter
        .apply(
            &json!({"items": [{"v": {"w": 1}}, {"v": 2}, {"v": {"w": 3}}]}),
            ShiftOptions::new().continue_on_error(),
        )
        .unwrap();
    assert_eq!(result, json!({"out": [{"w": 1}]}));
}

#[test]
fn test_arity_mismatch_prevents_construction() {
    let err = Shifter::new(
        MappingTable::new()
            .with("ok", "fine")
            .with("list[].a", "flat.a"),
    )
    .unwrap_err();
    assert!(matches!(err, Error::ArrayArityMismatch { .. }));
    assert!(err.to_string().contains("list[].a -> flat.a"));
}

#[test]
fn test_from_json_mapping() {
    let shifter = Shifter::from_json(&json!({
        "a": "x",
        "b": ["y", "z.w"]
    }))
    .unwrap();
    assert_eq!(shifter.len(), 3);

    let result = shifter
        .apply(&json!({"a": 1, "b": 2}), ShiftOptions::default())
        .unwrap();
    assert_eq!(result, json!({"x": 1, "y": 2, "z": {"w": 2}}));
}

#[test]
fn test_shifter_shared_across_threads() {
    let shifter = Shifter::new(MappingTable::new().with("n", "out.n")).unwrap();
    std::thread::scope(|scope| {
        for n in 0..4 {
            let shifter = &shifter;
            scope.spawn(move || {
                let result = shifter
                    .apply(&json!({"n": n}), ShiftOptions::default())
                    .unwrap();
                assert_eq!(result, json!({"out": {"n": n}}));
            });
        }
    });
}
