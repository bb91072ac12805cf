//! Property-based testing strategies for generating test data
//!
//! This module provides proptest strategies for generating random
//! documents and dot-paths for property testing.

#![cfg(test)]

use proptest::collection::{hash_map, vec};
use proptest::prelude::*;
use serde_json::Value;

/// Strategy for generating a single path key
pub fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

/// Strategy for generating marker-free dot-paths
pub fn plain_path_strategy(max_segments: usize) -> impl Strategy<Value = String> {
    vec(key_strategy(), 1..=max_segments).prop_map(|segments| segments.join("."))
}

/// Strategy for generating dot-paths where any segment may carry `[]`
pub fn marked_path_strategy(max_segments: usize) -> impl Strategy<Value = String> {
    vec((key_strategy(), any::<bool>()), 1..=max_segments).prop_map(|segments| {
        segments
            .into_iter()
            .map(|(key, marked)| if marked { format!("{}[]", key) } else { key })
            .collect::<Vec<_>>()
            .join(".")
    })
}

/// Strategy for generating JSON values with controlled depth
pub fn json_value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| Value::Number(n.into())),
        "[a-zA-Z0-9 ]{0,20}".prop_map(Value::String),
    ];

    leaf.prop_recursive(
        4,  // max depth
        32, // max size
        5,  // items per collection
        |inner| {
            prop_oneof![
                vec(inner.clone(), 0..5).prop_map(Value::Array),
                hash_map(key_strategy(), inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        },
    )
}

/// Strategy for generating JSON objects
pub fn json_object_strategy() -> impl Strategy<Value = Value> {
    hash_map(key_strategy(), json_value_strategy(), 0..6)
        .prop_map(|m| Value::Object(m.into_iter().collect()))
}
