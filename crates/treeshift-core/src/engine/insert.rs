//! Tree builder
//!
//! Writes values into a growing destination document. Missing containers are
//! created on the way down, sequences are padded up to the target index, and
//! everything already written beside the target slot is left in place.
//!
//! Copyright (c) 2025 Treeshift Team
//! Licensed under the Apache-2.0 license

use crate::node::NodeKind;
use crate::path::{DestinationPath, PathSegment};
use serde_json::{Map, Value};
use tracing::warn;

/// Insert `value` at `path` below `root` and return the new root
///
/// A `null` root (or `null` node on the way) counts as absent and is replaced
/// by the container the next segment needs. Writes that meet a node of the
/// wrong shape are dropped without error; use [`TreeBuilder`] to count them.
pub fn insert(root: Value, path: &[PathSegment], value: Value) -> Value {
    TreeBuilder::new().insert(root, path, value)
}

/// Tree builder that keeps count of dropped writes
#[derive(Debug, Default)]
pub struct TreeBuilder {
    conflicts: usize,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of writes dropped because of a shape conflict
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    /// Insert `value` at `path` below `root` and return the new root
    pub fn insert(&mut self, root: Value, path: &[PathSegment], value: Value) -> Value {
        self.insert_at(root, path, 0, value)
    }

    fn insert_at(&mut self, node: Value, path: &[PathSegment], depth: usize, value: Value) -> Value {
        let Some(segment) = path.get(depth) else {
            return value;
        };

        match (segment, node) {
            (PathSegment::Key(key), Value::Null) => {
                let mut map = Map::new();
                map.insert(key.clone(), self.insert_at(Value::Null, path, depth + 1, value));
                Value::Object(map)
            }
            (PathSegment::Key(key), Value::Object(mut map)) => {
                let slot = map.entry(key.clone()).or_insert(Value::Null);
                let existing = std::mem::take(slot);
                *slot = self.insert_at(existing, path, depth + 1, value);
                Value::Object(map)
            }
            (PathSegment::Index(index), Value::Null) => {
                Value::Array(self.insert_into_sequence(Vec::new(), *index, path, depth, value))
            }
            (PathSegment::Index(index), Value::Array(items)) => {
                Value::Array(self.insert_into_sequence(items, *index, path, depth, value))
            }
            (_, other) => {
                self.record_conflict(path, depth, &other);
                other
            }
        }
    }

    fn insert_into_sequence(
        &mut self,
        mut items: Vec<Value>,
        index: usize,
        path: &[PathSegment],
        depth: usize,
        value: Value,
    ) -> Vec<Value> {
        if index < items.len() {
            let existing = std::mem::take(&mut items[index]);
            items[index] = self.insert_at(existing, path, depth + 1, value);
            return items;
        }

        let item = self.insert_at(Value::Null, path, depth + 1, value);
        let filler = match &item {
            Value::Array(_) => Value::Array(Vec::new()),
            Value::Object(_) => Value::Object(Map::new()),
            _ => Value::Null,
        };
        items.resize(index, filler);
        items.push(item);
        items
    }

    fn record_conflict(&mut self, path: &[PathSegment], depth: usize, found: &Value) {
        self.conflicts += 1;
        let expected = match path[depth] {
            PathSegment::Key(_) => NodeKind::Object,
            PathSegment::Index(_) => NodeKind::Array,
        };
        warn!(
            path = %DestinationPath::from(path[..=depth].to_vec()),
            expected = %expected,
            found = %NodeKind::of(found),
            "Dropped write: destination node has an incompatible shape"
        );
    }
}
