//! Node kinds of the document tree
//!
//! Documents are plain `serde_json::Value` trees. This module names the shapes
//! a node can take so diagnostics and the engines can talk about them.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Shape of a single document node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Keyed container
    Object,
    /// Ordered sequence
    Array,
    String,
    Number,
    Bool,
    /// Explicit null, treated the same as a missing key
    Null,
}

impl NodeKind {
    /// Classify a document node
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Object(_) => NodeKind::Object,
            Value::Array(_) => NodeKind::Array,
            Value::String(_) => NodeKind::String,
            Value::Number(_) => NodeKind::Number,
            Value::Bool(_) => NodeKind::Bool,
            Value::Null => NodeKind::Null,
        }
    }

    /// Whether nodes of this kind can be traversed further
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Object | NodeKind::Array)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Object => write!(f, "object"),
            NodeKind::Array => write!(f, "array"),
            NodeKind::String => write!(f, "string"),
            NodeKind::Number => write!(f, "number"),
            NodeKind::Bool => write!(f, "bool"),
            NodeKind::Null => write!(f, "null"),
        }
    }
}

/// A missing key and an explicit `null` are both absent
pub fn is_absent(node: Option<&Value>) -> bool {
    matches!(node, None | Some(Value::Null))
}
