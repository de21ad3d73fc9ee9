//! Core types: change records and the crate error.

use std::rc::Rc;

use serde_json::Value;
use thiserror::Error;

use crate::node::Node;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RewindError {
    #[error("{0} is not a JSON Pointer path")]
    InvalidPointer(String),
}

/// The recorded prior state of a path.
///
/// `Absent` means the path did not exist before the change; `Value` carries
/// whatever it held, which may legitimately be null. The distinction is part
/// of the wire contract and is never collapsed into a bare null.
#[derive(Debug, Clone, PartialEq)]
pub enum OldValue {
    Absent,
    Value(Rc<Node>),
}

impl OldValue {
    /// The recorded value as an optional node; `Absent` maps to `None`.
    pub fn to_node(&self) -> Option<Rc<Node>> {
        match self {
            OldValue::Absent => None,
            OldValue::Value(value) => Some(Rc::clone(value)),
        }
    }
}

/// One record of a change log: the path a mutation touched and the value
/// that path held immediately before the mutation.
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    /// JSON Pointer of the changed path.
    pub path: String,
    pub old_value: OldValue,
}

impl Change {
    pub fn new(path: impl Into<String>, old_value: OldValue) -> Self {
        Self {
            path: path.into(),
            old_value,
        }
    }

    /// A change whose path held `old_value` before it was applied.
    pub fn of_value(path: impl Into<String>, old_value: Value) -> Self {
        Self::new(path, OldValue::Value(Node::from_json(old_value)))
    }

    /// A change whose path did not exist before it was applied.
    pub fn of_absent(path: impl Into<String>) -> Self {
        Self::new(path, OldValue::Absent)
    }
}
