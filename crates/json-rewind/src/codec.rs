//! JSON codec for change logs.
//!
//! The wire form of a change log is a JSON array of
//! `{ "path": string, "old_value"?: any }` records, most recent first. The
//! `old_value` key being missing means the path did not exist before the
//! change; an explicit `null` means it held null. The codec keeps the two
//! apart in both directions.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::node::Node;
use crate::types::{Change, OldValue};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("change log is not an array")]
    NotAnArray,
    #[error("change {0} is not an object")]
    NotAnObject(usize),
    #[error("change {0} has no string path")]
    MissingPath(usize),
}

/// Decode a change log from its JSON form.
pub fn changes_from_json(value: &Value) -> Result<Vec<Change>, CodecError> {
    let records = value.as_array().ok_or(CodecError::NotAnArray)?;
    let mut changes = Vec::with_capacity(records.len());
    for (index, record) in records.iter().enumerate() {
        let map = record.as_object().ok_or(CodecError::NotAnObject(index))?;
        let path = map
            .get("path")
            .and_then(Value::as_str)
            .ok_or(CodecError::MissingPath(index))?;
        let old_value = match map.get("old_value") {
            Some(value) => OldValue::Value(Node::from_json(value.clone())),
            None => OldValue::Absent,
        };
        changes.push(Change::new(path, old_value));
    }
    Ok(changes)
}

/// Encode a change log to its JSON form. Absent old values omit the
/// `old_value` key entirely.
pub fn changes_to_json(changes: &[Change]) -> Value {
    Value::Array(changes.iter().map(change_to_json).collect())
}

fn change_to_json(change: &Change) -> Value {
    let mut map = Map::new();
    map.insert("path".into(), Value::String(change.path.clone()));
    if let OldValue::Value(node) = &change.old_value {
        map.insert("old_value".into(), node.to_value());
    }
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decode_distinguishes_absent_from_null() {
        let log = json!([
            {"path": "/missing"},
            {"path": "/null", "old_value": null}
        ]);
        let changes = changes_from_json(&log).unwrap();
        assert_eq!(changes[0].old_value, OldValue::Absent);
        assert_eq!(
            changes[1].old_value,
            OldValue::Value(Node::from_json(json!(null)))
        );
    }

    #[test]
    fn decode_rejects_non_array() {
        assert_eq!(
            changes_from_json(&json!({"path": "/a"})),
            Err(CodecError::NotAnArray)
        );
    }

    #[test]
    fn decode_names_the_offending_record() {
        let log = json!([{"path": "/ok"}, "nope"]);
        assert_eq!(changes_from_json(&log), Err(CodecError::NotAnObject(1)));

        let log = json!([{"path": "/ok"}, {"old_value": 1}, {"path": 2}]);
        assert_eq!(changes_from_json(&log), Err(CodecError::MissingPath(1)));
    }

    #[test]
    fn encode_omits_absent_old_values() {
        let changes = vec![
            Change::of_absent("/gone"),
            Change::of_value("/kept", json!({"a": [1]})),
        ];
        assert_eq!(
            changes_to_json(&changes),
            json!([
                {"path": "/gone"},
                {"path": "/kept", "old_value": {"a": [1]}}
            ])
        );
    }

    #[test]
    fn roundtrip() {
        let log = json!([
            {"path": "/theundefined"},
            {"path": "/name", "old_value": "old name"},
            {"path": "/contacts/0", "old_value": {"phones": ["1"]}}
        ]);
        let changes = changes_from_json(&log).unwrap();
        assert_eq!(changes_to_json(&changes), log);
    }
}
