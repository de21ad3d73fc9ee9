//! Core logic for the `json-rewind` binary entry point.

use serde_json::Value;

use crate::codec::changes_from_json;
use crate::node::Node;
use crate::previous_value::previous_value;

#[derive(Debug)]
pub enum CliError {
    Json(serde_json::Error),
    Changes(String),
    Pointer(String),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Json(e) => write!(f, "{e}"),
            CliError::Changes(e) => write!(f, "{e}"),
            CliError::Pointer(e) => write!(f, "{e}"),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

/// Resolve the previous value of `pointer` given the current document JSON
/// and the change-log JSON. Returns pretty-printed JSON, or the string
/// `undefined` when the path never existed.
pub fn rewind_pointer(doc_json: &str, changes_json: &str, pointer: &str) -> Result<String, CliError> {
    let doc_value: Value = serde_json::from_str(doc_json)?;
    let changes_value: Value = serde_json::from_str(changes_json)?;
    let document = Node::from_json(doc_value);
    let changes =
        changes_from_json(&changes_value).map_err(|e| CliError::Changes(e.to_string()))?;
    let reverted = previous_value(&document, &changes, pointer)
        .map_err(|e| CliError::Pointer(e.to_string()))?;
    match reverted {
        Some(node) => Ok(serde_json::to_string_pretty(&node.to_value())?),
        None => Ok("undefined".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_previous_value() {
        let doc = r#"{"a": {"b": "b2"}}"#;
        let changes = r#"[
            {"path": "/a", "old_value": {"b": null}},
            {"path": "/a/b", "old_value": "b1"}
        ]"#;
        let out = rewind_pointer(doc, changes, "/a/b").unwrap();
        assert_eq!(out, "\"b1\"");
    }

    #[test]
    fn absent_prints_undefined() {
        let doc = r#"{"added": 1}"#;
        let changes = r#"[{"path": "/added"}]"#;
        assert_eq!(rewind_pointer(doc, changes, "/added").unwrap(), "undefined");
    }

    #[test]
    fn invalid_pointer_is_an_error() {
        let err = rewind_pointer("{}", "[]", "oops").unwrap_err();
        assert!(matches!(err, CliError::Pointer(_)));
    }

    #[test]
    fn malformed_change_log_is_an_error() {
        let err = rewind_pointer("{}", r#"[{"old_value": 1}]"#, "").unwrap_err();
        assert!(matches!(err, CliError::Changes(_)));
    }
}
