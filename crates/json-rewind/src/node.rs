//! The document value model.
//!
//! `Node` is an explicit tagged union over the three shapes the
//! reconstruction cares about: keyed containers, indexed containers, and
//! scalars. Children are reference counted so that untouched branches of a
//! reconstructed value are shared with the live document instead of copied;
//! the sharing is observable with `Rc::ptr_eq`.
//!
//! External document representations adapt by converting into `Node`;
//! [`From<serde_json::Value>`] is the bundled adapter for plain JSON.

use std::rc::Rc;

use indexmap::IndexMap;
use json_rewind_pointer::is_valid_index;
use serde_json::{Map, Number, Value};

/// A node of a document tree.
///
/// "Absent" is not a variant: a value that does not exist is represented as
/// `None` at the `Option<Rc<Node>>` level, distinct from [`Node::Null`].
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Rc<Node>>),
    Object(IndexMap<String, Rc<Node>>),
}

impl Node {
    /// Build a shared document root from a JSON value.
    pub fn from_json(value: Value) -> Rc<Node> {
        Rc::new(Node::from(value))
    }

    /// Convert back to a plain JSON value, copying the whole tree.
    pub fn to_value(&self) -> Value {
        match self {
            Node::Null => Value::Null,
            Node::Bool(b) => Value::Bool(*b),
            Node::Number(n) => Value::Number(n.clone()),
            Node::String(s) => Value::String(s.clone()),
            Node::Array(items) => Value::Array(items.iter().map(|item| item.to_value()).collect()),
            Node::Object(map) => Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.to_value()))
                    .collect(),
            ),
        }
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Node::Array(_) | Node::Object(_))
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Null,
            Value::Bool(b) => Node::Bool(b),
            Value::Number(n) => Node::Number(n),
            Value::String(s) => Node::String(s),
            Value::Array(items) => Node::Array(
                items
                    .into_iter()
                    .map(|item| Rc::new(Node::from(item)))
                    .collect(),
            ),
            Value::Object(map) => Node::Object(collect_object(map)),
        }
    }
}

fn collect_object(map: Map<String, Value>) -> IndexMap<String, Rc<Node>> {
    map.into_iter()
        .map(|(key, value)| (key, Rc::new(Node::from(value))))
        .collect()
}

/// Resolve a parsed pointer inside a document.
///
/// Any missing key, out-of-range or malformed array index (including `-` and
/// indices with leading zeros), or attempt to descend into a scalar yields
/// `None`. This accessor never errors.
///
/// # Example
///
/// ```
/// use json_rewind::node::{get, Node};
/// use serde_json::json;
///
/// let doc = Node::from_json(json!({"a": {"b": [1, 2, 3]}}));
/// let path: Vec<String> = vec!["a".into(), "b".into(), "1".into()];
/// assert_eq!(get(&doc, &path).unwrap().to_value(), json!(2));
/// assert!(get(&doc, &["missing".to_string()]).is_none());
/// ```
pub fn get(node: &Rc<Node>, path: &[String]) -> Option<Rc<Node>> {
    let mut current = node;
    for step in path {
        match current.as_ref() {
            Node::Object(map) => current = map.get(step)?,
            Node::Array(items) => {
                if !is_valid_index(step) {
                    return None;
                }
                let index: usize = step.parse().ok()?;
                current = items.get(index)?;
            }
            _ => return None,
        }
    }
    Some(Rc::clone(current))
}
