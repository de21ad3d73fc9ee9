//! json-rewind — reconstruct the value a JSON Pointer path held before a
//! recorded sequence of changes was applied.
//!
//! The inputs are the current document, a change log ordered from the most
//! recently applied change to the oldest (each record naming a path and the
//! old value that path held), and a query pointer. The result is the value
//! the pointer held before every change in the log, the current value if no
//! change overlaps the pointer, or absent (`None`) if the path never
//! existed.
//!
//! The reconstruction is a pure computation: inputs are never mutated, and
//! every branch a change does not touch is shared by reference with the live
//! document.
//!
//! # Example
//!
//! ```
//! use json_rewind::{previous_value, Change, Node};
//! use serde_json::json;
//!
//! let document = Node::from_json(json!({"name": "new", "kept": true}));
//! let changes = vec![Change::of_value("/name", json!("old"))];
//!
//! let prev = previous_value(&document, &changes, "/name").unwrap().unwrap();
//! assert_eq!(prev.to_value(), json!("old"));
//!
//! // A path no change overlaps resolves to its current value.
//! let kept = previous_value(&document, &changes, "/kept").unwrap().unwrap();
//! assert_eq!(kept.to_value(), json!(true));
//! ```

pub mod batch;
pub mod cli;
pub mod codec;
pub mod node;
pub mod previous_value;
pub mod types;
pub mod undo;

pub use json_rewind_pointer as pointer;

pub use node::{get, Node};
pub use previous_value::previous_value;
pub use types::{Change, OldValue, RewindError};
