//! The resolver: reconstruct the value a pointer held before a change log.

use std::rc::Rc;

use json_rewind_pointer::{is_ancestor, parse_json_pointer, validate_json_pointer, Path};

use crate::batch::build_batches;
use crate::node::{self, Node};
use crate::types::{Change, OldValue, RewindError};
use crate::undo::merge;

/// Return the value `pointer` held immediately before every change in
/// `changes` (ordered most-recent-first) was applied to `document`.
///
/// If no change overlaps the pointer the current value is returned; `None`
/// means the path never existed. The only validated precondition is pointer
/// syntax.
///
/// A change whose path equals the pointer short-circuits the whole
/// reconstruction: its recorded old value is the answer. Otherwise every
/// change overlapping the pointer in either direction is re-rooted below the
/// shortest involved path, partitioned into batches, and folded onto the
/// live value at that path; each fold step yields the document state one
/// batch further back in history.
///
/// # Errors
///
/// [`RewindError::InvalidPointer`] if `pointer` is not valid RFC 6901
/// syntax.
///
/// # Example
///
/// ```
/// use json_rewind::{previous_value, Change, Node};
/// use serde_json::json;
///
/// let document = Node::from_json(json!({"a": {"b": "b2"}}));
/// let changes = vec![
///     Change::of_value("/a", json!({"b": null})),
///     Change::of_value("/a/b", json!("b1")),
/// ];
/// let prev = previous_value(&document, &changes, "").unwrap().unwrap();
/// assert_eq!(prev.to_value(), json!({"a": {"b": "b1"}}));
/// ```
pub fn previous_value(
    document: &Rc<Node>,
    changes: &[Change],
    pointer: &str,
) -> Result<Option<Rc<Node>>, RewindError> {
    validate_json_pointer(pointer)
        .map_err(|_| RewindError::InvalidPointer(pointer.to_string()))?;
    let query = parse_json_pointer(pointer);

    if !changes.is_empty() {
        // A record with a malformed path cannot equal or overlap a valid
        // query pointer; such records are irrelevant, not errors.
        let parsed: Vec<(Path, &Change)> = changes
            .iter()
            .filter(|change| validate_json_pointer(&change.path).is_ok())
            .map(|change| (parse_json_pointer(&change.path), change))
            .collect();

        // Most lookups hit a recorded path exactly; the first match in log
        // order is the most recent and therefore authoritative.
        if let Some((_, change)) = parsed.iter().find(|(path, _)| *path == query) {
            return Ok(change.old_value.to_node());
        }

        let affected: Vec<(Path, &Change)> = parsed
            .into_iter()
            .filter(|(path, _)| is_ancestor(path, &query) || is_ancestor(&query, path))
            .collect();
        if !affected.is_empty() {
            return Ok(revert_affected(document, &affected, &query));
        }
    }

    Ok(node::get(document, &query))
}

/// Revert every overlapping change below the shortest involved path and read
/// the query back out of the reconstruction.
fn revert_affected(
    document: &Rc<Node>,
    affected: &[(Path, &Change)],
    query: &[String],
) -> Option<Rc<Node>> {
    // The minimal subtree that must be reconstructed. Every affected path is
    // comparable to the query, so all candidates of minimal length coincide
    // and any of them is the common ancestor of the rest.
    let shortest: &[String] = affected
        .iter()
        .map(|(path, _)| path.as_slice())
        .chain(std::iter::once(query))
        .min_by_key(|path| path.len())
        .unwrap_or(query);

    let anchor = node::get(document, shortest);

    let rerooted: Vec<(Path, OldValue)> = affected
        .iter()
        .map(|(path, change)| (path[shortest.len()..].to_vec(), change.old_value.clone()))
        .collect();

    let mut reverted = anchor;
    for batch in &build_batches(&rerooted) {
        reverted = merge(reverted.as_ref(), batch);
    }

    let rerooted_query = &query[shortest.len()..];
    reverted.and_then(|value| node::get(&value, rerooted_query))
}
