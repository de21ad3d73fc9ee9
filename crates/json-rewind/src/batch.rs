//! Batch construction.
//!
//! A batch is a partial tree of recorded old values covering a maximal run of
//! consecutive, mutually compatible changes. A change is incompatible with
//! the current batch when its path passes through a node that already
//! carries a marker: the marker ends reconstruction for that subtree, so the
//! new change would either be hidden by it or hide it. Incompatible changes
//! start a fresh batch, which keeps the merge unambiguous — whichever marker
//! is met first while descending is authoritative.

use indexmap::IndexMap;
use json_rewind_pointer::Path;

use crate::types::OldValue;

/// One node of a batch tree, mirroring a subset of the document's shape.
///
/// A node carrying a marker is a leaf for reconstruction purposes: the merge
/// never looks below it.
#[derive(Debug, Default)]
pub struct BatchNode {
    pub(crate) marker: Option<OldValue>,
    pub(crate) children: IndexMap<String, BatchNode>,
}

impl BatchNode {
    /// Whether a change at `path` can join this batch: no node on the walk
    /// from the root to the final node, inclusive, may already carry a
    /// marker. The walk exits early at the first conflict; nodes the path
    /// would newly create cannot conflict.
    fn accepts(&self, path: &[String]) -> bool {
        let mut node = self;
        if node.marker.is_some() {
            return false;
        }
        for segment in path {
            match node.children.get(segment) {
                Some(child) => {
                    if child.marker.is_some() {
                        return false;
                    }
                    node = child;
                }
                None => return true,
            }
        }
        true
    }

    /// Set a marker at the end of `path`, creating intermediate nodes as
    /// needed. Callers check [`accepts`](Self::accepts) first.
    fn insert(&mut self, path: &[String], old_value: OldValue) {
        let mut node = self;
        for segment in path {
            node = node.children.entry(segment.clone()).or_default();
        }
        node.marker = Some(old_value);
    }
}

/// Partition re-rooted changes, ordered most-recent-first, into the minimum
/// number of ordered batches such that no change in a batch is hidden by a
/// marker on an ancestor within the same batch.
pub fn build_batches(changes: &[(Path, OldValue)]) -> Vec<BatchNode> {
    let mut batches: Vec<BatchNode> = Vec::new();
    let mut current = BatchNode::default();
    for (path, old_value) in changes {
        if !current.accepts(path) {
            batches.push(std::mem::take(&mut current));
        }
        current.insert(path, old_value.clone());
    }
    batches.push(current);
    batches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use serde_json::json;
    use std::rc::Rc;

    fn change(pointer: &str, value: serde_json::Value) -> (Path, OldValue) {
        (
            json_rewind_pointer::parse_json_pointer(pointer),
            OldValue::Value(Node::from_json(value)),
        )
    }

    fn marker_at<'a>(batch: &'a BatchNode, path: &[&str]) -> Option<&'a OldValue> {
        let mut node = batch;
        for segment in path {
            node = node.children.get(*segment)?;
        }
        node.marker.as_ref()
    }

    #[test]
    fn empty_log_yields_one_empty_batch() {
        let batches = build_batches(&[]);
        assert_eq!(batches.len(), 1);
        assert!(batches[0].marker.is_none());
        assert!(batches[0].children.is_empty());
    }

    #[test]
    fn disjoint_changes_share_a_batch() {
        let batches = build_batches(&[
            change("/a", json!(1)),
            change("/b", json!(2)),
            change("/c/d", json!(3)),
        ]);
        assert_eq!(batches.len(), 1);
        assert!(marker_at(&batches[0], &["a"]).is_some());
        assert!(marker_at(&batches[0], &["b"]).is_some());
        assert!(marker_at(&batches[0], &["c", "d"]).is_some());
    }

    #[test]
    fn marked_ancestor_starts_new_batch() {
        // /a is recorded first (most recent); the older /a/b change would be
        // hidden behind its marker.
        let batches = build_batches(&[change("/a", json!({"b": null})), change("/a/b", json!("b1"))]);
        assert_eq!(batches.len(), 2);
        assert!(marker_at(&batches[0], &["a"]).is_some());
        assert!(marker_at(&batches[1], &["a", "b"]).is_some());
        assert!(marker_at(&batches[1], &["a"]).is_none());
    }

    #[test]
    fn marked_descendant_keeps_older_ancestor_in_batch() {
        // The older /a change overwrites the whole subtree anyway, so the
        // earlier /a/b marker below it may stay in the same batch.
        let batches = build_batches(&[change("/a/b", json!("b1")), change("/a", json!("a0"))]);
        assert_eq!(batches.len(), 1);
        assert!(marker_at(&batches[0], &["a", "b"]).is_some());
        assert!(marker_at(&batches[0], &["a"]).is_some());
    }

    #[test]
    fn root_marker_conflicts_with_everything() {
        let batches = build_batches(&[change("", json!("whole")), change("/a", json!(1))]);
        assert_eq!(batches.len(), 2);
        assert!(batches[0].marker.is_some());
        assert!(marker_at(&batches[1], &["a"]).is_some());
    }

    #[test]
    fn repeated_path_splits() {
        let batches = build_batches(&[change("/a", json!(1)), change("/a", json!(2))]);
        assert_eq!(batches.len(), 2);
        assert_eq!(
            marker_at(&batches[1], &["a"]),
            Some(&OldValue::Value(Node::from_json(json!(2))))
        );
    }

    #[test]
    fn absent_marker_is_preserved() {
        let batches = build_batches(&[(
            json_rewind_pointer::parse_json_pointer("/gone"),
            OldValue::Absent,
        )]);
        assert_eq!(marker_at(&batches[0], &["gone"]), Some(&OldValue::Absent));
    }

    #[test]
    fn abandoned_walk_leaves_no_skeleton() {
        // The incompatible /a/b/c walk must not leave empty nodes behind in
        // the first batch; they would widen arrays during the merge.
        let batches = build_batches(&[change("/a", json!(1)), change("/a/b/c", json!(2))]);
        assert_eq!(batches.len(), 2);
        assert!(batches[0].children.get("a").unwrap().children.is_empty());
    }

    #[test]
    fn batch_nodes_are_per_query_values() {
        // Markers hold shared nodes, not copies.
        let recorded = Node::from_json(json!({"k": 1}));
        let batches = build_batches(&[(
            json_rewind_pointer::parse_json_pointer("/a"),
            OldValue::Value(Rc::clone(&recorded)),
        )]);
        match marker_at(&batches[0], &["a"]) {
            Some(OldValue::Value(node)) => assert!(Rc::ptr_eq(node, &recorded)),
            other => panic!("expected a recorded marker, got {other:?}"),
        }
    }
}
