//! Undo one batch of recorded old values against a live value.
//!
//! The merge walks the live value and the batch together. A marker on a
//! batch node is authoritative for that node's whole subtree and stops the
//! descent; any deeper structure recorded under a marked node is
//! intentionally discarded. Branches the batch does not touch are returned
//! as shared references into the live value, so only the touched paths
//! allocate.

use std::rc::Rc;

use indexmap::IndexMap;
use json_rewind_pointer::is_valid_index;

use crate::batch::BatchNode;
use crate::node::Node;
use crate::types::OldValue;

/// Produce the value one batch further back in history.
///
/// Neither input is mutated. `None` inputs and results mean "absent": a
/// recorded [`OldValue::Absent`] marker erases its path from the
/// reconstruction. When the live value has no structure at a path the batch
/// descends into, the subtree is synthesized purely from the recorded old
/// values.
pub fn merge(live: Option<&Rc<Node>>, batch: &BatchNode) -> Option<Rc<Node>> {
    if let Some(marker) = &batch.marker {
        return marker.to_node();
    }
    if batch.children.is_empty() {
        return live.map(Rc::clone);
    }
    match live.map(|node| node.as_ref()) {
        Some(Node::Object(map)) => {
            let mut result: IndexMap<String, Rc<Node>> = IndexMap::with_capacity(map.len());
            for (key, value) in map {
                match batch.children.get(key) {
                    Some(child) => {
                        // An absent result drops the key entirely.
                        if let Some(merged) = merge(Some(value), child) {
                            result.insert(key.clone(), merged);
                        }
                    }
                    None => {
                        result.insert(key.clone(), Rc::clone(value));
                    }
                }
            }
            for (key, child) in &batch.children {
                if map.contains_key(key) {
                    continue;
                }
                if let Some(merged) = merge(None, child) {
                    result.insert(key.clone(), merged);
                }
            }
            Some(Rc::new(Node::Object(result)))
        }
        Some(Node::Array(items)) => {
            // The reconstruction may be longer than the live array when the
            // batch records indices past its end. Arrays cannot hold holes,
            // so absent positions become null.
            let recorded_len = batch
                .children
                .keys()
                .filter(|key| is_valid_index(key))
                .filter_map(|key| key.parse::<usize>().ok())
                .filter_map(|index| index.checked_add(1))
                .max()
                .unwrap_or(0);
            let len = items.len().max(recorded_len);
            let mut result = Vec::with_capacity(len);
            for index in 0..len {
                let live_item = items.get(index);
                let merged = match batch.children.get(index.to_string().as_str()) {
                    Some(child) => merge(live_item, child),
                    None => live_item.map(Rc::clone),
                };
                result.push(merged.unwrap_or_else(|| Rc::new(Node::Null)));
            }
            Some(Rc::new(Node::Array(result)))
        }
        // The live value is a scalar or absent but the recorded history is
        // deeper: synthesize a keyed container from the batch alone.
        _ => {
            let mut result = IndexMap::with_capacity(batch.children.len());
            for (key, child) in &batch.children {
                if let Some(merged) = merge(None, child) {
                    result.insert(key.clone(), merged);
                }
            }
            Some(Rc::new(Node::Object(result)))
        }
    }
}
