//! One-level structural diff.

use std::collections::BTreeMap;

use crate::key::Key;
use crate::tree::{Node, Tree};

/// Partition of the top-level keys of two trees.
///
/// The four maps are disjoint and together hold every key of both trees.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeDiff {
    /// Keys only in the new tree, with their new value.
    pub added: Node,
    /// Keys only in the old tree, with their old value.
    pub removed: Node,
    /// Keys in both with different values, as `(old, new)`.
    pub changed: BTreeMap<Key, (Tree, Tree)>,
    /// Keys in both with equal values.
    pub identical: Node,
}

impl TreeDiff {
    /// Whether nothing was added, removed, or changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Diff the top-level keys of `new` against `old`.
///
/// Values are compared with deep equality but never diffed recursively: a
/// nested node that differs anywhere shows up whole in
/// [`TreeDiff::changed`]. A tree that is not a node counts as an empty one.
#[must_use]
pub fn diff(new: &Tree, old: &Tree) -> TreeDiff {
    let empty = Node::new();
    let new_node = new.as_node().unwrap_or(&empty);
    let old_node = old.as_node().unwrap_or(&empty);

    let mut result = TreeDiff::default();
    for (key, old_val) in old_node {
        match new_node.get(key) {
            None => {
                result.removed.insert(key.clone(), old_val.clone());
            },
            Some(new_val) if new_val == old_val => {
                result.identical.insert(key.clone(), new_val.clone());
            },
            Some(new_val) => {
                result
                    .changed
                    .insert(key.clone(), (old_val.clone(), new_val.clone()));
            },
        }
    }
    for (key, new_val) in new_node {
        if !old_node.contains_key(key) {
            result.added.insert(key.clone(), new_val.clone());
        }
    }
    result
}
