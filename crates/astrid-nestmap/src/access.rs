//! Path-based lookup and update.
//!
//! [`find`] is the traversal primitive; [`get`] and [`get_or`] are built on
//! it. [`put`] and [`remove`] return new trees and leave their input alone.
//!
//! The two writers treat type mismatches differently: `put` replaces a
//! non-node met along the path with a fresh node, while `remove` leaves the
//! tree untouched.

use tracing::{debug, trace};

use crate::error::{NestError, NestResult};
use crate::key::{Key, display_path};
use crate::tree::{Node, Tree};

/// Outcome of [`find`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Lookup<'p, 't> {
    /// The whole path resolved to this value.
    Found(&'t Tree),
    /// Traversal stopped early.
    NotFound {
        /// Unconsumed suffix of the path. Its first key could not be
        /// resolved.
        remaining: &'p [Key],
        /// The value at which traversal could not continue.
        stopped_at: &'t Tree,
    },
}

impl<'t> Lookup<'_, 't> {
    /// The found value, if any.
    #[must_use]
    pub fn found(self) -> Option<&'t Tree> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound { .. } => None,
        }
    }

    /// Whether the path resolved.
    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Descend `tree` along `path`.
///
/// Each step requires the current value to be a node containing the next
/// key. The empty path finds the whole tree.
#[must_use]
pub fn find<'p, 't>(path: &'p [Key], tree: &'t Tree) -> Lookup<'p, 't> {
    let mut current = tree;
    let mut rest = path;
    while let Some((key, tail)) = rest.split_first() {
        let Some(next) = current.as_node().and_then(|node| node.get(key)) else {
            trace!(remaining = %display_path(rest), "lookup stopped before end of path");
            return Lookup::NotFound {
                remaining: rest,
                stopped_at: current,
            };
        };
        current = next;
        rest = tail;
    }
    Lookup::Found(current)
}

/// Resolve `path` in `tree`.
///
/// # Errors
///
/// Returns [`NestError::NotFound`] naming the unresolved remainder of the
/// path when any step is missing or meets a non-node.
pub fn get<'t>(path: &[Key], tree: &'t Tree) -> NestResult<&'t Tree> {
    match find(path, tree) {
        Lookup::Found(value) => Ok(value),
        Lookup::NotFound { remaining, .. } => Err(NestError::NotFound {
            path: display_path(remaining),
        }),
    }
}

/// Resolve `path` in `tree`, falling back to `default`.
#[must_use]
pub fn get_or<'t>(path: &[Key], tree: &'t Tree, default: &'t Tree) -> &'t Tree {
    find(path, tree).found().unwrap_or(default)
}

/// Set `value` at `path`, creating nodes for missing intermediate keys.
///
/// A non-node met while descending is replaced by a new node. The empty
/// path replaces the whole tree with `value`.
#[must_use]
pub fn put(path: &[Key], tree: &Tree, value: Tree) -> Tree {
    put_owned(path, tree.clone(), value)
}

fn put_owned(path: &[Key], tree: Tree, value: Tree) -> Tree {
    let Some((key, rest)) = path.split_first() else {
        return value;
    };
    let mut node = match tree {
        Tree::Node(node) => node,
        _ => Node::new(),
    };
    let child = node.remove(key).unwrap_or_default();
    node.insert(key.clone(), put_owned(rest, child, value));
    Tree::Node(node)
}

/// Delete the entry at `path`.
///
/// Missing keys and non-node intermediates leave the tree unchanged, so
/// removal never fails and is idempotent.
#[must_use]
pub fn remove(path: &[Key], tree: &Tree) -> Tree {
    remove_owned(path, tree.clone())
}

fn remove_owned(path: &[Key], tree: Tree) -> Tree {
    let Some((key, rest)) = path.split_first() else {
        return tree;
    };
    let mut node = match tree {
        Tree::Node(node) => node,
        other => {
            debug!(path = %display_path(path), "remove: not a node, leaving tree unchanged");
            return other;
        },
    };
    match node.remove(key) {
        Some(_) if rest.is_empty() => {},
        Some(child) => {
            node.insert(key.clone(), remove_owned(rest, child));
        },
        None => {
            debug!(path = %display_path(path), "remove: key absent, leaving tree unchanged");
        },
    }
    Tree::Node(node)
}
