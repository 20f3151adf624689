//! Structural rewriting of trees.
//!
//! [`convert`] rebuilds a tree bottom-up, passing every node entry through a
//! caller-supplied transform. Key normalization and serialization prep are
//! both expressed on top of it.

use std::convert::Infallible;

use tracing::warn;

use crate::error::{NestError, NestResult};
use crate::key::Key;
use crate::symbols::SymbolTable;
use crate::tree::{Node, Scalar, Tree};

/// Result of a transform applied to one node entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Rewrite {
    /// Keep the entry under this key with this value.
    Keep(Key, Tree),
    /// Omit the entry from the output.
    Drop,
}

impl Rewrite {
    /// Keep an entry unchanged.
    #[must_use]
    pub fn keep(key: &Key, value: Tree) -> Self {
        Self::Keep(key.clone(), value)
    }
}

/// Rebuild `tree`, rewriting every node entry with `transform`.
///
/// Entries are converted value-first, so the transform always sees an
/// already converted value. List elements are converted in place without
/// changing the list's length. Scalars pass through. If two entries of a
/// node are rewritten to the same key, the later one in key order wins.
#[must_use]
pub fn convert<F>(tree: &Tree, mut transform: F) -> Tree
where
    F: FnMut(&Key, Tree) -> Rewrite,
{
    match try_convert(tree, |key, value| Ok::<_, Infallible>(transform(key, value))) {
        Ok(converted) => converted,
        Err(never) => match never {},
    }
}

/// Fallible [`convert`]. Stops at the first error the transform returns.
///
/// # Errors
///
/// Returns the first error produced by `transform`.
pub fn try_convert<F, E>(tree: &Tree, mut transform: F) -> Result<Tree, E>
where
    F: FnMut(&Key, Tree) -> Result<Rewrite, E>,
{
    convert_with(tree, &mut transform)
}

fn convert_with<F, E>(tree: &Tree, transform: &mut F) -> Result<Tree, E>
where
    F: FnMut(&Key, Tree) -> Result<Rewrite, E>,
{
    match tree {
        Tree::Node(node) => {
            let mut out = Node::new();
            for (key, value) in node {
                let converted = convert_with(value, transform)?;
                if let Rewrite::Keep(new_key, new_value) = transform(key, converted)? {
                    out.insert(new_key, new_value);
                }
            }
            Ok(Tree::Node(out))
        },
        Tree::List(items) => items
            .iter()
            .map(|item| convert_with(item, transform))
            .collect::<Result<Vec<_>, E>>()
            .map(Tree::List),
        Tree::Leaf(_) => Ok(tree.clone()),
    }
}

/// Turn every text key into a symbol key, requiring each name to be
/// registered in `symbols` already.
///
/// # Errors
///
/// Returns [`NestError::UnknownSymbol`] for the first text key with no
/// registered symbol.
pub fn normalize_keys_strict(tree: &Tree, symbols: &dyn SymbolTable) -> NestResult<Tree> {
    try_convert(tree, |key, value| match key {
        Key::Text(name) => match symbols.lookup(name) {
            Some(symbol) => Ok(Rewrite::Keep(Key::Symbol(symbol), value)),
            None => {
                warn!(name = %name, "rejecting key with no registered symbol");
                Err(NestError::UnknownSymbol { name: name.clone() })
            },
        },
        other => Ok(Rewrite::keep(other, value)),
    })
}

/// Turn every text key into a symbol key, interning unseen names.
///
/// Only use this on trusted input: every distinct key name grows the
/// symbol table for good.
#[must_use]
pub fn normalize_keys_permissive(tree: &Tree, symbols: &dyn SymbolTable) -> Tree {
    convert(tree, |key, value| match key {
        Key::Text(name) => Rewrite::Keep(Key::Symbol(symbols.intern(name)), value),
        other => Rewrite::keep(other, value),
    })
}

/// Prepare `tree` for encoding: symbol keys become text keys and character
/// lists become text leaves.
///
/// Equivalent to [`to_serializable_with`] using an identity hook.
#[must_use]
pub fn to_serializable(tree: &Tree) -> Tree {
    to_serializable_with(tree, Rewrite::keep)
}

/// Like [`to_serializable`], but first passes every entry through `hook`.
///
/// The hook may rewrite or drop entries. Text coercion applies to what the
/// hook keeps, and reaches into lists: a list that is not itself a
/// character list has its elements coerced one by one.
#[must_use]
pub fn to_serializable_with<F>(tree: &Tree, mut hook: F) -> Tree
where
    F: FnMut(&Key, Tree) -> Rewrite,
{
    convert(tree, |key, value| match hook(key, value) {
        Rewrite::Keep(key, value) => Rewrite::Keep(textual_key(key), textual_value(value)),
        Rewrite::Drop => Rewrite::Drop,
    })
}

fn textual_key(key: Key) -> Key {
    match key {
        Key::Symbol(symbol) => Key::Text(symbol.as_str().to_owned()),
        other => other,
    }
}

fn textual_value(value: Tree) -> Tree {
    if let Some(text) = value.as_char_list() {
        return Tree::Leaf(Scalar::Text(text));
    }
    match value {
        Tree::List(items) => Tree::List(items.into_iter().map(textual_value).collect()),
        other => other,
    }
}
