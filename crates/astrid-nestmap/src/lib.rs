//! Nested key-value trees for Astrid configuration data.
//!
//! A [`Tree`] is the in-memory form of hierarchical configuration: nodes of
//! keyed subtrees, lists, and scalar leaves. This crate provides pure
//! operations over such trees. Every operation takes its inputs by reference
//! and returns a fresh tree.
//!
//! # Usage
//!
//! ```rust
//! use astrid_nestmap::{Key, Tree, diff, get, merge, path, put};
//!
//! let defaults = Tree::from(toml::from_str::<toml::Value>(r#"
//!     [model]
//!     provider = "claude"
//!     max_tokens = 4096
//! "#).unwrap());
//!
//! let user = put(&path!["model", "max_tokens"], &Tree::empty(), Tree::from(8192));
//! let resolved = merge(&defaults, &user);
//!
//! assert_eq!(get(&path!["model", "max_tokens"], &resolved).unwrap().as_integer(), Some(8192));
//! assert!(diff(&resolved, &defaults).changed.contains_key(&Key::text("model")));
//! ```
//!
//! # Operations
//!
//! - **Access**: [`find`], [`get`], [`get_or`], [`put`], [`remove`]
//! - **Merge**: [`merge`], [`merge_tracking`]
//! - **Rewrite**: [`convert`], [`try_convert`], [`normalize_keys_strict`],
//!   [`normalize_keys_permissive`], [`to_serializable`],
//!   [`to_serializable_with`]
//! - **Diff**: [`diff`]
//!
//! Key normalization interns names through an injected [`SymbolTable`];
//! [`Interner`] is a thread-safe implementation.
//!
//! # Design
//!
//! This crate has **no dependencies on other internal astrid crates**. The
//! configuration loader parses TOML into trees with `From<toml::Value>` and
//! the persistence side writes them back with [`Tree::to_toml`] after
//! [`to_serializable`].

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

/// Path-based lookup and update.
pub mod access;
/// Structural rewriting and key normalization.
pub mod convert;
/// One-level structural diff.
pub mod diff;
/// Error types.
pub mod error;
mod interop;
/// Keys, symbols and paths.
pub mod key;
/// Deep merge.
pub mod merge;
/// Symbol interning.
pub mod symbols;
/// The tree value.
pub mod tree;

pub use access::{Lookup, find, get, get_or, put, remove};
pub use convert::{
    Rewrite, convert, normalize_keys_permissive, normalize_keys_strict, to_serializable,
    to_serializable_with, try_convert,
};
pub use diff::{TreeDiff, diff};
pub use error::{NestError, NestResult};
pub use key::{Key, Path, Symbol, display_path};
pub use merge::{FieldSources, merge, merge_tracking};
pub use symbols::{Interner, SymbolTable};
pub use tree::{Node, Scalar, Tree};
