//! Tree keys and paths.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// An interned symbolic name.
///
/// Symbols are only handed out by a [`SymbolTable`](crate::SymbolTable), so
/// holding one proves the name was registered.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symbol(Arc<str>);

impl Symbol {
    pub(crate) fn from_arc(name: Arc<str>) -> Self {
        Self(name)
    }

    /// The symbol's name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A key inside a [`Node`](crate::Node).
///
/// Keys compare structurally: a symbol and a text key with the same name are
/// different keys.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    /// Interned symbolic name.
    Symbol(Symbol),
    /// Plain text.
    Text(String),
    /// Raw byte sequence.
    Bytes(Vec<u8>),
}

impl Key {
    /// Build a text key.
    #[must_use]
    pub fn text(name: impl Into<String>) -> Self {
        Self::Text(name.into())
    }

    /// The text of a [`Key::Text`].
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The symbol of a [`Key::Symbol`].
    #[must_use]
    pub fn as_symbol(&self) -> Option<&Symbol> {
        match self {
            Self::Symbol(symbol) => Some(symbol),
            _ => None,
        }
    }

    /// The name of a symbol or text key.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Symbol(symbol) => Some(symbol.as_str()),
            Self::Text(text) => Some(text),
            Self::Bytes(_) => None,
        }
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Self::Text(name.to_owned())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Self::Text(name)
    }
}

impl From<Symbol> for Key {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<Vec<u8>> for Key {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(bytes)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(symbol) => write!(f, ":{symbol}"),
            Self::Text(text) => f.write_str(text),
            Self::Bytes(bytes) => write!(f, "0x{}", hex::encode(bytes)),
        }
    }
}

/// An ordered sequence of keys locating a position in a tree.
pub type Path = Vec<Key>;

/// Render a path in dotted form (e.g. `model.max_tokens`).
#[must_use]
pub fn display_path(path: &[Key]) -> String {
    path.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

/// Build a [`Path`] from values convertible into [`Key`].
///
/// ```
/// use astrid_nestmap::{Key, path};
///
/// let p = path!["model", "max_tokens"];
/// assert_eq!(p, vec![Key::text("model"), Key::text("max_tokens")]);
/// ```
#[macro_export]
macro_rules! path {
    () => {
        ::std::vec::Vec::<$crate::Key>::new()
    };
    ($($segment:expr),+ $(,)?) => {
        ::std::vec![$($crate::Key::from($segment)),+]
    };
}
