//! The recursive tree value.

use std::collections::BTreeMap;

use crate::key::Key;

/// One level of nesting: a mapping from [`Key`] to [`Tree`].
pub type Node = BTreeMap<Key, Tree>;

/// A terminal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    /// Boolean.
    Bool(bool),
    /// Signed integer. Also used for the code points of character lists.
    Integer(i64),
    /// Floating point number.
    Float(f64),
    /// UTF-8 text.
    Text(String),
    /// Raw bytes.
    Bytes(Vec<u8>),
}

/// Nested configuration data.
///
/// A tree is either a [`Node`] of keyed subtrees, a list of trees, or a
/// scalar leaf. Ownership rules out cycles and the map type rules out
/// duplicate keys.
#[derive(Debug, Clone, PartialEq)]
pub enum Tree {
    /// Keyed subtrees.
    Node(Node),
    /// Ordered sequence of trees.
    List(Vec<Tree>),
    /// Terminal scalar.
    Leaf(Scalar),
}

impl Default for Tree {
    fn default() -> Self {
        Self::empty()
    }
}

impl Tree {
    /// An empty node.
    #[must_use]
    pub fn empty() -> Self {
        Self::Node(Node::new())
    }

    /// A text leaf.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Leaf(Scalar::Text(text.into()))
    }

    /// A list of code points spelling `text`, one integer leaf per `char`.
    #[must_use]
    pub fn char_list(text: &str) -> Self {
        Self::List(
            text.chars()
                .map(|c| Self::Leaf(Scalar::Integer(i64::from(u32::from(c)))))
                .collect(),
        )
    }

    /// Whether this tree is a [`Tree::Node`].
    #[must_use]
    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    /// The entries of a [`Tree::Node`].
    #[must_use]
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Self::Node(node) => Some(node),
            _ => None,
        }
    }

    /// The elements of a [`Tree::List`].
    #[must_use]
    pub fn as_list(&self) -> Option<&[Tree]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// The scalar of a [`Tree::Leaf`].
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Leaf(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// The text of a text leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Leaf(Scalar::Text(text)) => Some(text),
            _ => None,
        }
    }

    /// The value of an integer leaf.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Leaf(Scalar::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    /// The value of a float leaf.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Leaf(Scalar::Float(value)) => Some(*value),
            _ => None,
        }
    }

    /// The value of a boolean leaf.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Leaf(Scalar::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Classify this tree as a character list.
    ///
    /// Returns the decoded text when the tree is a non-empty list whose
    /// elements are all integer leaves holding printable code points.
    /// Anything else (including the empty list) is not a character list.
    #[must_use]
    pub fn as_char_list(&self) -> Option<String> {
        let items = self.as_list()?;
        if items.is_empty() {
            return None;
        }
        items
            .iter()
            .map(|item| item.as_integer().and_then(printable_char))
            .collect()
    }
}

/// Decode a code point if it is a printable character.
///
/// Printable means any non-control character plus the usual whitespace and
/// escape controls found in text.
fn printable_char(code: i64) -> Option<char> {
    let c = u32::try_from(code).ok().and_then(char::from_u32)?;
    let printable = !c.is_control()
        || matches!(
            c,
            '\n' | '\r' | '\t' | '\u{0b}' | '\u{08}' | '\u{0c}' | '\u{1b}'
        );
    printable.then_some(c)
}

impl From<Scalar> for Tree {
    fn from(scalar: Scalar) -> Self {
        Self::Leaf(scalar)
    }
}

impl From<Node> for Tree {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

impl From<Vec<Tree>> for Tree {
    fn from(items: Vec<Tree>) -> Self {
        Self::List(items)
    }
}

impl From<bool> for Tree {
    fn from(value: bool) -> Self {
        Self::Leaf(Scalar::Bool(value))
    }
}

impl From<i32> for Tree {
    fn from(value: i32) -> Self {
        Self::Leaf(Scalar::Integer(i64::from(value)))
    }
}

impl From<i64> for Tree {
    fn from(value: i64) -> Self {
        Self::Leaf(Scalar::Integer(value))
    }
}

impl From<f64> for Tree {
    fn from(value: f64) -> Self {
        Self::Leaf(Scalar::Float(value))
    }
}

impl From<&str> for Tree {
    fn from(value: &str) -> Self {
        Self::text(value)
    }
}

impl From<String> for Tree {
    fn from(value: String) -> Self {
        Self::Leaf(Scalar::Text(value))
    }
}

impl<K, V> FromIterator<(K, V)> for Tree
where
    K: Into<Key>,
    V: Into<Tree>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Node(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_empty_node() {
        assert_eq!(Tree::default(), Tree::Node(Node::new()));
        assert!(Tree::default().is_node());
    }

    #[test]
    fn test_from_iter_builds_node() {
        let tree: Tree = [("provider", Tree::from("claude")), ("max_tokens", Tree::from(4096))]
            .into_iter()
            .collect();
        let node = tree.as_node().unwrap();
        assert_eq!(node[&Key::text("provider")].as_str(), Some("claude"));
        assert_eq!(node[&Key::text("max_tokens")].as_integer(), Some(4096));
    }

    #[test]
    fn test_char_list_classification() {
        assert_eq!(
            Tree::char_list("hello world\n").as_char_list().as_deref(),
            Some("hello world\n")
        );
        assert_eq!(Tree::char_list("héllo").as_char_list().as_deref(), Some("héllo"));
    }

    #[test]
    fn test_non_char_lists() {
        // Control code.
        assert_eq!(Tree::List(vec![Tree::from(104), Tree::from(0)]).as_char_list(), None);
        // Negative and out of range.
        assert_eq!(Tree::List(vec![Tree::from(-1)]).as_char_list(), None);
        assert_eq!(Tree::List(vec![Tree::from(0x11_0000_i64)]).as_char_list(), None);
        // Mixed element types.
        assert_eq!(Tree::List(vec![Tree::from(104), Tree::from("i")]).as_char_list(), None);
        // Empty list and non-lists.
        assert_eq!(Tree::List(Vec::new()).as_char_list(), None);
        assert_eq!(Tree::from("hi").as_char_list(), None);
    }

    #[test]
    fn test_accessors_reject_other_variants() {
        let leaf = Tree::from(true);
        assert_eq!(leaf.as_bool(), Some(true));
        assert!(leaf.as_node().is_none());
        assert!(leaf.as_list().is_none());
        assert!(leaf.as_integer().is_none());
        assert_eq!(Tree::from(1.5).as_float(), Some(1.5));
    }
}
