//! Hash-tree node types produced by the compiler

use indexmap::IndexMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Attribute name to string value, in markup order
pub type Props = IndexMap<String, String>;

/// Compiled markup: the top-level nodes in document order
pub type HashTree = Vec<HashNode>;

/// Children of a hash-tree node
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum Children {
    /// Leaf text (content with no nested tags)
    Text(String),
    /// Converted child nodes, in order
    Nodes(Vec<HashNode>),
}

impl Default for Children {
    fn default() -> Self {
        Children::Nodes(Vec::new())
    }
}

impl Children {
    /// Leaf text, if this is a text child
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Children::Text(text) => Some(text),
            Children::Nodes(_) => None,
        }
    }

    /// Child nodes; empty for leaf text
    pub fn nodes(&self) -> &[HashNode] {
        match self {
            Children::Text(_) => &[],
            Children::Nodes(nodes) => nodes,
        }
    }
}

/// A `{type, props, children}` node of the compiled hash-tree
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HashNode {
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub node_type: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub props: Props,
    #[cfg_attr(feature = "serde", serde(default))]
    pub children: Children,
}

impl HashNode {
    pub fn new(node_type: impl Into<String>, props: Props, children: Children) -> Self {
        Self {
            node_type: node_type.into(),
            props,
            children,
        }
    }

    /// Create a leaf node holding text
    pub fn text(node_type: impl Into<String>, props: Props, text: impl Into<String>) -> Self {
        Self::new(node_type, props, Children::Text(text.into()))
    }

    /// Create a node holding child nodes
    pub fn with_nodes(node_type: impl Into<String>, props: Props, nodes: Vec<HashNode>) -> Self {
        Self::new(node_type, props, Children::Nodes(nodes))
    }

    /// Look up a prop value
    pub fn prop(&self, name: &str) -> Option<&str> {
        self.props.get(name).map(String::as_str)
    }
}

/// Build a [`Props`] map from `(key, value)` pairs
pub fn props<I, K, V>(pairs: I) -> Props
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
