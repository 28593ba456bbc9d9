//! Mutable working node of the layout engine

use crate::core::compiler::Props;

/// A node of the layout tree.
///
/// Rows (`tr`) hold their cells in `node_list`; cells (`td`) carry their
/// wrapped or padded content in `text`. Children are owned exclusively and
/// props are always copied by value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutNode {
    pub node_type: String,
    pub node_list: Vec<LayoutNode>,
    pub props: Props,
    pub text: String,
}

impl LayoutNode {
    pub fn new(node_type: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            ..Default::default()
        }
    }

    /// Create a node holding text
    pub fn with_text(node_type: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            text: text.into(),
            ..Default::default()
        }
    }

    /// Append a child
    pub fn add(&mut self, node: LayoutNode) {
        self.node_list.push(node);
    }

    /// Replace props with a copy of `props`
    pub fn set_props(&mut self, props: &Props) {
        self.props = props.clone();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The children's text, in order
    pub fn to_array(&self) -> Vec<&str> {
        self.node_list.iter().map(|node| node.text.as_str()).collect()
    }

    /// Copy this node. A shallow copy keeps type, props and text but no
    /// children; a deep copy also copies every child.
    pub fn clone_node(&self, deep: bool) -> LayoutNode {
        LayoutNode {
            node_type: self.node_type.clone(),
            node_list: if deep {
                self.node_list.clone()
            } else {
                Vec::new()
            },
            props: self.props.clone(),
            text: self.text.clone(),
        }
    }
}
