//! Row flattening
//!
//! Walks a layout tree and joins every row's cells into one line of text.
//! Props resolve nearest-ancestor-wins: a `table` with props sets the
//! baseline for the rows that follow it, and a row's own props override the
//! baseline for that row only.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::node::LayoutNode;
use crate::core::compiler::Props;
use crate::data::constants::{NODE_TABLE, NODE_TR};

/// One printable line with its effective props
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PrintRow {
    pub text: String,
    pub props: Props,
}

/// Collects [`PrintRow`]s from a layout tree
#[derive(Debug, Default)]
pub struct RowFlattener {
    baseline: Props,
    rows: Vec<PrintRow>,
}

impl RowFlattener {
    /// Flatten `root` into rows, in document order
    pub fn flatten(root: &LayoutNode) -> Vec<PrintRow> {
        let mut flattener = Self::default();
        flattener.visit(root);
        flattener.rows
    }

    fn visit(&mut self, node: &LayoutNode) {
        if node.node_type == NODE_TR {
            let mut props = self.baseline.clone();
            for (key, value) in &node.props {
                props.insert(key.clone(), value.clone());
            }
            self.rows.push(PrintRow {
                text: node.to_array().concat(),
                props,
            });
            return;
        }

        if node.node_type == NODE_TABLE && !node.props.is_empty() {
            self.baseline = node.props.clone();
        }
        for child in &node.node_list {
            self.visit(child);
        }
    }
}
