//! Table layout engine
//!
//! Turns a hash-tree into a layout tree whose rows are ready to print as
//! fixed-width lines. Cell text is cut to the column width, and each source
//! row expands into as many synchronized output rows as its tallest cell
//! needs.

use std::collections::VecDeque;

use super::flatten::RowFlattener;
use super::node::LayoutNode;
use super::options::{ColumnWidth, LayoutOptions};
use crate::core::compiler::{Children, HashNode, Props};
use crate::data::constants::{NODE_ROOT, NODE_TABLE, NODE_TD, NODE_TR, PROP_WIDTH, WIDTH_AUTO};
use crate::utils::text::{interleave, pad_right};

/// Lays out hash-trees as width-bounded table rows
#[derive(Debug, Clone, Default)]
pub struct TableLayoutEngine {
    options: LayoutOptions,
}

impl TableLayoutEngine {
    pub fn new(options: LayoutOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LayoutOptions {
        &self.options
    }

    /// Lay out `tree` under a `root` node. The input is never modified.
    pub fn pretreat(&self, tree: &[HashNode]) -> LayoutNode {
        self.process(tree, NODE_ROOT)
    }

    /// Lay out `nodes` as the children of a fresh `scope` node
    fn process(&self, nodes: &[HashNode], scope: &str) -> LayoutNode {
        let mut parent = LayoutNode::new(scope);
        let mut queue: VecDeque<&HashNode> = nodes.iter().collect();

        while let Some(node) = queue.pop_front() {
            self.layout_node(node, &mut parent);
        }

        parent
    }

    fn layout_node(&self, node: &HashNode, parent: &mut LayoutNode) {
        match node.node_type.as_str() {
            NODE_TABLE | NODE_TR => match &node.children {
                Children::Nodes(children) if !children.is_empty() => {
                    let mut sub = self.process(children, &node.node_type);
                    if node.node_type == NODE_TR {
                        for row in self.synchronize_row(sub.node_list, &node.props) {
                            parent.add(row);
                        }
                    } else {
                        sub.set_props(&node.props);
                        parent.add(sub);
                    }
                }
                _ => self.layout_node(&expand_shorthand(node), parent),
            },
            NODE_TD => parent.add(self.layout_cell(node)),
            other => log::trace!("layout ignores <{}> node", other),
        }
    }

    /// Lay out one cell: its text cut into lines of the column width and
    /// rejoined with line breaks.
    ///
    /// A cell holding nested tables and no `width` of its own is sized to
    /// the nested rows. With a fixed width, nested rows lose their trailing
    /// padding before being cut.
    fn layout_cell(&self, node: &HashNode) -> LayoutNode {
        let mut props = node.props.clone();
        let text = match &node.children {
            Children::Text(text) => self.resolve_width(&props).wrap(text).join("\n"),
            Children::Nodes(nodes) => {
                let nested = self.render_nested(nodes);
                if !props.contains_key(PROP_WIDTH) {
                    props.insert(PROP_WIDTH.to_string(), WIDTH_AUTO.to_string());
                }
                match self.resolve_width(&props) {
                    ColumnWidth::Auto => nested.join("\n"),
                    fixed => nested
                        .iter()
                        .flat_map(|line| fixed.wrap(line.trim_end()))
                        .collect::<Vec<_>>()
                        .join("\n"),
                }
            }
        };

        let mut cell = LayoutNode::with_text(NODE_TD, text);
        cell.set_props(&props);
        cell
    }

    /// Render nested tables inside a cell, one text line per row
    fn render_nested(&self, nodes: &[HashNode]) -> Vec<String> {
        let nested = self.process(nodes, NODE_TD);
        RowFlattener::flatten(&nested)
            .into_iter()
            .map(|row| row.text)
            .collect()
    }

    fn resolve_width(&self, props: &Props) -> ColumnWidth {
        if let Some(value) = props.get(PROP_WIDTH) {
            if ColumnWidth::parse(value).is_none() {
                log::warn!(
                    "unusable column width {:?}, using default {}",
                    value,
                    self.options.col_width
                );
            }
        }
        ColumnWidth::from_props(props, self.options.col_width)
    }

    /// Split laid-out cells into synchronized rows.
    ///
    /// Each pass takes the next line of every column; a column with no lines
    /// left contributes an empty line. The pass in which every column is
    /// exhausted produces no row.
    fn synchronize_row(&self, columns: Vec<LayoutNode>, props: &Props) -> Vec<LayoutNode> {
        if columns.is_empty() {
            return Vec::new();
        }

        let widths: Vec<ColumnWidth> = columns
            .iter()
            .map(|col| ColumnWidth::from_props(&col.props, self.options.col_width))
            .collect();
        let mut remaining: Vec<VecDeque<&str>> = columns
            .iter()
            .map(|col| {
                if col.text.is_empty() {
                    VecDeque::new()
                } else {
                    col.text.split('\n').collect()
                }
            })
            .collect();

        let border = LayoutNode::with_text(NODE_TD, pad_right("", self.options.border_width));
        let mut rows = Vec::new();

        loop {
            let mut exhausted = true;
            let mut cells = Vec::with_capacity(columns.len());

            for ((col, width), lines) in columns.iter().zip(&widths).zip(remaining.iter_mut()) {
                let line = match lines.pop_front() {
                    Some(line) => {
                        exhausted = false;
                        line
                    }
                    None => "",
                };
                let mut cell = col.clone_node(false);
                cell.set_text(width.pad(line));
                cells.push(cell);
            }

            if exhausted {
                break;
            }

            let mut row = LayoutNode::new(NODE_TR);
            row.set_props(props);
            row.node_list = interleave(cells, &border);
            rows.push(row);
        }

        rows
    }
}

/// Rewrite a `table`/`tr` holding plain text (or nothing) as the explicit
/// `tr` -> `td` structure, wrapped in a `table` when the node was one.
fn expand_shorthand(node: &HashNode) -> HashNode {
    let text = node.children.as_text().unwrap_or_default();
    let cell = HashNode::text(NODE_TD, Props::new(), text);

    if node.node_type == NODE_TABLE {
        let row = HashNode::with_nodes(NODE_TR, Props::new(), vec![cell]);
        HashNode::with_nodes(NODE_TABLE, node.props.clone(), vec![row])
    } else {
        HashNode::with_nodes(NODE_TR, node.props.clone(), vec![cell])
    }
}
