//! Table layout
//!
//! Reflows a compiled hash-tree into fixed-width printable rows.
//!
//! # Architecture
//!
//! ```text
//! HashTree -> TableLayoutEngine::pretreat -> LayoutNode tree -> RowFlattener -> Vec<PrintRow>
//! ```
//!
//! The engine wraps every cell to its column width, expands each source row
//! into synchronized output rows and inserts border cells between columns.
//! The flattener joins each row's cells into a single line and resolves the
//! row's effective props.
//!
//! # Example
//!
//! ```
//! use ticketml::core::compiler::TreeCompiler;
//! use ticketml::core::layout::{LayoutOptions, RowFlattener, TableLayoutEngine};
//!
//! let tree = TreeCompiler::new("<table><tr><td width=\"5\">HelloWorld</td></tr></table>")
//!     .unwrap()
//!     .run();
//! let root = TableLayoutEngine::new(LayoutOptions::default()).pretreat(&tree);
//! let lines: Vec<String> = RowFlattener::flatten(&root).into_iter().map(|r| r.text).collect();
//! assert_eq!(lines, vec!["Hello", "World"]);
//! ```

mod engine;
mod flatten;
mod node;
mod options;


// Re-export public API
pub use engine::TableLayoutEngine;
pub use flatten::{PrintRow, RowFlattener};
pub use node::LayoutNode;
pub use options::{ColumnWidth, LayoutOptions};
