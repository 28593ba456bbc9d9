//! Core rendering modules
//!
//! This module contains the two transformations of the render pipeline:
//! - `compiler`: tag markup to hash-tree compiler
//! - `layout`: hash-tree to fixed-width rows layout engine

pub mod compiler;
pub mod layout;

// Re-export main types from compiler
pub use compiler::{
    props, Children, ConvertContext, HashContext, HashNode, HashTree, Props, TagParser,
    TreeCompiler,
};

// Re-export main types from layout
pub use layout::{
    ColumnWidth, LayoutNode, LayoutOptions, PrintRow, RowFlattener, TableLayoutEngine,
};
