//! # ticketml
//!
//! Table markup compiler and fixed-width layout engine for receipt line
//! printers.
//!
//! ## Features
//!
//! - **Markup compiler**: `<table>`, `<tr>`, `<td>` markup with quoted
//!   attributes compiled to a tree of `{type, props, children}` nodes
//! - **Pluggable construction**: node building goes through a
//!   [`ConvertContext`], with per-context caching
//! - **Table layout**: cell wrapping, row synchronization, border spacing and
//!   nested tables inside cells
//! - **Print pipeline**: rows turned into positioned print commands and sent
//!   to an injected [`PrintTarget`]
//! - **Diagnostics**: a lint pass for markup the compiler would silently drop
//!
//! ## Usage Examples
//!
//! ### Rendering lines
//!
//! ```rust
//! use ticketml::{render_lines, LayoutOptions};
//!
//! let lines = render_lines(
//!     "<table><tr><td>id</td><td>name</td></tr></table>",
//!     &LayoutOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(lines, vec!["id          name      "]);
//! ```
//!
//! ### Printing
//!
//! ```rust
//! use ticketml::{DeviceSettings, LayoutOptions, MemoryTarget, PrintDevice, PrintStatus, Printer};
//!
//! let device = PrintDevice::new(MemoryTarget::new(), DeviceSettings::default());
//! let mut printer = Printer::new(device, LayoutOptions::default());
//! let status = printer
//!     .print_markup("<tr><td width=\"auto\">TOTAL</td><td width=\"auto\">9.90</td></tr>")
//!     .unwrap();
//! assert_eq!(status, PrintStatus::Printed(1));
//! assert_eq!(printer.device().target().printed_lines(), vec!["TOTAL  9.90"]);
//! ```

use std::rc::Rc;

/// Core compilation and layout modules
pub mod core;

/// Data layer - keywords and defaults
pub mod data;

/// Feature modules - print device and printer
pub mod features;

/// Utility modules
pub mod utils;

/// TOML configuration
#[cfg(feature = "config")]
pub mod config;

/// WebAssembly bindings
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export main types
pub use crate::core::compiler::{
    props, Children, ConvertContext, HashContext, HashNode, HashTree, Props, TagParser,
    TreeCompiler,
};
pub use crate::core::layout::{
    ColumnWidth, LayoutNode, LayoutOptions, PrintRow, RowFlattener, TableLayoutEngine,
};

// Re-export data modules
pub use data::constants;

// Re-export feature types
pub use features::{
    BoxSetting, DeviceError, DeviceSettings, FontSetting, LoggingTarget, MemoryTarget, NoopTarget,
    PrintCommand, PrintDevice, PrintStatus, PrintTarget, Printer,
};

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{RenderError, RenderResult};

#[cfg(feature = "config")]
pub use config::RenderConfig;

/// Compile markup with the default `table`/`tr`/`td` vocabulary
pub fn compile(markup: &str) -> RenderResult<Rc<HashTree>> {
    Ok(TreeCompiler::new(markup)?.run())
}

/// Compile markup and lay it out into synchronized rows
pub fn layout(markup: &str, options: &LayoutOptions) -> RenderResult<LayoutNode> {
    let tree = compile(markup)?;
    Ok(TableLayoutEngine::new(options.clone()).pretreat(&tree))
}

/// Compile, lay out and flatten markup into printable rows
pub fn render_rows(markup: &str, options: &LayoutOptions) -> RenderResult<Vec<PrintRow>> {
    let root = layout(markup, options)?;
    Ok(RowFlattener::flatten(&root))
}

/// Like [`render_rows`], keeping only the text of each row
pub fn render_lines(markup: &str, options: &LayoutOptions) -> RenderResult<Vec<String>> {
    Ok(render_rows(markup, options)?
        .into_iter()
        .map(|row| row.text)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_compile_basic() {
        let tree = compile("<table><tr><td>a</td></tr></table>").unwrap();
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].node_type, "table");
    }

    #[test]
    fn test_render_lines_wrapping() {
        let lines = render_lines(
            "<tr><td width=\"3\">abcdef</td><td width=\"2\">x</td></tr>",
            &LayoutOptions::default(),
        )
        .unwrap();
        assert_eq!(lines, vec!["abc  x ", "def    "]);
    }

    #[test]
    fn test_render_rows_props() {
        let rows = render_rows(
            "<table fontSize=\"20\"><tr lineHeight=\"40\"><td width=\"auto\">x</td></tr></table>",
            &LayoutOptions::default(),
        )
        .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].props.get("fontSize").map(String::as_str), Some("20"));
        assert_eq!(rows[0].props.get("lineHeight").map(String::as_str), Some("40"));
    }

    #[test]
    fn test_layout_with_options() {
        let options = LayoutOptions::new().with_col_width(3).with_border_width(0);
        let lines = render_lines("<tr><td>ab</td><td>cd</td></tr>", &options).unwrap();
        assert_eq!(lines, vec!["ab cd "]);
        let root = layout("<tr><td>ab</td></tr>", &options).unwrap();
        assert_eq!(root.node_type, "root");
    }

    #[test]
    fn test_render_empty_markup() {
        assert!(render_lines("", &LayoutOptions::default()).unwrap().is_empty());
        assert!(render_lines("just text", &LayoutOptions::default())
            .unwrap()
            .is_empty());
    }
}
