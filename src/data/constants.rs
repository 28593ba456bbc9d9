//! Constants for markup compilation, layout and device defaults
//!
//! This module contains:
//! - Node type keywords and the default node vocabulary
//! - Property keys
//! - Default widths and device font settings

use phf::phf_set;

// ============================================================================
// Node Types
// ============================================================================

/// Table container
pub const NODE_TABLE: &str = "table";
/// Table row
pub const NODE_TR: &str = "tr";
/// Table cell
pub const NODE_TD: &str = "td";
/// Synthetic scope of the top-level layout node
pub const NODE_ROOT: &str = "root";

/// Tag names the compiler recognizes when no vocabulary is supplied
pub static DEFAULT_NODE_TYPES: phf::Set<&'static str> = phf_set! {
    "table",
    "tr",
    "td",
};

// ============================================================================
// Property Keys
// ============================================================================

pub const PROP_WIDTH: &str = "width";
pub const PROP_FONT_SIZE: &str = "fontSize";
pub const PROP_FONT_FAMILY: &str = "fontFamily";
pub const PROP_LINE_HEIGHT: &str = "lineHeight";

/// Width sentinel: do not pad or wrap the column
pub const WIDTH_AUTO: &str = "auto";

// ============================================================================
// Defaults
// ============================================================================

/// Column width used when a cell carries no `width` prop
pub const DEFAULT_COL_WIDTH: usize = 10;

/// Blank columns inserted between adjacent cells of a row
pub const DEFAULT_BORDER_WIDTH: usize = 2;

/// Widest column a `width` prop may request
pub const MAX_COL_WIDTH: usize = u16::MAX as usize;

pub const DEFAULT_FONT_SIZE: u32 = 30;

pub const DEFAULT_FONT_FAMILY: &str = "宋体";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vocabulary() {
        assert!(DEFAULT_NODE_TYPES.contains(NODE_TABLE));
        assert!(DEFAULT_NODE_TYPES.contains(NODE_TR));
        assert!(DEFAULT_NODE_TYPES.contains(NODE_TD));
        assert!(!DEFAULT_NODE_TYPES.contains(NODE_ROOT));
        assert_eq!(DEFAULT_NODE_TYPES.len(), 3);
    }
}
