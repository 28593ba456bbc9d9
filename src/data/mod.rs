//! Data layer - Static constants
//!
//! This module contains the static data shared by the compiler, the layout
//! engine and the print device:
//! - Node type keywords and the default vocabulary
//! - Property keys
//! - Default widths and font settings

pub mod constants;

// Re-export commonly used items
pub use constants::{
    DEFAULT_BORDER_WIDTH, DEFAULT_COL_WIDTH, DEFAULT_FONT_FAMILY,
    DEFAULT_FONT_SIZE, DEFAULT_NODE_TYPES, MAX_COL_WIDTH, NODE_ROOT, NODE_TABLE, NODE_TD, NODE_TR,
    PROP_FONT_FAMILY, PROP_FONT_SIZE, PROP_LINE_HEIGHT, PROP_WIDTH, WIDTH_AUTO,
};
