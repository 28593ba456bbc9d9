//! Layout options and column width resolution

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::core::compiler::Props;
use crate::data::constants::{
    DEFAULT_BORDER_WIDTH, DEFAULT_COL_WIDTH, MAX_COL_WIDTH, PROP_WIDTH, WIDTH_AUTO,
};
use crate::utils::text::{cut_str_len, pad_right};

/// Options for the table layout engine
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct LayoutOptions {
    /// Width of a column without its own `width` prop
    pub col_width: usize,
    /// Blank columns between adjacent cells
    pub border_width: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            col_width: DEFAULT_COL_WIDTH,
            border_width: DEFAULT_BORDER_WIDTH,
        }
    }
}

impl LayoutOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_col_width(mut self, col_width: usize) -> Self {
        self.col_width = col_width;
        self
    }

    pub fn with_border_width(mut self, border_width: usize) -> Self {
        self.border_width = border_width;
        self
    }
}

/// Effective width of one column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnWidth {
    /// Neither wrapped nor padded
    Auto,
    /// Wrapped into and padded to this many columns
    Fixed(usize),
}

impl ColumnWidth {
    /// Parse a `width` prop value: `"auto"` or an integer in
    /// `1..=MAX_COL_WIDTH`
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value == WIDTH_AUTO {
            return Some(ColumnWidth::Auto);
        }
        match value.parse::<usize>() {
            Ok(n) if (1..=MAX_COL_WIDTH).contains(&n) => Some(ColumnWidth::Fixed(n)),
            _ => None,
        }
    }

    /// Width from a node's props; missing or unusable values give
    /// `Fixed(default)`
    pub fn from_props(props: &Props, default: usize) -> Self {
        props
            .get(PROP_WIDTH)
            .and_then(|value| Self::parse(value))
            .unwrap_or(ColumnWidth::Fixed(default.min(MAX_COL_WIDTH)))
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, ColumnWidth::Auto)
    }

    /// Pad one output line to the column width
    pub fn pad(&self, line: &str) -> String {
        match self {
            ColumnWidth::Auto => line.to_string(),
            ColumnWidth::Fixed(width) => pad_right(line, *width),
        }
    }

    /// Cut text into lines of the column width, keeping existing line breaks
    pub fn wrap(&self, text: &str) -> Vec<String> {
        match self {
            ColumnWidth::Auto => text.split('\n').map(str::to_string).collect(),
            ColumnWidth::Fixed(width) => text
                .split('\n')
                .flat_map(|line| cut_str_len(line, *width))
                .collect(),
        }
    }
}
