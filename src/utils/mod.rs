//! Utility modules
//!
//! This module contains utilities and helpers:
//! - Markup diagnostics
//! - Error types and result types
//! - Fixed-width text helpers

pub mod diagnostics;
pub mod error;
pub mod text;

// Re-export commonly used items
pub use diagnostics::{
    check_markup, check_markup_with, format_diagnostics, CheckResult, Diagnostic, DiagnosticLevel,
};
pub use error::{RenderError, RenderResult};
pub use text::{cut_str_len, interleave, pad_right};
