//! WASM bindings for ticketml
//!
//! This module provides JavaScript-accessible functions for compiling and
//! laying out receipt markup.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "wasm")]
use crate::core::layout::LayoutOptions;

/// Layout options (exposed to WASM)
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderOptions {
    /// Width of columns without their own `width` prop
    #[serde(default = "default_col_width")]
    pub col_width: usize,
    /// Blank columns between cells
    #[serde(default = "default_border_width")]
    pub border_width: usize,
}

#[cfg(feature = "wasm")]
impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            col_width: default_col_width(),
            border_width: default_border_width(),
        }
    }
}

#[cfg(feature = "wasm")]
fn default_col_width() -> usize {
    crate::data::constants::DEFAULT_COL_WIDTH
}

#[cfg(feature = "wasm")]
fn default_border_width() -> usize {
    crate::data::constants::DEFAULT_BORDER_WIDTH
}

/// Render result with status
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct RenderLinesResult {
    /// Rendered lines
    pub lines: Vec<String>,
    /// Whether rendering was successful
    pub success: bool,
    /// Error message if rendering failed
    pub error: Option<String>,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Render markup to fixed-width lines
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderLines")]
pub fn render_lines_wasm(markup: &str, options: JsValue) -> JsValue {
    let opts: RenderOptions = serde_wasm_bindgen::from_value(options).unwrap_or_default();
    let layout = LayoutOptions::new()
        .with_col_width(opts.col_width)
        .with_border_width(opts.border_width);

    let result = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        crate::render_lines(markup, &layout)
    })) {
        Ok(Ok(lines)) => RenderLinesResult {
            lines,
            success: true,
            error: None,
        },
        Ok(Err(e)) => RenderLinesResult {
            lines: vec![],
            success: false,
            error: Some(e.to_string()),
        },
        Err(e) => {
            let error_msg = if let Some(s) = e.downcast_ref::<&str>() {
                format!("Rendering failed: {}", s)
            } else if let Some(s) = e.downcast_ref::<String>() {
                format!("Rendering failed: {}", s)
            } else {
                "Rendering failed: unknown error (check browser console for details)".to_string()
            };
            RenderLinesResult {
                lines: vec![],
                success: false,
                error: Some(error_msg),
            }
        }
    };

    serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL)
}

/// Compile markup to its hash-tree; `null` on error
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "compileTree")]
pub fn compile_tree_wasm(markup: &str) -> JsValue {
    match crate::compile(markup) {
        Ok(tree) => serde_wasm_bindgen::to_value(tree.as_ref()).unwrap_or(JsValue::NULL),
        Err(_) => JsValue::NULL,
    }
}

/// Check markup for dropped or malformed content
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkMarkup")]
pub fn check_markup_wasm(markup: &str) -> JsValue {
    use crate::diagnostics::DiagnosticLevel;

    let result = crate::diagnostics::check_markup(markup);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        match d.level {
            DiagnosticLevel::Error => errors.push(d.message.clone()),
            DiagnosticLevel::Warning => warnings.push(d.message.clone()),
            DiagnosticLevel::Info => infos.push(d.message.clone()),
        }
    }

    let summary = CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    };
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

/// Markup check results grouped by level
#[cfg(feature = "wasm")]
#[derive(Serialize, Deserialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
