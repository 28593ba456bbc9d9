//! Markup diagnostics
//!
//! The compiler is lossy by design: unknown tags, unclosed tags and text
//! mixed with tags are dropped without an error. This module reports those
//! cases, plus prop values the layout engine or the device cannot use:
//!
//! - Unknown tag names (dropped with their content)
//! - Unclosed, mismatched and stray closing tags
//! - Unusable `width`, `fontSize` and `lineHeight` values
//! - Text that is discarded because it sits next to tags
//!
//! ## Example
//!
//! ```rust
//! use ticketml::utils::diagnostics::check_markup;
//!
//! let result = check_markup("<table><tr><td>x</td></table>");
//! assert!(result.has_errors());
//! ```

use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;

use crate::core::compiler::TagParser;
use crate::core::layout::ColumnWidth;
use crate::data::constants::{DEFAULT_NODE_TYPES, PROP_FONT_SIZE, PROP_LINE_HEIGHT, PROP_WIDTH};

lazy_static! {
    /// Opening or closing tag; capture 1 is the slash, 2 the name, 3 the attributes
    static ref TAG_TOKEN_RE: Regex = Regex::new(r"<(/?)([a-zA-Z-]+)([^>]*)>").unwrap();
}

/// Diagnostic severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiagnosticLevel {
    /// Informational note
    Info,
    /// Warning - output may differ from what the markup suggests
    Warning,
    /// Error - the markup is malformed
    Error,
}

impl fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticLevel::Info => write!(f, "info"),
            DiagnosticLevel::Warning => write!(f, "warning"),
            DiagnosticLevel::Error => write!(f, "error"),
        }
    }
}

/// A single diagnostic message
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level
    pub level: DiagnosticLevel,
    /// Human-readable message
    pub message: String,
    /// Line number (1-indexed)
    pub line: Option<usize>,
    /// Column number (1-indexed)
    pub column: Option<usize>,
    /// Relevant source text
    pub source_text: Option<String>,
    /// Suggested fix
    pub suggestion: Option<String>,
}

impl Diagnostic {
    /// Create a new diagnostic
    pub fn new(level: DiagnosticLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            line: None,
            column: None,
            source_text: None,
            suggestion: None,
        }
    }

    /// Add location information
    pub fn with_location(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// Add source text
    pub fn with_source(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }

    /// Add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.level, self.message)?;

        if let (Some(line), Some(col)) = (self.line, self.column) {
            write!(f, "\n  --> line {}:{}", line, col)?;
        }

        if let Some(ref source) = self.source_text {
            write!(f, "\n  |\n  | {}", source)?;
        }

        if let Some(ref suggestion) = self.suggestion {
            write!(f, "\n  = help: {}", suggestion)?;
        }

        Ok(())
    }
}

/// Check result with summary
#[derive(Debug, Default)]
pub struct CheckResult {
    /// All diagnostics
    pub diagnostics: Vec<Diagnostic>,
    /// Number of errors
    pub errors: usize,
    /// Number of warnings
    pub warnings: usize,
    /// Number of info messages
    pub infos: usize,
}

impl CheckResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic
    pub fn add(&mut self, diag: Diagnostic) {
        match diag.level {
            DiagnosticLevel::Error => self.errors += 1,
            DiagnosticLevel::Warning => self.warnings += 1,
            DiagnosticLevel::Info => self.infos += 1,
        }
        self.diagnostics.push(diag);
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }

    /// Check if there are any issues at all
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Get summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();
        if self.errors > 0 {
            parts.push(format!(
                "{} error{}",
                self.errors,
                if self.errors == 1 { "" } else { "s" }
            ));
        }
        if self.warnings > 0 {
            parts.push(format!(
                "{} warning{}",
                self.warnings,
                if self.warnings == 1 { "" } else { "s" }
            ));
        }
        if self.infos > 0 {
            parts.push(format!(
                "{} note{}",
                self.infos,
                if self.infos == 1 { "" } else { "s" }
            ));
        }
        if parts.is_empty() {
            "no issues found".to_string()
        } else {
            parts.join(", ")
        }
    }
}

/// An open tag awaiting its close
struct OpenTag {
    name: String,
    line: usize,
    column: usize,
    has_tags: bool,
    has_text: bool,
}

/// Check markup against the default `table`/`tr`/`td` vocabulary
pub fn check_markup(input: &str) -> CheckResult {
    let parser = TagParser::new(DEFAULT_NODE_TYPES.iter().map(|s| s.to_string()).collect());
    check_markup_with(input, &parser)
}

/// Check markup against the vocabulary of `parser`
pub fn check_markup_with(input: &str, parser: &TagParser) -> CheckResult {
    let mut result = CheckResult::new();
    let line_offsets = compute_line_offsets(input);
    let mut stack: Vec<OpenTag> = Vec::new();
    let mut top_level_text = false;
    let mut last_end = 0;

    for caps in TAG_TOKEN_RE.captures_iter(input) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let is_close = !caps[1].is_empty();
        let name = &caps[2];
        let (line, col) = offset_to_location(whole.start(), &line_offsets);

        if !input[last_end..whole.start()].trim().is_empty() {
            match stack.last_mut() {
                Some(open) => open.has_text = true,
                None => top_level_text = true,
            }
        }
        last_end = whole.end();

        if is_close {
            close_tag(name, line, col, &mut stack, &mut result);
            continue;
        }

        if let Some(parent) = stack.last_mut() {
            parent.has_tags = true;
        }
        if !parser.recognizes(name) {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!("unknown tag <{}> is dropped with its content", name),
                )
                .with_location(line, col)
                .with_source(whole.as_str()),
            );
        }
        check_props(&caps[3], line, col, &mut result);

        stack.push(OpenTag {
            name: name.to_string(),
            line,
            column: col,
            has_tags: false,
            has_text: false,
        });
    }

    if !input[last_end..].trim().is_empty() {
        match stack.last_mut() {
            Some(open) => open.has_text = true,
            None => top_level_text = true,
        }
    }

    while let Some(open) = stack.pop() {
        report_unclosed(&open, &mut result);
    }

    if top_level_text {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Info,
                "text outside of any tag is discarded",
            )
            .with_suggestion("Wrap the text in a <table>, <tr> or <td>"),
        );
    }

    result
}

fn close_tag(
    name: &str,
    line: usize,
    col: usize,
    stack: &mut Vec<OpenTag>,
    result: &mut CheckResult,
) {
    let Some(index) = stack.iter().rposition(|open| open.name == name) else {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Error,
                format!("unmatched closing tag </{}>", name),
            )
            .with_location(line, col)
            .with_suggestion(format!("Check for a missing <{}>", name)),
        );
        return;
    };

    while stack.len() > index + 1 {
        if let Some(open) = stack.pop() {
            report_unclosed(&open, result);
        }
    }
    if let Some(open) = stack.pop() {
        report_mixed_content(&open, result);
    }
}

fn report_unclosed(open: &OpenTag, result: &mut CheckResult) {
    result.add(
        Diagnostic::new(
            DiagnosticLevel::Error,
            format!("unclosed tag <{}>", open.name),
        )
        .with_location(open.line, open.column)
        .with_suggestion(format!("Add </{}>", open.name)),
    );
}

fn report_mixed_content(open: &OpenTag, result: &mut CheckResult) {
    if open.has_tags && open.has_text {
        result.add(
            Diagnostic::new(
                DiagnosticLevel::Info,
                format!("text next to child tags in <{}> is discarded", open.name),
            )
            .with_location(open.line, open.column),
        );
    }
}

/// Check prop values of one opening tag
fn check_props(attrs: &str, line: usize, col: usize, result: &mut CheckResult) {
    let props = TagParser::parse_props(attrs);

    if let Some(width) = props.get(PROP_WIDTH) {
        if ColumnWidth::parse(width).is_none() {
            result.add(
                Diagnostic::new(
                    DiagnosticLevel::Warning,
                    format!("width \"{}\" is not usable, the default width applies", width),
                )
                .with_location(line, col)
                .with_suggestion("Use a positive integer or \"auto\""),
            );
        }
    }

    for key in [PROP_FONT_SIZE, PROP_LINE_HEIGHT] {
        if let Some(value) = props.get(key) {
            if value.parse::<u32>().is_err() {
                result.add(
                    Diagnostic::new(
                        DiagnosticLevel::Warning,
                        format!("{} \"{}\" is not a number and is ignored", key, value),
                    )
                    .with_location(line, col),
                );
            }
        }
    }
}

/// Compute byte offsets for each line start
fn compute_line_offsets(input: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, c) in input.char_indices() {
        if c == '\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Convert byte offset to line and column
fn offset_to_location(offset: usize, line_offsets: &[usize]) -> (usize, usize) {
    let line = line_offsets
        .iter()
        .position(|&o| o > offset)
        .unwrap_or(line_offsets.len())
        - 1;

    let column = offset - line_offsets.get(line).unwrap_or(&0) + 1;
    (line + 1, column) // 1-indexed
}

/// Format check results for terminal output
pub fn format_diagnostics(result: &CheckResult, use_color: bool) -> String {
    let mut output = String::new();

    for diag in &result.diagnostics {
        if use_color {
            let color = match diag.level {
                DiagnosticLevel::Error => "\x1b[31m",   // Red
                DiagnosticLevel::Warning => "\x1b[33m", // Yellow
                DiagnosticLevel::Info => "\x1b[34m",    // Blue
            };
            output.push_str(color);
            output.push_str(&format!("{}", diag));
            output.push_str("\x1b[0m\n\n");
        } else {
            output.push_str(&format!("{}\n\n", diag));
        }
    }

    // Summary
    if use_color {
        if result.has_errors() {
            output.push_str("\x1b[31m");
        } else if result.warnings > 0 {
            output.push_str("\x1b[33m");
        } else {
            output.push_str("\x1b[32m");
        }
    }

    output.push_str(&format!("Summary: {}", result.summary()));

    if use_color {
        output.push_str("\x1b[0m");
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_markup() {
        let result = check_markup(
            "<table fontSize=\"24\">\n  <tr><td width=\"5\">a</td><td width=\"auto\">b</td></tr>\n</table>",
        );
        assert!(result.is_empty(), "{}", format_diagnostics(&result, false));
    }

    #[test]
    fn test_unknown_tag() {
        let result = check_markup("<tr><td>a</td><img>x</img></tr>");
        assert!(!result.has_errors());
        assert_eq!(result.warnings, 1);
        assert!(result.diagnostics[0].message.contains("<img>"));
        assert_eq!(result.diagnostics[0].column, Some(15));
    }

    #[test]
    fn test_unclosed_tag() {
        let result = check_markup("<table><tr><td>x</td></table>");
        assert!(result.has_errors());
        assert!(result.diagnostics[0].message.contains("unclosed tag <tr>"));
    }

    #[test]
    fn test_stray_close() {
        let result = check_markup("<td>x</td></tr>");
        assert_eq!(result.errors, 1);
        assert!(result.diagnostics[0].message.contains("</tr>"));
    }

    #[test]
    fn test_unclosed_at_end() {
        let result = check_markup("<table>\n<tr>");
        assert_eq!(result.errors, 2);
        let lines: Vec<_> = result.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![Some(2), Some(1)]);
    }

    #[test]
    fn test_bad_props() {
        let result = check_markup("<tr lineHeight=\"tall\"><td width=\"0\">a</td></tr>");
        assert_eq!(result.warnings, 2);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_mixed_content() {
        let result = check_markup("<tr>lost<td>a</td></tr>");
        assert_eq!(result.infos, 1);
        assert!(result.diagnostics[0].message.contains("<tr>"));
    }

    #[test]
    fn test_top_level_text() {
        let result = check_markup("hello <table>x</table>");
        assert_eq!(result.infos, 1);
        assert!(!result.has_errors());
    }

    #[test]
    fn test_custom_vocabulary() {
        let parser = TagParser::new(["row", "cell"].iter().map(|s| s.to_string()).collect());
        let result = check_markup_with("<row><cell>a</cell></row>", &parser);
        assert!(result.is_empty());
        let result = check_markup_with("<tr><td>a</td></tr>", &parser);
        assert_eq!(result.warnings, 2);
    }

    #[test]
    fn test_summary_format() {
        let mut result = CheckResult::new();
        result.add(Diagnostic::new(DiagnosticLevel::Error, "test"));
        result.add(Diagnostic::new(DiagnosticLevel::Warning, "test"));

        let summary = result.summary();
        assert!(summary.contains("1 error"));
        assert!(summary.contains("1 warning"));
        assert_eq!(CheckResult::new().summary(), "no issues found");
    }

    #[test]
    fn test_format_diagnostics_plain() {
        let result = check_markup("<td width=\"x\">a</td>");
        let out = format_diagnostics(&result, false);
        assert!(out.contains("warning: width \"x\""));
        assert!(out.contains("--> line 1:1"));
        assert!(out.ends_with("Summary: 1 warning"));
    }
}
