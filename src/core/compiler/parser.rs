//! Tag matching over the restricted markup
//!
//! The parser recognizes `<name attrs>content</name>` triples at one nesting
//! level at a time. Same-named tags nested inside the content are balanced,
//! so a `table` inside a `td` closes at its own `</table>`.

use fxhash::FxHashSet;
use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;

use super::node::Props;

lazy_static! {
    /// Any opening tag; capture 1 is the name, capture 2 the raw attributes
    static ref OPEN_TAG_RE: Regex = Regex::new(r"<([a-zA-Z-]+)([^>]*)>").unwrap();

    /// `key="value"` attribute pairs
    static ref PROP_RE: Regex = Regex::new(r#"([\w-]+)\s*=\s*"([ \w-]+)""#).unwrap();
}

/// One matched tag triple, borrowing from the parsed string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagMatch<'a> {
    pub name: &'a str,
    pub attrs: &'a str,
    pub inner: &'a str,
    /// Byte range of the whole triple
    pub span: Range<usize>,
}

/// Tag matcher holding the recognized node vocabulary
#[derive(Debug, Clone)]
pub struct TagParser {
    vocabulary: FxHashSet<String>,
}

impl TagParser {
    pub fn new(vocabulary: FxHashSet<String>) -> Self {
        Self { vocabulary }
    }

    /// Whether `name` converts into a hash-tree node
    pub fn recognizes(&self, name: &str) -> bool {
        self.vocabulary.contains(name)
    }

    pub fn vocabulary(&self) -> &FxHashSet<String> {
        &self.vocabulary
    }

    /// Whether `content` still contains an opening tag
    pub fn contains_tag(content: &str) -> bool {
        OPEN_TAG_RE.is_match(content)
    }

    /// Parse `key="value"` pairs; values are trimmed, later keys win
    pub fn parse_props(attrs: &str) -> Props {
        PROP_RE
            .captures_iter(attrs)
            .map(|caps| (caps[1].to_string(), caps[2].trim().to_string()))
            .collect()
    }

    /// Match every top-level tag triple in `content`, left to right.
    ///
    /// Opening tags without a matching close are skipped, and so is any text
    /// between the matched triples.
    pub fn match_tags<'a>(content: &'a str) -> Vec<TagMatch<'a>> {
        let mut matches = Vec::new();
        let mut pos = 0;

        while pos < content.len() {
            let Some(caps) = OPEN_TAG_RE.captures(&content[pos..]) else {
                break;
            };
            let Some(whole) = caps.get(0) else {
                break;
            };
            let name_range = caps.get(1).map_or(0..0, |m| m.range());
            let attrs_range = caps.get(2).map_or(0..0, |m| m.range());

            let open_start = pos + whole.start();
            let open_end = pos + whole.end();
            let name = &content[pos + name_range.start..pos + name_range.end];
            let attrs = &content[pos + attrs_range.start..pos + attrs_range.end];

            match find_close(content, name, open_end) {
                Some((inner_end, close_end)) => {
                    matches.push(TagMatch {
                        name,
                        attrs,
                        inner: &content[open_end..inner_end],
                        span: open_start..close_end,
                    });
                    pos = close_end;
                }
                // '<' is one byte, so the next char boundary is right after it
                None => pos = open_start + 1,
            }
        }

        matches
    }
}

/// Find the `</name>` balancing an opening tag whose content starts at `from`.
///
/// Returns `(inner_end, close_end)` byte offsets.
fn find_close(content: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let close = format!("</{}>", name);
    let mut depth = 1usize;
    let mut cursor = from;

    loop {
        let next_close = cursor + content[cursor..].find(&close)?;
        depth += OPEN_TAG_RE
            .captures_iter(&content[cursor..next_close])
            .filter(|caps| &caps[1] == name)
            .count();
        depth -= 1;
        if depth == 0 {
            return Some((next_close, next_close + close.len()));
        }
        cursor = next_close + close.len();
    }
}
