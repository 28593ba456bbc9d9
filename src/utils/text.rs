//! Fixed-width text helpers
//!
//! Widths are counted in `char`s: one char is one printable column.

/// Pad `text` with trailing spaces up to `width` columns.
///
/// Text that is already `width` columns or longer is returned unchanged.
pub fn pad_right(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count());
    let mut out = String::from(text);
    out.extend(std::iter::repeat(' ').take(pad));
    out
}

/// Cut `text` into consecutive segments of at most `width` chars.
///
/// Empty text yields a single empty segment; text whose length is a multiple
/// of `width` yields no trailing empty segment. A `width` of zero is treated
/// as one column.
pub fn cut_str_len(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    if text.is_empty() {
        return vec![String::new()];
    }

    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Insert a copy of `separator` between every pair of adjacent items.
pub fn interleave<T: Clone>(items: Vec<T>, separator: &T) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len() * 2);
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(separator.clone());
        }
        out.push(item);
    }
    out
}
