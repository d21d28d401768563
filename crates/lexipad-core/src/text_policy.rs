//! Column accounting and line wrapping for the 16-column text grid.

use alloc::{string::String, vec::Vec};

/// Columns on one display line when every glyph is narrow.
pub const LINE_COLUMNS: usize = 16;

/// Whether `ch` is drawn with a 16px wide cell.
#[inline]
pub fn is_wide(ch: char) -> bool {
    (ch as u32) >= 128
}

/// Grid columns occupied by `ch`: narrow glyphs take one, wide glyphs two.
#[inline]
pub fn char_columns(ch: char) -> usize {
    if is_wide(ch) { 2 } else { 1 }
}

/// Grid columns occupied by the longest line of `text`.
pub fn display_columns(text: &str) -> usize {
    text.split('\n')
        .map(|line| line.chars().map(char_columns).sum::<usize>())
        .max()
        .unwrap_or(0)
}

/// Inserts line breaks so no line is wider than `width_cols` columns.
///
/// A wide glyph that does not fit in the remaining columns moves to the next
/// line whole. Existing newlines are kept and restart the count. A line always
/// takes at least one glyph, so tiny widths never loop.
pub fn word_wrap(text: &str, width_cols: usize) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / width_cols.max(1) + 1);
    let mut column = 0usize;

    for ch in text.chars() {
        if ch == '\n' {
            out.push('\n');
            column = 0;
            continue;
        }

        let cost = char_columns(ch);
        if column > 0 && column + cost > width_cols {
            out.push('\n');
            column = 0;
        }

        out.push(ch);
        column += cost;
    }

    out
}

/// Wraps `text` and returns its non-empty lines.
pub fn wrap_lines(text: &str, width_cols: usize) -> Vec<String> {
    word_wrap(text, width_cols)
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(String::from)
        .collect()
}
