//! Grapheme-aware word boundary scanning.
//!
//! Hosts implementing [`TextOps::prev_word_start`](crate::traits::TextOps::prev_word_start)
//! can delegate the per-line scan to this module instead of reinventing it.

use unicode_segmentation::UnicodeSegmentation;

/// Column of the start of the word ending at `col` in `line`.
///
/// Columns are grapheme-cluster indices. Whitespace immediately before `col`
/// is consumed first, then the run of non-whitespace graphemes, so deleting
/// from the returned column removes the previous word together with any
/// trailing separator. A `col` beyond the end of the line is clamped to the
/// line length before scanning.
pub fn prev_word_start(line: &str, col: u32) -> u32 {
    let graphemes: Vec<&str> = line.graphemes(true).collect();
    let mut i = (col as usize).min(graphemes.len());
    while i > 0 && is_whitespace(graphemes[i - 1]) {
        i -= 1;
    }
    while i > 0 && !is_whitespace(graphemes[i - 1]) {
        i -= 1;
    }
    i as u32
}

fn is_whitespace(grapheme: &str) -> bool {
    grapheme.chars().all(char::is_whitespace)
}
