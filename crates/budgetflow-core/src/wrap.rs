//! Label wrapping for node captions.
//!
//! Widths are counted in terminal-style display columns (`unicode-width`), so wide glyphs count
//! double and combining marks count zero.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const ELLIPSIS: char = '…';
pub const MAX_LABEL_LINES: usize = 2;

pub fn display_width(text: &str) -> usize {
    UnicodeWidthStr::width(text)
}

/// Cuts `text` to at most `max_width` columns, ending in an ellipsis when anything was removed.
pub fn truncate_with_ellipsis(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    cut_with_ellipsis(text, max_width)
}

fn cut_with_ellipsis(text: &str, max_width: usize) -> String {
    let budget = max_width.saturating_sub(1);
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push(ELLIPSIS);
    out
}

/// Greedy word wrap into at most [`MAX_LABEL_LINES`] lines of `max_chars` columns.
///
/// A word wider than a whole line is truncated, never split across lines. When the text needs
/// more lines than allowed, the last kept line ends in an ellipsis.
pub fn wrap_label(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines: Vec<String> = Vec::new();
    let mut cur = String::new();

    for word in text.split_whitespace() {
        let word = truncate_with_ellipsis(word, max_chars);
        if cur.is_empty() {
            cur = word;
            continue;
        }
        if display_width(&cur) + 1 + display_width(&word) <= max_chars {
            cur.push(' ');
            cur.push_str(&word);
            continue;
        }
        lines.push(std::mem::take(&mut cur));
        cur = word;
    }
    if !cur.is_empty() {
        lines.push(cur);
    }

    if lines.len() > MAX_LABEL_LINES {
        lines.truncate(MAX_LABEL_LINES);
        if let Some(last) = lines.last_mut() {
            if !last.ends_with(ELLIPSIS) {
                *last = if display_width(last) < max_chars {
                    format!("{last}{ELLIPSIS}")
                } else {
                    cut_with_ellipsis(last, max_chars)
                };
            }
        }
    }

    if lines.is_empty() {
        vec!["".to_string()]
    } else {
        lines
    }
}

/// Widest line of a wrapped label, in columns.
pub fn max_line_width(lines: &[String]) -> usize {
    lines.iter().map(|l| display_width(l)).max().unwrap_or(0)
}
