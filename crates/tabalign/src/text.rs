//! Width-aware helpers for rendering cells in a terminal

use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Widest a single cell is allowed to render
pub const MAX_CELL_WIDTH: usize = 32;

/// Terminal display width of a cell, with line breaks and tabs shown as one column each.
pub fn display_width(text: &str) -> usize {
    text.graphemes(true)
        .map(|g| match g {
            "\n" | "\r\n" | "\t" => 1,
            g => g.width(),
        })
        .sum()
}

/// Flatten a cell to one line so it cannot break table layout.
pub fn single_line(text: &str) -> String {
    text.replace("\r\n", "⏎")
        .replace(['\n', '\r'], "⏎")
        .replace('\t', "→")
}

/// Truncate to `max_width` columns, ending with `…` when shortened.
pub fn truncate_text(text: &str, max_width: usize) -> String {
    if display_width(text) <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut width = 0;
    for g in text.graphemes(true) {
        let w = g.width();
        if width + w + 1 > max_width {
            break;
        }
        out.push_str(g);
        width += w;
    }
    out.push('…');
    out
}

/// Pad with spaces to `width` display columns.
pub fn pad_to(text: &str, width: usize) -> String {
    let current = display_width(text);
    let mut out = text.to_string();
    out.push_str(&" ".repeat(width.saturating_sub(current)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_width_wide_chars() {
        assert_eq!(display_width("abc"), 3);
        assert_eq!(display_width("日本"), 4);
        assert_eq!(display_width(""), 0);
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_text("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_text("abc", 0), "");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("a\nb\tc"), "a⏎b→c");
        assert_eq!(single_line("a\r\nb"), "a⏎b");
    }

    #[test]
    fn test_pad_to() {
        assert_eq!(pad_to("ab", 4), "ab  ");
        assert_eq!(pad_to("日", 3), "日 ");
        assert_eq!(pad_to("abcdef", 3), "abcdef");
    }
}
