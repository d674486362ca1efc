use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Display width in terminal cells
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

/// Truncate a string to fit within `max_cells` terminal cells, appending `…` if truncated.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    if max_cells == 1 {
        return "\u{2026}".to_string();
    }
    let budget = max_cells - 1;
    let mut width = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let gw = grapheme_width(g);
        if width + gw > budget {
            break;
        }
        width += gw;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the first grapheme such that the text before it is at
/// least `cells` wide. Used to scroll a single-line field horizontally.
pub fn skip_width(s: &str, cells: usize) -> usize {
    let mut width = 0;
    for (i, g) in s.grapheme_indices(true) {
        if width >= cells {
            return i;
        }
        width += grapheme_width(g);
    }
    s.len()
}

/// Next grapheme boundary after `byte_offset`. Returns None if at end.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    match s[byte_offset..].grapheme_indices(true).nth(1) {
        Some((i, _)) => Some(byte_offset + i),
        None => Some(s.len()),
    }
}

/// Previous grapheme boundary before `byte_offset`. Returns None if at start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
}

/// Display column of `byte_offset`
pub fn byte_offset_to_display_col(s: &str, byte_offset: usize) -> usize {
    display_width(&s[..byte_offset.min(s.len())])
}

/// Start of the word left of `byte_offset` (whitespace-delimited)
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let graphemes: Vec<(usize, &str)> = s[..byte_offset].grapheme_indices(true).collect();
    let mut idx = graphemes.len();
    while idx > 0 && is_blank(graphemes[idx - 1].1) {
        idx -= 1;
    }
    while idx > 0 && !is_blank(graphemes[idx - 1].1) {
        idx -= 1;
    }
    graphemes.get(idx).map_or(byte_offset, |(i, _)| *i)
}

/// Start of the next word right of `byte_offset`, or the end of the string
pub fn word_boundary_right(s: &str, byte_offset: usize) -> usize {
    let mut graphemes = s[byte_offset..].grapheme_indices(true).peekable();
    while graphemes.next_if(|(_, g)| !is_blank(g)).is_some() {}
    while graphemes.next_if(|(_, g)| is_blank(g)).is_some() {}
    graphemes
        .peek()
        .map_or(s.len(), |(i, _)| byte_offset + i)
}

fn is_blank(g: &str) -> bool {
    g.chars().all(char::is_whitespace)
}

fn grapheme_width(g: &str) -> usize {
    UnicodeWidthStr::width(g)
}
