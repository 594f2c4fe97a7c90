// RustPixel
// copyright zipxing@hotmail.com 2022～2025

//! Grid text layout.
//!
//! Text blocks are laid out as fixed width rows so that every glyph lands on
//! a cell of the canvas grid.

/// Characters that can not be drawn as a glyph and are shown as a blank cell.
/// Newlines count too, wrapped text gets its line breaks from the width.
pub fn is_blank_char(c: char) -> bool {
    c.is_control() || c == '\u{00A0}' || c == '\u{00AD}'
}

/// Wraps `text` into rows of exactly `width` characters, the last row may be
/// shorter. Non-printable characters become spaces.
///
/// Text that already fits, or has no width, is returned untouched.
pub fn layout_text(text: &str, width: Option<usize>) -> String {
    let width = match width {
        Some(w) if w > 0 && text.chars().count() > w => w,
        _ => return text.to_string(),
    };

    let mut table: Vec<String> = vec![];
    let mut row = String::with_capacity(width);
    for (index, character) in text.chars().enumerate() {
        let character = if is_blank_char(character) { ' ' } else { character };
        if index > 0 && index % width == 0 {
            table.push(std::mem::take(&mut row));
        }
        row.push(character);
    }
    table.push(row);
    table.join("\n")
}

/// Returns (columns, rows) of a laid-out block, columns being the widest
/// line.
pub fn grid_dimensions(text: &str) -> (u32, u32) {
    let cols = text
        .split('\n')
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0);
    let rows = text.split('\n').count();
    (cols as u32, rows as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_exact_width() {
        let text: String = ('a'..='z').collect();
        let out = layout_text(&text, Some(8));
        let lines: Vec<&str> = out.split('\n').collect();
        assert_eq!(lines.len(), 4);
        for l in &lines[..3] {
            assert_eq!(l.chars().count(), 8);
        }
        assert_eq!(lines[3], "yz");
        assert!(lines[3].chars().count() <= 8);
    }

    #[test]
    fn test_wrap_multiple_of_width() {
        let text = "x".repeat(64);
        let out = layout_text(&text, Some(16));
        assert_eq!(out.split('\n').count(), 4);
        assert!(out.split('\n').all(|l| l.len() == 16));
    }

    #[test]
    fn test_non_printable_becomes_space() {
        let text = "ab\tc\rd\u{7}e\u{0}fghij";
        let out = layout_text(text, Some(4));
        assert_eq!(out, "ab c\n d e\n fgh\nij");
        assert!(!out.chars().any(|c| c.is_control() && c != '\n'));
    }

    #[test]
    fn test_newline_in_wrapped_text_is_blank() {
        let out = layout_text("\nabcdefg\nh", Some(4));
        assert_eq!(out, " abc\ndefg\n h");
        assert!(out.split('\n').all(|l| l.chars().count() == 4 || l == " h"));
    }

    #[test]
    fn test_multibyte_characters_count_as_one_cell() {
        let text = "\u{2554}\u{2550}\u{2557}\u{2551}\u{2591}\u{2551}";
        let out = layout_text(text, Some(3));
        assert_eq!(out, "\u{2554}\u{2550}\u{2557}\n\u{2551}\u{2591}\u{2551}");
    }

    #[test]
    fn test_untouched_when_fitting_or_unwrapped() {
        assert_eq!(layout_text("short", Some(16)), "short");
        assert_eq!(layout_text("a\tb\nc", None), "a\tb\nc");
        assert_eq!(layout_text("abc", Some(0)), "abc");
    }

    #[test]
    fn test_grid_dimensions() {
        assert_eq!(grid_dimensions("abcd\nef"), (4, 2));
        assert_eq!(grid_dimensions("\nabc\nde\n"), (3, 4));
        assert_eq!(grid_dimensions(""), (0, 1));
    }
}
