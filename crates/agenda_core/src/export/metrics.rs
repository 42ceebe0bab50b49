//! Text measurement and word wrapping for the built-in Helvetica face.
//!
//! Widths come from the standard Helvetica AFM metrics (1/1000 em). Bold text
//! is measured with the regular table; it is only used for centering.

const PT_TO_MM: f32 = 25.4 / 72.0;
const FALLBACK_GLYPH_WIDTH: u16 = 556;

/// Advance widths for printable ASCII, `' '` through `'~'`.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

fn glyph_width(c: char) -> u16 {
    let code = u32::from(c);
    if (0x20..=0x7e).contains(&code) {
        HELVETICA_WIDTHS[(code - 0x20) as usize]
    } else {
        FALLBACK_GLYPH_WIDTH
    }
}

/// Rendered width of `text` in millimetres at `size_pt`.
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c))).sum();
    units as f32 / 1000.0 * size_pt * PT_TO_MM
}

/// Greedy word wrap to `max_width_mm`.
///
/// Line breaks in `text` are kept; whitespace runs inside a line collapse to
/// one space. Words wider than a full line are split between characters.
pub fn wrap_text(text: &str, max_width_mm: f32, size_pt: f32) -> Vec<String> {
    let space = text_width_mm(" ", size_pt);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0_f32;

        for word in paragraph.split_whitespace() {
            for piece in split_oversized(word, max_width_mm, size_pt) {
                let piece_width = text_width_mm(&piece, size_pt);
                if current.is_empty() {
                    current = piece;
                    current_width = piece_width;
                } else if current_width + space + piece_width <= max_width_mm {
                    current.push(' ');
                    current.push_str(&piece);
                    current_width += space + piece_width;
                } else {
                    lines.push(std::mem::replace(&mut current, piece));
                    current_width = piece_width;
                }
            }
        }
        lines.push(current);
    }

    lines
}

fn split_oversized(word: &str, max_width_mm: f32, size_pt: f32) -> Vec<String> {
    if text_width_mm(word, size_pt) <= max_width_mm {
        return vec![word.to_string()];
    }

    let mut pieces = Vec::new();
    let mut current = String::new();
    let mut width = 0.0_f32;
    for c in word.chars() {
        let glyph = u32::from(glyph_width(c)) as f32 / 1000.0 * size_pt * PT_TO_MM;
        if !current.is_empty() && width + glyph > max_width_mm {
            pieces.push(std::mem::take(&mut current));
            width = 0.0;
        }
        current.push(c);
        width += glyph;
    }
    if !current.is_empty() {
        pieces.push(current);
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::{text_width_mm, wrap_text};

    #[test]
    fn width_scales_with_font_size() {
        let small = text_width_mm("Agenda", 10.0);
        let large = text_width_mm("Agenda", 20.0);
        assert!((large - small * 2.0).abs() < 1e-4);
        assert_eq!(text_width_mm("", 12.0), 0.0);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap_text("Ana, Bo", 180.0, 12.0), vec!["Ana, Bo".to_string()]);
        assert!(wrap_text("", 180.0, 12.0).is_empty());
    }

    #[test]
    fn long_text_wraps_within_width_and_keeps_words() {
        let text = "word ".repeat(80);
        let lines = wrap_text(&text, 60.0, 12.0);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_mm(line, 12.0) <= 60.0);
            assert!(line.split(' ').all(|word| word == "word"));
        }
        let words: usize = lines.iter().map(|line| line.split(' ').count()).sum();
        assert_eq!(words, 80);
    }

    #[test]
    fn explicit_line_breaks_are_kept() {
        let lines = wrap_text("first\n\nthird", 180.0, 12.0);
        assert_eq!(lines, vec!["first", "", "third"]);
    }

    #[test]
    fn oversized_word_is_split() {
        let word = "x".repeat(200);
        let lines = wrap_text(&word, 30.0, 12.0);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat(), word);
    }
}
