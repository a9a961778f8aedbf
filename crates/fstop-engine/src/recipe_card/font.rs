//! Glyph lookup for the recipe card over the `font8x8` tables. Rows run top
//! to bottom and bit 0 is the leftmost column.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};

pub const GLYPH_SIZE: u32 = 8;
/// Vertical advance in font dots, including two dots of leading.
pub const LINE_HEIGHT: u32 = GLYPH_SIZE + 2;

/// Glyph for `ch`; the bullet maps to a middle dot and anything else the
/// tables lack renders as `?`.
pub fn glyph(ch: char) -> [u8; 8] {
    let ch = if ch == '\u{2022}' { '\u{00b7}' } else { ch };
    BASIC_FONTS
        .get(ch)
        .or_else(|| LATIN_FONTS.get(ch))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use font8x8::{UnicodeFonts, BASIC_FONTS};

    use super::glyph;

    #[test]
    fn ascii_and_latin_resolve() {
        assert!(glyph('f').iter().any(|row| *row != 0));
        assert_ne!(glyph('f'), glyph('F'));
        assert!(glyph('\u{e9}').iter().any(|row| *row != 0));
    }

    #[test]
    fn bullet_and_unknowns_have_glyphs() {
        assert_eq!(glyph('\u{2022}'), glyph('\u{00b7}'));
        assert_eq!(glyph('\u{4e2d}'), BASIC_FONTS.get('?').unwrap_or_default());
        assert_eq!(glyph(' '), [0; 8]);
    }
}
