//! Classic 5x7 column-major bitmap font.
//!
//! Each glyph is five column bytes, least significant bit at the top.
//! Lowercase letters without their own glyph fall back to uppercase;
//! anything else draws as `?`.

/// Rows covered by a glyph column byte.
pub const GLYPH_HEIGHT: i32 = 8;
/// Horizontal advance per character at size 1 (5 columns plus spacing).
pub const ADVANCE: i32 = 6;

type Glyph = [u8; 5];

const UNKNOWN: Glyph = [0x02, 0x01, 0x51, 0x09, 0x06];

const DIGITS: [Glyph; 10] = [
    [0x3E, 0x51, 0x49, 0x45, 0x3E],
    [0x00, 0x42, 0x7F, 0x40, 0x00],
    [0x42, 0x61, 0x51, 0x49, 0x46],
    [0x21, 0x41, 0x45, 0x4B, 0x31],
    [0x18, 0x14, 0x12, 0x7F, 0x10],
    [0x27, 0x45, 0x45, 0x45, 0x39],
    [0x3C, 0x4A, 0x49, 0x49, 0x30],
    [0x01, 0x71, 0x09, 0x05, 0x03],
    [0x36, 0x49, 0x49, 0x49, 0x36],
    [0x06, 0x49, 0x49, 0x29, 0x1E],
];

const UPPER: [Glyph; 26] = [
    [0x7E, 0x11, 0x11, 0x11, 0x7E],
    [0x7F, 0x49, 0x49, 0x49, 0x36],
    [0x3E, 0x41, 0x41, 0x41, 0x22],
    [0x7F, 0x41, 0x41, 0x22, 0x1C],
    [0x7F, 0x49, 0x49, 0x49, 0x41],
    [0x7F, 0x09, 0x09, 0x09, 0x01],
    [0x3E, 0x41, 0x49, 0x49, 0x7A],
    [0x7F, 0x08, 0x08, 0x08, 0x7F],
    [0x00, 0x41, 0x7F, 0x41, 0x00],
    [0x20, 0x40, 0x41, 0x3F, 0x01],
    [0x7F, 0x08, 0x14, 0x22, 0x41],
    [0x7F, 0x40, 0x40, 0x40, 0x40],
    [0x7F, 0x02, 0x0C, 0x02, 0x7F],
    [0x7F, 0x04, 0x08, 0x10, 0x7F],
    [0x3E, 0x41, 0x41, 0x41, 0x3E],
    [0x7F, 0x09, 0x09, 0x09, 0x06],
    [0x3E, 0x41, 0x51, 0x21, 0x5E],
    [0x7F, 0x09, 0x19, 0x29, 0x46],
    [0x46, 0x49, 0x49, 0x49, 0x31],
    [0x01, 0x01, 0x7F, 0x01, 0x01],
    [0x3F, 0x40, 0x40, 0x40, 0x3F],
    [0x1F, 0x20, 0x40, 0x20, 0x1F],
    [0x3F, 0x40, 0x38, 0x40, 0x3F],
    [0x63, 0x14, 0x08, 0x14, 0x63],
    [0x07, 0x08, 0x70, 0x08, 0x07],
    [0x61, 0x51, 0x49, 0x45, 0x43],
];

/// Glyph for `ch`.
pub fn glyph(ch: char) -> Glyph {
    match ch {
        ' ' => [0x00; 5],
        '!' => [0x00, 0x00, 0x5F, 0x00, 0x00],
        ':' => [0x00, 0x36, 0x36, 0x00, 0x00],
        '.' => [0x00, 0x60, 0x60, 0x00, 0x00],
        '-' => [0x08, 0x08, 0x08, 0x08, 0x08],
        'a' => [0x20, 0x54, 0x54, 0x54, 0x78],
        'e' => [0x38, 0x54, 0x54, 0x54, 0x18],
        'i' => [0x00, 0x44, 0x7D, 0x40, 0x00],
        'n' => [0x7C, 0x08, 0x04, 0x04, 0x78],
        'o' => [0x38, 0x44, 0x44, 0x44, 0x38],
        'r' => [0x7C, 0x08, 0x04, 0x04, 0x08],
        't' => [0x04, 0x3F, 0x44, 0x40, 0x20],
        'u' => [0x3C, 0x40, 0x40, 0x20, 0x7C],
        'w' => [0x3C, 0x40, 0x30, 0x40, 0x3C],
        '0'..='9' => DIGITS[(ch as usize) - ('0' as usize)],
        'A'..='Z' => UPPER[(ch as usize) - ('A' as usize)],
        'a'..='z' => UPPER[(ch as usize) - ('a' as usize)],
        _ => UNKNOWN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings_have_glyphs() {
        for ch in "Current:Winner:Draw!XO3".chars() {
            assert_ne!(glyph(ch), UNKNOWN, "missing glyph for {ch:?}");
        }
    }

    #[test]
    fn test_space_is_blank() {
        assert_eq!(glyph(' '), [0; 5]);
    }

    #[test]
    fn test_unknown_falls_back() {
        assert_eq!(glyph('~'), UNKNOWN);
        assert_eq!(glyph('k'), glyph('K'));
    }
}
