//! Segment bit layout and glyph patterns for 7-segment digits.
//!
//! ```text
//!      A
//!     ---
//!  F |   | B
//!     -G-
//!  E |   | C
//!     ---  .DP
//!      D
//! ```

/// Constants for 7-segment LED displays.
///
/// A pattern is a `u8` with bit 0 for segment A through bit 6 for segment G and bit 7 for the
/// decimal point.
pub struct Leds;

impl Leds {
    /// Segment A of the 7-segment display.
    pub const SEG_A: u8 = 0b_0000_0001;
    /// Segment B of the 7-segment display.
    pub const SEG_B: u8 = 0b_0000_0010;
    /// Segment C of the 7-segment display.
    pub const SEG_C: u8 = 0b_0000_0100;
    /// Segment D of the 7-segment display.
    pub const SEG_D: u8 = 0b_0000_1000;
    /// Segment E of the 7-segment display.
    pub const SEG_E: u8 = 0b_0001_0000;
    /// Segment F of the 7-segment display.
    pub const SEG_F: u8 = 0b_0010_0000;
    /// Segment G of the 7-segment display.
    pub const SEG_G: u8 = 0b_0100_0000;
    /// Decimal point of the 7-segment display.
    pub const DECIMAL: u8 = 0b_1000_0000;

    /// Minus sign overlay.
    pub const MINUS: u8 = Self::SEG_G;

    /// All segments off.
    pub const BLANK: u8 = 0b_0000_0000;

    /// Shown on every digit when a number does not fit.
    pub const OVERFLOW: u8 = Self::MINUS;

    /// Array representing the segments for digits 0-9 on a 7-segment display.
    pub const DIGITS: [u8; 10] = [
        0b_0011_1111, // Digit 0
        0b_0000_0110, // Digit 1
        0b_0101_1011, // Digit 2
        0b_0100_1111, // Digit 3
        0b_0110_0110, // Digit 4
        0b_0110_1101, // Digit 5
        0b_0111_1101, // Digit 6
        0b_0000_0111, // Digit 7
        0b_0111_1111, // Digit 8
        0b_0110_1111, // Digit 9
    ];

    /// Pattern for a decimal digit; anything above 9 is blank.
    #[must_use]
    pub fn digit(value: u8) -> u8 {
        Self::DIGITS
            .get(usize::from(value))
            .copied()
            .unwrap_or(Self::BLANK)
    }

    /// Best-effort glyph for an ASCII character. Characters with no readable
    /// 7-segment form are blank.
    #[must_use]
    pub fn glyph(char: char) -> u8 {
        const A: u8 = Leds::SEG_A;
        const B: u8 = Leds::SEG_B;
        const C: u8 = Leds::SEG_C;
        const D: u8 = Leds::SEG_D;
        const E: u8 = Leds::SEG_E;
        const F: u8 = Leds::SEG_F;
        const G: u8 = Leds::SEG_G;

        match char {
            '0'..='9' => char
                .to_digit(10)
                .and_then(|value| u8::try_from(value).ok())
                .map_or(Self::BLANK, Self::digit),
            'A' | 'a' => A | B | C | E | F | G,
            'B' | 'b' => C | D | E | F | G,
            'C' | '[' | '(' => A | D | E | F,
            'c' => D | E | G,
            'D' | 'd' => B | C | D | E | G,
            'E' | 'e' => A | D | E | F | G,
            'F' | 'f' => A | E | F | G,
            'G' | 'g' => A | C | D | E | F,
            'H' | 'X' | 'x' => B | C | E | F | G,
            'h' => C | E | F | G,
            'I' | 'i' | '|' => E | F,
            'J' | 'j' => B | C | D | E,
            'L' | 'l' => D | E | F,
            'N' | 'n' => C | E | G,
            'O' => A | B | C | D | E | F,
            'o' => C | D | E | G,
            'P' | 'p' => A | B | E | F | G,
            'Q' | 'q' => A | B | C | F | G,
            'R' | 'r' => E | G,
            'S' | 's' => Self::digit(5),
            'T' | 't' => D | E | F | G,
            'U' | 'V' => B | C | D | E | F,
            'u' | 'v' => C | D | E,
            'Y' | 'y' => B | C | D | F | G,
            'Z' | 'z' => Self::digit(2),
            ']' | ')' => A | B | C | D,
            '-' => Self::MINUS,
            '_' => D,
            '=' => D | G,
            '"' => B | F,
            '\'' => B,
            '°' => A | B | F | G,
            '.' => Self::DECIMAL,
            _ => Self::BLANK,
        }
    }
}
