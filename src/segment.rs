//! Seven-segment patterns for a serial-in shift register.
//!
//! Bit 7 drives segment `a`, bit 1 segment `g`, bit 0 the decimal point.

/// Digit index that renders with every segment off.
pub const BLANK: u8 = 10;

const PATTERNS: [u8; 11] = [
    0b11111100, // 0
    0b01100000, // 1
    0b11011010, // 2
    0b11110010, // 3
    0b01100110, // 4
    0b10110110, // 5
    0b10111110, // 6
    0b11100000, // 7
    0b11111110, // 8
    0b11110110, // 9
    0b00000000, // blank
];

/// Pattern for `digit`. Anything outside 0-9 is blank.
pub const fn encode(digit: u8) -> u8 {
    if digit < BLANK {
        PATTERNS[digit as usize]
    } else {
        PATTERNS[BLANK as usize]
    }
}
