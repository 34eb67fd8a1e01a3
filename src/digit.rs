//! # BCD Digit Encoding
//!
//! Each decimal digit of the time gets its own column of dots. The column is
//! only as tall as the largest value that digit can ever take:
//!
//! | Position       | Range | Bits |
//! |----------------|-------|------|
//! | hour tens      | 0-2   | 2    |
//! | hour ones      | 0-9   | 4    |
//! | min/sec tens   | 0-5   | 3    |
//! | min/sec ones   | 0-9   | 4    |
//!
//! Bits are stored least-significant first, which is also the drawing order:
//! bit 0 sits at the bottom of the column.

use crate::ClockError;

/// Tallest column the face draws.
pub const MAX_BIT_WIDTH: u8 = 4;

/// Which digit of the time a column shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DigitPosition {
    HourTens,
    HourOnes,
    MinuteTens,
    MinuteOnes,
    SecondTens,
    SecondOnes,
}

impl DigitPosition {
    /// Number of dots needed for the largest value at this position.
    pub const fn bit_width(self) -> u8 {
        match self {
            DigitPosition::HourTens => 2,
            DigitPosition::MinuteTens | DigitPosition::SecondTens => 3,
            DigitPosition::HourOnes | DigitPosition::MinuteOnes | DigitPosition::SecondOnes => 4,
        }
    }

    /// Split a two-digit field into its (tens, ones) positions and values.
    pub fn split(tens: DigitPosition, ones: DigitPosition, field: u8) -> [(DigitPosition, u8); 2] {
        [(tens, field / 10), (ones, field % 10)]
    }
}

/// The dots of one column, least-significant bit first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BitPattern {
    bits: u8,
    width: u8,
}

impl BitPattern {
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Bit `index`, counting from the bottom. Out-of-width indices read as clear.
    pub fn bit(&self, index: u8) -> bool {
        index < self.width && self.bits & (1 << index) != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.width).map(move |i| self.bit(i))
    }

    /// Reassemble the decimal value: `Σ bit[i]·2^i`.
    pub fn value(&self) -> u8 {
        self.iter()
            .enumerate()
            .filter(|(_, set)| *set)
            .map(|(i, _)| 1u8 << i)
            .sum()
    }
}

/// One digit placed in a display column. Built fresh for every render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitCell {
    /// Column index across the whole face (0 = leftmost)
    pub column_index: u32,
    pub bit_width: u8,
    /// Decimal digit, 0-9
    pub value: u8,
}

impl DigitCell {
    pub fn new(column_index: u32, position: DigitPosition, value: u8) -> Self {
        Self {
            column_index,
            bit_width: position.bit_width(),
            value,
        }
    }

    pub fn encode(&self) -> Result<BitPattern, ClockError> {
        encode(self.value, self.bit_width)
    }
}

/// Encode a decimal digit as a `bit_width`-tall column.
///
/// Fails if the digit is not a decimal digit or does not fit in the column.
pub fn encode(value: u8, bit_width: u8) -> Result<BitPattern, ClockError> {
    if bit_width == 0 || bit_width > MAX_BIT_WIDTH {
        return Err(ClockError::InvalidBitWidth(bit_width));
    }
    if value > 9 || u16::from(value) >= 1u16 << bit_width {
        return Err(ClockError::DigitOutOfRange { value, bit_width });
    }

    Ok(BitPattern {
        bits: value,
        width: bit_width,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_digit_reconstructs() {
        for position in [
            DigitPosition::HourTens,
            DigitPosition::HourOnes,
            DigitPosition::MinuteTens,
            DigitPosition::MinuteOnes,
            DigitPosition::SecondTens,
            DigitPosition::SecondOnes,
        ] {
            let width = position.bit_width();
            for value in 0..=9u8 {
                if u16::from(value) >= 1 << width {
                    continue;
                }
                let pattern = encode(value, width).unwrap();
                assert_eq!(pattern.width(), width);
                assert_eq!(pattern.value(), value, "{position:?} value {value}");
            }
        }
    }

    #[test]
    fn test_bits_are_least_significant_first() {
        let pattern = encode(6, 4).unwrap();
        let bits: Vec<bool> = pattern.iter().collect();
        assert_eq!(bits, vec![false, true, true, false]);
        assert!(!pattern.bit(7), "bits past the width read as clear");
    }

    #[test]
    fn test_value_too_large_for_width() {
        assert!(matches!(
            encode(3, 1),
            Err(ClockError::DigitOutOfRange {
                value: 3,
                bit_width: 1
            })
        ));
        assert!(encode(4, 2).is_err());
        assert!(encode(8, 3).is_err());
        assert!(encode(10, 4).is_err(), "not a decimal digit");
    }

    #[test]
    fn test_invalid_bit_width() {
        assert!(matches!(encode(0, 0), Err(ClockError::InvalidBitWidth(0))));
        assert!(matches!(encode(1, 5), Err(ClockError::InvalidBitWidth(5))));
    }

    #[test]
    fn test_position_widths() {
        assert_eq!(DigitPosition::HourTens.bit_width(), 2);
        assert_eq!(DigitPosition::HourOnes.bit_width(), 4);
        assert_eq!(DigitPosition::MinuteTens.bit_width(), 3);
        assert_eq!(DigitPosition::SecondTens.bit_width(), 3);
        assert_eq!(DigitPosition::SecondOnes.bit_width(), 4);
    }

    #[test]
    fn test_split_field() {
        let [(tens_pos, tens), (ones_pos, ones)] =
            DigitPosition::split(DigitPosition::HourTens, DigitPosition::HourOnes, 23);
        assert_eq!((tens_pos, tens), (DigitPosition::HourTens, 2));
        assert_eq!((ones_pos, ones), (DigitPosition::HourOnes, 3));
    }

    #[test]
    fn test_digit_cell_encodes_with_position_width() {
        let cell = DigitCell::new(1, DigitPosition::MinuteTens, 5);
        assert_eq!(cell.bit_width, 3);
        assert_eq!(cell.encode().unwrap().value(), 5);
    }
}
