//! Per-digit segment patterns and the numeric and text encoders that fill them.

use core::ops::Index;

#[cfg(feature = "display-trace")]
use defmt::info;
use heapless::Vec;

use crate::{Error, Leds, MAX_DIGITS, Result};

/// Segment patterns for every digit of a display, leftmost digit first.
///
/// Each entry is a [`Leds`] bit pattern. The buffer always holds exactly one entry per common
/// pin.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayBuffer(Vec<u8, MAX_DIGITS>);

impl DisplayBuffer {
    /// A blank buffer for `len` digits (at most [`MAX_DIGITS`]).
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self((0..len.min(MAX_DIGITS)).map(|_| Leds::BLANK).collect())
    }

    #[expect(clippy::len_without_is_empty, reason = "Only `new(0)` is empty")]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<u8> {
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &u8> {
        self.0.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub(crate) fn fill(&mut self, bits: u8) {
        self.0.iter_mut().for_each(|slot| *slot = bits);
    }

    /// Copies patterns verbatim. Surplus patterns are ignored; digits without a pattern keep
    /// their current one.
    pub(crate) fn set_pattern(&mut self, patterns: &[u8]) {
        for (slot, &bits) in self.0.iter_mut().zip(patterns) {
            *slot = bits;
        }
    }

    /// Right-aligned decimal rendering. A negative value puts the minus sign on the leftmost
    /// digit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] (and shows the overflow pattern) when the digits, plus one
    /// for the sign, need more positions than the display has.
    pub(crate) fn set_integer(&mut self, value: i32, leading_zeros: bool) -> Result<()> {
        #[cfg(feature = "display-trace")]
        info!("set_integer: {} (leading zeros: {})", value, leading_zeros);
        let negative = value < 0;
        let width = self.numeric_width(negative);
        let magnitude = value.unsigned_abs();
        if width == 0 || decimal_width(magnitude) > width {
            return self.overflow(Error::OutOfRange);
        }
        self.write_number(magnitude, 0, leading_zeros, negative);
        Ok(())
    }

    /// Fixed-point rendering that spends every position the integer part and sign leave over
    /// on fractional digits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFinite`] for NaN and infinities and [`Error::OutOfRange`] when the
    /// integer part does not fit. Either way the overflow pattern is shown.
    pub(crate) fn set_float(&mut self, value: f32) -> Result<()> {
        #[cfg(feature = "display-trace")]
        info!("set_float: {}", value);
        if !value.is_finite() {
            return self.overflow(Error::NotFinite);
        }
        let negative = value < 0.0;
        let magnitude = libm::fabsf(value);
        match scale_to_width(magnitude, self.numeric_width(negative)) {
            // "-0.00" reads as noise; render the rounded zero unsigned.
            Some((0, _)) if negative => self.set_float(0.0),
            Some((scaled, decimal_places)) => {
                self.write_number(scaled, decimal_places, false, negative);
                Ok(())
            }
            // No room left for the sign, but the magnitude rounds to zero without it.
            None if negative && rounds_to_zero(magnitude, self.len()) => self.set_float(0.0),
            None => self.overflow(Error::OutOfRange),
        }
    }

    /// Left-aligned text. A `.` merges into the decimal point of the character before it.
    pub(crate) fn set_text(&mut self, text: &str) {
        #[cfg(feature = "display-trace")]
        info!("set_text: {}", text);
        self.fill(Leds::BLANK);
        let mut slots = self.0.iter_mut();
        let mut previous: Option<&mut u8> = None;
        for char in text.chars() {
            if char == '.' {
                if let Some(bits) = previous
                    .as_deref_mut()
                    .filter(|bits| **bits & Leds::DECIMAL == 0)
                {
                    *bits |= Leds::DECIMAL;
                    continue;
                }
            }
            let Some(bits) = slots.next() else {
                break;
            };
            *bits = Leds::glyph(char);
            previous = Some(bits);
        }
    }

    fn numeric_width(&self, negative: bool) -> usize {
        self.len().saturating_sub(usize::from(negative))
    }

    fn overflow(&mut self, error: Error) -> Result<()> {
        #[cfg(feature = "display-trace")]
        info!("overflow: {}", error);
        self.fill(Leds::OVERFLOW);
        Err(error)
    }

    /// Writes `magnitude` right-aligned, least significant digit in the rightmost position.
    /// `decimal_places` of those digits are fractional; the units digit then carries the
    /// decimal point.
    #[expect(
        clippy::integer_division_remainder_used,
        clippy::cast_possible_truncation,
        reason = "Modulo is required for digit extraction and always yields 0-9"
    )]
    fn write_number(
        &mut self,
        mut magnitude: u32,
        decimal_places: usize,
        leading_zeros: bool,
        negative: bool,
    ) {
        let numeric = self.0.iter_mut().skip(usize::from(negative)).rev();
        for (position, bits) in numeric.enumerate() {
            let significant = magnitude != 0 || position <= decimal_places;
            *bits = if significant || leading_zeros {
                Leds::digit((magnitude % 10) as u8)
            } else {
                Leds::BLANK
            };
            if decimal_places != 0 && position == decimal_places {
                *bits |= Leds::DECIMAL;
            }
            magnitude /= 10;
        }
        if negative {
            if let Some(bits) = self.0.first_mut() {
                *bits = Leds::MINUS;
            }
        }
    }
}

impl Index<usize> for DisplayBuffer {
    type Output = u8;

    #[expect(clippy::indexing_slicing, reason = "Caller's responsibility")]
    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a DisplayBuffer {
    type Item = &'a u8;
    type IntoIter = core::slice::Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Number of decimal digits in `value`; zero still takes one digit.
fn decimal_width(value: u32) -> usize {
    value
        .checked_ilog10()
        .map_or(1, |log| (log as usize).saturating_add(1))
}

/// Scaled values at or above 2^24 are past the last digit an `f32` holds exactly.
const F32_EXACT_LIMIT: f32 = 16_777_216.0;

/// Rounds `magnitude` to as many decimal places as fit in `width` digits, and no more than
/// an `f32` can carry (about 7 significant digits).
///
/// Returns the rounded value scaled to an integer and the number of decimal places used, or
/// `None` when even the integer part needs more than `width` digits.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    reason = "scaled is a non-negative whole number below 10^MAX_DIGITS"
)]
fn scale_to_width(magnitude: f32, width: usize) -> Option<(u32, usize)> {
    let limit = 10_u32.checked_pow(u32::try_from(width).ok()?)? as f32;
    (0..width).rev().find_map(|decimal_places| {
        let scale = 10_u32.checked_pow(u32::try_from(decimal_places).ok()?)? as f32;
        let scaled = libm::roundf(magnitude * scale);
        let exact = decimal_places == 0 || scaled < F32_EXACT_LIMIT;
        (scaled < limit && exact).then_some((scaled as u32, decimal_places))
    })
}

fn rounds_to_zero(magnitude: f32, width: usize) -> bool {
    scale_to_width(magnitude, width).is_some_and(|(scaled, _)| scaled == 0)
}
