use embedded_hal::digital::{OutputPin, PinState};

use crate::display_mode::DriveLevels;
use crate::error::Error::SegmentPin;
use crate::{Result, SEGMENT_COUNT};

/// The segment lines shared by every digit: A through G and an optional decimal point.
///
/// See the [crate documentation](crate) for a usage example.
pub struct SegmentPins<S> {
    segments: [S; 7],
    decimal_point: Option<S>,
}

impl<S: OutputPin> SegmentPins<S> {
    /// Segments A-G; decimal points in the display buffer are ignored.
    pub const fn new(segments: [S; 7]) -> Self {
        Self {
            segments,
            decimal_point: None,
        }
    }

    /// Segments A-G plus the decimal point.
    pub const fn with_decimal_point(segments: [S; 7], decimal_point: S) -> Self {
        Self {
            segments,
            decimal_point: Some(decimal_point),
        }
    }

    #[must_use]
    pub const fn has_decimal_point(&self) -> bool {
        self.decimal_point.is_some()
    }

    /// Number of segment lines: 7, or [`SEGMENT_COUNT`] with a decimal point.
    #[expect(clippy::len_without_is_empty, reason = "Never empty")]
    #[must_use]
    pub const fn len(&self) -> usize {
        if self.has_decimal_point() {
            SEGMENT_COUNT
        } else {
            self.segments.len()
        }
    }

    /// Gives the pins back.
    pub fn release(self) -> ([S; 7], Option<S>) {
        (self.segments, self.decimal_point)
    }

    /// Drives segment `n` from bit `n` of `bits`, A at bit 0.
    #[expect(clippy::shadow_reuse, reason = "Shifting a local copy")]
    #[inline]
    pub(crate) fn set_from_bits(&mut self, bits: u8, levels: &DriveLevels) -> Result<()> {
        let mut bits = bits;
        for output in self.iter_mut() {
            output
                .set_state(levels.segment(bits & 1 == 1))
                .map_err(|_| SegmentPin)?;
            bits >>= 1;
        }
        Ok(())
    }

    #[inline]
    pub(crate) fn set_all(&mut self, state: PinState) -> Result<()> {
        for output in self.iter_mut() {
            output.set_state(state).map_err(|_| SegmentPin)?;
        }
        Ok(())
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut S> {
        self.segments.iter_mut().chain(self.decimal_point.as_mut())
    }
}
