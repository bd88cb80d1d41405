//! Shared fixtures for the host-level tests.

#![allow(dead_code, reason = "Each test crate uses a different subset")]

use core::convert::Infallible;
use embedded_hal::digital::{ErrorType, OutputPin};
use seven_segment_mux::{DigitalCommon, DisplayMode, SegmentPins, SevenSegment};

/// An output pin that accepts every level and remembers nothing.
pub struct NullPin;

impl ErrorType for NullPin {
    type Error = Infallible;
}

impl OutputPin for NullPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        Ok(())
    }
}

pub type NullDisplay = SevenSegment<NullPin, DigitalCommon<NullPin>>;

/// An initialized display of `len` digits with a decimal point.
pub fn null_display(len: usize, mode: DisplayMode) -> NullDisplay {
    let segments = SegmentPins::with_decimal_point(
        [NullPin, NullPin, NullPin, NullPin, NullPin, NullPin, NullPin],
        NullPin,
    );
    let commons = (0..len).map(|_| DigitalCommon::new(NullPin));
    let mut display = SevenSegment::new(segments, commons).expect("valid digit count");
    display.initialize(mode).expect("null pins never fail");
    display
}
