//! A polled multiplexing driver for multi-digit 7-segment LED displays.
//!
//! The display's segment lines (A-G and an optional decimal point) are shared by every digit;
//! each digit has its own common (ground) pin. [`SevenSegment`] lights one digit at a time and
//! moves to the next whenever [`SevenSegment::refresh`] is called after the configured refresh
//! interval has passed. Call it from your main loop as often as possible.
//!
//! # Example
//!
//! ```no_run
//! use embedded_hal::digital::OutputPin;
//! use embedded_hal::pwm::SetDutyCycle;
//! use seven_segment_mux::{DisplayMode, Polarity, Result, SegmentPins, SevenSegment};
//!
//! fn run<S: OutputPin, C: SetDutyCycle>(
//!     segments: [S; 7],
//!     decimal_point: S,
//!     commons: [C; 4],
//! ) -> Result<()> {
//!     let segments = SegmentPins::with_decimal_point(segments, decimal_point);
//!     let mut display = SevenSegment::new(segments, commons)?;
//!     display.initialize(DisplayMode::new(Polarity::CommonCathode))?;
//!
//!     display.set_float(12.5)?; // shows "12.50"
//!     display.set_digit_blink(3, true);
//!
//!     loop {
//!         display.refresh()?;
//!     }
//! }
//! ```
#![cfg_attr(not(test), no_std)]

mod blink_state;
mod common_pin;
mod display_buffer;
mod display_mode;
mod effects;
mod error;
mod leds;
mod output_array;
mod seven_segment;
mod shared_constants;

pub use blink_state::BlinkState;
pub use common_pin::{DigitalCommon, DigitalCommonError};
pub use display_buffer::DisplayBuffer;
pub use display_mode::{DisplayMode, Polarity};
pub use effects::Effects;
pub use error::{Error, Result};
pub use leds::Leds;
pub use output_array::SegmentPins;
pub use seven_segment::{Refresh, SevenSegment};
pub use shared_constants::*;
