//! Wiring polarity, timing and brightness, and the drive levels derived from them.

use embassy_time::Duration;
use embedded_hal::digital::PinState;

use crate::{DEFAULT_BLINK_INTERVAL, DEFAULT_BRIGHTNESS, DEFAULT_REFRESH_INTERVAL, MAX_BRIGHTNESS};

/// How the display's LEDs are wired.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Polarity {
    /// Digit commons are cathodes: a segment lights when its line is high and its common is low.
    #[default]
    CommonCathode,
    /// Digit commons are anodes: a segment lights when its line is low and its common is high.
    CommonAnode,
}

/// Drive settings passed to [`SevenSegment::initialize`](crate::SevenSegment::initialize).
///
/// ```
/// use embassy_time::Duration;
/// use seven_segment_mux::{DisplayMode, Polarity};
///
/// let mode = DisplayMode::new(Polarity::CommonAnode)
///     .with_refresh_interval(Duration::from_millis(1))
///     .with_brightness(255);
/// assert_eq!(mode.brightness, 255);
/// ```
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayMode {
    pub polarity: Polarity,
    /// How long each digit stays lit before the next one is selected.
    pub refresh_interval: Duration,
    /// 0 (dark) to [`MAX_BRIGHTNESS`], applied as the duty cycle of the lit digit's common pin.
    pub brightness: u8,
    /// Length of each half of the shared blink cycle.
    pub blink_interval: Duration,
}

impl DisplayMode {
    #[must_use]
    pub const fn new(polarity: Polarity) -> Self {
        Self {
            polarity,
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            brightness: DEFAULT_BRIGHTNESS,
            blink_interval: DEFAULT_BLINK_INTERVAL,
        }
    }

    #[must_use]
    pub const fn with_refresh_interval(mut self, refresh_interval: Duration) -> Self {
        self.refresh_interval = refresh_interval;
        self
    }

    #[must_use]
    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    #[must_use]
    pub const fn with_blink_interval(mut self, blink_interval: Duration) -> Self {
        self.blink_interval = blink_interval;
        self
    }

    /// Resolves polarity and brightness into concrete pin levels.
    pub(crate) const fn drive_levels(&self) -> DriveLevels {
        match self.polarity {
            Polarity::CommonCathode => DriveLevels {
                segment_on: PinState::High,
                segment_off: PinState::Low,
                common_on: MAX_BRIGHTNESS.saturating_sub(self.brightness),
                common_off: MAX_BRIGHTNESS,
            },
            Polarity::CommonAnode => DriveLevels {
                segment_on: PinState::Low,
                segment_off: PinState::High,
                common_on: self.brightness,
                common_off: 0,
            },
        }
    }
}

impl Default for DisplayMode {
    fn default() -> Self {
        Self::new(Polarity::default())
    }
}

/// Pin levels for one polarity and brightness.
///
/// Common-pin values are the share of time the pin is held high, out of [`MAX_BRIGHTNESS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DriveLevels {
    pub segment_on: PinState,
    pub segment_off: PinState,
    pub common_on: u8,
    pub common_off: u8,
}

impl DriveLevels {
    pub(crate) const fn segment(&self, lit: bool) -> PinState {
        if lit { self.segment_on } else { self.segment_off }
    }
}
