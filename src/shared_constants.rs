use embassy_time::Duration;

/// The most digits (common pins) a single display can have.
pub const MAX_DIGITS: usize = u8::BITS as usize;

/// Segment lines per digit when a decimal-point pin is wired.
pub const SEGMENT_COUNT: usize = 8;

/// Full-scale brightness; the common pin stays active for the whole on-time.
pub const MAX_BRIGHTNESS: u8 = u8::MAX;

/// Brightness until [`DisplayMode::with_brightness`](crate::DisplayMode::with_brightness)
/// or [`SevenSegment::set_brightness`](crate::SevenSegment::set_brightness) says otherwise.
pub const DEFAULT_BRIGHTNESS: u8 = 175;

/// Time each digit stays lit before the next one takes over.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(2);

/// Length of each on and each off half of a blink.
pub const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(250);
