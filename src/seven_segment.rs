//! A polled multiplexing controller for a multi-digit 7-segment LED display.
//!
//! See [`SevenSegment`] for the device abstraction.

#[cfg(feature = "display-trace")]
use defmt::info;
use embassy_time::Instant;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use heapless::Vec;

use crate::blink_state::BlinkClock;
use crate::display_mode::DriveLevels;
use crate::{
    BlinkState, DisplayBuffer, DisplayMode, Effects, Error, Leds, MAX_BRIGHTNESS, MAX_DIGITS,
    Result, SegmentPins,
};

/// What a call to [`SevenSegment::refresh`] did.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// The refresh interval has not elapsed (or the display is not initialized); no pin changed.
    Idle,
    /// Switched to this digit and lit it.
    Lit(usize),
    /// Switched to this digit but left it dark because it is disabled or blinked off.
    Dark(usize),
}

/// A multi-digit 7-segment LED display driven by multiplexing.
///
/// Only one digit is lit at a time. Each [`refresh`](Self::refresh) that comes at least one
/// refresh interval after the previous switch turns the current digit off and lights the next
/// one, so the host must call it far more often than the refresh interval.
///
/// # Hardware Requirements
///
/// - Segment pins (A-G, optional DP) are shared by all digits and implement [`OutputPin`].
/// - Each digit has its own common pin implementing [`SetDutyCycle`]; brightness is the duty
///   cycle of the lit digit's common. Wrap plain output pins in
///   [`DigitalCommon`](crate::DigitalCommon).
///
/// Nothing is driven until [`initialize`](Self::initialize) picks the wiring polarity.
pub struct SevenSegment<S, C> {
    segments: SegmentPins<S>,
    commons: Vec<C, MAX_DIGITS>,
    buffer: DisplayBuffer,
    effects: Effects,
    mode: DisplayMode,
    levels: Option<DriveLevels>,
    cursor: usize,
    active: Option<usize>,
    last_switch: Option<Instant>,
    blink: BlinkClock,
}

impl<S, C> SevenSegment<S, C>
where
    S: OutputPin,
    C: SetDutyCycle,
{
    /// Takes ownership of the pins. The display has one digit per common pin, leftmost first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TooManyDigits`] for more than [`MAX_DIGITS`] commons and
    /// [`Error::NoDigits`] for none.
    pub fn new(segments: SegmentPins<S>, commons: impl IntoIterator<Item = C>) -> Result<Self> {
        let mut common_pins = Vec::new();
        for common in commons {
            common_pins
                .push(common)
                .map_err(|_| Error::TooManyDigits)?;
        }
        if common_pins.is_empty() {
            return Err(Error::NoDigits);
        }
        let len = common_pins.len();
        Ok(Self {
            segments,
            commons: common_pins,
            buffer: DisplayBuffer::new(len),
            effects: Effects::new(len),
            mode: DisplayMode::default(),
            levels: None,
            cursor: last_index(len),
            active: None,
            last_switch: None,
            blink: BlinkClock::default(),
        })
    }

    /// Applies the drive mode and turns every segment and common off.
    ///
    /// May be called again to change the mode; multiplexing restarts at the first digit.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin cannot be set.
    pub fn initialize(&mut self, mode: DisplayMode) -> Result<()> {
        #[cfg(feature = "display-trace")]
        info!("initialize: {:?}", mode);
        let levels = mode.drive_levels();
        self.segments.set_all(levels.segment_off)?;
        for common in &mut self.commons {
            set_common(common, levels.common_off)?;
        }
        self.mode = mode;
        self.levels = Some(levels);
        self.cursor = last_index(self.len());
        self.active = None;
        self.last_switch = None;
        self.blink = BlinkClock::default();
        Ok(())
    }

    /// Changes brightness without touching the rest of the mode. Takes effect the next time a
    /// digit is lit.
    pub fn set_brightness(&mut self, brightness: u8) {
        self.mode = self.mode.with_brightness(brightness);
        if self.levels.is_some() {
            self.levels = Some(self.mode.drive_levels());
        }
    }

    #[must_use]
    pub const fn mode(&self) -> &DisplayMode {
        &self.mode
    }

    /// Number of digits.
    #[expect(clippy::len_without_is_empty, reason = "A display has at least one digit")]
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub const fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    #[must_use]
    pub const fn effects(&self) -> &Effects {
        &self.effects
    }

    /// The shared blink phase as of the last digit switch.
    #[must_use]
    pub const fn blink_state(&self) -> BlinkState {
        self.blink.state()
    }

    // ------------------------------------------------------------------------
    // Content
    // ------------------------------------------------------------------------

    /// Shows raw segment patterns, one per digit (see [`Leds`] for the bit layout).
    pub fn set_pattern(&mut self, patterns: &[u8]) {
        self.buffer.set_pattern(patterns);
    }

    /// Shows a whole number, right-aligned, padded with blanks or with zeros.
    ///
    /// A negative number puts the minus sign on the leftmost digit and has one digit less for
    /// its magnitude.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when the number does not fit. The display then shows a
    /// dash on every digit.
    pub fn set_integer(&mut self, value: i32, leading_zeros: bool) -> Result<()> {
        self.buffer.set_integer(value, leading_zeros)
    }

    /// Shows a number with as many decimal places as the display has room for, up to the
    /// 7 or so significant digits an `f32` holds.
    ///
    /// ```text
    /// 4 digits:  1.5 -> "1.500"   -1.5 -> "-1.50"   123.46 -> "123.5"   0.25 -> "0.250"
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] when the integer part does not fit and
    /// [`Error::NotFinite`] for NaN or infinity. The display then shows a dash on every digit.
    pub fn set_float(&mut self, value: f32) -> Result<()> {
        self.buffer.set_float(value)
    }

    /// Shows text, left-aligned. Unsupported characters show blank; a `.` lights the decimal
    /// point of the character before it.
    pub fn set_text(&mut self, text: &str) {
        self.buffer.set_text(text);
    }

    pub fn clear(&mut self) {
        self.buffer.fill(Leds::BLANK);
    }

    // ------------------------------------------------------------------------
    // Effects
    // ------------------------------------------------------------------------

    /// Out-of-range indexes are ignored.
    pub fn set_digit_blink(&mut self, index: usize, blink: bool) {
        self.effects.set_blink(index, blink);
    }

    pub const fn set_all_blink(&mut self, blink: bool) {
        self.effects.set_all_blink(blink);
    }

    /// A disabled digit is never lit, whatever the buffer holds. Out-of-range indexes are
    /// ignored.
    pub fn set_digit_enabled(&mut self, index: usize, enabled: bool) {
        self.effects.set_enabled(index, enabled);
    }

    pub const fn set_all_enabled(&mut self, enabled: bool) {
        self.effects.set_all_enabled(enabled);
    }

    #[must_use]
    pub fn is_digit_blinking(&self, index: usize) -> bool {
        self.effects.is_blinking(index)
    }

    #[must_use]
    pub fn is_digit_enabled(&self, index: usize) -> bool {
        self.effects.is_enabled(index)
    }

    /// Stops all blinking and enables every digit. The displayed content is kept.
    pub const fn reset_effects(&mut self) {
        self.effects.reset();
    }

    // ------------------------------------------------------------------------
    // Multiplexing
    // ------------------------------------------------------------------------

    /// Runs one multiplexing step at the current time. See [`refresh_at`](Self::refresh_at).
    ///
    /// # Errors
    ///
    /// Returns an error if a pin cannot be set.
    pub fn refresh(&mut self) -> Result<Refresh> {
        self.refresh_at(Instant::now())
    }

    /// Runs one multiplexing step as if the time were `now`.
    ///
    /// Returns [`Refresh::Idle`] without touching any pin until the refresh interval has passed
    /// since the last switch. Otherwise turns the lit digit off, moves to the next digit and
    /// lights it unless it is disabled or blinked off.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin cannot be set.
    pub fn refresh_at(&mut self, now: Instant) -> Result<Refresh> {
        let Some(levels) = self.levels else {
            return Ok(Refresh::Idle);
        };
        if let Some(last_switch) = self.last_switch {
            if now.saturating_duration_since(last_switch) < self.mode.refresh_interval {
                return Ok(Refresh::Idle);
            }
        }

        if let Some(active) = self.active.take() {
            if let Some(common) = self.commons.get_mut(active) {
                set_common(common, levels.common_off)?;
            }
        }
        self.cursor = next_index(self.cursor, self.len());
        let index = self.cursor;
        let blink_state = self.blink.advance(now, self.mode.blink_interval);
        let lit = self.effects.is_enabled(index)
            && (blink_state.is_on() || !self.effects.is_blinking(index));

        let refresh = if lit {
            let bits = self.buffer.get(index).unwrap_or(Leds::BLANK);
            self.segments.set_from_bits(bits, &levels)?;
            if let Some(common) = self.commons.get_mut(index) {
                set_common(common, levels.common_on)?;
                self.active = Some(index);
            }
            Refresh::Lit(index)
        } else {
            self.segments.set_all(levels.segment_off)?;
            Refresh::Dark(index)
        };
        #[cfg(feature = "display-trace")]
        info!("refresh: {:?}", refresh);

        self.last_switch = Some(now);
        Ok(refresh)
    }

    /// Turns every segment and common off and gives the pins back.
    ///
    /// # Errors
    ///
    /// Returns an error if a pin cannot be set; the pins are dropped in that case.
    pub fn release(mut self) -> Result<(SegmentPins<S>, Vec<C, MAX_DIGITS>)> {
        if let Some(levels) = self.levels {
            self.segments.set_all(levels.segment_off)?;
            for common in &mut self.commons {
                set_common(common, levels.common_off)?;
            }
        }
        Ok((self.segments, self.commons))
    }
}

fn set_common<C: SetDutyCycle>(common: &mut C, high_share: u8) -> Result<()> {
    common
        .set_duty_cycle_fraction(u16::from(high_share), u16::from(MAX_BRIGHTNESS))
        .map_err(|_| Error::CommonPin)
}

/// The cursor starts here so that the first switch lands on digit 0.
const fn last_index(len: usize) -> usize {
    len.saturating_sub(1)
}

fn next_index(index: usize, len: usize) -> usize {
    index.checked_add(1).filter(|&next| next < len).unwrap_or(0)
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;
    use crate::{DigitalCommon, Polarity};
    use core::cell::RefCell;
    use core::convert::Infallible;
    use embassy_time::Duration;
    use embedded_hal::digital::{ErrorType, PinState};
    use std::rc::Rc;

    /// Output pin that records its last level in a shared cell.
    #[derive(Clone)]
    struct Probe(Rc<RefCell<PinState>>);

    impl Probe {
        fn new() -> Self {
            Self(Rc::new(RefCell::new(PinState::Low)))
        }

        fn state(&self) -> PinState {
            *self.0.borrow()
        }
    }

    impl ErrorType for Probe {
        type Error = Infallible;
    }

    impl OutputPin for Probe {
        fn set_low(&mut self) -> Result<(), Infallible> {
            *self.0.borrow_mut() = PinState::Low;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            *self.0.borrow_mut() = PinState::High;
            Ok(())
        }
    }

    type Display = SevenSegment<Probe, DigitalCommon<Probe>>;

    fn setup(len: usize) -> (Display, [Probe; 8], std::vec::Vec<Probe>) {
        let segment_probes: [Probe; 8] = core::array::from_fn(|_| Probe::new());
        let [a, b, c, d, e, f, g, dp] = segment_probes.clone();
        let common_probes: std::vec::Vec<Probe> = (0..len).map(|_| Probe::new()).collect();
        let display = SevenSegment::new(
            SegmentPins::with_decimal_point([a, b, c, d, e, f, g], dp),
            common_probes.iter().cloned().map(DigitalCommon::new),
        )
        .expect("valid digit count");
        (display, segment_probes, common_probes)
    }

    fn at(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    #[test]
    fn test_new_rejects_bad_digit_counts() {
        let segments = || SegmentPins::new(core::array::from_fn::<_, 7, _>(|_| Probe::new()));
        let too_many = (0..=MAX_DIGITS).map(|_| DigitalCommon::new(Probe::new()));
        assert!(matches!(
            SevenSegment::new(segments(), too_many),
            Err(Error::TooManyDigits)
        ));
        let none = core::iter::empty::<DigitalCommon<Probe>>();
        assert!(matches!(
            SevenSegment::new(segments(), none),
            Err(Error::NoDigits)
        ));
    }

    #[test]
    fn test_idle_until_initialized() {
        let (mut display, segments, commons) = setup(4);
        display.set_integer(8888, false).expect("fits");
        assert_eq!(display.refresh_at(at(100)), Ok(Refresh::Idle));
        assert!(segments.iter().all(|pin| pin.state() == PinState::Low));
        assert!(commons.iter().all(|pin| pin.state() == PinState::Low));
    }

    #[test]
    fn test_initialize_turns_everything_off() {
        let (mut display, segments, commons) = setup(4);
        display
            .initialize(DisplayMode::new(Polarity::CommonAnode))
            .expect("probe pins");
        assert!(segments.iter().all(|pin| pin.state() == PinState::High));
        assert!(commons.iter().all(|pin| pin.state() == PinState::Low));
    }

    #[test]
    fn test_cycles_through_digits() {
        let (mut display, _, commons) = setup(3);
        display.initialize(DisplayMode::default()).expect("probe pins");
        let mut lit = std::vec::Vec::new();
        for step in 0..6 {
            lit.push(display.refresh_at(at(step * 2)).expect("probe pins"));
        }
        let expected: std::vec::Vec<_> = [0, 1, 2, 0, 1, 2].map(Refresh::Lit).into();
        assert_eq!(lit, expected);
        // Common cathode: only digit 2 is pulled low.
        let levels: std::vec::Vec<_> = commons.iter().map(Probe::state).collect();
        assert_eq!(levels, [PinState::High, PinState::High, PinState::Low]);
    }

    #[test]
    fn test_timing_gate() {
        let (mut display, _, _) = setup(4);
        display.initialize(DisplayMode::default()).expect("probe pins");
        assert_eq!(display.refresh_at(at(10)), Ok(Refresh::Lit(0)));
        assert_eq!(display.refresh_at(at(11)), Ok(Refresh::Idle));
        assert_eq!(display.refresh_at(at(12)), Ok(Refresh::Lit(1)));
    }

    #[test]
    fn test_reinitialize_restarts_at_first_digit() {
        let (mut display, _, _) = setup(4);
        display.initialize(DisplayMode::default()).expect("probe pins");
        display.refresh_at(at(0)).expect("probe pins");
        display.refresh_at(at(2)).expect("probe pins");
        display
            .initialize(DisplayMode::default().with_refresh_interval(Duration::from_millis(5)))
            .expect("probe pins");
        assert_eq!(display.refresh_at(at(3)), Ok(Refresh::Lit(0)));
        assert_eq!(display.refresh_at(at(7)), Ok(Refresh::Idle));
        assert_eq!(display.refresh_at(at(8)), Ok(Refresh::Lit(1)));
    }

    #[test]
    fn test_lit_digit_drives_its_pattern() {
        use PinState::{High, Low};
        let (mut display, segments, _) = setup(2);
        display.initialize(DisplayMode::default()).expect("probe pins");
        display.set_pattern(&[0b_1000_0110, 0]);
        display.refresh_at(at(0)).expect("probe pins");
        let levels: std::vec::Vec<_> = segments.iter().map(Probe::state).collect();
        assert_eq!(levels, [Low, High, High, Low, Low, Low, Low, High]);
    }

    #[test]
    fn test_disabled_digit_stays_dark() {
        let (mut display, segments, commons) = setup(2);
        display.initialize(DisplayMode::default()).expect("probe pins");
        display.set_integer(88, false).expect("fits");
        display.set_digit_enabled(1, false);
        assert_eq!(display.refresh_at(at(0)), Ok(Refresh::Lit(0)));
        assert_eq!(display.refresh_at(at(2)), Ok(Refresh::Dark(1)));
        assert!(commons.iter().all(|pin| pin.state() == PinState::High));
        assert!(segments.iter().all(|pin| pin.state() == PinState::Low));
    }

    #[test]
    fn test_blink_follows_shared_phase() {
        let (mut display, _, _) = setup(2);
        display.initialize(DisplayMode::default()).expect("probe pins");
        display.set_digit_blink(0, true);
        assert_eq!(display.refresh_at(at(0)), Ok(Refresh::Lit(0)));
        assert_eq!(display.refresh_at(at(250)), Ok(Refresh::Lit(1)));
        assert_eq!(display.blink_state(), BlinkState::BlinkingButOff);
        assert_eq!(display.refresh_at(at(252)), Ok(Refresh::Dark(0)));
        assert_eq!(display.refresh_at(at(254)), Ok(Refresh::Lit(1)));
        assert_eq!(display.refresh_at(at(500)), Ok(Refresh::Lit(0)));
    }

    #[test]
    fn test_brightness_zero_keeps_digital_common_inactive() {
        let (mut display, _, commons) = setup(1);
        display
            .initialize(DisplayMode::new(Polarity::CommonAnode).with_brightness(0))
            .expect("probe pins");
        display.refresh_at(at(0)).expect("probe pins");
        assert_eq!(commons[0].state(), PinState::Low);
        display.set_brightness(255);
        display.refresh_at(at(2)).expect("probe pins");
        assert_eq!(commons[0].state(), PinState::High);
    }

    #[test]
    fn test_release_turns_everything_off() {
        let (mut display, _, commons) = setup(2);
        display.initialize(DisplayMode::default()).expect("probe pins");
        display.refresh_at(at(0)).expect("probe pins");
        assert_eq!(commons[0].state(), PinState::Low);
        let (segment_pins, common_pins) = display.release().expect("probe pins");
        assert!(segment_pins.has_decimal_point());
        assert_eq!(common_pins.len(), 2);
        assert!(commons.iter().all(|pin| pin.state() == PinState::High));
    }

    #[test]
    fn test_next_index_wraps() {
        assert_eq!(next_index(0, 4), 1);
        assert_eq!(next_index(3, 4), 0);
        assert_eq!(next_index(0, 1), 0);
        assert_eq!(next_index(usize::MAX, 4), 0);
    }
}
