use embassy_time::{Duration, Instant};

/// Which half of the blink cycle the display is in. All blinking digits share one phase.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlinkState {
    #[default]
    BlinkingAndOn,
    BlinkingButOff,
}

impl BlinkState {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::BlinkingAndOn => Self::BlinkingButOff,
            Self::BlinkingButOff => Self::BlinkingAndOn,
        }
    }

    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::BlinkingAndOn)
    }
}

/// Flips the shared [`BlinkState`] every blink interval, on its own clock, independent of
/// digit switching.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct BlinkClock {
    state: BlinkState,
    last_toggle: Option<Instant>,
}

impl BlinkClock {
    /// Returns the phase at `now`, toggling once per whole `interval` since the last toggle.
    /// Toggle instants stay on the `interval` grid set by the first call, however late the
    /// calls come. The first call only starts the clock.
    pub(crate) fn advance(&mut self, now: Instant, interval: Duration) -> BlinkState {
        let Some(last_toggle) = self.last_toggle else {
            self.last_toggle = Some(now);
            return self.state;
        };
        let elapsed = now.saturating_duration_since(last_toggle).as_ticks();
        let Some(toggles) = elapsed.checked_div(interval.as_ticks()) else {
            // A zero interval flips on every call.
            self.state = self.state.toggled();
            self.last_toggle = Some(now);
            return self.state;
        };
        if toggles & 1 == 1 {
            self.state = self.state.toggled();
        }
        let anchored = Duration::from_ticks(toggles.saturating_mul(interval.as_ticks()));
        self.last_toggle = last_toggle.checked_add(anchored).or(Some(now));
        self.state
    }

    pub(crate) const fn state(&self) -> BlinkState {
        self.state
    }
}

#[cfg(all(test, not(target_os = "none")))]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(250);

    #[test]
    fn test_starts_on() {
        let mut clock = BlinkClock::default();
        assert_eq!(clock.advance(Instant::from_millis(1000), INTERVAL), BlinkState::BlinkingAndOn);
        assert_eq!(clock.advance(Instant::from_millis(1249), INTERVAL), BlinkState::BlinkingAndOn);
    }

    #[test]
    fn test_toggles_each_interval() {
        let mut clock = BlinkClock::default();
        clock.advance(Instant::from_millis(0), INTERVAL);
        assert_eq!(clock.advance(Instant::from_millis(250), INTERVAL), BlinkState::BlinkingButOff);
        assert_eq!(clock.advance(Instant::from_millis(400), INTERVAL), BlinkState::BlinkingButOff);
        assert_eq!(clock.advance(Instant::from_millis(500), INTERVAL), BlinkState::BlinkingAndOn);
        assert!(clock.state().is_on());
    }

    #[test]
    fn test_late_calls_keep_the_schedule() {
        let mut clock = BlinkClock::default();
        clock.advance(Instant::from_millis(0), INTERVAL);
        for millis in (3..3000).step_by(3) {
            let expected_on = (millis / 250) % 2 == 0;
            let state = clock.advance(Instant::from_millis(millis), INTERVAL);
            assert_eq!(state.is_on(), expected_on, "at {millis} ms");
        }
    }

    #[test]
    fn test_skipped_intervals_keep_parity() {
        let mut clock = BlinkClock::default();
        clock.advance(Instant::from_millis(0), INTERVAL);
        // Two whole intervals missed: back on, next toggle still at 750.
        assert_eq!(clock.advance(Instant::from_millis(510), INTERVAL), BlinkState::BlinkingAndOn);
        assert_eq!(clock.advance(Instant::from_millis(749), INTERVAL), BlinkState::BlinkingAndOn);
        assert_eq!(clock.advance(Instant::from_millis(750), INTERVAL), BlinkState::BlinkingButOff);
    }

    #[test]
    fn test_zero_interval_flips_every_call() {
        let zero = Duration::from_ticks(0);
        let mut clock = BlinkClock::default();
        clock.advance(Instant::from_millis(0), zero);
        assert_eq!(clock.advance(Instant::from_millis(0), zero), BlinkState::BlinkingButOff);
        assert_eq!(clock.advance(Instant::from_millis(1), zero), BlinkState::BlinkingAndOn);
    }

    #[test]
    fn test_clock_going_backwards_does_not_toggle() {
        let mut clock = BlinkClock::default();
        clock.advance(Instant::from_millis(500), INTERVAL);
        assert_eq!(clock.advance(Instant::from_millis(0), INTERVAL), BlinkState::BlinkingAndOn);
    }
}
