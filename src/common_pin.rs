use embedded_hal::digital::{self, OutputPin, PinState};
use embedded_hal::pwm::{self, SetDutyCycle};

use crate::MAX_BRIGHTNESS;

/// Lets a plain output pin act as a digit common.
///
/// [`SevenSegment`](crate::SevenSegment) drives commons through [`SetDutyCycle`] so brightness
/// can be set on PWM-capable pins. Wrap any other pin in `DigitalCommon`: duty cycles from half
/// scale up drive it high, anything less drives it low. Brightness is then effectively on or
/// off.
#[derive(Debug)]
pub struct DigitalCommon<P>(P);

impl<P: OutputPin> DigitalCommon<P> {
    pub const fn new(pin: P) -> Self {
        Self(pin)
    }

    pub fn into_inner(self) -> P {
        self.0
    }
}

/// A [`DigitalCommon`] pin could not be set.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitalCommonError(pub digital::ErrorKind);

impl pwm::Error for DigitalCommonError {
    fn kind(&self) -> pwm::ErrorKind {
        pwm::ErrorKind::Other
    }
}

impl<P: OutputPin> pwm::ErrorType for DigitalCommon<P> {
    type Error = DigitalCommonError;
}

impl<P: OutputPin> SetDutyCycle for DigitalCommon<P> {
    fn max_duty_cycle(&self) -> u16 {
        u16::from(MAX_BRIGHTNESS)
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        let state = PinState::from(duty > self.max_duty_cycle() >> 1);
        self.0
            .set_state(state)
            .map_err(|err| DigitalCommonError(digital::Error::kind(&err)))
    }
}
