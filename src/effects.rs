//! Per-digit blink and enable flags.

use crate::MAX_DIGITS;

/// Blink and enable flags for each digit, one bit per digit (digit 0 at bit 0).
///
/// Indexes outside the display are ignored by every setter and report `false` from every
/// query.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effects {
    blinking: u8,
    enabled: u8,
    all: u8,
}

const _: () = assert!(MAX_DIGITS <= u8::BITS as usize, "one flag bit per digit");

impl Effects {
    /// No blinking and every digit enabled.
    #[must_use]
    pub fn new(len: usize) -> Self {
        let all = u32::try_from(len)
            .ok()
            .and_then(|len| u8::MAX.checked_shr(u8::BITS.checked_sub(len)?))
            .unwrap_or(0);
        Self {
            blinking: 0,
            enabled: all,
            all,
        }
    }

    pub fn set_blink(&mut self, index: usize, blink: bool) {
        if let Some(bit) = self.bit(index) {
            assign(&mut self.blinking, bit, blink);
        }
    }

    pub const fn set_all_blink(&mut self, blink: bool) {
        self.blinking = if blink { self.all } else { 0 };
    }

    pub fn set_enabled(&mut self, index: usize, enabled: bool) {
        if let Some(bit) = self.bit(index) {
            assign(&mut self.enabled, bit, enabled);
        }
    }

    pub const fn set_all_enabled(&mut self, enabled: bool) {
        self.enabled = if enabled { self.all } else { 0 };
    }

    pub const fn reset(&mut self) {
        self.blinking = 0;
        self.enabled = self.all;
    }

    #[must_use]
    pub fn is_blinking(&self, index: usize) -> bool {
        self.bit(index).is_some_and(|bit| self.blinking & bit != 0)
    }

    #[must_use]
    pub fn is_enabled(&self, index: usize) -> bool {
        self.bit(index).is_some_and(|bit| self.enabled & bit != 0)
    }

    fn bit(&self, index: usize) -> Option<u8> {
        let bit = 1_u8.checked_shl(u32::try_from(index).ok()?)?;
        (self.all & bit != 0).then_some(bit)
    }
}

fn assign(flags: &mut u8, bit: u8, value: bool) {
    if value {
        *flags |= bit;
    } else {
        *flags &= !bit;
    }
}
