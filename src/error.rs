use derive_more::derive::{Display, Error};

/// A specialized `Result` where the error is this crate's `Error` type.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Define a unified error type for this crate.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, Display, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[display("More common pins than MAX_DIGITS")]
    TooManyDigits,

    #[display("At least one common pin is required")]
    NoDigits,

    #[display("Value does not fit on the display")]
    OutOfRange,

    #[display("Value is NaN or infinite")]
    NotFinite,

    #[display("Error setting segment output state")]
    SegmentPin,

    #[display("Error setting common pin duty cycle")]
    CommonPin,
}
