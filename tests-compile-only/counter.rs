//! A 4-digit 7-segment counter on a Raspberry Pi Pico.
//!
//! Counts up ten times a second and blinks the ones digit for the first second of every
//! ten. The display is refreshed by polling from the main loop; nothing else may block it.
//!
//! Wiring (common cathode): segments A-G on GPIO 5-11, decimal point on GPIO 12, digit
//! commons on GPIO 1-4, leftmost first.
//!
//! Run via: `cargo xtask check-all` (compiled for thumbv6m-none-eabi)

#![no_std]
#![no_main]
#![allow(clippy::future_not_send, reason = "single-threaded")]

use core::convert::Infallible;
use defmt::{info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Duration, Instant};
use panic_probe as _;
use seven_segment_mux::{DigitalCommon, DisplayMode, Polarity, Result, SegmentPins, SevenSegment};

const COUNT_STEP: Duration = Duration::from_millis(100);

#[embassy_executor::main]
pub async fn main(_spawner: Spawner) -> ! {
    let err = inner_main().await.unwrap_err();
    core::panic!("{err}");
}

async fn inner_main() -> Result<Infallible> {
    info!("Starting 4-digit counter");
    let p = embassy_rp::init(Default::default());

    let segment_pins = SegmentPins::with_decimal_point(
        [
            Output::new(p.PIN_5, Level::Low),
            Output::new(p.PIN_6, Level::Low),
            Output::new(p.PIN_7, Level::Low),
            Output::new(p.PIN_8, Level::Low),
            Output::new(p.PIN_9, Level::Low),
            Output::new(p.PIN_10, Level::Low),
            Output::new(p.PIN_11, Level::Low),
        ],
        Output::new(p.PIN_12, Level::Low),
    );
    let common_pins = [
        Output::new(p.PIN_1, Level::High),
        Output::new(p.PIN_2, Level::High),
        Output::new(p.PIN_3, Level::High),
        Output::new(p.PIN_4, Level::High),
    ]
    .map(DigitalCommon::new);

    let mut display = SevenSegment::new(segment_pins, common_pins)?;
    display.initialize(DisplayMode::new(Polarity::CommonCathode))?;
    display.set_text("HI");

    let mut count: i32 = 0;
    let mut last_step = Instant::now();
    loop {
        display.refresh()?;

        if last_step.elapsed() >= COUNT_STEP {
            last_step = Instant::now();
            if let Err(err) = display.set_integer(count, false) {
                warn!("{} does not fit: {}", count, err);
                count = 0;
                continue;
            }
            display.set_digit_blink(3, count % 100 < 10);
            count = count.wrapping_add(1);
        }

        embassy_futures::yield_now().await;
    }
}
