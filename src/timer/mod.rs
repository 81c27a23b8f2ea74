//! Timer and tick-loop utilities for the FSK decoder.
//!
//! Logic for scheduling the decoder's sampling tick. This employs two
//! approaches: an interrupt service routine using `critical_section::with`
//! (`timer-isr` feature), or a busy-loop delay timer (`delay-loop` feature).
//!
//! Contains helpers for polling- and ISR-based scheduling, including:
//! - `compute_ocr_value`: runtime OCR calculator
//! - `const_ocr_value`: compile-time OCR calculator
//! - `run_fsk_tick_loop`: blocking decoder loop for DelayNs (feature `delay-loop`)
//! - `global_fsk_decoder_tick` and `tick_fsk_decoder!()`: interrupt-based
//!   tick callback wrapper (feature `timer-isr`)
//!
//! The reference link samples every 5 ms with 100 ticks per bit, giving a
//! 500 ms bit period (2 bit/s). At such a slow tick almost any timer
//! configuration can hit the rate; the calculators below exist so the same
//! decoder can run against a faster comparator without re-deriving timer
//! constants by hand.

use libm::round;

#[cfg(feature = "delay-loop")]
mod delay;
#[cfg_attr(feature = "delay-loop", allow(unused_imports))]
#[cfg(feature = "delay-loop")]
pub use delay::*;

#[cfg(feature = "timer-isr")]
mod isr;
#[cfg_attr(feature = "timer-isr", allow(unused_imports))]
#[cfg(feature = "timer-isr")]
pub use isr::*;

#[cfg(feature = "timer-isr")]
mod macros;
#[cfg_attr(feature = "timer-isr", allow(unused_imports))]
#[cfg(feature = "timer-isr")]
pub use macros::*;

/// Reference sampling tick interval: 5 ms.
pub const TICK_US: u32 = 5_000;
/// 2 bits / second at the reference calibration
pub const BITS_PER_SECOND: u16 = 2;
/// (2 bits / second)^-1 == 0.5 seconds / bit
pub const SECONDS_PER_BIT: f32 = 0.5;
/// 0.5 seconds / bit == 500,000,000,000 picoseconds / bit
pub const PICOSECONDS_PER_BIT: u64 = 500_000_000_000;
/// 1,000,000 picoseconds = 1 microsecond
pub const PICOSECONDS_PER_MICROSECOND: u32 = 1_000_000;

/// Computes the OCR value for a hardware timer in compare-match mode.
///
/// # Arguments
/// - `f_cpu`: CPU frequency in Hz
/// - `prescaler`: timer prescaler (e.g., 64, 256, 1024)
/// - `tick_us`: desired tick interval in microseconds (e.g., 5000.0)
///
/// # Returns
/// - OCR value for the compare register (rounds to nearest integer)
/// - Number of ticks per bit (for [`DecoderConfig`](crate::config::DecoderConfig))
pub fn compute_ocr_value(f_cpu: u32, prescaler: u32, tick_us: f32) -> (u16, u16) {
    let timer_counts_per_second: f32 = f_cpu as f32 / prescaler as f32;
    let counts_per_tick: f32 = timer_counts_per_second * (tick_us / 1_000_000.0);
    (round(counts_per_tick as f64) as u16, ticks_per_bit(tick_us))
}

/// Compile-time OCR value calculator.
///
/// Same contract as [`compute_ocr_value`], using integer picosecond math so
/// it can run in a `const` context.
pub const fn const_ocr_value(f_cpu: u32, prescaler: u32, tick_us: f32) -> (u16, u16) {
    let tick_ps = ((tick_us as f64) * (PICOSECONDS_PER_MICROSECOND as f64)) as u64;
    let counts_per_tick = (f_cpu / prescaler) as u64 * tick_ps / (PICOSECONDS_PER_MICROSECOND as u64 * 1_000_000);
    (counts_per_tick as u16, const_ticks_per_bit(tick_us))
}

/// Computes the ticks-per-bit value for a given tick interval.
///
/// # Arguments
/// - `tick_us`: tick interval in microseconds (e.g., 5000.0)
pub fn ticks_per_bit(tick_us: f32) -> u16 {
    let tick_ps = ((tick_us as f64) * (PICOSECONDS_PER_MICROSECOND as f64)) as u64;
    (PICOSECONDS_PER_BIT / tick_ps) as u16
}

/// Compile-time ticks-per-bit value for a given tick interval.
pub const fn const_ticks_per_bit(tick_us: f32) -> u16 {
    let tick_ps = ((tick_us as f64) * (PICOSECONDS_PER_MICROSECOND as f64)) as u64;
    (PICOSECONDS_PER_BIT / tick_ps) as u16
}
