//! Constants used across the FSK receive pipeline.
//!
//! This module defines the protocol-wide constants for framing patterns,
//! debounce thresholds, burst sizing, and stall recovery.
//!
//! These values mirror the calibration of the reference telemetry link: a
//! 5 ms sampling tick, 100 ticks per bit (500 ms bit period), and a
//! 7-bit payload guarded by one parity bit between an `0xFF` prefix and an
//! `0x01` postfix.
//!
//! ## Key Concepts
//!
//! - **Framing patterns**: fixed prefix/postfix bytes marking frame
//!   boundaries; the prefix is searched with a sliding window.
//! - **Accuracy thresholds**: out of one bit period's worth of samples, how
//!   many must be asserted for the bit to decode as 1. Framing uses a
//!   stricter threshold than payload, since a missed prefix costs the whole
//!   frame while a borderline payload bit can still be out-voted.
//! - **Burst sizing**: every logical value is transmitted three times;
//!   reconciliation runs once per burst.
//!
//! The thresholds and the stall timeout reflect empirical tuning of the
//! deployed link and are exposed as tunable fields on
//! [`DecoderConfig`](crate::config::DecoderConfig) rather than re-derived.

/// Frame prefix pattern. Eight consecutive 1 bits mark the start of a frame.
pub const PREFIX: u8 = 0xFF;

/// Frame postfix pattern, transmitted after the payload and parity bits.
///
/// A received trailer that fails to match is recorded as `postfix_ok =
/// false` on the transmission record; it is not fatal.
pub const POSTFIX: u8 = 0x01;

/// Number of application data bits per frame (payload range 0–127).
pub const PAYLOAD_BITS: u8 = 7;

/// Number of bits in one framed word: payload plus one trailing parity bit.
///
/// The postfix window has the same width.
pub const FRAME_BITS: u8 = PAYLOAD_BITS + 1;

/// Largest payload value representable in [`PAYLOAD_BITS`] bits.
pub const PAYLOAD_MAX: u8 = (1 << PAYLOAD_BITS) - 1;

/// Default number of sampling ticks per bit period.
///
/// At the reference 5 ms tick this gives a 500 ms bit period.
pub const TICKS_PER_BIT: u16 = 100;

/// Default number of asserted ticks (out of [`TICKS_PER_BIT`]) required to
/// decode a 1 bit while seeking the prefix.
pub const FRAMING_ACCURACY: u16 = 90;

/// Default number of asserted ticks required to decode a 1 bit while
/// collecting payload or postfix bits.
pub const PAYLOAD_ACCURACY: u16 = 70;

/// Number of transmissions of the same logical value per burst.
pub const RECORDS_PER_BURST: usize = 3;

/// Default number of bit periods a burst may run without completing before
/// the decoder force-resets to prefix seeking.
pub const STALL_TIMEOUT_BITS: u16 = 81;
