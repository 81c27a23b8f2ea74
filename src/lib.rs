//! # fskrx
//!
//! A portable, no_std Rust implementation of the receiver side of a
//! frequency-shift-keyed, low-rate sensor telemetry link, as used by
//! battery-powered field instruments that repeat each reading several times
//! over a noisy analog channel.
//!
//! This crate implements the full receive pipeline in software:
//! - `embedded-hal` traits for the comparator input and timing
//! - fixed-window majority sampling to debounce each 500 ms bit
//! - a prefix/payload/parity/postfix framing state machine
//! - triple-redundancy majority-vote reconciliation across transmissions
//! - interrupt-safe singleton access with `critical-section`
//! - optional tick sources using either timer interrupts or blocking delay
//!
//! ## Crate features
//! | Feature               | Description |
//! |-----------------------|-------------|
//! | `std`                 | Disables `#![no_std]` support and replaces `heapless::Vec`s with
//! `std::vec::Vec`s |
//! | `delay-loop`          | Uses `embedded_hal::delay::DelayNs` for tick timing |
//! | `timer-isr` (default) | Uses `critical_section::with` for tick timing |
//! | `defmt-0-3`           | Uses `defmt` logging |
//! | `log`                 | Uses `log` logging |
//!
//! ## Software Features
//!
//! - **Bit debouncing**: 100 comparator samples per bit, resolved by an
//!   accuracy threshold (90% while hunting the frame prefix, 70% for data)
//! - **Framing**: sliding-window `0xFF` prefix search, 7 data bits plus an
//!   even-parity bit, `0x01` postfix confirmation
//! - **Majority voting**: up to 3 transmissions per burst reconciled by
//!   confirmation consensus with a per-bit 2-of-3 fallback, surfacing an
//!   explicit indeterminate result instead of a guess
//! - **Forward progress**: a stall guard bounds every decode attempt, and
//!   suspend/resume hooks integrate with a sleep supervisor
//!
//! ## Usage
//!
//! ```ignore
//! use fskrx::config::DecoderConfig;
//! use fskrx::decoder::FskDecoder;
//!
//! let mut decoder = FskDecoder::new(comp_pin, None, DecoderConfig::default())?;
//! decoder.set_mode_rx();
//! loop {
//!     decoder.tick(); // Call every 5 ms
//!     if let Ok(outcome) = decoder.result() {
//!         // one outcome per burst: a payload byte or indeterminate
//!     }
//! }
//! ```
//!
//! Or, use `run_fsk_tick_loop()` with a `DelayNs` implementation:
//!
//! ```ignore
//! fskrx::timer::run_fsk_tick_loop(&mut decoder, &mut delay, fskrx::timer::TICK_US);
//! ```
//!
//! ## Integration Notes
//!
//! - Receive timing is based on a 2 bit/s rate (5 ms tick, 100 ticks per
//!   bit); the thresholds are tunable through
//!   [`DecoderConfig`](config::DecoderConfig)
//! - Only one decoder instance should be active at a time in
//!   interrupt-driven mode
//! - All decode state is owned by the decoder struct and mutated only by
//!   `tick()`; non-interrupt code reads the latched burst outcome only
//!
//! --
//! Designed for `#![no_std]` use in resource-constrained embedded
//! environments.

#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    non_shorthand_field_patterns,
    no_mangle_generic_items,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    unconditional_recursion,
    unused,
    while_true,
    missing_debug_implementations,
    missing_docs,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    unused_results
)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "timer-isr")]
pub use critical_section;

#[cfg(not(feature = "std"))]
pub use heapless;

pub mod bits;
pub mod config;
pub mod consts;
pub mod decoder;
pub mod frame;
pub mod parity;
pub mod record;
pub mod sampler;
pub mod timer;
pub mod vote;
