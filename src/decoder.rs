//! Receiver-side FSK decoder for low-rate sensor telemetry.
//!
//! This module provides the [`FskDecoder`] struct, which turns a noisy
//! comparator output into verified payload bytes. It debounces the signal
//! into bits with fixed-window majority sampling, tracks the
//! prefix/payload/parity/postfix framing state machine, stores up to three
//! transmissions of the same logical value, and reconciles them with the
//! majority-vote policy in [`crate::vote`].
//!
//! The decoder operates independently of the target platform's oscillator
//! speed, provided that [`tick()`](FskDecoder::tick) is called at regular
//! intervals (the reference link uses a 5 ms tick, 100 ticks per bit).
//!
//! ## Example
//!
//! ```rust
//! # use embedded_hal_mock::eh1::digital::{Mock as Pin, State as PinState, Transaction as PinTransaction};
//! use fskrx::config::DecoderConfig;
//! use fskrx::decoder::FskDecoder;
//!
//! fn main() {
//!     # let comp_pin = Pin::new(&[PinTransaction::get(PinState::Low)]);
//!     let mut decoder: FskDecoder<Pin, Pin> =
//!         FskDecoder::new(comp_pin, None, DecoderConfig::default()).unwrap();
//!     decoder.set_mode_rx();
//!
//!     loop {
//!         decoder.tick(); // Called every 5 ms by a delay or timer interrupt
//!         if let Ok(outcome) = decoder.result() {
//!             let _ = outcome; // hand off to display/host formatting
//!         }
//!         # break; // For testing purposes
//!     }
//!     # decoder.comp.done();
//! }
//! ```
//!
//! ## Concurrency model
//!
//! Single writer: all decode state lives in the `FskDecoder` struct and is
//! mutated only through `tick()`, typically from a periodic timer interrupt.
//! Each tick performs bounded, constant-time work and never blocks. Code
//! outside the interrupt must not inspect in-progress decode state; it reads
//! only the latched burst outcome through [`result()`](FskDecoder::result),
//! which is published once per burst after reconciliation.
//!
//! For timer and tick scheduling helpers, see [`crate::timer`].

use crate::config::{ConfigError, DecoderConfig};
use crate::frame::{FrameDecoder, FramePhase, FrameStep};
use crate::record::RecordStore;
use crate::sampler::{BitSampler, SamplePhase};
use crate::vote::{BurstOutcome, reconcile};
use core::convert::Infallible;
use embedded_hal::digital::{InputPin, OutputPin};

/// High-level operating mode of the decoder.
///
/// The decoder only consumes ticks in [`Rx`](DecoderMode::Rx). The sleep
/// supervisor moves it between [`Sleep`](DecoderMode::Sleep) and `Rx`
/// around bursts to save power; any transition out of `Sleep` force-resets
/// the decode state, since elapsed sleep time invalidates in-flight bit
/// timing.
#[derive(PartialEq, Eq, Clone, Copy, Default, Debug)]
pub enum DecoderMode {
    /// Low-power mode between bursts; ticks are ignored.
    Sleep,
    /// Powered and initialized but not listening.
    #[default]
    Idle,
    /// Actively sampling the comparator and decoding.
    Rx,
}

/// Software FSK receive pipeline: sampler, framer, record store, reconciler.
///
/// ## Type Parameters
///
/// - `COMP`: an [`embedded_hal::digital::InputPin`] carrying the comparator
///   output ("signal currently asserted").
/// - `OUT`: an optional [`embedded_hal::digital::OutputPin`] that mirrors
///   each decoded bit, for scoping the link during bring-up.
///
/// ## Notes
///
/// - Only one decoder instance should be active if you're using interrupts.
/// - You are responsible for calling `tick()` at the correct interval using
///   either a hardware timer interrupt or a polling loop.
#[derive(Debug)]
pub struct FskDecoder<COMP, OUT>
where
    COMP: InputPin,
    OUT: OutputPin,
{
    /// The current operating mode.
    pub mode: DecoderMode,
    /// Comparator input pin.
    pub comp: COMP,
    /// Optional debug pin mirroring each decoded bit.
    pub bit_out: Option<OUT>,

    sampler: BitSampler,
    frame: FrameDecoder,
    store: RecordStore,
    invert_input: bool,

    /// Outcome of the last completed burst, held until taken.
    latched: Option<BurstOutcome>,

    /// Bursts that reconciled to a payload value.
    pub bursts_resolved: u16,

    /// Bursts that reconciled to indeterminate.
    pub bursts_indeterminate: u16,

    /// Stall-guard resets (no prefix found, or stuck mid-frame).
    pub stalls: u16,

    /// Transmissions dropped because the burst's slots were already full.
    pub records_overrun: u16,
}

impl<COMP, OUT> FskDecoder<COMP, OUT>
where
    COMP: InputPin,
    OUT: OutputPin,
{
    /// Creates a decoder from a validated configuration.
    ///
    /// # Arguments
    /// - `comp`: comparator input pin.
    /// - `bit_out`: optional decoded-bit debug output pin.
    /// - `config`: sampling and framing parameters; see [`DecoderConfig`].
    ///
    /// # Errors
    /// Returns the [`ConfigError`] if `config` is internally inconsistent.
    ///
    /// # Notes
    /// The decoder starts in [`DecoderMode::Idle`]; call
    /// [`set_mode_rx()`](Self::set_mode_rx) to begin listening.
    pub fn new(comp: COMP, bit_out: Option<OUT>, config: DecoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            mode: DecoderMode::Idle,
            comp,
            bit_out,
            sampler: BitSampler::new(
                config.ticks_per_bit,
                config.framing_threshold,
                config.payload_threshold,
            ),
            frame: FrameDecoder::new(config.stall_timeout_bits),
            store: RecordStore::new(),
            invert_input: config.invert_input,
            latched: None,
            bursts_resolved: 0,
            bursts_indeterminate: 0,
            stalls: 0,
            records_overrun: 0,
        })
    }

    /// Puts the decoder into the ready-but-not-listening state.
    pub fn set_mode_idle(&mut self) {
        if self.mode != DecoderMode::Idle {
            self.mode = DecoderMode::Idle;
        }
    }

    /// Starts listening. Decode state begins from a clean prefix search.
    pub fn set_mode_rx(&mut self) {
        if self.mode != DecoderMode::Rx {
            self.force_reset();
            self.mode = DecoderMode::Rx;
        }
    }

    /// Suspends the pipeline between bursts (sleep supervisor hook).
    ///
    /// Partial decode state is discarded; the latched outcome of the last
    /// completed burst survives and can still be taken with
    /// [`result()`](Self::result).
    pub fn suspend(&mut self) {
        self.force_reset();
        self.mode = DecoderMode::Sleep;
    }

    /// Resumes listening after a suspend.
    ///
    /// Always restarts from prefix seeking rather than resuming mid-frame:
    /// bit timing from before the sleep is meaningless after it.
    pub fn resume(&mut self) {
        self.force_reset();
        self.mode = DecoderMode::Rx;
    }

    /// Wake-on-activity check, to be called from the wakeup interrupt.
    ///
    /// Samples the comparator once: if it is asserted, a transmission is
    /// likely in flight, so the decoder resumes and returns true. Otherwise
    /// it stays in [`DecoderMode::Sleep`] and returns false, and the
    /// supervisor should schedule the next sleep interval.
    pub fn wake_on_level(&mut self) -> bool {
        if self.read_comp() {
            self.resume();
            true
        } else {
            self.mode = DecoderMode::Sleep;
            false
        }
    }

    /// Advances the receive pipeline by one timing tick.
    ///
    /// Samples the comparator and runs one bounded decode step. Must be
    /// called at fixed intervals (reference: every 5 ms), ideally from a
    /// timer interrupt. Ignored outside [`DecoderMode::Rx`].
    pub fn tick(&mut self) {
        if self.mode != DecoderMode::Rx {
            return;
        }
        let asserted = self.read_comp();
        self.tick_level(asserted);
    }

    /// Pin-free core of [`tick()`](Self::tick).
    ///
    /// Useful when the comparator level arrives by some other path (an ADC
    /// compare flag, a captured trace replayed in tests). `invert_input` is
    /// not applied here; it belongs to the pin read.
    pub fn tick_level(&mut self, asserted: bool) {
        let phase = match self.frame.phase() {
            FramePhase::SeekingPrefix => SamplePhase::Framing,
            _ => SamplePhase::Payload,
        };
        let Some(bit) = self.sampler.sample(asserted, phase) else {
            return;
        };
        self.write_bit_out(bit != 0);

        match self.frame.push_bit(bit) {
            FrameStep::Pending => {}
            FrameStep::Complete(record) => {
                #[cfg(feature = "log")]
                log::debug!(
                    "transmission complete: payload={} parity_ok={} postfix_ok={}",
                    record.payload,
                    record.parity_ok,
                    record.postfix_ok
                );
                if !self.store.record(record) {
                    self.records_overrun += 1;
                }
                if self.store.is_full() {
                    self.finish_burst();
                }
            }
            FrameStep::Stalled => {
                #[cfg(feature = "log")]
                log::warn!("stall guard reset with {} record(s) stored", self.store.len());
                self.stalls += 1;
                if self.store.is_empty() {
                    // Nothing received this burst; reset silently.
                    self.sampler.reset();
                } else {
                    self.finish_burst();
                }
            }
        }
    }

    /// Takes the outcome of the last completed burst.
    ///
    /// Returns [`nb::Error::WouldBlock`] while no completed burst is
    /// pending. Each completed burst is consumed exactly once; polling
    /// again after `Ok` blocks until the next burst finishes.
    pub fn result(&mut self) -> nb::Result<BurstOutcome, Infallible> {
        match self.latched.take() {
            Some(outcome) => Ok(outcome),
            None => Err(nb::Error::WouldBlock),
        }
    }

    /// Number of transmissions recorded so far in the current burst.
    pub fn records_pending(&self) -> usize {
        self.store.len()
    }

    /// Reconciles the stored records, latches the outcome, clears the burst.
    fn finish_burst(&mut self) {
        let outcome = reconcile(self.store.records());
        match outcome {
            BurstOutcome::Resolved(_) => self.bursts_resolved += 1,
            BurstOutcome::Indeterminate => self.bursts_indeterminate += 1,
        }
        self.latched = Some(outcome);
        self.store.clear();
        self.frame.reset_burst();
        self.sampler.reset();
    }

    /// Discards all in-flight decode state. The latched outcome survives.
    fn force_reset(&mut self) {
        self.sampler.reset();
        self.frame.reset_burst();
        self.store.clear();
    }

    fn read_comp(&mut self) -> bool {
        if self.invert_input {
            !self.comp.is_high().unwrap_or(false)
        } else {
            self.comp.is_high().unwrap_or(false)
        }
    }

    fn write_bit_out(&mut self, high: bool) {
        if let Some(ref mut out) = self.bit_out {
            if high {
                let _ = out.set_high();
            } else {
                let _ = out.set_low();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{POSTFIX, PREFIX};
    use crate::parity::parity_bit;
    use embedded_hal_mock::eh1::digital::{
        Mock as PinMock, State as PinState, Transaction as PinTransaction,
    };

    fn test_config() -> DecoderConfig {
        // Short bit period so tests stay readable; same 90%/70% ratios.
        DecoderConfig {
            ticks_per_bit: 10,
            framing_threshold: 9,
            payload_threshold: 7,
            // A contiguous burst is 72 bit periods; leave headroom as the
            // reference calibration does (81 bits vs 72).
            stall_timeout_bits: 100,
            invert_input: false,
        }
    }

    fn decoder_without_pins() -> FskDecoder<PinMock, PinMock> {
        let comp = PinMock::new(&[]);
        let mut decoder = FskDecoder::new(comp, None, test_config()).unwrap();
        decoder.set_mode_rx();
        decoder
    }

    /// Feeds one bit as a full period of clean ticks.
    fn feed_bit(decoder: &mut FskDecoder<PinMock, PinMock>, bit: u8) {
        for _ in 0..10 {
            decoder.tick_level(bit != 0);
        }
    }

    fn feed_byte(decoder: &mut FskDecoder<PinMock, PinMock>, byte: u8) {
        for i in (0..8).rev() {
            feed_bit(decoder, (byte >> i) & 1);
        }
    }

    fn feed_frame(decoder: &mut FskDecoder<PinMock, PinMock>, payload: u8) {
        feed_byte(decoder, PREFIX);
        feed_byte(decoder, (payload << 1) | parity_bit(payload));
        feed_byte(decoder, POSTFIX);
    }

    #[test]
    fn test_decoder_initialization() {
        let comp = PinMock::new(&[]);
        let mut decoder: FskDecoder<PinMock, PinMock> =
            FskDecoder::new(comp, None, DecoderConfig::default()).unwrap();
        assert_eq!(decoder.mode, DecoderMode::Idle);
        assert_eq!(decoder.result(), Err(nb::Error::WouldBlock));
        decoder.comp.done();
    }

    /// Always-low comparator stand-in. The constructor drops its pins on the
    /// rejection path, which the transaction mocks treat as a missed `done()`.
    #[derive(Debug)]
    struct IdlePin;

    impl embedded_hal::digital::ErrorType for IdlePin {
        type Error = Infallible;
    }

    impl InputPin for IdlePin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(false)
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(true)
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = DecoderConfig {
            ticks_per_bit: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBitPeriod));
        let result: Result<FskDecoder<IdlePin, PinMock>, _> =
            FskDecoder::new(IdlePin, None, config);
        assert_eq!(result.unwrap_err(), ConfigError::ZeroBitPeriod);
    }

    #[test]
    fn test_tick_ignored_outside_rx() {
        let comp = PinMock::new(&[]);
        let mut decoder: FskDecoder<PinMock, PinMock> =
            FskDecoder::new(comp, None, test_config()).unwrap();
        // Idle: tick must not touch the pin (the mock would panic on an
        // unexpected transaction).
        decoder.tick();
        decoder.comp.done();
    }

    #[test]
    fn test_tick_samples_comparator_in_rx() {
        let expectations = [PinTransaction::get(PinState::High)];
        let comp = PinMock::new(&expectations);
        let mut decoder: FskDecoder<PinMock, PinMock> =
            FskDecoder::new(comp, None, test_config()).unwrap();
        decoder.set_mode_rx();
        decoder.tick();
        decoder.comp.done();
    }

    #[test]
    fn test_inverted_input_flips_sample() {
        let expectations = vec![PinTransaction::get(PinState::Low); 10];
        let comp = PinMock::new(&expectations);
        let config = DecoderConfig {
            invert_input: true,
            ..test_config()
        };
        let mut decoder: FskDecoder<PinMock, PinMock> =
            FskDecoder::new(comp, None, config).unwrap();
        decoder.set_mode_rx();
        // One full bit period of low reads decodes, inverted, as a 1:
        // enough to complete the first bit of the prefix search.
        for _ in 0..10 {
            decoder.tick();
        }
        decoder.comp.done();
    }

    #[test]
    fn test_three_clean_frames_resolve_burst() {
        let mut decoder = decoder_without_pins();
        for _ in 0..3 {
            feed_frame(&mut decoder, 42);
        }
        assert_eq!(decoder.result(), Ok(BurstOutcome::Resolved(42)));
        assert_eq!(decoder.bursts_resolved, 1);
        // Outcome consumed; store cleared for the next burst.
        assert_eq!(decoder.result(), Err(nb::Error::WouldBlock));
        assert_eq!(decoder.records_pending(), 0);
        decoder.comp.done();
    }

    #[test]
    fn test_result_blocks_mid_burst() {
        let mut decoder = decoder_without_pins();
        feed_frame(&mut decoder, 9);
        assert_eq!(decoder.records_pending(), 1);
        assert_eq!(decoder.result(), Err(nb::Error::WouldBlock));
        decoder.comp.done();
    }

    #[test]
    fn test_corrupted_transmission_out_voted() {
        let mut decoder = decoder_without_pins();
        feed_frame(&mut decoder, 100);
        feed_frame(&mut decoder, 100);
        // Third transmission: bad parity word and bad postfix.
        feed_byte(&mut decoder, PREFIX);
        feed_byte(&mut decoder, (37 << 1) | (1 ^ parity_bit(37)));
        feed_byte(&mut decoder, 0xE0);
        assert_eq!(decoder.result(), Ok(BurstOutcome::Resolved(100)));
        decoder.comp.done();
    }

    #[test]
    fn test_stall_with_records_reconciles_short_burst() {
        let mut decoder = decoder_without_pins();
        feed_frame(&mut decoder, 63); // 24 bit periods
        // Silence until the stall guard fires.
        for _ in 0..76 {
            feed_bit(&mut decoder, 0);
        }
        assert_eq!(decoder.stalls, 1);
        // One fully confirmed record resolves on its own.
        assert_eq!(decoder.result(), Ok(BurstOutcome::Resolved(63)));
        decoder.comp.done();
    }

    #[test]
    fn test_stall_with_no_records_publishes_nothing() {
        let mut decoder = decoder_without_pins();
        for _ in 0..100 {
            feed_bit(&mut decoder, 0);
        }
        assert_eq!(decoder.stalls, 1);
        assert_eq!(decoder.result(), Err(nb::Error::WouldBlock));
        decoder.comp.done();
    }

    #[test]
    fn test_suspend_discards_partial_frame() {
        let mut decoder = decoder_without_pins();
        feed_byte(&mut decoder, PREFIX);
        feed_bit(&mut decoder, 1); // partway into the payload
        decoder.suspend();
        assert_eq!(decoder.mode, DecoderMode::Sleep);
        decoder.resume();
        // A full clean burst decodes normally after the reset.
        for _ in 0..3 {
            feed_frame(&mut decoder, 7);
        }
        assert_eq!(decoder.result(), Ok(BurstOutcome::Resolved(7)));
        decoder.comp.done();
    }

    #[test]
    fn test_wake_on_level_resumes_only_on_activity() {
        let expectations = [
            PinTransaction::get(PinState::Low),
            PinTransaction::get(PinState::High),
        ];
        let comp = PinMock::new(&expectations);
        let mut decoder: FskDecoder<PinMock, PinMock> =
            FskDecoder::new(comp, None, test_config()).unwrap();
        decoder.suspend();
        assert!(!decoder.wake_on_level());
        assert_eq!(decoder.mode, DecoderMode::Sleep);
        assert!(decoder.wake_on_level());
        assert_eq!(decoder.mode, DecoderMode::Rx);
        decoder.comp.done();
    }

    #[test]
    fn test_bit_out_mirrors_decoded_bits() {
        let comp = PinMock::new(&[]);
        let bit_out = PinMock::new(&[
            PinTransaction::set(PinState::High),
            PinTransaction::set(PinState::Low),
        ]);
        let mut decoder = FskDecoder::new(comp, Some(bit_out), test_config()).unwrap();
        decoder.set_mode_rx();
        feed_bit(&mut decoder, 1);
        feed_bit(&mut decoder, 0);
        decoder.comp.done();
        let _ = decoder.bit_out.as_mut().map(|out| out.done());
    }

    #[test]
    fn test_noisy_ticks_within_threshold_still_decode() {
        let mut decoder = decoder_without_pins();
        // Prefix bits carried by 9-of-10 asserted ticks (framing threshold),
        // payload/postfix bits by 7-of-10 (payload threshold).
        for _ in 0..8 {
            for _ in 0..9 {
                decoder.tick_level(true);
            }
            decoder.tick_level(false);
        }
        let payload = 85u8;
        let word = (payload << 1) | parity_bit(payload);
        for byte in [word, POSTFIX] {
            for i in (0..8).rev() {
                let bit = (byte >> i) & 1;
                let high = if bit != 0 { 7 } else { 3 };
                for _ in 0..high {
                    decoder.tick_level(true);
                }
                for _ in 0..(10 - high) {
                    decoder.tick_level(false);
                }
            }
        }
        assert_eq!(decoder.records_pending(), 1);
        assert_eq!(decoder.result(), Err(nb::Error::WouldBlock));
        decoder.comp.done();
    }
}
