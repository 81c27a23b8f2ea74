//! Frame state machine: prefix seeking, payload collection, postfix check.
//!
//! Consumes one decoded bit per bit period from the sampler and tracks where
//! in the frame the link currently is. A frame is prefix (`0xFF`), 7 payload
//! bits plus 1 parity bit, then postfix (`0x01`). Completing the postfix
//! window always yields a [`TransmissionRecord`], valid or not; the record's
//! flags carry the validity downstream.

use crate::bits::ShiftRegister;
use crate::consts::{FRAME_BITS, POSTFIX, PREFIX};
use crate::parity::check_parity;
use crate::record::TransmissionRecord;

/// Where in the frame the decoder currently is.
///
/// Transitions are driven solely by decoded-bit counts and shift-register
/// content; there is no timing state here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FramePhase {
    /// Sliding-window search for the prefix pattern.
    #[default]
    SeekingPrefix,
    /// Accumulating the payload and parity bits.
    CollectingPayload,
    /// Accumulating the trailer window.
    CollectingPostfix,
}

/// What one decoded bit did to the frame state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// The frame is still in progress.
    Pending,
    /// A postfix window closed; one transmission is complete.
    Complete(TransmissionRecord),
    /// The stall guard fired; the machine force-reset to prefix seeking and
    /// the current burst should be wound down.
    Stalled,
}

/// Bit-level frame decoder.
///
/// Feed it one bit per period via [`push_bit`](Self::push_bit). The stall
/// guard counts bit periods since the start of the burst and force-resets
/// the machine when the bound is exceeded, guaranteeing forward progress
/// under signal loss.
#[derive(Debug)]
pub struct FrameDecoder {
    phase: FramePhase,
    shift: ShiftRegister,

    /// Bits accumulated in the current payload or postfix window.
    bit_count: u8,

    /// Bit periods elapsed since the burst started.
    burst_bits: u16,

    stall_timeout_bits: u16,

    /// Payload and parity verdict held between payload completion and the
    /// close of the postfix window.
    pending_payload: u8,
    pending_parity_ok: bool,
}

impl FrameDecoder {
    /// Creates a decoder in prefix-seeking state with the given stall bound.
    pub fn new(stall_timeout_bits: u16) -> Self {
        Self {
            phase: FramePhase::SeekingPrefix,
            shift: ShiftRegister::new(),
            bit_count: 0,
            burst_bits: 0,
            stall_timeout_bits,
            pending_payload: 0,
            pending_parity_ok: false,
        }
    }

    /// The current frame phase.
    pub fn phase(&self) -> FramePhase {
        self.phase
    }

    /// Advances the state machine by one decoded bit.
    pub fn push_bit(&mut self, bit: u8) -> FrameStep {
        self.burst_bits += 1;
        self.shift.push(bit);

        match self.phase {
            FramePhase::SeekingPrefix => {
                if self.shift.matches(PREFIX) {
                    // Prefix found; start collecting from a clean window.
                    self.shift.clear();
                    self.bit_count = 0;
                    self.phase = FramePhase::CollectingPayload;
                }
            }
            FramePhase::CollectingPayload => {
                self.bit_count += 1;
                if self.bit_count >= FRAME_BITS {
                    let word = self.shift.low_bits(FRAME_BITS) as u8;
                    self.pending_payload = word >> 1;
                    self.pending_parity_ok = check_parity(word);
                    self.shift.clear();
                    self.bit_count = 0;
                    self.phase = FramePhase::CollectingPostfix;
                }
            }
            FramePhase::CollectingPostfix => {
                self.bit_count += 1;
                if self.bit_count >= FRAME_BITS {
                    let record = TransmissionRecord {
                        payload: self.pending_payload,
                        parity_ok: self.pending_parity_ok,
                        postfix_ok: self.shift.matches(POSTFIX),
                    };
                    self.reset_frame();
                    return FrameStep::Complete(record);
                }
            }
        }

        if self.burst_bits >= self.stall_timeout_bits {
            self.reset_burst();
            return FrameStep::Stalled;
        }
        FrameStep::Pending
    }

    /// Resets frame-level state, keeping the burst's stall counter running.
    fn reset_frame(&mut self) {
        self.phase = FramePhase::SeekingPrefix;
        self.shift.clear();
        self.bit_count = 0;
        self.pending_payload = 0;
        self.pending_parity_ok = false;
    }

    /// Force-resets everything, including the stall counter.
    ///
    /// Called when a burst ends (reconciled, stalled, or the decoder was
    /// suspended); partial frame state is discarded.
    pub fn reset_burst(&mut self) {
        self.reset_frame();
        self.burst_bits = 0;
    }
}
