//! Cross-transmission majority reconciliation.
//!
//! A burst carries the same logical value up to three times. A single
//! transmission can lose a bit to noise in its payload, its parity bit, or
//! its postfix, but a true bit value is very unlikely to flip in the same
//! position across a majority of three independent transmissions. This
//! module turns the burst's transmission records into one best-guess value,
//! or an explicit indeterminate result when the records cannot support one.
//!
//! The policy runs in two stages:
//!
//! 1. **Confirmation consensus** — records vouched for by parity and/or
//!    postfix validity that all agree on one payload resolve directly.
//! 2. **Bitwise majority fallback** — when confirmations conflict or are
//!    absent but all three records arrived, each of the 8 bit positions is
//!    voted independently (at least 2 of 3 wins).
//!
//! Anything else is [`BurstOutcome::Indeterminate`]: a wrong-but-plausible
//! value is never fabricated from insufficient data.

use crate::bits::bit;
use crate::consts::{FRAME_BITS, RECORDS_PER_BURST};
use crate::record::TransmissionRecord;

/// Result of reconciling one burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurstOutcome {
    /// The burst resolved to this payload value (0–127).
    Resolved(u8),

    /// The records could not support a reliable value. Callers must treat
    /// this as "no reading this burst", never as a payload.
    Indeterminate,
}

/// What one confirmation axis (parity or postfix) says about the burst.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AxisVerdict {
    /// No record is confirmed on this axis.
    Unconfirmed,
    /// All confirmed records agree on this payload.
    Agree(u8),
    /// Confirmed records contradict each other.
    Conflict,
}

fn axis_verdict<I: Iterator<Item = u8>>(mut payloads: I) -> AxisVerdict {
    match payloads.next() {
        None => AxisVerdict::Unconfirmed,
        Some(first) => {
            if payloads.all(|p| p == first) {
                AxisVerdict::Agree(first)
            } else {
                AxisVerdict::Conflict
            }
        }
    }
}

/// Reconciles the records of one burst into a single outcome.
///
/// `records` holds the 0–3 transmissions collected this burst, in arrival
/// order. Deterministic: the same records always produce the same outcome.
pub fn reconcile(records: &[TransmissionRecord]) -> BurstOutcome {
    if records.is_empty() {
        return BurstOutcome::Indeterminate;
    }

    // Stage 1a: records confirmed on both axes outrank everything else.
    match axis_verdict(records.iter().filter(|r| r.confirmed()).map(|r| r.payload)) {
        AxisVerdict::Agree(v) => return BurstOutcome::Resolved(v),
        AxisVerdict::Conflict => return majority_fallback(records),
        AxisVerdict::Unconfirmed => {}
    }

    // Stage 1b: each axis on its own.
    let parity = axis_verdict(records.iter().filter(|r| r.parity_ok).map(|r| r.payload));
    let postfix = axis_verdict(records.iter().filter(|r| r.postfix_ok).map(|r| r.payload));
    match (parity, postfix) {
        (AxisVerdict::Agree(a), AxisVerdict::Agree(b)) if a == b => BurstOutcome::Resolved(a),
        (AxisVerdict::Agree(v), AxisVerdict::Unconfirmed)
        | (AxisVerdict::Unconfirmed, AxisVerdict::Agree(v)) => BurstOutcome::Resolved(v),
        // Conflicting or absent confirmations: stage 2.
        _ => majority_fallback(records),
    }
}

/// Per-bit-position majority vote across three stored payloads.
///
/// Requires the full burst; with fewer records there is not enough data to
/// out-vote a corruption, and the result is indeterminate.
fn majority_fallback(records: &[TransmissionRecord]) -> BurstOutcome {
    if records.len() < RECORDS_PER_BURST {
        return BurstOutcome::Indeterminate;
    }
    let mut value = 0u8;
    for i in 0..FRAME_BITS {
        let ones: u8 = records.iter().map(|r| bit(r.payload as u16, i)).sum();
        if ones >= 2 {
            value |= 1 << i;
        }
    }
    BurstOutcome::Resolved(value)
}
