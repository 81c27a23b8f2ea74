//! Decoder configuration and validation.
//!
//! The sampling thresholds and the stall timeout come from empirical tuning
//! of the deployed link; they are exposed here as tunable parameters with
//! the reference calibration as [`Default`], rather than being re-derived.

use thiserror::Error;

use crate::consts::{FRAMING_ACCURACY, PAYLOAD_ACCURACY, STALL_TIMEOUT_BITS, TICKS_PER_BIT};

/// Tunable parameters for the receive pipeline.
///
/// Construct with [`Default::default`] for the reference calibration (5 ms
/// tick, 100 ticks per bit, 90/70 accuracy thresholds) and adjust fields as
/// needed. [`FskDecoder::new`](crate::decoder::FskDecoder::new) validates
/// the configuration and rejects inconsistent values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Number of sampling ticks per bit period.
    pub ticks_per_bit: u16,

    /// Asserted-tick count required to decode a 1 while seeking the prefix.
    ///
    /// Stricter than [`payload_threshold`](Self::payload_threshold): losing
    /// synchronization during prefix detection costs the whole frame, while
    /// a borderline payload bit can still be corrected by majority voting.
    pub framing_threshold: u16,

    /// Asserted-tick count required to decode a 1 while collecting payload
    /// or postfix bits.
    pub payload_threshold: u16,

    /// Number of bit periods a burst may run without completing before the
    /// frame decoder force-resets to prefix seeking.
    pub stall_timeout_bits: u16,

    /// Whether the comparator input is inverted (asserted = low).
    pub invert_input: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            ticks_per_bit: TICKS_PER_BIT,
            framing_threshold: FRAMING_ACCURACY,
            payload_threshold: PAYLOAD_ACCURACY,
            stall_timeout_bits: STALL_TIMEOUT_BITS,
            invert_input: false,
        }
    }
}

impl DecoderConfig {
    /// Checks the configuration for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ticks_per_bit == 0 {
            return Err(ConfigError::ZeroBitPeriod);
        }
        if self.stall_timeout_bits == 0 {
            return Err(ConfigError::ZeroStallTimeout);
        }
        for threshold in [self.framing_threshold, self.payload_threshold] {
            if threshold == 0 || threshold > self.ticks_per_bit {
                return Err(ConfigError::ThresholdOutOfRange {
                    threshold,
                    ticks_per_bit: self.ticks_per_bit,
                });
            }
        }
        if self.framing_threshold < self.payload_threshold {
            return Err(ConfigError::ThresholdOrder);
        }
        Ok(())
    }
}

/// Rejected decoder configuration.
///
/// The only fallible operation in the crate; every runtime decode anomaly
/// (parity mismatch, bad postfix, stall) degrades to a record flag or a
/// counter instead.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `ticks_per_bit` was zero.
    #[error("ticks per bit must be nonzero")]
    ZeroBitPeriod,

    /// `stall_timeout_bits` was zero.
    #[error("stall timeout must be nonzero")]
    ZeroStallTimeout,

    /// An accuracy threshold was zero or exceeded the bit period.
    #[error("accuracy threshold {threshold} not in 1..={ticks_per_bit}")]
    ThresholdOutOfRange {
        /// The offending threshold value.
        threshold: u16,
        /// The configured bit period it must fit in.
        ticks_per_bit: u16,
    },

    /// The framing threshold was lower than the payload threshold.
    #[error("framing threshold must be at least the payload threshold")]
    ThresholdOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(DecoderConfig::default().validate(), Ok(()));
    }

    #[test]
    fn test_zero_bit_period_rejected() {
        let config = DecoderConfig {
            ticks_per_bit: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBitPeriod));
    }

    #[test]
    fn test_threshold_above_bit_period_rejected() {
        let config = DecoderConfig {
            ticks_per_bit: 50,
            framing_threshold: 51,
            payload_threshold: 35,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ThresholdOutOfRange {
                threshold: 51,
                ticks_per_bit: 50
            })
        );
    }

    #[test]
    fn test_threshold_order_enforced() {
        let config = DecoderConfig {
            framing_threshold: 60,
            payload_threshold: 70,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ThresholdOrder));
    }
}
