//! Fixed-window majority sampling of the comparator output.
//!
//! The comparator output is a noisy square wave: within one 500 ms bit
//! period the level can glitch many times. Instead of trusting any single
//! reading, the sampler counts asserted and unasserted ticks across the
//! whole bit period and resolves them into one logical bit with an accuracy
//! threshold (debouncing).

/// Which accuracy threshold applies to the bit currently being sampled.
///
/// Prefix seeking uses the stricter framing threshold; payload and postfix
/// bits use the looser payload threshold, since a borderline data bit can
/// still be corrected by the cross-transmission majority vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplePhase {
    /// Seeking the frame prefix.
    Framing,
    /// Collecting payload, parity, or postfix bits.
    Payload,
}

/// Majority-vote integrator for one bit period.
///
/// Feed it one comparator reading per tick; after `ticks_per_bit` ticks it
/// yields exactly one decoded bit and resets its counters. Each call does
/// bounded, constant-time work, so it is safe to run inside a periodic
/// timer interrupt.
#[derive(Debug)]
pub struct BitSampler {
    /// Ticks seen asserted in the current bit period.
    high_ticks: u16,

    /// Ticks seen unasserted in the current bit period.
    low_ticks: u16,

    ticks_per_bit: u16,
    framing_threshold: u16,
    payload_threshold: u16,
}

impl BitSampler {
    /// Creates a sampler with the given bit period and accuracy thresholds.
    pub fn new(ticks_per_bit: u16, framing_threshold: u16, payload_threshold: u16) -> Self {
        Self {
            high_ticks: 0,
            low_ticks: 0,
            ticks_per_bit,
            framing_threshold,
            payload_threshold,
        }
    }

    /// Accumulates one comparator reading.
    ///
    /// Returns `Some(bit)` exactly once per full bit period, after which the
    /// window counters restart. A sample ratio exactly on the threshold
    /// decodes as 1 ("at least threshold" is asserted); ties are not a
    /// distinct error condition.
    pub fn sample(&mut self, asserted: bool, phase: SamplePhase) -> Option<u8> {
        if asserted {
            self.high_ticks += 1;
        } else {
            self.low_ticks += 1;
        }

        if self.high_ticks + self.low_ticks < self.ticks_per_bit {
            return None;
        }

        let threshold = match phase {
            SamplePhase::Framing => self.framing_threshold,
            SamplePhase::Payload => self.payload_threshold,
        };
        let bit = if self.high_ticks >= threshold { 1 } else { 0 };
        self.high_ticks = 0;
        self.low_ticks = 0;
        Some(bit)
    }

    /// Discards any partially accumulated window.
    ///
    /// Called on force-reset: bit timing from before a suspend or stall is
    /// meaningless after it.
    pub fn reset(&mut self) {
        self.high_ticks = 0;
        self.low_ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(sampler: &mut BitSampler, high: u16, low: u16, phase: SamplePhase) -> Option<u8> {
        let mut decoded = None;
        for _ in 0..high {
            decoded = decoded.or(sampler.sample(true, phase));
        }
        for _ in 0..low {
            decoded = decoded.or(sampler.sample(false, phase));
        }
        decoded
    }

    #[test]
    fn test_framing_phase_accepts_95_of_100() {
        let mut sampler = BitSampler::new(100, 90, 70);
        assert_eq!(feed(&mut sampler, 95, 5, SamplePhase::Framing), Some(1));
    }

    #[test]
    fn test_payload_phase_rejects_60_of_100() {
        let mut sampler = BitSampler::new(100, 90, 70);
        assert_eq!(feed(&mut sampler, 60, 40, SamplePhase::Payload), Some(0));
    }

    #[test]
    fn test_threshold_boundary_decodes_as_one() {
        let mut sampler = BitSampler::new(100, 90, 70);
        assert_eq!(feed(&mut sampler, 70, 30, SamplePhase::Payload), Some(0b1));
        // Same ratio under the stricter framing threshold is a 0.
        assert_eq!(feed(&mut sampler, 70, 30, SamplePhase::Framing), Some(0));
    }

    #[test]
    fn test_one_bit_per_full_period() {
        let mut sampler = BitSampler::new(10, 9, 7);
        for _ in 0..9 {
            assert_eq!(sampler.sample(true, SamplePhase::Payload), None);
        }
        assert_eq!(sampler.sample(true, SamplePhase::Payload), Some(1));
        // Counters restarted: the next period accumulates from zero.
        for _ in 0..9 {
            assert_eq!(sampler.sample(false, SamplePhase::Payload), None);
        }
        assert_eq!(sampler.sample(false, SamplePhase::Payload), Some(0));
    }

    #[test]
    fn test_reset_discards_partial_window() {
        let mut sampler = BitSampler::new(10, 9, 7);
        for _ in 0..8 {
            assert_eq!(sampler.sample(true, SamplePhase::Payload), None);
        }
        sampler.reset();
        for _ in 0..9 {
            assert_eq!(sampler.sample(true, SamplePhase::Payload), None);
        }
        assert_eq!(sampler.sample(true, SamplePhase::Payload), Some(1));
    }
}
