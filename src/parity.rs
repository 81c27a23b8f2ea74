//! Even-parity check over the framed payload word.

use crate::bits::bit;
use crate::consts::PAYLOAD_BITS;

/// Checks the trailing parity bit of a framed word.
///
/// `word` holds the 7 payload bits in its upper positions and the
/// transmitted parity bit at bit 0, exactly as collected off the air. The
/// payload bits are XOR-reduced and the result compared against the
/// transmitted bit.
///
/// Stateless; valid over the full 0–127 payload range.
pub fn check_parity(word: u8) -> bool {
    let payload = word >> 1;
    let received = bit(word as u16, 0);
    let mut parity = 0;
    for i in 0..PAYLOAD_BITS {
        parity ^= bit(payload as u16, i);
    }
    parity == received
}

/// Computes the parity bit a transmitter would append to `payload`.
///
/// Used by tests to build valid frames; the receive path only ever calls
/// [`check_parity`].
pub fn parity_bit(payload: u8) -> u8 {
    let mut parity = 0;
    for i in 0..PAYLOAD_BITS {
        parity ^= bit(payload as u16, i);
    }
    parity
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parity_all_payload_values() {
        // Exhaustive: for every 7-bit payload, the word with the correct
        // parity bit passes and the word with the flipped bit fails.
        for payload in 0..=127u8 {
            let good = (payload << 1) | parity_bit(payload);
            let bad = good ^ 1;
            assert!(check_parity(good), "payload {payload} rejected");
            assert!(!check_parity(bad), "payload {payload} accepted bad parity");
        }
    }

    #[test]
    fn test_parity_matches_xor_reduction() {
        for payload in 0..=127u8 {
            assert_eq!(parity_bit(payload), (payload.count_ones() & 1) as u8);
        }
    }

    #[test]
    fn test_flipped_payload_bit_detected() {
        let word = (0b0101_101 << 1) | parity_bit(0b0101_101);
        assert!(check_parity(word));
        // Any single payload bit flip must flip the check result.
        for i in 1..8 {
            assert!(!check_parity(word ^ (1 << i)));
        }
    }
}
