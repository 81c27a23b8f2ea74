//! Fixed-width bit-field helpers and the frame shift register.
//!
//! The framing layer works on small unsigned words: an 8-bit prefix match
//! inside a wider sliding window, a 7-bit payload packed next to a parity
//! bit, and an 8-bit postfix. Rather than scattering ad hoc hex masks across
//! those boundaries, this module centralizes the handful of bit operations
//! the decoder needs and wraps the accumulator itself in [`ShiftRegister`].

/// Extracts bit `i` of `word` (0 = least significant) as 0 or 1.
pub const fn bit(word: u16, i: u8) -> u8 {
    ((word >> i) & 1) as u8
}

/// Extracts `width` bits of `word` starting at bit `lo`.
///
/// `width` must be less than 16; the framing layer never needs more than
/// the 8-bit prefix/postfix window.
pub const fn field(word: u16, lo: u8, width: u8) -> u16 {
    (word >> lo) & ((1 << width) - 1)
}

/// A sliding-window bit accumulator, MSB-first.
///
/// Decoded bits are shifted in at the low end, so the most recently decoded
/// bit is bit 0 and the low `n` bits are always the last `n` bits received.
/// This is what makes the prefix search a sliding-window match: no alignment
/// is assumed, the register is simply compared after every bit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShiftRegister(u16);

impl ShiftRegister {
    /// Creates an empty register.
    pub const fn new() -> Self {
        Self(0)
    }

    /// Shifts `bit` (0 or 1) into the low end of the register.
    pub fn push(&mut self, bit: u8) {
        self.0 = (self.0 << 1) | (bit & 1) as u16;
    }

    /// Returns the low `width` bits of the register.
    pub const fn low_bits(&self, width: u8) -> u16 {
        field(self.0, 0, width)
    }

    /// Returns true if the low 8 bits equal `pattern`.
    pub const fn matches(&self, pattern: u8) -> bool {
        self.low_bits(8) == pattern as u16
    }

    /// Clears the register to all zeros.
    pub fn clear(&mut self) {
        self.0 = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_extraction() {
        assert_eq!(bit(0b1010, 0), 0);
        assert_eq!(bit(0b1010, 1), 1);
        assert_eq!(bit(0b1010, 3), 1);
        assert_eq!(bit(0b1010, 4), 0);
    }

    #[test]
    fn test_field_extraction() {
        assert_eq!(field(0b1101_0110, 1, 3), 0b011);
        assert_eq!(field(0b1101_0110, 0, 8), 0b1101_0110);
        assert_eq!(field(0xABCD, 4, 8), 0xBC);
    }

    #[test]
    fn test_shift_register_accumulates_msb_first() {
        let mut reg = ShiftRegister::new();
        for b in [1, 0, 1, 1] {
            reg.push(b);
        }
        assert_eq!(reg.low_bits(4), 0b1011);
    }

    #[test]
    fn test_sliding_window_prefix_match() {
        let mut reg = ShiftRegister::new();
        // Noise bits followed by a full prefix; the match must fire on the
        // exact bit that completes the pattern, regardless of alignment.
        for b in [0, 1, 0] {
            reg.push(b);
            assert!(!reg.matches(0xFF));
        }
        for _ in 0..7 {
            reg.push(1);
            assert!(!reg.matches(0xFF));
        }
        reg.push(1);
        assert!(reg.matches(0xFF));
    }

    #[test]
    fn test_clear_zeroes_window() {
        let mut reg = ShiftRegister::new();
        for _ in 0..8 {
            reg.push(1);
        }
        reg.clear();
        assert_eq!(reg.low_bits(8), 0);
        assert!(!reg.matches(0xFF));
    }
}
