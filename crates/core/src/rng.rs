//! Deterministic float stream.
//!
//! The stream is a 32-bit Weyl sequence pushed through an xorshift-multiply
//! finalizer (the "mulberry32" construction). Its output must stay bit-exact:
//! saved seeds and golden structures depend on the precise draw sequence.

use rand::RngCore;

const WEYL_INCREMENT: u32 = 0x6D2B_79F5;
const OUTPUT_SCALE: f64 = 4_294_967_296.0;

/// Seeded pseudo-random stream carrying a single 32-bit state word.
///
/// Each draw advances the state once. Two streams never share state, and the
/// sequence is a pure function of the seed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RandomStream {
    state: u32,
}

impl RandomStream {
    /// Create a stream from a 32-bit seed.
    pub fn seed(value: u32) -> Self {
        Self { state: value }
    }

    /// Current internal state (the seed plus one increment per draw).
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Advance the stream and return the raw 32-bit output.
    pub fn next_raw(&mut self) -> u32 {
        self.state = self.state.wrapping_add(WEYL_INCREMENT);
        let t = self.state;
        let mut m = (t ^ (t >> 15)).wrapping_mul(t | 1);
        m ^= m.wrapping_add((m ^ (m >> 7)).wrapping_mul(m | 61));
        m ^ (m >> 14)
    }

    /// Advance the stream and return a float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_raw()) / OUTPUT_SCALE
    }

    /// Draw a float and scale it onto `0..span`, flooring toward negative
    /// infinity. A non-positive `span` yields values at or below zero.
    pub fn next_scaled(&mut self, span: i64) -> i64 {
        (self.next_f64() * span as f64).floor() as i64
    }
}

impl RngCore for RandomStream {
    fn next_u32(&mut self) -> u32 {
        self.next_raw()
    }

    fn next_u64(&mut self) -> u64 {
        let low = u64::from(self.next_raw());
        let high = u64::from(self.next_raw());
        (high << 32) | low
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_raw().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn seed_zero_first_draws_are_stable() {
        let mut stream = RandomStream::seed(0);
        assert_eq!(stream.next_raw(), 1_144_304_738);
        assert_eq!(stream.next_raw(), 1_416_247);
        assert_eq!(stream.next_raw(), 958_946_056);
        assert_eq!(stream.next_raw(), 627_933_444);
    }

    #[test]
    fn seed_zero_first_float_matches_regression_value() {
        let mut stream = RandomStream::seed(0);
        assert_eq!(stream.next_f64(), 0.266_429_208_684_712_65);
    }

    #[test]
    fn seed_one_first_draws_are_stable() {
        let mut stream = RandomStream::seed(1);
        assert_eq!(stream.next_raw(), 2_693_262_067);
        assert_eq!(stream.next_raw(), 11_749_833);
        assert_eq!(stream.next_raw(), 2_265_367_787);
    }

    #[test]
    fn state_advances_by_weyl_increment() {
        let mut stream = RandomStream::seed(u32::MAX);
        stream.next_raw();
        assert_eq!(stream.state(), u32::MAX.wrapping_add(WEYL_INCREMENT));
    }

    #[test]
    fn floats_stay_in_unit_interval() {
        let mut stream = RandomStream::seed(0xDEAD_BEEF);
        for _ in 0..10_000 {
            let value = stream.next_f64();
            assert!((0.0..1.0).contains(&value), "{value} escaped [0, 1)");
        }
    }

    #[test]
    fn next_scaled_floors_negative_spans() {
        let mut stream = RandomStream::seed(5);
        for _ in 0..100 {
            let value = stream.next_scaled(-2);
            assert!((-2..=0).contains(&value));
        }
    }

    #[test]
    fn rng_core_shares_the_raw_sequence() {
        let mut raw = RandomStream::seed(9);
        let mut via_trait = RandomStream::seed(9);
        let expected = raw.next_raw();
        assert_eq!(RngCore::next_u32(&mut via_trait), expected);

        let mut bytes = [0u8; 6];
        via_trait.fill_bytes(&mut bytes);
        let next = raw.next_raw().to_le_bytes();
        let after = raw.next_raw().to_le_bytes();
        assert_eq!(&bytes[..4], &next);
        assert_eq!(&bytes[4..], &after[..2]);
    }

    #[test]
    fn works_with_rand_adapters() {
        let mut stream = RandomStream::seed(42);
        for _ in 0..100 {
            let value: u8 = stream.gen_range(3..9);
            assert!((3..9).contains(&value));
        }
    }
}
