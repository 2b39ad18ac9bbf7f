//! Cube edge-length sampling skewed toward small sizes.

use crate::rng::RandomStream;

/// Draws edge lengths in `[min, max]` with a quadratic bias toward `min`.
///
/// Every sample consumes exactly two stream draws and multiplies them, so the
/// product of two independent uniforms (not one uniform squared) sets the
/// offset from `min`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BiasedSizeSampler {
    min: u32,
    max: u32,
}

impl BiasedSizeSampler {
    /// Sampler over the inclusive range `[min, max]`. Callers guarantee `min <= max`.
    pub fn new(min: u32, max: u32) -> Self {
        debug_assert!(min <= max, "inverted size range {min}..={max}");
        Self { min, max }
    }

    /// Smallest size this sampler can return.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Largest size this sampler can return.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Draw one size.
    pub fn sample(&self, stream: &mut RandomStream) -> u32 {
        let first = stream.next_f64();
        let second = stream.next_f64();
        let biased = first * second;
        let span = f64::from(self.max.saturating_sub(self.min)) + 1.0;
        self.min + (biased * span).floor() as u32
    }
}
