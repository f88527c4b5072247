//! Injectable randomness for the scorer.
//!
//! Scoring noise must never come from ambient global state: every draw goes
//! through a `RandomSource` instance threaded into the call, so production
//! runs get variance and tests get exact reproducibility.

use std::time::{SystemTime, UNIX_EPOCH};

/// A source of uniform random draws.
pub trait RandomSource: Send {
    /// Next value uniformly distributed in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform draw in `[lo, hi)`.
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_unit()
    }
}

/// SplitMix64 generator (Steele, Lea & Flood). Small state, full 64-bit
/// period, good enough for bounded score perturbation.
#[derive(Debug, Clone)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Deterministic generator from an explicit seed.
    pub fn seeded(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Generator seeded from the system clock.
    pub fn from_entropy() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x9e3779b97f4a7c15);
        Self::seeded(nanos)
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
        z ^ (z >> 31)
    }
}

impl RandomSource for SplitMix64 {
    fn next_unit(&mut self) -> f64 {
        // Top 53 bits give a uniform double in [0, 1).
        (self.next_u64() >> 11) as f64 * (1.0 / (1u64 << 53) as f64)
    }
}

/// Test double that returns the same unit value on every draw.
///
/// `FixedSource::midpoint()` makes every `uniform(-h, +h)` draw exactly 0,
/// which turns the scorer into a pure function of the text features.
#[derive(Debug, Clone, Copy)]
pub struct FixedSource(pub f64);

impl FixedSource {
    /// A source whose every symmetric draw is zero.
    pub fn midpoint() -> Self {
        FixedSource(0.5)
    }
}

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        self.0
    }
}
