//! Mulberry32 pseudorandom generator
//!
//! A 32-bit state generator with a single additive step and a
//! multiply-xorshift output mix. Small, fast and bit-exact across platforms,
//! which is all a display-order shuffle needs.
//!
//! # Determinism
//!
//! Same seed → same sequence of draws. All arithmetic wraps at 32 bits.

use serde::{Deserialize, Serialize};

const INCREMENT: u32 = 0x6D2B_79F5;

/// 2^32 as a float, the divisor that maps a u32 onto [0.0, 1.0)
const TWO_POW_32: f64 = 4_294_967_296.0;

/// Deterministic random number generator using Mulberry32
///
/// # Example
/// ```
/// use exam_client_core_rs::Mulberry32;
///
/// let mut rng = Mulberry32::new(42);
/// assert_eq!(rng.next_u32(), 2581720956);
///
/// let draw = rng.next_f64();
/// assert!((0.0..1.0).contains(&draw));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    /// Create a generator from a seed
    ///
    /// Zero is a valid seed; the additive step moves the state away from it
    /// on the first draw.
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Generate the next raw 32-bit output
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(INCREMENT);

        let mut z = self.state;
        z = (z ^ (z >> 15)).wrapping_mul(z | 1);
        z ^= z.wrapping_add((z ^ (z >> 7)).wrapping_mul(z | 61));
        z ^ (z >> 14)
    }

    /// Generate a float in [0.0, 1.0)
    ///
    /// Exactly `next_u32() / 2^32`; the division is lossless in f64.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / TWO_POW_32
    }

    /// Draw an index in `0..bound` as `floor(next_f64() * bound)`
    ///
    /// Returns 0 without consuming a draw when `bound <= 1`.
    pub fn index_below(&mut self, bound: usize) -> usize {
        if bound <= 1 {
            return 0;
        }
        (self.next_f64() * bound as f64).floor() as usize
    }

    /// Get the current internal state
    pub fn get_state(&self) -> u32 {
        self.state
    }
}

impl Iterator for Mulberry32 {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}
