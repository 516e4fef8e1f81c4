//! Seeded Fisher-Yates shuffle
//!
//! Each call builds a fresh [`Mulberry32`] from the seed, so the same
//! (length, seed) pair always yields the same permutation.

use super::Mulberry32;

/// Return a shuffled copy of `items`
///
/// The input slice is left untouched.
///
/// # Example
/// ```
/// use exam_client_core_rs::{derive_seed, seeded_shuffle};
///
/// let questions = ["A", "B", "C", "D"];
/// let order = seeded_shuffle(&questions, derive_seed("user123exam456"));
/// assert_eq!(order, vec!["D", "B", "C", "A"]);
/// assert_eq!(questions, ["A", "B", "C", "D"]);
/// ```
pub fn seeded_shuffle<T: Clone>(items: &[T], seed: u32) -> Vec<T> {
    let mut shuffled = items.to_vec();
    seeded_shuffle_in_place(&mut shuffled, seed);
    shuffled
}

/// Shuffle a caller-owned buffer with the same permutation as [`seeded_shuffle`]
pub fn seeded_shuffle_in_place<T>(items: &mut [T], seed: u32) {
    let mut rng = Mulberry32::new(seed);
    for i in (1..items.len()).rev() {
        let j = rng.index_below(i + 1);
        items.swap(i, j);
    }
}
