//! Deterministic randomization
//!
//! Seed derivation (djb2), the Mulberry32 generator and a seeded
//! Fisher-Yates shuffle.
//! CRITICAL: Every ordering shown to a test-taker MUST go through this module.

mod mulberry;
mod seed;
mod shuffle;

pub use mulberry::Mulberry32;
pub use seed::{derive_seed, SeedSource, SEED_BASIS};
pub use shuffle::{seeded_shuffle, seeded_shuffle_in_place};
