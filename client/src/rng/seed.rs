//! Seed derivation from identifier strings
//!
//! djb2 rolling hash: start at 5381, then `acc = acc * 33 + unit` for each
//! UTF-16 code unit, wrapping at 32 bits on every step.

/// Initial accumulator of the djb2 hash (and the seed of the empty string)
pub const SEED_BASIS: u32 = 5381;

/// Derive a 32-bit seed from a string
///
/// The hash walks UTF-16 code units, so identifiers containing non-BMP
/// characters hash to the same seed as in browser-based clients.
///
/// # Example
/// ```
/// use exam_client_core_rs::derive_seed;
///
/// assert_eq!(derive_seed(""), 5381);
/// assert_eq!(derive_seed("a"), 177670);
/// ```
pub fn derive_seed(input: &str) -> u32 {
    input.encode_utf16().fold(SEED_BASIS, |acc, unit| {
        acc.wrapping_mul(33).wrapping_add(u32::from(unit))
    })
}

/// Builder for seed sources made of concatenated identifiers
///
/// Parts are joined without a separator, matching how attempt seeds have
/// always been formed (`user_id + exam_id`).
///
/// # Example
/// ```
/// use exam_client_core_rs::{derive_seed, SeedSource};
///
/// let seed = SeedSource::new().with("user123").with("exam456").seed();
/// assert_eq!(seed, derive_seed("user123exam456"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedSource {
    key: String,
}

impl SeedSource {
    pub fn new() -> Self {
        Self { key: String::new() }
    }

    /// Append an identifier to the key
    pub fn with(mut self, part: &str) -> Self {
        self.key.push_str(part);
        self
    }

    /// The concatenated key
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Hash the key into a seed
    pub fn seed(&self) -> u32 {
        derive_seed(&self.key)
    }
}
