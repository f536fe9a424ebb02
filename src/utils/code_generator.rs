//! Short code generation utilities.
//!
//! Codes are drawn uniformly from a 62-character alphanumeric alphabet. The
//! random source is owned by a [`CodeGenerator`] instance instead of being
//! process-global, so tests can pin it with a seed.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Mutex, PoisonError};
use tracing::warn;

/// Alphabet for generated codes: uppercase, lowercase, digits.
pub const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default length of generated codes.
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Shortest code length accepted by configuration.
pub const MIN_CODE_LENGTH: usize = 4;

/// Longest code the store can hold (`VARCHAR(32)`).
pub const MAX_CODE_LENGTH: usize = 32;

/// Generates fixed-length random codes from an injected random source.
pub struct CodeGenerator {
    length: usize,
    rng: Mutex<StdRng>,
}

impl CodeGenerator {
    /// Creates a generator seeded from the operating system.
    pub fn new(length: usize) -> Self {
        Self::from_rng(length, StdRng::from_os_rng())
    }

    /// Creates a deterministic generator. Two generators with the same seed
    /// produce the same sequence of codes.
    pub fn seeded(length: usize, seed: u64) -> Self {
        Self::from_rng(length, StdRng::seed_from_u64(seed))
    }

    /// Creates a generator over `rng`.
    ///
    /// `length` is clamped to `MIN_CODE_LENGTH..=MAX_CODE_LENGTH`, so every
    /// issued code fits the store column and passes [`is_well_formed`].
    pub fn from_rng(length: usize, rng: StdRng) -> Self {
        let clamped = length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH);
        if clamped != length {
            warn!(requested = length, used = clamped, "Code length out of range, clamped");
        }

        Self {
            length: clamped,
            rng: Mutex::new(rng),
        }
    }

    /// Length of the codes this generator produces.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Draws the next code.
    pub fn generate(&self) -> String {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        generate_code(&mut *rng, self.length)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

/// Draws `length` characters independently and uniformly from [`ALPHABET`].
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(&mut rand::rng(), 7);
/// assert_eq!(code.len(), 7);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ALPHABET.len());
            ALPHABET[idx] as char
        })
        .collect()
}

/// Returns true if `code` could have been issued: 1 to [`MAX_CODE_LENGTH`]
/// ASCII alphanumerics.
pub fn is_well_formed(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
