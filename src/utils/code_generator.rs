//! Short code generation.
//!
//! Generators only produce candidates. Uniqueness is enforced by the record
//! store's unique constraint, and [`crate::application::services::ShortenService`]
//! regenerates on collision.

use rand::Rng;

use crate::domain::entities::{CODE_ALPHABET, MAX_CODE_LENGTH, MIN_CODE_LENGTH, ShortCode};

/// Default number of characters in a generated code (62^7 ≈ 3.5 × 10^12 values).
pub const DEFAULT_CODE_LENGTH: usize = 7;

/// Codes that collide with fixed routes and must never be handed out.
const RESERVED_CODES: &[&str] = &["health"];

/// Source of candidate short codes.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a new candidate code. Not guaranteed to be unused.
    fn generate(&self) -> ShortCode;
}

/// Draws codes uniformly from `[A-Za-z0-9]` using the thread-local RNG.
#[derive(Debug, Clone)]
pub struct RandomCodeGenerator {
    length: usize,
}

impl RandomCodeGenerator {
    /// Creates a generator for codes of `length` characters.
    ///
    /// The length is clamped to the 6..=8 range every [`ShortCode`] must satisfy.
    pub fn new(length: usize) -> Self {
        Self {
            length: length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH),
        }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    fn random_code(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| CODE_ALPHABET[rng.random_range(0..CODE_ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for RandomCodeGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CODE_LENGTH)
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> ShortCode {
        loop {
            let candidate = self.random_code();
            if RESERVED_CODES.contains(&candidate.as_str()) {
                continue;
            }
            if let Some(code) = ShortCode::parse(&candidate) {
                return code;
            }
        }
    }
}
