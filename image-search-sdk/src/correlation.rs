// ABOUTME: Short random identifiers attached to every outbound request for tracing
// ABOUTME: Draws from an alphabet without visually ambiguous glyphs; not a security token

use crate::constants::correlation::{ALPHABET, DEFAULT_LENGTH};
use rand::Rng;

#[derive(Debug, Clone, Copy)]
pub struct CorrelationIdGenerator {
    length: usize,
}

impl Default for CorrelationIdGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH)
    }
}

impl CorrelationIdGenerator {
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Generate an id of the configured length
    pub fn generate(&self) -> String {
        Self::generate_with_length(self.length)
    }

    pub fn generate_with_length(length: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
