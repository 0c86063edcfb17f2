//! Hashing-trick embedder
//!
//! Each token is hashed with 64-bit FNV-1a and folded modulo the vector
//! dimension; the slot counts form a term-frequency vector that is then
//! L2-normalized. Distinct tokens may share a slot — that collision folding
//! is the memory/precision trade-off of the hashing trick, and shrinking
//! the dimension makes it more likely, which tests exploit deliberately.

use mealmap_core::{Embedder, EmbeddingConfig};

use crate::text::normalize_with;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// 64-bit FNV-1a hash
///
/// Chosen over `DefaultHasher` because the token-to-slot mapping must be
/// identical across runs and processes: the index is only reproducible if
/// the hash is.
pub fn fnv1a64(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

/// Deterministic hashing embedder
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
    min_token_length: usize,
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::from_config(&EmbeddingConfig::default())
    }
}

impl HashingEmbedder {
    /// Create an embedder with the given dimension
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            min_token_length: crate::text::MIN_TOKEN_LENGTH,
        }
    }

    /// Create an embedder from config
    pub fn from_config(config: &EmbeddingConfig) -> Self {
        Self {
            dimension: config.dimension,
            min_token_length: config.min_token_length,
        }
    }

    /// Slot index for a single token
    pub fn slot(&self, token: &str) -> usize {
        (fnv1a64(token.as_bytes()) % self.dimension as u64) as usize
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];

        for token in normalize_with(text, self.min_token_length) {
            vector[self.slot(&token)] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        // Zero tokens leave the all-zero vector untouched; it scores 0
        // against everything rather than being an error.

        vector
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

// ============================================================================
// Tests
// ============================================================================
