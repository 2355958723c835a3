//! Deterministic embedder for tests.

use crate::analysis::normalizer::normalize;
use crate::analysis::semantic::Embedder;
use crate::errors::ScoringError;

/// Hashes each normalized token into a fixed number of buckets. Texts sharing
/// words get a positive cosine similarity; identical texts get exactly 1.
pub struct BagOfWordsEmbedder {
    dimensions: usize,
}

impl Default for BagOfWordsEmbedder {
    fn default() -> Self {
        Self { dimensions: 256 }
    }
}

impl Embedder for BagOfWordsEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, ScoringError> {
        let mut vector = vec![0.0_f32; self.dimensions];
        for token in normalize(text).split_whitespace() {
            vector[fnv1a(token) as usize % self.dimensions] += 1.0;
        }
        Ok(vector)
    }

    fn name(&self) -> &str {
        "bag-of-words"
    }
}

fn fnv1a(token: &str) -> u64 {
    token.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
    })
}
