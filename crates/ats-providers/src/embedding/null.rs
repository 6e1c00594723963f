//! Null embedding provider for testing and offline runs
//!
//! Deterministic hashed bag-of-words vectors: texts that share tokens get
//! a positive cosine similarity, identical texts get identical vectors.

use async_trait::async_trait;

use ats_domain::error::Result;
use ats_domain::ports::EmbeddingProvider;
use ats_domain::value_objects::Embedding;

use crate::constants::{EMBEDDING_DIMENSION_NULL, NULL_MODEL_NAME};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv1a(token: &str) -> u64 {
    token.bytes().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ u64::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Null embedding provider
///
/// # Example
///
/// ```rust
/// use ats_domain::ports::EmbeddingProvider;
/// use ats_providers::NullEmbeddingProvider;
///
/// let provider = NullEmbeddingProvider::new();
/// assert_eq!(provider.dimensions(), 384);
/// assert_eq!(provider.provider_name(), "null");
/// ```
#[derive(Debug, Clone)]
pub struct NullEmbeddingProvider {
    dimensions: usize,
}

impl NullEmbeddingProvider {
    /// Create a provider with the default dimension
    pub fn new() -> Self {
        Self::with_dimensions(EMBEDDING_DIMENSION_NULL)
    }

    /// Create a provider producing vectors of `dimensions` values
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
        }
    }

    fn hash_vector(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0_f32; self.dimensions];
        let lowered = text.to_lowercase();
        let mut tokens = lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .peekable();

        if tokens.peek().is_none() {
            let hash = fnv1a(&lowered);
            vector[(hash % self.dimensions as u64) as usize] = 1.0;
            return vector;
        }

        for token in tokens {
            let hash = fnv1a(token);
            let slot = (hash % self.dimensions as u64) as usize;
            vector[slot] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }
}

impl Default for NullEmbeddingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for NullEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        Ok(texts
            .iter()
            .map(|text| Embedding {
                vector: self.hash_vector(text),
                model: NULL_MODEL_NAME.to_string(),
                dimensions: self.dimensions,
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn model_name(&self) -> &str {
        NULL_MODEL_NAME
    }

    fn provider_name(&self) -> &str {
        "null"
    }

    async fn is_available(&self) -> bool {
        true
    }
}
