//! Semantic Embedding Value Objects
//!
//! Value objects representing generated embeddings and the vector that is
//! persisted for each candidate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Value Object: Semantic Text Embedding
///
/// Represents a vector embedding of text content. An embedding with an
/// empty vector is the provider's answer to blank input and is treated as
/// a no-op by callers.
///
/// ## Example
///
/// ```rust
/// use ats_domain::value_objects::Embedding;
///
/// let embedding = Embedding {
///     vector: vec![0.1, 0.2, 0.3],
///     model: "nomic-embed-text".to_string(),
///     dimensions: 3,
/// };
/// assert!(!embedding.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Embedding {
    /// The embedding vector values
    pub vector: Vec<f32>,
    /// Name of the model that generated this embedding
    pub model: String,
    /// Dimensionality of the embedding vector
    pub dimensions: usize,
}

impl Embedding {
    /// Zero-length embedding returned for blank input
    pub fn empty<S: Into<String>>(model: S) -> Self {
        Self {
            vector: Vec::new(),
            model: model.into(),
            dimensions: 0,
        }
    }

    /// True when the provider produced no vector
    pub fn is_empty(&self) -> bool {
        self.vector.is_empty()
    }

    /// Check the vector length against the dimension declared for its model
    pub fn validate_dimensions(&self, expected: usize) -> Result<()> {
        if self.vector.len() == expected {
            Ok(())
        } else {
            Err(Error::dimension_mismatch(
                &self.model,
                expected,
                self.vector.len(),
            ))
        }
    }
}

/// Value Object: Persisted Entity Vector
///
/// At most one exists per entity. A successful generation replaces the
/// vector and its metadata wholesale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredVector {
    /// Entity that owns the vector
    pub entity_id: String,
    /// Vector values
    pub vector: Vec<f32>,
    /// Model that produced the vector
    pub model: String,
    /// When the vector was generated
    pub generated_at: DateTime<Utc>,
}

impl StoredVector {
    /// Build the record to persist from a freshly generated embedding
    pub fn from_embedding<S: Into<String>>(
        entity_id: S,
        embedding: Embedding,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            vector: embedding.vector,
            model: embedding.model,
            generated_at,
        }
    }

    /// Vector dimension
    pub fn dimensions(&self) -> usize {
        self.vector.len()
    }
}
