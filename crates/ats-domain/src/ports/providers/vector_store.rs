use async_trait::async_trait;

use crate::error::Result;
use crate::value_objects::{CandidateMatch, KeywordEvidence, StoredVector};

/// Candidate vector storage and retrieval
///
/// The storage engine itself is external; this port covers the queries the
/// search core issues against it.
///
/// # Example
///
/// ```ignore
/// let pool = store.search_similar(&query.vector, 0.3, 100).await?;
/// for candidate in &pool {
///     let evidence = store.keyword_evidence(&candidate.entity_id, &keywords).await?;
/// }
/// ```
#[async_trait]
pub trait CandidateVectorStore: Send + Sync {
    /// Candidates with cosine similarity >= `threshold`, most similar first
    ///
    /// # Arguments
    /// * `query_vector` - Embedded query
    /// * `threshold` - Minimum similarity to enter the pool
    /// * `limit` - Pool cap
    async fn search_similar(
        &self,
        query_vector: &[f32],
        threshold: f64,
        limit: usize,
    ) -> Result<Vec<CandidateMatch>>;

    /// Title, skill tags and body occurrence counts for the given keywords
    ///
    /// One call per candidate regardless of the number of keywords.
    /// Returns [`crate::Error::NotFound`] when the entity does not exist.
    async fn keyword_evidence(
        &self,
        entity_id: &str,
        keywords: &[String],
    ) -> Result<KeywordEvidence>;

    /// Replace the entity's vector and its metadata
    ///
    /// Idempotent: writing twice leaves exactly one vector, the last one.
    async fn upsert_vector(&self, vector: StoredVector) -> Result<()>;

    /// Current vector of an entity, if any
    async fn get_vector(&self, entity_id: &str) -> Result<Option<StoredVector>>;

    /// Dimension the store's vector column/index was created for, if fixed
    fn dimensions(&self) -> Option<usize>;

    /// Short backend identifier (e.g. "memory", "pgvector")
    fn provider_name(&self) -> &str;
}
