use async_trait::async_trait;

use crate::error::{Error, Result};
use crate::value_objects::Embedding;

/// Text embedding backend
///
/// Implementations differ only in transport; callers must not care which is
/// active. Instances are stateless and shared across concurrent callers.
///
/// # Default Implementations
///
/// `embed()` returns [`Embedding::empty`] for blank input without touching the
/// backend, and otherwise delegates to `embed_batch()` with a single item.
///
/// # Errors
///
/// A backend that cannot be reached or does not answer in time must return
/// [`Error::ProviderUnavailable`] so callers can tell "retry later" apart from
/// bad input.
///
/// # Example
///
/// ```ignore
/// let embedding = provider.embed("Senior Rust engineer, Kubernetes").await?;
/// assert_eq!(embedding.vector.len(), provider.dimensions());
/// ```
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Embed one text; blank input yields a zero-length embedding
    async fn embed(&self, text: &str) -> Result<Embedding> {
        if text.trim().is_empty() {
            return Ok(Embedding::empty(self.model_name()));
        }
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| Error::embedding("No embedding returned"))
    }

    /// Embed several texts, one embedding per input in input order
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Fixed vector dimension of the active model
    fn dimensions(&self) -> usize;

    /// Active model name
    fn model_name(&self) -> &str;

    /// Short backend identifier (e.g. "openai", "ollama", "null")
    fn provider_name(&self) -> &str;

    /// Whether the backend currently answers
    async fn is_available(&self) -> bool;
}
