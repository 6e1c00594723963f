//! Embedding provider implementations
//!
//! | Provider | Transport | Batch |
//! |----------|-----------|-------|
//! | [`OpenAIEmbeddingProvider`] | OpenAI-compatible `/embeddings` | one request |
//! | [`OllamaEmbeddingProvider`] | Ollama `/api/embed` | one request |
//! | [`NullEmbeddingProvider`] | none (deterministic hashing) | local |

mod helpers;
mod null;
#[cfg(feature = "embedding-ollama")]
mod ollama;
#[cfg(feature = "embedding-openai")]
mod openai;

pub use helpers::constructor;
pub use null::NullEmbeddingProvider;
#[cfg(feature = "embedding-ollama")]
pub use ollama::OllamaEmbeddingProvider;
#[cfg(feature = "embedding-openai")]
pub use openai::OpenAIEmbeddingProvider;
