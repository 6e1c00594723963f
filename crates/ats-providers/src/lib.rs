//! Provider Implementations - ATS Candidate Search
//!
//! Concrete adapters for the ports defined in `ats-domain`.
//!
//! ## Provider Categories
//!
//! | Category | Port | Implementations |
//! |----------|------|-----------------|
//! | Embedding | `EmbeddingProvider` | OpenAI-compatible, Ollama, Null |
//! | Vector Store | `CandidateVectorStore` | In-memory, Postgres/pgvector |
//! | Job Queue | `EmbeddingJobQueue` | In-memory (visibility timeout) |
//! | Settings | `TenantSettingsProvider` | Static key/value map |
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `embedding-openai` | OpenAI-compatible remote embeddings |
//! | `embedding-ollama` | Ollama local embeddings |
//! | `vectorstore-memory` | In-memory candidate store |
//! | `vectorstore-pgvector` | Postgres + pgvector candidate store |

pub mod constants;
pub mod embedding;
pub mod queue;
pub mod settings;
pub mod utils;
pub mod vector_store;

pub use embedding::NullEmbeddingProvider;
#[cfg(feature = "embedding-ollama")]
pub use embedding::OllamaEmbeddingProvider;
#[cfg(feature = "embedding-openai")]
pub use embedding::OpenAIEmbeddingProvider;
pub use queue::InMemoryJobQueue;
pub use settings::StaticTenantSettingsProvider;
#[cfg(feature = "vectorstore-memory")]
pub use vector_store::InMemoryCandidateStore;
#[cfg(feature = "vectorstore-pgvector")]
pub use vector_store::PgVectorCandidateStore;
