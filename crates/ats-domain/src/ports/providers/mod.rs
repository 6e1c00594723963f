//! External Provider Ports
//!
//! | Port | Description |
//! |------|-------------|
//! | EmbeddingProvider | Text embedding generation services |
//! | CandidateVectorStore | Per-candidate vector storage, similarity pool and keyword evidence |
//! | EmbeddingJobQueue | At-least-once work queue for vector refresh jobs |
//! | TenantSettingsProvider | Per-tenant key/value scoring settings |

/// Embedding provider port
pub mod embedding;
/// Job queue port
pub mod queue;
/// Tenant settings port
pub mod settings;
/// Candidate vector store port
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use queue::EmbeddingJobQueue;
pub use settings::TenantSettingsProvider;
pub use vector_store::CandidateVectorStore;
