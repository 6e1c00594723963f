//! Candidate vector store implementations

#[cfg(feature = "vectorstore-memory")]
mod in_memory;
#[cfg(feature = "vectorstore-pgvector")]
mod pgvector;

#[cfg(feature = "vectorstore-memory")]
pub use in_memory::InMemoryCandidateStore;
#[cfg(feature = "vectorstore-pgvector")]
pub use pgvector::{PgVectorCandidateStore, PgVectorConfig};
