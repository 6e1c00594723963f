//! Domain Port Interfaces
//!
//! Boundary contracts between the search core and its external
//! collaborators. High-level code depends on these traits; concrete
//! backends live in `ats-providers` and are selected at startup.

/// External service provider ports
pub mod providers;

pub use providers::{
    CandidateVectorStore, EmbeddingJobQueue, EmbeddingProvider, TenantSettingsProvider,
};
