//! # ATS Candidate Search - Domain Layer
//!
//! Core types, error taxonomy and port traits for the hybrid candidate
//! search engine and the embedding pipeline that feeds it.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`error`] | Error taxonomy shared by every layer |
//! | [`constants`] | Documented defaults (weights, pool size, retries) |
//! | [`value_objects`] | Embeddings, jobs, candidates, scoring and search types |
//! | [`events`] | Ingestion events that trigger vector refreshes |
//! | [`ports`] | Provider traits implemented in `ats-providers` |

pub mod constants;
pub mod error;
pub mod events;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use events::CandidateEvent;
pub use value_objects::{
    CandidateMatch, CandidateProfile, Embedding, EmbeddingJob, JobDelivery, KeywordEvidence,
    KeywordScoreSet, RankedResult, ScoringConfig, ScoringStrategyKind, SearchPage, SearchRequest,
    SourceTag, StoredVector,
};
