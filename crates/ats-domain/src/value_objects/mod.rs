//! Domain Value Objects
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`Embedding`] | Vector produced by an embedding model |
//! | [`StoredVector`] | The single vector persisted for an entity |
//! | [`EmbeddingJob`] | Queue item requesting a vector refresh |
//! | [`CandidateProfile`] | Candidate fields used for keyword scoring |
//! | [`ScoringConfig`] | Per-tenant scoring settings |
//! | [`RankedResult`] | One scored, explained search hit |

/// Candidate records and keyword evidence
pub mod candidate;
/// Semantic embedding value objects
pub mod embedding;
/// Embedding job queue items
pub mod job;
/// Scoring configuration and keyword score sets
pub mod scoring;
/// Search request/response types
pub mod search;

pub use candidate::{CandidateProfile, KeywordEvidence};
pub use embedding::{Embedding, StoredVector};
pub use job::{EmbeddingJob, JobDelivery, SourceTag};
pub use scoring::{KeywordScoreSet, ScoringConfig, ScoringStrategyKind};
pub use search::{CandidateMatch, RankedResult, SearchPage, SearchRequest};
