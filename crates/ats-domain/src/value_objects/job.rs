//! Embedding job queue items

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::DEFAULT_MAX_RETRIES;

/// What caused a vector refresh to be requested
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTag {
    /// A new candidate record was ingested
    Created,
    /// Candidate fields changed
    Updated,
    /// A resume or other long-form document was attached
    DocumentAttached,
    /// Bulk re-embedding (model change, backfill)
    Backfill,
}

impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::DocumentAttached => "document_attached",
            Self::Backfill => "backfill",
        };
        f.write_str(tag)
    }
}

/// One request to (re)generate the vector of an entity
///
/// Lives only in the queue. Destroyed on completion or once the retry
/// budget is spent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingJob {
    /// Entity whose vector must be refreshed
    pub entity_id: String,
    /// Summary context
    pub profile_text: String,
    /// Full long-form text
    pub body_text: String,
    /// Why the job was created
    pub source: SourceTag,
    /// Failed attempts so far
    pub retry_count: u32,
    /// Attempts allowed before the job is dropped
    pub max_retries: u32,
}

impl EmbeddingJob {
    /// Create a fresh job with the default retry budget
    pub fn new(
        entity_id: impl Into<String>,
        profile_text: impl Into<String>,
        body_text: impl Into<String>,
        source: SourceTag,
    ) -> Self {
        Self {
            entity_id: entity_id.into(),
            profile_text: profile_text.into(),
            body_text: body_text.into(),
            source,
            retry_count: 0,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Override the retry budget
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Text sent to the embedding provider: profile, blank line, body
    pub fn embedding_text(&self) -> String {
        let profile = self.profile_text.trim();
        let body = self.body_text.trim();
        match (profile.is_empty(), body.is_empty()) {
            (true, true) => String::new(),
            (false, true) => profile.to_string(),
            (true, false) => body.to_string(),
            (false, false) => format!("{profile}\n\n{body}"),
        }
    }

    /// Record a failed attempt
    pub fn record_failure(&mut self) {
        self.retry_count = self.retry_count.saturating_add(1);
    }

    /// Whether the retry budget has been spent
    pub fn is_exhausted(&self) -> bool {
        self.retry_count >= self.max_retries
    }
}

/// A dequeued job that has not been acknowledged yet
#[derive(Debug, Clone, PartialEq)]
pub struct JobDelivery {
    /// Opaque handle used to acknowledge this delivery
    pub receipt: String,
    /// The job payload
    pub job: EmbeddingJob,
    /// How many times the queue has handed out this payload
    pub delivery_count: u32,
}
