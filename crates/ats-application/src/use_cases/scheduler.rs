//! Ingestion event to embedding job mapping

use std::sync::Arc;

use ats_domain::constants::DEFAULT_MAX_RETRIES;
use ats_domain::error::Result;
use ats_domain::ports::EmbeddingJobQueue;
use ats_domain::{CandidateEvent, EmbeddingJob, SourceTag};
use tracing::debug;

/// Turns candidate ingestion events into queued embedding jobs
pub struct EmbeddingJobScheduler {
    queue: Arc<dyn EmbeddingJobQueue>,
    max_retries: u32,
}

impl EmbeddingJobScheduler {
    /// Create a scheduler with the default retry budget
    pub fn new(queue: Arc<dyn EmbeddingJobQueue>) -> Self {
        Self {
            queue,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }

    /// Retry budget stamped on every job
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Enqueue a refresh for the event's entity
    ///
    /// Returns `false` when the event carries no text; nothing is enqueued.
    pub async fn on_event(&self, event: &CandidateEvent) -> Result<bool> {
        let (profile_text, body_text) = event.texts();
        self.schedule(event.entity_id(), profile_text, body_text, event.source_tag())
            .await
    }

    /// Enqueue a refresh outside the event flow (backfill, model change)
    pub async fn schedule_backfill(
        &self,
        entity_id: &str,
        profile_text: &str,
        body_text: &str,
    ) -> Result<bool> {
        self.schedule(entity_id, profile_text, body_text, SourceTag::Backfill)
            .await
    }

    async fn schedule(
        &self,
        entity_id: &str,
        profile_text: &str,
        body_text: &str,
        source: SourceTag,
    ) -> Result<bool> {
        let job = EmbeddingJob::new(entity_id, profile_text, body_text, source)
            .with_max_retries(self.max_retries);
        if job.embedding_text().is_empty() {
            debug!(entity_id, %source, "Event carries no text, nothing to embed");
            return Ok(false);
        }

        self.queue.enqueue(job).await?;
        debug!(entity_id, %source, "Embedding job enqueued");
        Ok(true)
    }
}
