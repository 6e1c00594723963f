//! Embedding Worker Use Case
//!
//! Background consumer that keeps candidate vectors in sync with their
//! text. Delivery is at-least-once and vector writes are full overwrites
//! keyed by entity id, so redelivered jobs need no deduplication.
//!
//! | Failure | Handling |
//! |---------|----------|
//! | `ProviderUnavailable`, `StorageTimeout`, `StorageWrite` | re-enqueued at the tail, held by the queue for the backoff |
//! | `EmptyEmbedding`, `DimensionMismatch`, `NotFound` | WARN, acknowledged, never retried |
//! | retry budget spent | ERROR (`MaxRetriesExceeded`), acknowledged, dropped |

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use ats_domain::error::{Error, Result};
use ats_domain::ports::{CandidateVectorStore, EmbeddingJobQueue, EmbeddingProvider};
use ats_domain::{EmbeddingJob, JobDelivery, StoredVector};
use chrono::Utc;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Worker timing parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSettings {
    /// Bounded wait of each dequeue poll
    pub poll_wait: Duration,
    /// Backoff before the first re-enqueue; doubles per retry
    pub retry_backoff: Duration,
    /// Backoff ceiling
    pub max_backoff: Duration,
    /// Deadline for each provider or storage call
    pub call_timeout: Duration,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            poll_wait: Duration::from_secs(5),
            retry_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(30),
            call_timeout: Duration::from_secs(30),
        }
    }
}

impl WorkerSettings {
    /// Delay before re-enqueueing a job that has failed `retry_count` times
    pub fn backoff_for(&self, retry_count: u32) -> Duration {
        let exponent = retry_count.saturating_sub(1).min(16);
        self.retry_backoff
            .saturating_mul(1_u32 << exponent)
            .min(self.max_backoff)
    }
}

/// What happened to one delivered job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobOutcome {
    /// Vector generated and stored
    Completed,
    /// Attempt failed, job placed back at the tail of the queue
    Retried,
    /// Retry budget spent, job abandoned
    Dropped,
    /// Bad input, job abandoned without retry
    Skipped,
}

/// Counters shared by all workers of a pool
#[derive(Debug, Default)]
pub struct WorkerStats {
    processed: AtomicU64,
    succeeded: AtomicU64,
    retried: AtomicU64,
    dropped: AtomicU64,
    skipped: AtomicU64,
}

/// Point-in-time copy of [`WorkerStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkerStatsSnapshot {
    /// Deliveries handled
    pub processed: u64,
    /// Vectors stored
    pub succeeded: u64,
    /// Jobs re-enqueued
    pub retried: u64,
    /// Jobs abandoned after exhausting retries
    pub dropped: u64,
    /// Jobs abandoned for bad input
    pub skipped: u64,
}

impl WorkerStats {
    fn record(&self, outcome: JobOutcome) {
        self.processed.fetch_add(1, Ordering::Relaxed);
        let counter = match outcome {
            JobOutcome::Completed => &self.succeeded,
            JobOutcome::Retried => &self.retried,
            JobOutcome::Dropped => &self.dropped,
            JobOutcome::Skipped => &self.skipped,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Current counter values
    pub fn snapshot(&self) -> WorkerStatsSnapshot {
        WorkerStatsSnapshot {
            processed: self.processed.load(Ordering::Relaxed),
            succeeded: self.succeeded.load(Ordering::Relaxed),
            retried: self.retried.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
            skipped: self.skipped.load(Ordering::Relaxed),
        }
    }
}

/// Queue consumer that generates and stores candidate vectors
///
/// One instance may be driven by several tasks at once (see
/// [`crate::WorkerPool`]); all state is in the shared providers and stats.
pub struct EmbeddingWorker {
    queue: Arc<dyn EmbeddingJobQueue>,
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn CandidateVectorStore>,
    settings: WorkerSettings,
    stats: Arc<WorkerStats>,
}

impl EmbeddingWorker {
    /// Create a worker with injected providers
    pub fn new(
        queue: Arc<dyn EmbeddingJobQueue>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn CandidateVectorStore>,
        settings: WorkerSettings,
    ) -> Self {
        Self {
            queue,
            embedding_provider,
            vector_store,
            settings,
            stats: Arc::new(WorkerStats::default()),
        }
    }

    /// Shared counters
    pub fn stats(&self) -> Arc<WorkerStats> {
        Arc::clone(&self.stats)
    }

    /// Consume the queue until `cancel` fires
    ///
    /// Cancellation is observed between jobs; a job already dequeued is
    /// processed to completion so it is either acknowledged or re-enqueued.
    pub async fn run(&self, worker_id: usize, cancel: CancellationToken) {
        info!(
            worker_id,
            provider = self.embedding_provider.provider_name(),
            "Embedding worker started"
        );

        loop {
            let polled = tokio::select! {
                biased;
                () = cancel.cancelled() => break,
                polled = self.queue.dequeue(self.settings.poll_wait) => polled,
            };

            match polled {
                Ok(Some(delivery)) => {
                    if let Err(e) = self.process(delivery).await {
                        error!(worker_id, error = %e, "Failed to settle embedding job");
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(worker_id, error = %e, "Dequeue failed, backing off");
                    tokio::select! {
                        () = cancel.cancelled() => break,
                        () = tokio::time::sleep(self.settings.poll_wait) => {}
                    }
                }
            }
        }

        info!(worker_id, "Embedding worker stopped");
    }

    /// Poll once and process the job if one arrives within the poll wait
    pub async fn run_once(&self) -> Result<Option<JobOutcome>> {
        match self.queue.dequeue(self.settings.poll_wait).await? {
            Some(delivery) => self.process(delivery).await.map(Some),
            None => Ok(None),
        }
    }

    /// Handle one delivery and settle it with the queue
    ///
    /// The delivery is held only for the provider and storage calls, each
    /// bounded by `call_timeout`; retry backoff is served by the queue after
    /// the failed delivery is acknowledged.
    ///
    /// Returns `Err` only when the queue itself fails while settling; the
    /// delivery then stays unacknowledged and will be redelivered.
    pub async fn process(&self, delivery: JobDelivery) -> Result<JobOutcome> {
        let JobDelivery {
            receipt,
            mut job,
            delivery_count,
        } = delivery;

        let outcome = match self.generate_and_store(&job).await {
            Ok(()) => {
                debug!(
                    entity_id = %job.entity_id,
                    source = %job.source,
                    delivery_count,
                    "Vector refreshed"
                );
                JobOutcome::Completed
            }
            Err(e) if e.is_data_error() => {
                warn!(
                    entity_id = %job.entity_id,
                    error = %e,
                    "Skipping embedding job, input cannot be embedded"
                );
                JobOutcome::Skipped
            }
            Err(e) => {
                job.record_failure();
                if job.is_exhausted() {
                    let dropped = Error::max_retries_exceeded(&job.entity_id, job.retry_count);
                    error!(
                        entity_id = %job.entity_id,
                        retry_count = job.retry_count,
                        last_error = %e,
                        "{dropped}; job dropped"
                    );
                    JobOutcome::Dropped
                } else {
                    let delay = self.settings.backoff_for(job.retry_count);
                    warn!(
                        entity_id = %job.entity_id,
                        retry_count = job.retry_count,
                        max_retries = job.max_retries,
                        transient = e.is_transient(),
                        delay_ms = delay.as_millis(),
                        error = %e,
                        "Embedding job failed, scheduling retry"
                    );
                    self.queue.enqueue_delayed(job, delay).await?;
                    JobOutcome::Retried
                }
            }
        };

        self.queue.ack(&receipt).await?;
        self.stats.record(outcome);
        Ok(outcome)
    }

    async fn generate_and_store(&self, job: &EmbeddingJob) -> Result<()> {
        let text = job.embedding_text();
        if text.is_empty() {
            return Err(Error::empty_embedding(format!(
                "entity {} has no text to embed",
                job.entity_id
            )));
        }

        let timeout = self.settings.call_timeout;
        let provider = self.embedding_provider.provider_name();
        let embedding = tokio::time::timeout(timeout, self.embedding_provider.embed(&text))
            .await
            .map_err(|_| {
                Error::provider_unavailable(
                    provider,
                    format!("embedding timed out after {timeout:?}"),
                )
            })??;

        if embedding.is_empty() {
            return Err(Error::empty_embedding(format!("entity {}", job.entity_id)));
        }
        embedding.validate_dimensions(self.embedding_provider.dimensions())?;

        let vector = StoredVector::from_embedding(&job.entity_id, embedding, Utc::now());
        tokio::time::timeout(timeout, self.vector_store.upsert_vector(vector))
            .await
            .map_err(|_| Error::storage_timeout("upsert_vector", timeout))?
    }
}
