use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;
use crate::value_objects::{EmbeddingJob, JobDelivery};

/// At-least-once work queue for embedding jobs
///
/// A dequeued job stays owned by the queue until [`ack`](Self::ack) is
/// called with its receipt. An unacknowledged delivery becomes visible again
/// after the queue's visibility timeout, so consumers must be idempotent.
#[async_trait]
pub trait EmbeddingJobQueue: Send + Sync {
    /// Append a job at the tail
    async fn enqueue(&self, job: EmbeddingJob) -> Result<()>;

    /// Append a job at the tail that stays invisible for `delay`
    ///
    /// Used for retries: the queue holds the job through the backoff so the
    /// consumer can acknowledge the failed delivery right away.
    async fn enqueue_delayed(&self, job: EmbeddingJob, delay: Duration) -> Result<()>;

    /// Wait up to `wait` for the next visible job
    ///
    /// Returns `Ok(None)` when nothing became available in time.
    async fn dequeue(&self, wait: Duration) -> Result<Option<JobDelivery>>;

    /// Permanently remove a delivered job
    async fn ack(&self, receipt: &str) -> Result<()>;

    /// Jobs not yet acknowledged (waiting plus in flight)
    async fn len(&self) -> Result<usize>;

    /// Whether no job is waiting or in flight
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Short backend identifier
    fn provider_name(&self) -> &str;
}
