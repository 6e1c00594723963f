//! Worker pool supervisor
//!
//! Runs N concurrent consumers of one queue. Vector writes are
//! last-write-wins per entity, so consumers need no coordination.

use std::sync::Arc;

use ats_domain::error::{Error, Result};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::info;

use super::embedding_worker::{EmbeddingWorker, WorkerStatsSnapshot};

/// A running set of embedding workers
pub struct WorkerPool {
    worker: Arc<EmbeddingWorker>,
    tasks: JoinSet<()>,
    cancel: CancellationToken,
}

impl WorkerPool {
    /// Spawn `concurrency` tasks driving the same worker
    ///
    /// The pool stops when `cancel` (or [`shutdown`](Self::shutdown)) fires.
    pub fn spawn(
        worker: Arc<EmbeddingWorker>,
        concurrency: usize,
        cancel: CancellationToken,
    ) -> Self {
        let mut tasks = JoinSet::new();
        for worker_id in 0..concurrency.max(1) {
            let worker = Arc::clone(&worker);
            let token = cancel.child_token();
            tasks.spawn(async move { worker.run(worker_id, token).await });
        }
        info!(concurrency = tasks.len(), "Embedding worker pool started");

        Self {
            worker,
            tasks,
            cancel,
        }
    }

    /// Number of running worker tasks
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether every worker task has finished
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Counters aggregated over all workers
    pub fn stats(&self) -> WorkerStatsSnapshot {
        self.worker.stats().snapshot()
    }

    /// Ask every worker to stop after its current job
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    /// Wait for every worker to stop and return the final counters
    pub async fn join(mut self) -> Result<WorkerStatsSnapshot> {
        while let Some(joined) = self.tasks.join_next().await {
            joined.map_err(|e| Error::internal(format!("embedding worker task failed: {e}")))?;
        }
        let stats = self.stats();
        info!(
            processed = stats.processed,
            succeeded = stats.succeeded,
            retried = stats.retried,
            dropped = stats.dropped,
            skipped = stats.skipped,
            "Embedding worker pool stopped"
        );
        Ok(stats)
    }
}
