//! In-memory at-least-once job queue
//!
//! A dequeued job moves to an in-flight table keyed by a fresh receipt.
//! `ack` deletes it; a delivery that is not acknowledged within the
//! visibility timeout is moved back to the tail of the queue and handed out
//! again. Retried jobs can be held back with `enqueue_delayed`; a held job
//! keeps its place in line but is skipped until it becomes visible. Jobs do
//! not survive a restart.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};
use tokio::time::Instant;
use tracing::{debug, warn};

use ats_domain::error::Result;
use ats_domain::ports::EmbeddingJobQueue;
use ats_domain::value_objects::{EmbeddingJob, JobDelivery};

use crate::constants::QUEUE_DEFAULT_VISIBILITY_TIMEOUT_SECS;

struct QueuedJob {
    job: EmbeddingJob,
    delivery_count: u32,
    visible_at: Option<Instant>,
}

struct InFlightJob {
    job: EmbeddingJob,
    delivery_count: u32,
    visible_at: Instant,
}

#[derive(Default)]
struct QueueState {
    pending: VecDeque<QueuedJob>,
    in_flight: HashMap<String, InFlightJob>,
}

impl QueueState {
    /// Move expired deliveries back to the tail, oldest first
    fn reclaim_expired(&mut self, now: Instant) {
        let mut expired: Vec<(String, Instant)> = self
            .in_flight
            .iter()
            .filter(|(_, job)| job.visible_at <= now)
            .map(|(receipt, job)| (receipt.clone(), job.visible_at))
            .collect();
        expired.sort_by_key(|(_, visible_at)| *visible_at);

        for (receipt, _) in expired {
            if let Some(job) = self.in_flight.remove(&receipt) {
                debug!(
                    entity_id = %job.job.entity_id,
                    delivery_count = job.delivery_count,
                    "Visibility timeout expired, redelivering"
                );
                self.pending.push_back(QueuedJob {
                    job: job.job,
                    delivery_count: job.delivery_count,
                    visible_at: None,
                });
            }
        }
    }

    /// Earliest instant at which a held or in-flight job becomes visible
    fn next_wake(&self) -> Option<Instant> {
        let in_flight = self.in_flight.values().map(|job| job.visible_at);
        let held = self.pending.iter().filter_map(|job| job.visible_at);
        in_flight.chain(held).min()
    }

    fn take_visible(&mut self, now: Instant) -> Option<QueuedJob> {
        let index = self
            .pending
            .iter()
            .position(|job| job.visible_at.is_none_or(|at| at <= now))?;
        self.pending.remove(index)
    }
}

/// In-memory queue with visibility-timeout redelivery
pub struct InMemoryJobQueue {
    state: Mutex<QueueState>,
    notify: Notify,
    visibility_timeout: Duration,
}

impl InMemoryJobQueue {
    /// Create a queue with the default visibility timeout
    pub fn new() -> Self {
        Self::with_visibility_timeout(Duration::from_secs(QUEUE_DEFAULT_VISIBILITY_TIMEOUT_SECS))
    }

    /// Create a queue whose deliveries reappear after `visibility_timeout`
    pub fn with_visibility_timeout(visibility_timeout: Duration) -> Self {
        Self {
            state: Mutex::new(QueueState::default()),
            notify: Notify::new(),
            visibility_timeout,
        }
    }

    /// Jobs waiting to be delivered
    pub async fn pending_len(&self) -> usize {
        self.state.lock().await.pending.len()
    }

    /// Jobs delivered but not yet acknowledged
    pub async fn in_flight_len(&self) -> usize {
        self.state.lock().await.in_flight.len()
    }

    /// Take the next visible job, or report when the next one becomes visible
    async fn try_take(&self) -> std::result::Result<JobDelivery, Option<Instant>> {
        let now = Instant::now();
        let mut state = self.state.lock().await;
        state.reclaim_expired(now);

        let Some(queued) = state.take_visible(now) else {
            return Err(state.next_wake());
        };

        let receipt = uuid::Uuid::new_v4().to_string();
        let delivery_count = queued.delivery_count.saturating_add(1);
        state.in_flight.insert(
            receipt.clone(),
            InFlightJob {
                job: queued.job.clone(),
                delivery_count,
                visible_at: now + self.visibility_timeout,
            },
        );

        Ok(JobDelivery {
            receipt,
            job: queued.job,
            delivery_count,
        })
    }
}

impl Default for InMemoryJobQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingJobQueue for InMemoryJobQueue {
    async fn enqueue(&self, job: EmbeddingJob) -> Result<()> {
        self.state.lock().await.pending.push_back(QueuedJob {
            job,
            delivery_count: 0,
            visible_at: None,
        });
        self.notify.notify_one();
        Ok(())
    }

    async fn enqueue_delayed(&self, job: EmbeddingJob, delay: Duration) -> Result<()> {
        let visible_at = (!delay.is_zero()).then(|| Instant::now() + delay);
        self.state.lock().await.pending.push_back(QueuedJob {
            job,
            delivery_count: 0,
            visible_at,
        });
        self.notify.notify_one();
        Ok(())
    }

    async fn dequeue(&self, wait: Duration) -> Result<Option<JobDelivery>> {
        let deadline = Instant::now() + wait;

        loop {
            let next_wake = match self.try_take().await {
                Ok(delivery) => return Ok(Some(delivery)),
                Err(next_wake) => next_wake,
            };

            if Instant::now() >= deadline {
                return Ok(None);
            }

            let wake_at = next_wake.map_or(deadline, |at| at.min(deadline));
            tokio::select! {
                () = self.notify.notified() => {}
                () = tokio::time::sleep_until(wake_at) => {}
            }
        }
    }

    async fn ack(&self, receipt: &str) -> Result<()> {
        if self.state.lock().await.in_flight.remove(receipt).is_none() {
            warn!(receipt, "Ack for unknown or expired delivery ignored");
        }
        Ok(())
    }

    async fn len(&self) -> Result<usize> {
        let state = self.state.lock().await;
        Ok(state.pending.len() + state.in_flight.len())
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}
