//! Tests for the embedding worker and its pool

use std::sync::Arc;
use std::time::Duration;

use ats_application::{EmbeddingWorker, JobOutcome, WorkerPool, WorkerSettings};
use ats_domain::ports::{CandidateVectorStore, EmbeddingJobQueue};
use ats_domain::{CandidateProfile, EmbeddingJob, SourceTag};
use ats_providers::InMemoryJobQueue;
use tokio_util::sync::CancellationToken;

use crate::test_doubles::{InstrumentedStore, StubEmbeddingProvider, StubMode};

fn fast_settings() -> WorkerSettings {
    WorkerSettings {
        poll_wait: Duration::from_millis(20),
        retry_backoff: Duration::ZERO,
        max_backoff: Duration::ZERO,
        call_timeout: Duration::from_secs(5),
    }
}

struct Harness {
    queue: Arc<InMemoryJobQueue>,
    provider: Arc<StubEmbeddingProvider>,
    store: Arc<InstrumentedStore>,
    worker: EmbeddingWorker,
}

fn harness(provider: StubEmbeddingProvider) -> Harness {
    let queue = Arc::new(InMemoryJobQueue::new());
    let provider = Arc::new(provider);
    let store = Arc::new(InstrumentedStore::new());
    let worker = EmbeddingWorker::new(
        queue.clone(),
        provider.clone(),
        store.clone(),
        fast_settings(),
    );
    Harness {
        queue,
        provider,
        store,
        worker,
    }
}

fn job(entity_id: &str) -> EmbeddingJob {
    EmbeddingJob::new(
        entity_id,
        "Senior SRE",
        "Ran Kubernetes clusters on Yugabyte.",
        SourceTag::Created,
    )
}

#[tokio::test]
async fn test_successful_job_stores_vector() {
    let h = harness(StubEmbeddingProvider::axis(4));
    h.store.insert_candidate(CandidateProfile::new("c-1"));
    h.queue.enqueue(job("c-1")).await.expect("enqueue");

    let outcome = h.worker.run_once().await.expect("run");
    assert_eq!(outcome, Some(JobOutcome::Completed));

    let stored = h
        .store
        .get_vector("c-1")
        .await
        .expect("get")
        .expect("vector stored");
    assert_eq!(stored.dimensions(), 4);
    assert_eq!(stored.model, "stub");
    assert_eq!(h.queue.len().await.expect("len"), 0);
    assert_eq!(h.worker.stats().snapshot().succeeded, 1);
}

#[tokio::test]
async fn test_redelivered_job_overwrites_single_vector() {
    let h = harness(StubEmbeddingProvider::axis(4));
    h.store.insert_candidate(CandidateProfile::new("c-1"));
    h.queue.enqueue(job("c-1")).await.expect("enqueue");
    h.queue.enqueue(job("c-1")).await.expect("enqueue");

    assert_eq!(h.worker.run_once().await.expect("run"), Some(JobOutcome::Completed));
    let first = h.store.get_vector("c-1").await.expect("get").expect("vector");
    assert_eq!(h.worker.run_once().await.expect("run"), Some(JobOutcome::Completed));
    let second = h.store.get_vector("c-1").await.expect("get").expect("vector");

    assert_eq!(h.store.vector_count(), 1);
    assert!(second.generated_at >= first.generated_at);
    assert_eq!(h.provider.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_failing_provider_is_tried_max_retries_times() {
    let h = harness(StubEmbeddingProvider::new(StubMode::Unavailable, 4));
    h.store.insert_candidate(CandidateProfile::new("c-1"));
    h.queue
        .enqueue(job("c-1").with_max_retries(3))
        .await
        .expect("enqueue");

    let mut outcomes = Vec::new();
    while let Some(outcome) = h.worker.run_once().await.expect("run") {
        outcomes.push(outcome);
    }

    assert_eq!(
        outcomes,
        vec![JobOutcome::Retried, JobOutcome::Retried, JobOutcome::Dropped]
    );
    assert_eq!(h.provider.calls(), 3);
    assert_eq!(h.queue.len().await.expect("len"), 0);
    assert_eq!(h.store.vector_count(), 0);

    let stats = h.worker.stats().snapshot();
    assert_eq!(stats.processed, 3);
    assert_eq!(stats.retried, 2);
    assert_eq!(stats.dropped, 1);
}

#[tokio::test(start_paused = true)]
async fn test_retry_bound_holds_with_short_visibility_timeout() {
    let queue = Arc::new(InMemoryJobQueue::with_visibility_timeout(Duration::from_secs(1)));
    let provider = Arc::new(StubEmbeddingProvider::new(StubMode::Unavailable, 4));
    let store = Arc::new(InstrumentedStore::new());
    store.insert_candidate(CandidateProfile::new("c-1"));
    queue
        .enqueue(job("c-1").with_max_retries(3))
        .await
        .expect("enqueue");

    let worker = Arc::new(EmbeddingWorker::new(
        queue.clone(),
        provider.clone(),
        store,
        WorkerSettings {
            poll_wait: Duration::from_secs(1),
            retry_backoff: Duration::from_secs(5),
            max_backoff: Duration::from_secs(5),
            call_timeout: Duration::from_secs(5),
        },
    ));
    let pool = WorkerPool::spawn(worker, 2, CancellationToken::new());

    tokio::time::sleep(Duration::from_secs(120)).await;
    pool.shutdown();
    let stats = pool.join().await.expect("join");

    assert_eq!(provider.calls(), 3);
    assert_eq!(stats.processed, 3);
    assert_eq!(stats.retried, 2);
    assert_eq!(stats.dropped, 1);
    assert_eq!(queue.len().await.expect("len"), 0);
}

#[tokio::test(start_paused = true)]
async fn test_retry_waits_in_queue_not_in_worker() {
    let h = harness(StubEmbeddingProvider::new(StubMode::Unavailable, 4));
    let worker = EmbeddingWorker::new(
        h.queue.clone(),
        h.provider.clone(),
        h.store.clone(),
        WorkerSettings {
            retry_backoff: Duration::from_secs(10),
            max_backoff: Duration::from_secs(10),
            ..fast_settings()
        },
    );
    h.store.insert_candidate(CandidateProfile::new("c-1"));
    h.queue.enqueue(job("c-1")).await.expect("enqueue");

    let started = tokio::time::Instant::now();
    assert_eq!(worker.run_once().await.expect("run"), Some(JobOutcome::Retried));
    assert!(started.elapsed() < Duration::from_secs(1));
    assert_eq!(h.queue.in_flight_len().await, 0);
    assert!(h.queue.dequeue(Duration::ZERO).await.expect("dequeue").is_none());

    let redelivered = h
        .queue
        .dequeue(Duration::from_secs(30))
        .await
        .expect("dequeue")
        .expect("job visible after backoff");
    assert_eq!(redelivered.job.retry_count, 1);
    assert!(started.elapsed() >= Duration::from_secs(10));
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_is_not_delayed_by_retry_backoff() {
    let queue = Arc::new(InMemoryJobQueue::new());
    let store = Arc::new(InstrumentedStore::new());
    store.insert_candidate(CandidateProfile::new("c-1"));
    queue.enqueue(job("c-1")).await.expect("enqueue");

    let worker = Arc::new(EmbeddingWorker::new(
        queue,
        Arc::new(StubEmbeddingProvider::new(StubMode::Unavailable, 4)),
        store,
        WorkerSettings {
            retry_backoff: Duration::from_secs(30),
            max_backoff: Duration::from_secs(30),
            ..fast_settings()
        },
    ));
    let pool = WorkerPool::spawn(worker, 1, CancellationToken::new());
    while pool.stats().retried == 0 {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    pool.shutdown();
    let stats = tokio::time::timeout(Duration::from_secs(1), pool.join())
        .await
        .expect("workers stopped before the backoff elapsed")
        .expect("join");
    assert_eq!(stats.retried, 1);
}

#[tokio::test]
async fn test_transient_store_failure_is_retried() {
    let h = harness(StubEmbeddingProvider::axis(4));
    h.store.insert_candidate(CandidateProfile::new("c-1"));
    h.store.fail_next_upserts(1);
    h.queue.enqueue(job("c-1")).await.expect("enqueue");

    assert_eq!(h.worker.run_once().await.expect("run"), Some(JobOutcome::Retried));

    let redelivered = h
        .queue
        .dequeue(Duration::ZERO)
        .await
        .expect("dequeue")
        .expect("job re-enqueued");
    assert_eq!(redelivered.job.retry_count, 1);

    assert_eq!(
        h.worker.process(redelivered).await.expect("process"),
        JobOutcome::Completed
    );
    assert_eq!(h.store.vector_count(), 1);
}

#[tokio::test]
async fn test_blank_text_is_skipped_without_provider_call() {
    let h = harness(StubEmbeddingProvider::axis(4));
    h.store.insert_candidate(CandidateProfile::new("c-1"));
    h.queue
        .enqueue(EmbeddingJob::new("c-1", " ", "\n", SourceTag::Updated))
        .await
        .expect("enqueue");

    assert_eq!(h.worker.run_once().await.expect("run"), Some(JobOutcome::Skipped));
    assert_eq!(h.provider.calls(), 0);
    assert_eq!(h.queue.len().await.expect("len"), 0);
}

#[tokio::test]
async fn test_empty_embedding_is_skipped() {
    let h = harness(StubEmbeddingProvider::new(StubMode::Empty, 4));
    h.store.insert_candidate(CandidateProfile::new("c-1"));
    h.queue.enqueue(job("c-1")).await.expect("enqueue");

    assert_eq!(h.worker.run_once().await.expect("run"), Some(JobOutcome::Skipped));
    assert_eq!(h.store.vector_count(), 0);
    assert_eq!(h.worker.stats().snapshot().skipped, 1);
}

#[tokio::test]
async fn test_dimension_mismatch_is_skipped() {
    let h = harness(StubEmbeddingProvider::new(StubMode::Fixed(vec![0.1, 0.2, 0.3]), 4));
    h.store.insert_candidate(CandidateProfile::new("c-1"));
    h.queue.enqueue(job("c-1")).await.expect("enqueue");

    assert_eq!(h.worker.run_once().await.expect("run"), Some(JobOutcome::Skipped));
    assert_eq!(h.store.vector_count(), 0);
    assert_eq!(h.provider.calls(), 1);
}

#[tokio::test]
async fn test_unknown_entity_is_skipped() {
    let h = harness(StubEmbeddingProvider::axis(4));
    h.queue.enqueue(job("ghost")).await.expect("enqueue");

    assert_eq!(h.worker.run_once().await.expect("run"), Some(JobOutcome::Skipped));
    assert_eq!(h.queue.len().await.expect("len"), 0);
}

#[tokio::test]
async fn test_empty_queue_yields_nothing() {
    let h = harness(StubEmbeddingProvider::axis(4));
    assert_eq!(h.worker.run_once().await.expect("run"), None);
}

#[test]
fn test_backoff_doubles_and_caps() {
    let settings = WorkerSettings {
        retry_backoff: Duration::from_millis(100),
        max_backoff: Duration::from_millis(350),
        ..WorkerSettings::default()
    };
    assert_eq!(settings.backoff_for(1), Duration::from_millis(100));
    assert_eq!(settings.backoff_for(2), Duration::from_millis(200));
    assert_eq!(settings.backoff_for(3), Duration::from_millis(350));
    assert_eq!(settings.backoff_for(40), Duration::from_millis(350));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_pool_drains_queue_and_stops() {
    let queue = Arc::new(InMemoryJobQueue::new());
    let store = Arc::new(InstrumentedStore::new());
    for i in 0..10 {
        let entity_id = format!("c-{i}");
        store.insert_candidate(CandidateProfile::new(&entity_id));
        queue.enqueue(job(&entity_id)).await.expect("enqueue");
    }
    let worker = Arc::new(EmbeddingWorker::new(
        queue.clone(),
        Arc::new(StubEmbeddingProvider::axis(4)),
        store.clone(),
        fast_settings(),
    ));

    let pool = WorkerPool::spawn(worker, 3, CancellationToken::new());
    assert_eq!(pool.len(), 3);

    tokio::time::timeout(Duration::from_secs(10), async {
        while pool.stats().succeeded < 10 {
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("pool drained the queue");

    pool.shutdown();
    let stats = pool.join().await.expect("join");
    assert_eq!(stats.processed, 10);
    assert_eq!(stats.succeeded, 10);
    assert_eq!(store.vector_count(), 10);
    assert_eq!(queue.len().await.expect("len"), 0);
}

#[tokio::test]
async fn test_cancelled_pool_exits_promptly() {
    let queue = Arc::new(InMemoryJobQueue::new());
    let worker = Arc::new(EmbeddingWorker::new(
        queue,
        Arc::new(StubEmbeddingProvider::axis(4)),
        Arc::new(InstrumentedStore::new()),
        WorkerSettings::default(),
    ));
    let cancel = CancellationToken::new();
    let pool = WorkerPool::spawn(worker, 2, cancel.clone());

    cancel.cancel();
    let stats = tokio::time::timeout(Duration::from_secs(1), pool.join())
        .await
        .expect("workers stopped")
        .expect("join");
    assert_eq!(stats.processed, 0);
}
