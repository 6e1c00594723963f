//! Tests for at-least-once delivery of the in-memory queue

use std::sync::Arc;
use std::time::Duration;

use ats_domain::ports::EmbeddingJobQueue;
use ats_domain::{EmbeddingJob, SourceTag};
use ats_providers::InMemoryJobQueue;

fn job(id: &str) -> EmbeddingJob {
    EmbeddingJob::new(id, "summary", "body", SourceTag::Updated)
}

#[tokio::test]
async fn test_ack_removes_job() {
    let queue = InMemoryJobQueue::new();
    queue.enqueue(job("c-1")).await.expect("enqueue");
    assert_eq!(queue.len().await.expect("len"), 1);

    let delivery = queue.dequeue(Duration::ZERO).await.expect("dequeue").expect("job");
    assert_eq!(delivery.delivery_count, 1);
    assert_eq!(queue.in_flight_len().await, 1);
    assert_eq!(queue.len().await.expect("len"), 1);

    queue.ack(&delivery.receipt).await.expect("ack");
    assert!(queue.is_empty().await.expect("is_empty"));
}

#[tokio::test(start_paused = true)]
async fn test_unacked_job_is_redelivered_after_visibility_timeout() {
    let queue = InMemoryJobQueue::with_visibility_timeout(Duration::from_secs(30));
    queue.enqueue(job("c-1")).await.expect("enqueue");

    let first = queue.dequeue(Duration::ZERO).await.expect("dequeue").expect("job");
    assert!(queue.dequeue(Duration::ZERO).await.expect("dequeue").is_none());

    let second = queue
        .dequeue(Duration::from_secs(60))
        .await
        .expect("dequeue")
        .expect("redelivered");
    assert_eq!(second.job, first.job);
    assert_eq!(second.delivery_count, 2);
    assert_ne!(second.receipt, first.receipt);

    // the stale receipt no longer refers to anything
    queue.ack(&first.receipt).await.expect("stale ack is ignored");
    assert_eq!(queue.in_flight_len().await, 1);
    queue.ack(&second.receipt).await.expect("ack");
    assert!(queue.is_empty().await.expect("is_empty"));
}

#[tokio::test(start_paused = true)]
async fn test_delayed_job_is_held_without_blocking_others() {
    let queue = InMemoryJobQueue::new();
    queue
        .enqueue_delayed(job("retry"), Duration::from_secs(10))
        .await
        .expect("enqueue delayed");
    queue.enqueue(job("fresh")).await.expect("enqueue");
    assert_eq!(queue.len().await.expect("len"), 2);

    let first = queue.dequeue(Duration::ZERO).await.expect("dequeue").expect("job");
    assert_eq!(first.job.entity_id, "fresh");
    queue.ack(&first.receipt).await.expect("ack");
    assert!(queue.dequeue(Duration::ZERO).await.expect("dequeue").is_none());

    let started = tokio::time::Instant::now();
    let held = queue
        .dequeue(Duration::from_secs(60))
        .await
        .expect("dequeue")
        .expect("held job becomes visible");
    assert_eq!(held.job.entity_id, "retry");
    assert_eq!(held.delivery_count, 1);
    assert!(started.elapsed() >= Duration::from_secs(10));
    assert!(started.elapsed() < Duration::from_secs(60));
}

#[tokio::test]
async fn test_waiting_consumer_wakes_on_enqueue() {
    let queue = Arc::new(InMemoryJobQueue::new());
    let consumer = {
        let queue = Arc::clone(&queue);
        tokio::spawn(async move { queue.dequeue(Duration::from_secs(10)).await })
    };

    tokio::task::yield_now().await;
    queue.enqueue(job("late")).await.expect("enqueue");

    let delivery = consumer
        .await
        .expect("join")
        .expect("dequeue")
        .expect("job");
    assert_eq!(delivery.job.entity_id, "late");
}

#[tokio::test]
async fn test_retried_job_goes_to_tail() {
    let queue = InMemoryJobQueue::new();
    queue.enqueue(job("a")).await.expect("enqueue");
    queue.enqueue(job("b")).await.expect("enqueue");

    let a = queue.dequeue(Duration::ZERO).await.expect("dequeue").expect("job");
    let mut retry = a.job.clone();
    retry.record_failure();
    queue.enqueue(retry).await.expect("re-enqueue");
    queue.ack(&a.receipt).await.expect("ack");

    let next = queue.dequeue(Duration::ZERO).await.expect("dequeue").expect("job");
    let last = queue.dequeue(Duration::ZERO).await.expect("dequeue").expect("job");
    assert_eq!(next.job.entity_id, "b");
    assert_eq!(last.job.entity_id, "a");
    assert_eq!(last.job.retry_count, 1);
}
