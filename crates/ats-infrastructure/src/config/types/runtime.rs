//! Worker and search runtime limits

use std::time::Duration;

use ats_application::{SearchSettings, WorkerSettings};
use ats_domain::constants::{DEFAULT_MAX_RETRIES, DEFAULT_POOL_SIZE};
use serde::{Deserialize, Serialize};

use super::providers::{EmbeddingConfig, QueueConfig};
use crate::constants::{
    SEARCH_CALL_TIMEOUT_SECS, SEARCH_KEYWORD_CONCURRENCY, SEARCH_REQUEST_TIMEOUT_SECS,
    WORKER_DEFAULT_CONCURRENCY, WORKER_MAX_BACKOFF_MS, WORKER_RETRY_BACKOFF_MS,
};

/// Embedding worker pool settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Concurrent consumers of the job queue
    pub concurrency: usize,
    /// Attempts per job before it is dropped
    pub max_retries: u32,
    /// Backoff before the first retry
    pub retry_backoff_ms: u64,
    /// Backoff ceiling
    pub max_backoff_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            concurrency: WORKER_DEFAULT_CONCURRENCY,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_backoff_ms: WORKER_RETRY_BACKOFF_MS,
            max_backoff_ms: WORKER_MAX_BACKOFF_MS,
        }
    }
}

impl WorkerConfig {
    /// Worker timing derived from this section and its neighbours
    pub fn to_settings(&self, queue: &QueueConfig, embedding: &EmbeddingConfig) -> WorkerSettings {
        WorkerSettings {
            poll_wait: Duration::from_secs(queue.poll_wait_secs),
            retry_backoff: Duration::from_millis(self.retry_backoff_ms),
            max_backoff: Duration::from_millis(self.max_backoff_ms),
            call_timeout: Duration::from_secs(embedding.timeout_secs),
        }
    }
}

/// Search request limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Cap of the similarity pool that gets re-ranked
    pub pool_size: usize,
    /// Concurrent keyword-evidence lookups per request
    pub keyword_concurrency: usize,
    /// Deadline of a whole request
    pub request_timeout_secs: u64,
    /// Deadline of each provider or storage call
    pub call_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            keyword_concurrency: SEARCH_KEYWORD_CONCURRENCY,
            request_timeout_secs: SEARCH_REQUEST_TIMEOUT_SECS,
            call_timeout_secs: SEARCH_CALL_TIMEOUT_SECS,
        }
    }
}

impl SearchConfig {
    /// Limits handed to the search service
    pub fn to_settings(&self) -> SearchSettings {
        SearchSettings {
            pool_size: self.pool_size,
            keyword_concurrency: self.keyword_concurrency,
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            call_timeout: Duration::from_secs(self.call_timeout_secs),
        }
    }
}
