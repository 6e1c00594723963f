//! Use Cases
//!
//! | Use case | Description |
//! |----------|-------------|
//! | [`HybridSearchService`] | Request-time hybrid search orchestration |
//! | [`EmbeddingWorker`] | Queue consumer that refreshes candidate vectors |
//! | [`WorkerPool`] | Supervisor running N workers over one queue |
//! | [`EmbeddingJobScheduler`] | Ingestion event to embedding job mapping |

pub mod embedding_worker;
pub mod hybrid_search;
pub mod scheduler;
pub mod worker_pool;

pub use embedding_worker::{
    EmbeddingWorker, JobOutcome, WorkerSettings, WorkerStats, WorkerStatsSnapshot,
};
pub use hybrid_search::{HybridSearchService, SearchSettings};
pub use scheduler::EmbeddingJobScheduler;
pub use worker_pool::WorkerPool;
