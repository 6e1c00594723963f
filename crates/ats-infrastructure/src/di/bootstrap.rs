//! Composition root
//!
//! Builds every provider from [`AppConfig`] and injects them into the
//! application services.
//!
//! ```rust,ignore
//! let context = init_app(ConfigLoader::new().load()?).await?;
//!
//! let page = context.search(&SearchRequest::new("rust, postgresql", "acme"), &cancel).await?;
//!
//! let pool = context.spawn_workers(cancel.child_token());
//! ```

use std::sync::Arc;

use ats_application::{
    EmbeddingJobScheduler, EmbeddingWorker, HybridSearchService, ScoringConfigResolver,
    WorkerPool, WorkerStatsSnapshot,
};
use ats_domain::error::{Error, Result};
use ats_domain::ports::{CandidateVectorStore, EmbeddingJobQueue, EmbeddingProvider};
use ats_domain::{CandidateProfile, SearchPage, SearchRequest};
use ats_providers::{InMemoryCandidateStore, StaticTenantSettingsProvider};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::config::loader::validate_app_config;
use crate::config::{AppConfig, VectorStoreKind};
use crate::di::factory::{EmbeddingProviderFactory, JobQueueFactory, VectorStoreFactory};

/// Application context holding the wired providers and services
pub struct AppContext {
    /// Application configuration
    pub config: Arc<AppConfig>,

    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn CandidateVectorStore>,
    /// Concrete handle of the in-memory store, used to load candidate records
    candidate_index: Option<Arc<InMemoryCandidateStore>>,
    job_queue: Arc<dyn EmbeddingJobQueue>,
    tenant_settings: Arc<StaticTenantSettingsProvider>,

    scoring_resolver: ScoringConfigResolver,
    search_service: Arc<HybridSearchService>,
    scheduler: Arc<EmbeddingJobScheduler>,
    worker: Arc<EmbeddingWorker>,
}

impl AppContext {
    /// Active embedding provider
    pub fn embedding_provider(&self) -> Arc<dyn EmbeddingProvider> {
        Arc::clone(&self.embedding_provider)
    }

    /// Active candidate vector store
    pub fn vector_store(&self) -> Arc<dyn CandidateVectorStore> {
        Arc::clone(&self.vector_store)
    }

    /// Active job queue
    pub fn job_queue(&self) -> Arc<dyn EmbeddingJobQueue> {
        Arc::clone(&self.job_queue)
    }

    /// Tenant settings store
    pub fn tenant_settings(&self) -> Arc<StaticTenantSettingsProvider> {
        Arc::clone(&self.tenant_settings)
    }

    /// Tenant scoring resolver
    pub fn scoring_resolver(&self) -> &ScoringConfigResolver {
        &self.scoring_resolver
    }

    /// Hybrid search service
    pub fn search_service(&self) -> Arc<HybridSearchService> {
        Arc::clone(&self.search_service)
    }

    /// Ingestion event scheduler
    pub fn scheduler(&self) -> Arc<EmbeddingJobScheduler> {
        Arc::clone(&self.scheduler)
    }

    /// Embedding worker shared by pools
    pub fn worker(&self) -> Arc<EmbeddingWorker> {
        Arc::clone(&self.worker)
    }

    /// Run a search with the tenant's current scoring settings
    pub async fn search(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<SearchPage> {
        let scoring = self.scoring_resolver.resolve(&request.tenant_id).await?;
        self.search_service.search(request, &scoring, cancel).await
    }

    /// Start `worker.concurrency` embedding workers
    pub fn spawn_workers(&self, cancel: CancellationToken) -> WorkerPool {
        WorkerPool::spawn(self.worker(), self.config.worker.concurrency, cancel)
    }

    /// Load candidate records into the in-memory store and queue their embeddings
    ///
    /// Returns the number of jobs enqueued. Only the in-memory store accepts
    /// records; other stores read candidates from their own tables.
    pub async fn seed_candidates(&self, profiles: Vec<CandidateProfile>) -> Result<usize> {
        let index = self.candidate_index.as_ref().ok_or_else(|| {
            Error::invalid_config(format!(
                "candidate records can only be loaded into the memory store, not '{}'",
                self.config.vector_store.provider
            ))
        })?;

        let mut scheduled = 0;
        for profile in profiles {
            let entity_id = profile.entity_id.clone();
            let profile_text = profile.profile_text.clone();
            let body_text = profile.body_text.clone();
            index.insert_candidate(profile);
            if self
                .scheduler
                .schedule_backfill(&entity_id, &profile_text, &body_text)
                .await?
            {
                scheduled += 1;
            }
        }
        info!(scheduled, candidates = index.len(), "Candidate records loaded");
        Ok(scheduled)
    }

    /// Process queued jobs on the current task until the queue is empty
    pub async fn drain_jobs(&self) -> Result<WorkerStatsSnapshot> {
        while !self.job_queue.is_empty().await? {
            self.worker.run_once().await?;
        }
        Ok(self.worker.stats().snapshot())
    }
}

/// Reject configurations whose vectors cannot be compared
///
/// The configured dimension (when set), the provider's declared dimension
/// and the store's declared dimension must agree.
pub fn check_dimensions(
    configured: Option<usize>,
    provider: &dyn EmbeddingProvider,
    store: &dyn CandidateVectorStore,
) -> Result<()> {
    let produced = provider.dimensions();

    if let Some(expected) = configured.filter(|expected| *expected != produced) {
        return Err(Error::invalid_config(format!(
            "embedding.dimensions is {expected} but model '{}' produces {produced}-dimensional \
             vectors; changing the model requires a schema/index migration",
            provider.model_name()
        )));
    }

    if let Some(stored) = store.dimensions().filter(|stored| *stored != produced) {
        return Err(Error::invalid_config(format!(
            "{} store holds {stored}-dimensional vectors but model '{}' produces {produced}; \
             changing the model requires a schema/index migration",
            store.provider_name(),
            provider.model_name()
        )));
    }

    Ok(())
}

/// Build the application context from configuration
pub async fn init_app(config: AppConfig) -> Result<AppContext> {
    validate_app_config(&config)?;

    let embedding_provider = EmbeddingProviderFactory::create(&config.embedding, None)?;

    let (vector_store, candidate_index) = match config.vector_store.provider {
        VectorStoreKind::Memory => {
            let store = VectorStoreFactory::create_memory(&config.vector_store);
            let shared: Arc<dyn CandidateVectorStore> = store.clone();
            (shared, Some(store))
        }
        VectorStoreKind::PgVector => (
            VectorStoreFactory::create_pgvector(&config.vector_store)?,
            None,
        ),
    };

    check_dimensions(
        config.embedding.dimensions,
        embedding_provider.as_ref(),
        vector_store.as_ref(),
    )?;

    if !embedding_provider.is_available().await {
        warn!(
            provider = embedding_provider.provider_name(),
            "Embedding provider is not reachable; searches and jobs will fail until it is"
        );
    }

    let job_queue = JobQueueFactory::create(&config.queue);
    let tenant_settings = Arc::new(StaticTenantSettingsProvider::from_map(
        config.tenant_settings(),
    ));
    let scoring_resolver = ScoringConfigResolver::new(tenant_settings.clone(), config.scoring);

    let search_service = Arc::new(HybridSearchService::new(
        Arc::clone(&embedding_provider),
        Arc::clone(&vector_store),
        config.search.to_settings(),
    ));
    let scheduler = Arc::new(
        EmbeddingJobScheduler::new(Arc::clone(&job_queue))
            .with_max_retries(config.worker.max_retries),
    );
    let worker = Arc::new(EmbeddingWorker::new(
        Arc::clone(&job_queue),
        Arc::clone(&embedding_provider),
        Arc::clone(&vector_store),
        config
            .worker
            .to_settings(&config.queue, &config.embedding),
    ));

    info!(
        embedding = embedding_provider.provider_name(),
        model = embedding_provider.model_name(),
        dimensions = embedding_provider.dimensions(),
        vector_store = vector_store.provider_name(),
        queue = job_queue.provider_name(),
        tenants = tenant_settings.tenant_count(),
        "Application context initialized"
    );

    Ok(AppContext {
        config: Arc::new(config),
        embedding_provider,
        vector_store,
        candidate_index,
        job_queue,
        tenant_settings,
        scoring_resolver,
        search_service,
        scheduler,
        worker,
    })
}
