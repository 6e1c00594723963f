//! Provider Factories
//!
//! Builds the configured backend for each port. All implementations come
//! from `ats-providers`; this module only wires them.

use std::sync::Arc;
use std::time::Duration;

use ats_domain::error::{Error, Result};
use ats_domain::ports::{CandidateVectorStore, EmbeddingJobQueue, EmbeddingProvider};
use ats_providers::constants::{
    EMBEDDING_DIMENSION_NULL, OLLAMA_DEFAULT_MODEL, OPENAI_DEFAULT_MODEL,
};
use ats_providers::{
    InMemoryCandidateStore, InMemoryJobQueue, NullEmbeddingProvider, OllamaEmbeddingProvider,
    OpenAIEmbeddingProvider,
};
use reqwest::Client;
use tracing::debug;

use crate::config::{
    EmbeddingConfig, EmbeddingProviderKind, QueueConfig, QueueKind, VectorStoreConfig,
    VectorStoreKind,
};
use crate::error_ext::ErrorContext;

/// Factory for embedding providers
pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    /// Create the configured embedding provider
    ///
    /// When `http_client` is `None` a client with the configured timeout is
    /// built for the HTTP backends.
    pub fn create(
        config: &EmbeddingConfig,
        http_client: Option<Client>,
    ) -> Result<Arc<dyn EmbeddingProvider>> {
        debug!(provider = %config.provider, model = ?config.model, "Creating embedding provider");
        match config.provider {
            EmbeddingProviderKind::Null => Ok(Arc::new(NullEmbeddingProvider::with_dimensions(
                config.dimensions.unwrap_or(EMBEDDING_DIMENSION_NULL),
            ))),
            EmbeddingProviderKind::OpenAi => Self::create_openai(config, http_client),
            EmbeddingProviderKind::Ollama => Self::create_ollama(config, http_client),
        }
    }

    fn create_openai(
        config: &EmbeddingConfig,
        http_client: Option<Client>,
    ) -> Result<Arc<dyn EmbeddingProvider>> {
        let api_key = config
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| Error::configuration("API key required for OpenAI provider"))?;
        let model = config.model.as_deref().unwrap_or(OPENAI_DEFAULT_MODEL);
        if config.dimensions.is_none() && OpenAIEmbeddingProvider::known_dimensions(model).is_none()
        {
            return Err(Error::configuration(format!(
                "embedding.dimensions is required for OpenAI-compatible model '{model}'"
            )));
        }
        let client = Self::require_http_client(config, http_client)?;

        let provider = OpenAIEmbeddingProvider::new(
            api_key,
            config.base_url.as_deref(),
            model,
            Self::timeout(config),
            client,
        )
        .with_dimensions(config.dimensions);
        Ok(Arc::new(provider))
    }

    fn create_ollama(
        config: &EmbeddingConfig,
        http_client: Option<Client>,
    ) -> Result<Arc<dyn EmbeddingProvider>> {
        let client = Self::require_http_client(config, http_client)?;
        let provider = OllamaEmbeddingProvider::new(
            config.base_url.as_deref(),
            config.model.as_deref().unwrap_or(OLLAMA_DEFAULT_MODEL),
            Self::timeout(config),
            client,
        )
        .with_dimensions(config.dimensions);
        Ok(Arc::new(provider))
    }

    fn require_http_client(config: &EmbeddingConfig, client: Option<Client>) -> Result<Client> {
        match client {
            Some(client) => Ok(client),
            None => Client::builder()
                .timeout(Self::timeout(config))
                .build()
                .config_context("Failed to create HTTP client"),
        }
    }

    fn timeout(config: &EmbeddingConfig) -> Duration {
        Duration::from_secs(config.timeout_secs)
    }
}

/// Factory for candidate vector stores
pub struct VectorStoreFactory;

impl VectorStoreFactory {
    /// In-memory store honoring the configured dimension
    pub fn create_memory(config: &VectorStoreConfig) -> Arc<InMemoryCandidateStore> {
        Arc::new(match config.dimensions {
            Some(dimensions) => InMemoryCandidateStore::with_dimensions(dimensions),
            None => InMemoryCandidateStore::new(),
        })
    }

    /// Postgres/pgvector store
    #[cfg(feature = "pgvector")]
    pub fn create_pgvector(config: &VectorStoreConfig) -> Result<Arc<dyn CandidateVectorStore>> {
        use ats_providers::PgVectorCandidateStore;
        use ats_providers::vector_store::PgVectorConfig;

        let url = config
            .url
            .clone()
            .ok_or_else(|| Error::configuration("Vector store URL is required for pgvector"))?;
        let pg_config = PgVectorConfig {
            table: config.table.clone(),
            max_connections: config.max_connections,
            dimensions: config.dimensions,
            timeout: Duration::from_secs(config.timeout_secs),
            ..PgVectorConfig::new(url)
        };
        Ok(Arc::new(PgVectorCandidateStore::new(&pg_config)?))
    }

    /// Postgres/pgvector store
    #[cfg(not(feature = "pgvector"))]
    pub fn create_pgvector(_config: &VectorStoreConfig) -> Result<Arc<dyn CandidateVectorStore>> {
        Err(Error::invalid_config(
            "pgvector support is not compiled in; rebuild with the `pgvector` feature",
        ))
    }

    /// Create the configured store as a port
    pub fn create(config: &VectorStoreConfig) -> Result<Arc<dyn CandidateVectorStore>> {
        debug!(provider = %config.provider, "Creating candidate vector store");
        match config.provider {
            VectorStoreKind::Memory => Ok(Self::create_memory(config)),
            VectorStoreKind::PgVector => Self::create_pgvector(config),
        }
    }
}

/// Factory for embedding job queues
pub struct JobQueueFactory;

impl JobQueueFactory {
    /// Create the configured queue
    pub fn create(config: &QueueConfig) -> Arc<dyn EmbeddingJobQueue> {
        match config.provider {
            QueueKind::Memory => Arc::new(InMemoryJobQueue::with_visibility_timeout(
                Duration::from_secs(config.visibility_timeout_secs),
            )),
        }
    }
}
