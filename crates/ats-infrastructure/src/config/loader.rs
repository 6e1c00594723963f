//! Configuration loader
//!
//! Loads configuration from defaults, a TOML file and environment
//! variables, then validates it.

use std::env;
use std::path::{Path, PathBuf};

use ats_domain::error::{Error, Result};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};

use crate::config::{AppConfig, EmbeddingConfig, LoggingConfig, VectorStoreConfig, VectorStoreKind};
use crate::constants::{
    CONFIG_ENV_PREFIX, CONFIG_ENV_SEPARATOR, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILENAME,
};
use crate::error_ext::ErrorContext;
use crate::logging::{log_config_loaded, parse_log_level};

/// Configuration loader service
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,

    /// Environment prefix
    env_prefix: String,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self {
            config_path: None,
            env_prefix: CONFIG_ENV_PREFIX.to_string(),
        }
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set the environment variable prefix
    pub fn with_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load configuration from all sources
    ///
    /// Later sources override earlier ones:
    /// 1. `AppConfig::default()`
    /// 2. TOML configuration file (explicit path, or the first default location found)
    /// 3. Environment variables, e.g. `ATS__SEARCH__POOL_SIZE=200`
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if config_path.exists() {
                figment = figment.merge(Toml::file(config_path));
                log_config_loaded(config_path, true);
            } else {
                log_config_loaded(config_path, false);
            }
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(&default_path));
            log_config_loaded(&default_path, true);
        }

        let prefix = format!("{}{CONFIG_ENV_SEPARATOR}", self.env_prefix);
        figment = figment.merge(Env::prefixed(&prefix).split(CONFIG_ENV_SEPARATOR));

        let app_config: AppConfig = figment
            .extract()
            .config_context("Failed to extract configuration")?;

        validate_app_config(&app_config)?;
        Ok(app_config)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, config: &AppConfig, path: P) -> Result<()> {
        let toml_string = to_toml(config)?;
        std::fs::write(path.as_ref(), toml_string).io_context("Failed to write config file")
    }

    /// Get the current configuration file path
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// First existing default configuration file
    fn find_default_config_path() -> Option<PathBuf> {
        let current_dir = env::current_dir().ok()?;

        let candidates = [
            Some(current_dir.join(DEFAULT_CONFIG_FILENAME)),
            Some(
                current_dir
                    .join(DEFAULT_CONFIG_DIR)
                    .join(DEFAULT_CONFIG_FILENAME),
            ),
            dirs::config_dir().map(|d| d.join(DEFAULT_CONFIG_DIR).join(DEFAULT_CONFIG_FILENAME)),
            dirs::home_dir().map(|d| {
                d.join(format!(".{DEFAULT_CONFIG_DIR}"))
                    .join(DEFAULT_CONFIG_FILENAME)
            }),
        ];

        candidates.into_iter().flatten().find(|path| path.exists())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a configuration as pretty TOML
pub fn to_toml(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).config_context("Failed to serialize config to TOML")
}

/// Validate application configuration
pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    validate_logging_config(&config.logging)?;
    validate_embedding_config(&config.embedding)?;
    validate_vector_store_config(&config.vector_store)?;
    validate_runtime_config(config)?;
    validate_scoring_config(config)?;
    Ok(())
}

fn validate_logging_config(config: &LoggingConfig) -> Result<()> {
    parse_log_level(&config.level).map(|_| ())
}

fn validate_embedding_config(config: &EmbeddingConfig) -> Result<()> {
    if config.dimensions == Some(0) {
        return Err(Error::configuration("Embedding dimensions cannot be 0"));
    }
    if config.timeout_secs == 0 {
        return Err(Error::configuration("Embedding timeout cannot be 0"));
    }
    Ok(())
}

fn validate_vector_store_config(config: &VectorStoreConfig) -> Result<()> {
    if config.provider == VectorStoreKind::PgVector
        && config.url.as_deref().is_none_or(|url| url.trim().is_empty())
    {
        return Err(Error::configuration(
            "Vector store URL is required for the pgvector provider",
        ));
    }
    if config.max_connections == 0 {
        return Err(Error::configuration("Vector store max_connections cannot be 0"));
    }
    if config.dimensions == Some(0) {
        return Err(Error::configuration("Vector store dimensions cannot be 0"));
    }
    if config.timeout_secs == 0 {
        return Err(Error::configuration("Vector store timeout cannot be 0"));
    }
    Ok(())
}

fn validate_runtime_config(config: &AppConfig) -> Result<()> {
    if config.queue.poll_wait_secs == 0 {
        return Err(Error::configuration("Queue poll wait cannot be 0"));
    }
    if config.queue.visibility_timeout_secs == 0 {
        return Err(Error::configuration("Queue visibility timeout cannot be 0"));
    }
    if config.worker.concurrency == 0 {
        return Err(Error::configuration("Worker concurrency cannot be 0"));
    }
    if config.worker.max_retries == 0 {
        return Err(Error::configuration("Worker max_retries must be at least 1"));
    }
    if config.worker.max_backoff_ms < config.worker.retry_backoff_ms {
        return Err(Error::configuration(
            "Worker max_backoff_ms cannot be below retry_backoff_ms",
        ));
    }
    // A delivery must outlive its worst-case hold (provider call, storage
    // call, backoff) or the queue redelivers it while it is still being retried
    let hold_ms = config
        .embedding
        .timeout_secs
        .saturating_mul(2_000)
        .saturating_add(config.worker.max_backoff_ms);
    if config.queue.visibility_timeout_secs.saturating_mul(1_000) <= hold_ms {
        return Err(Error::configuration(format!(
            "Queue visibility_timeout_secs ({}s) must exceed 2 x embedding.timeout_secs \
             plus worker.max_backoff_ms ({hold_ms} ms)",
            config.queue.visibility_timeout_secs
        )));
    }
    if config.search.pool_size == 0 {
        return Err(Error::configuration("Search pool size cannot be 0"));
    }
    if config.search.keyword_concurrency == 0 {
        return Err(Error::configuration("Search keyword concurrency cannot be 0"));
    }
    if config.search.request_timeout_secs == 0 || config.search.call_timeout_secs == 0 {
        return Err(Error::configuration("Search timeouts cannot be 0"));
    }
    Ok(())
}

fn validate_scoring_config(config: &AppConfig) -> Result<()> {
    let scoring = &config.scoring;
    for (name, value) in [
        ("semantic_weight", scoring.semantic_weight),
        ("keyword_weight", scoring.keyword_weight),
        ("similarity_threshold", scoring.similarity_threshold),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(Error::invalid_config(format!(
                "scoring.{name} must be within [0, 1], got {value}"
            )));
        }
    }
    Ok(())
}

/// Configuration builder for programmatic configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    config: AppConfig,
}

impl ConfigBuilder {
    /// Create a new configuration builder with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set logging configuration
    pub fn with_logging(mut self, logging: LoggingConfig) -> Self {
        self.config.logging = logging;
        self
    }

    /// Set embedding provider configuration
    pub fn with_embedding(mut self, embedding: EmbeddingConfig) -> Self {
        self.config.embedding = embedding;
        self
    }

    /// Set vector store configuration
    pub fn with_vector_store(mut self, vector_store: VectorStoreConfig) -> Self {
        self.config.vector_store = vector_store;
        self
    }

    /// Set one tenant scoring setting
    pub fn with_tenant_setting(
        mut self,
        tenant_id: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.config
            .tenants
            .entry(tenant_id.into())
            .or_default()
            .insert(key.into(), super::TenantSettingValue::Text(value.into()));
        self
    }

    /// Build the configuration
    pub fn build(self) -> AppConfig {
        self.config
    }
}
