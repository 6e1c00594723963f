//! Main application configuration

use std::collections::HashMap;
use std::fmt;

use ats_domain::ScoringConfig;
use serde::{Deserialize, Serialize};

use super::logging::LoggingConfig;
use super::providers::{EmbeddingConfig, QueueConfig, VectorStoreConfig};
use super::runtime::{SearchConfig, WorkerConfig};

/// One raw tenant setting
///
/// TOML and environment values arrive typed; tenant settings are resolved
/// from their string form, so numbers and flags are accepted as written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TenantSettingValue {
    /// Text value, e.g. a strategy name
    Text(String),
    /// Numeric value, e.g. a weight
    Number(f64),
    /// Boolean flag
    Flag(bool),
}

impl fmt::Display for TenantSettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Flag(flag) => write!(f, "{flag}"),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Logging configuration
    pub logging: LoggingConfig,
    /// Embedding provider selection
    pub embedding: EmbeddingConfig,
    /// Candidate vector store selection
    pub vector_store: VectorStoreConfig,
    /// Job queue selection
    pub queue: QueueConfig,
    /// Embedding worker pool
    pub worker: WorkerConfig,
    /// Search request limits
    pub search: SearchConfig,
    /// Deployment-wide scoring defaults
    pub scoring: ScoringConfig,
    /// tenant id -> raw scoring settings
    pub tenants: HashMap<String, HashMap<String, TenantSettingValue>>,
}

impl AppConfig {
    /// Tenant settings in the string form the settings store keeps
    pub fn tenant_settings(&self) -> HashMap<String, HashMap<String, String>> {
        self.tenants
            .iter()
            .map(|(tenant, settings)| {
                let settings = settings
                    .iter()
                    .map(|(key, value)| (key.clone(), value.to_string()))
                    .collect();
                (tenant.clone(), settings)
            })
            .collect()
    }
}
