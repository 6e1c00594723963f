//! Provider selection and connection settings

use std::fmt;

use ats_providers::constants::{
    PGVECTOR_DEFAULT_TABLE, QUEUE_DEFAULT_VISIBILITY_TIMEOUT_SECS,
};
use serde::{Deserialize, Serialize};

use crate::constants::{
    EMBEDDING_TIMEOUT_SECS, QUEUE_POLL_WAIT_SECS, VECTOR_STORE_MAX_CONNECTIONS,
    VECTOR_STORE_TIMEOUT_SECS,
};

/// Embedding backends selectable by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingProviderKind {
    /// OpenAI-compatible remote API
    #[serde(rename = "openai")]
    OpenAi,
    /// Local Ollama server
    Ollama,
    /// Deterministic hashed vectors for tests and offline runs
    #[default]
    Null,
}

impl fmt::Display for EmbeddingProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
            Self::Null => "null",
        })
    }
}

/// Embedding provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Backend to use
    pub provider: EmbeddingProviderKind,
    /// Model name; the backend default when unset
    pub model: Option<String>,
    /// API base URL; the backend default when unset
    pub base_url: Option<String>,
    /// API key (OpenAI)
    pub api_key: Option<String>,
    /// Vector dimension the deployment expects
    pub dimensions: Option<usize>,
    /// Deadline of each embedding call
    pub timeout_secs: u64,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderKind::default(),
            model: None,
            base_url: None,
            api_key: None,
            dimensions: None,
            timeout_secs: EMBEDDING_TIMEOUT_SECS,
        }
    }
}

/// Candidate vector stores selectable by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VectorStoreKind {
    /// Process-local store
    #[default]
    Memory,
    /// Postgres with the pgvector extension
    #[serde(rename = "pgvector")]
    PgVector,
}

impl fmt::Display for VectorStoreKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::PgVector => "pgvector",
        })
    }
}

/// Candidate vector store settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VectorStoreConfig {
    /// Backend to use
    pub provider: VectorStoreKind,
    /// Connection URL (pgvector)
    pub url: Option<String>,
    /// Candidate table, optionally schema-qualified (pgvector)
    pub table: String,
    /// Connection pool cap (pgvector)
    pub max_connections: u32,
    /// Dimension of the stored vectors
    pub dimensions: Option<usize>,
    /// Deadline of each storage call
    pub timeout_secs: u64,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            provider: VectorStoreKind::default(),
            url: None,
            table: PGVECTOR_DEFAULT_TABLE.to_string(),
            max_connections: VECTOR_STORE_MAX_CONNECTIONS,
            dimensions: None,
            timeout_secs: VECTOR_STORE_TIMEOUT_SECS,
        }
    }
}

/// Job queues selectable by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueueKind {
    /// Process-local queue with visibility timeouts
    #[default]
    Memory,
}

/// Job queue settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Backend to use
    pub provider: QueueKind,
    /// Seconds before an unacknowledged delivery becomes visible again
    pub visibility_timeout_secs: u64,
    /// Bounded wait of each dequeue poll
    pub poll_wait_secs: u64,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            provider: QueueKind::default(),
            visibility_timeout_secs: QUEUE_DEFAULT_VISIBILITY_TIMEOUT_SECS,
            poll_wait_secs: QUEUE_POLL_WAIT_SECS,
        }
    }
}
