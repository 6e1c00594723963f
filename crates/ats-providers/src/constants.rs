//! Provider-specific constants

// ============================================================================
// EMBEDDING DIMENSIONS
// ============================================================================

/// Null provider default dimension
pub const EMBEDDING_DIMENSION_NULL: usize = 384;

/// OpenAI text-embedding-3-small dimension
pub const EMBEDDING_DIMENSION_OPENAI_SMALL: usize = 1536;

/// OpenAI text-embedding-3-large dimension
pub const EMBEDDING_DIMENSION_OPENAI_LARGE: usize = 3072;

/// OpenAI text-embedding-ada-002 dimension
pub const EMBEDDING_DIMENSION_OPENAI_ADA: usize = 1536;

/// Ollama nomic-embed-text dimension
pub const EMBEDDING_DIMENSION_OLLAMA_NOMIC: usize = 768;

/// Ollama all-minilm dimension
pub const EMBEDDING_DIMENSION_OLLAMA_MINILM: usize = 384;

/// Ollama mxbai-embed-large dimension
pub const EMBEDDING_DIMENSION_OLLAMA_MXBAI: usize = 1024;

/// Ollama unknown-model fallback dimension
pub const EMBEDDING_DIMENSION_OLLAMA_DEFAULT: usize = 768;

// ============================================================================
// EMBEDDING ENDPOINTS
// ============================================================================

/// OpenAI API base URL
pub const OPENAI_DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default OpenAI model
pub const OPENAI_DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Ollama server URL
pub const OLLAMA_DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default Ollama model
pub const OLLAMA_DEFAULT_MODEL: &str = "nomic-embed-text";

/// Null provider model name
pub const NULL_MODEL_NAME: &str = "null-hash";

/// Deadline of availability checks
pub const AVAILABILITY_CHECK_TIMEOUT_SECS: u64 = 5;

/// JSON content type
pub const CONTENT_TYPE_JSON: &str = "application/json";

// ============================================================================
// QUEUE
// ============================================================================

/// Time an unacknowledged delivery stays invisible before redelivery
pub const QUEUE_DEFAULT_VISIBILITY_TIMEOUT_SECS: u64 = 300;

// ============================================================================
// PGVECTOR
// ============================================================================

/// Default candidate table
pub const PGVECTOR_DEFAULT_TABLE: &str = "candidates";
