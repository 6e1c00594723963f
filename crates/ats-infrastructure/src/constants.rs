//! Infrastructure layer constants
//!
//! Domain-level defaults (weights, pool size, retry budget) live in
//! `ats_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "ats.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "ats";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "ATS";

/// Separator between the prefix and nested keys (`ATS__SEARCH__POOL_SIZE`)
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the configured filter
pub const LOG_ENV_VAR: &str = "ATS_LOG";

/// File name prefix of rolled log files when the path has no stem
pub const LOG_FILE_PREFIX: &str = "ats";

// ============================================================================
// PROVIDER CONSTANTS
// ============================================================================

/// Default embedding call timeout in seconds
pub const EMBEDDING_TIMEOUT_SECS: u64 = 30;

/// Default storage call timeout in seconds
pub const VECTOR_STORE_TIMEOUT_SECS: u64 = 10;

/// Default pgvector connection pool size
pub const VECTOR_STORE_MAX_CONNECTIONS: u32 = 10;

/// Default dequeue poll wait in seconds
pub const QUEUE_POLL_WAIT_SECS: u64 = 5;

// ============================================================================
// WORKER & SEARCH CONSTANTS
// ============================================================================

/// Default number of concurrent embedding workers
pub const WORKER_DEFAULT_CONCURRENCY: usize = 4;

/// Default backoff before the first retry, in milliseconds
pub const WORKER_RETRY_BACKOFF_MS: u64 = 500;

/// Default backoff ceiling, in milliseconds
pub const WORKER_MAX_BACKOFF_MS: u64 = 30_000;

/// Default concurrent keyword-evidence lookups per search
pub const SEARCH_KEYWORD_CONCURRENCY: usize = 8;

/// Default deadline of a whole search request, in seconds
pub const SEARCH_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default deadline of each call made by a search, in seconds
pub const SEARCH_CALL_TIMEOUT_SECS: u64 = 10;
