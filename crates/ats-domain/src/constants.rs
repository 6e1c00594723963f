//! Domain layer constants
//!
//! Documented defaults that apply when a tenant or deployment does not
//! override them.

// ============================================================================
// SCORING DEFAULTS
// ============================================================================

/// Default semantic weight for a tenant without a `semantic_weight` setting
pub const DEFAULT_SEMANTIC_WEIGHT: f64 = 0.6;

/// Default keyword weight for a tenant without a `keyword_weight` setting
pub const DEFAULT_KEYWORD_WEIGHT: f64 = 0.4;

/// Default minimum cosine similarity for the candidate pool
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.3;

/// Tenant setting key: scoring strategy name
pub const SETTING_SCORING_STRATEGY: &str = "scoring_strategy";

/// Tenant setting key: semantic weight
pub const SETTING_SEMANTIC_WEIGHT: &str = "semantic_weight";

/// Tenant setting key: keyword weight
pub const SETTING_KEYWORD_WEIGHT: &str = "keyword_weight";

/// Tenant setting key: similarity threshold
pub const SETTING_SIMILARITY_THRESHOLD: &str = "similarity_threshold";

// ============================================================================
// KEYWORD TIER SCORES
// ============================================================================

/// Keyword appears as a substring of the candidate title
pub const KEYWORD_SCORE_TITLE: f64 = 1.0;

/// Keyword equals one of the candidate's skill tags
pub const KEYWORD_SCORE_SKILL: f64 = 0.95;

/// Keyword occurs at least [`KEYWORD_FREQUENT_OCCURRENCES`] times in the body
pub const KEYWORD_SCORE_FREQUENT: f64 = 0.9;

/// Keyword occurs 2 to 4 times in the body
pub const KEYWORD_SCORE_REPEATED: f64 = 0.7;

/// Keyword occurs exactly once in the body
pub const KEYWORD_SCORE_SINGLE: f64 = 0.5;

/// Occurrence count that promotes a body match to the top body tier
pub const KEYWORD_FREQUENT_OCCURRENCES: usize = 5;

/// Minimum keyword length kept by extraction
pub const KEYWORD_MIN_LENGTH: usize = 3;

// ============================================================================
// SEARCH & PIPELINE DEFAULTS
// ============================================================================

/// Size of the similarity-ranked pool that gets re-ranked
pub const DEFAULT_POOL_SIZE: usize = 100;

/// Default maximum attempts for an embedding job
pub const DEFAULT_MAX_RETRIES: u32 = 3;
