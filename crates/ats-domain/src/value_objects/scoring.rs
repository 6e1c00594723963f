//! Scoring configuration value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DEFAULT_KEYWORD_WEIGHT, DEFAULT_SEMANTIC_WEIGHT, DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::error::Error;

/// keyword -> score in [0, 1] for one candidate in one request
///
/// Ordered so explanations and serialized output are deterministic.
pub type KeywordScoreSet = BTreeMap<String, f64>;

/// Closed set of scoring strategies a tenant can select
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScoringStrategyKind {
    /// Full keyword coverage wins outright, anything less falls back to semantic
    #[default]
    AllOrNothing,
    /// Coverage-tiered blend of keyword quality and semantic similarity
    TieredMultiKeyword,
}

impl ScoringStrategyKind {
    /// Canonical setting value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllOrNothing => "AllOrNothing",
            Self::TieredMultiKeyword => "TieredMultiKeyword",
        }
    }
}

impl fmt::Display for ScoringStrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScoringStrategyKind {
    type Err = Error;

    /// Accepts `AllOrNothing`, `all_or_nothing`, `all-or-nothing` and the like
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match normalized.as_str() {
            "allornothing" => Ok(Self::AllOrNothing),
            "tieredmultikeyword" | "tiered" => Ok(Self::TieredMultiKeyword),
            _ => Err(Error::invalid_config(format!(
                "unknown scoring strategy '{s}'"
            ))),
        }
    }
}

/// Resolved per-tenant scoring settings
///
/// Passed explicitly into every search request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Strategy used to fold keyword and semantic signals
    pub strategy: ScoringStrategyKind,
    /// Semantic weight in [0, 1]
    pub semantic_weight: f64,
    /// Keyword weight in [0, 1]
    pub keyword_weight: f64,
    /// Minimum cosine similarity for the candidate pool, in [0, 1]
    pub similarity_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            strategy: ScoringStrategyKind::AllOrNothing,
            semantic_weight: DEFAULT_SEMANTIC_WEIGHT,
            keyword_weight: DEFAULT_KEYWORD_WEIGHT,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl ScoringConfig {
    /// Use a different strategy
    pub fn with_strategy(mut self, strategy: ScoringStrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Use a different similarity threshold
    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }
}
