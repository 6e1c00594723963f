//! Scoring strategies
//!
//! A strategy folds the per-keyword scores of a candidate and its semantic
//! similarity into one final rank score in [0, 1].
//!
//! | Strategy | Behavior |
//! |----------|----------|
//! | [`AllOrNothing`] | 1.0 on full keyword coverage, semantic score otherwise |
//! | [`TieredMultiKeyword`] | coverage-tiered blend of keyword quality and semantic score |
//!
//! The set is closed: [`strategy_for`] maps each [`ScoringStrategyKind`] to
//! its implementation.

mod all_or_nothing;
mod config;
mod tiered;

pub use all_or_nothing::AllOrNothing;
pub use config::{ScoringConfigResolver, resolve_scoring_config};
pub use tiered::TieredMultiKeyword;

use ats_domain::{KeywordScoreSet, ScoringStrategyKind};

/// Combines keyword and semantic signals into a final score
pub trait ScoringStrategy: Send + Sync {
    /// Which named strategy this is
    fn kind(&self) -> ScoringStrategyKind;

    /// Final score in [0, 1]
    ///
    /// # Arguments
    /// * `keyword_scores` - Per-keyword scores of one candidate
    /// * `semantic_score` - Cosine similarity of the candidate to the query
    /// * `total_keywords` - Number of keywords extracted from the query
    fn calculate_score(
        &self,
        keyword_scores: &KeywordScoreSet,
        semantic_score: f64,
        total_keywords: usize,
    ) -> f64;

    /// Short human-readable account of how the score was reached
    fn explain(
        &self,
        keyword_scores: &KeywordScoreSet,
        semantic_score: f64,
        total_keywords: usize,
    ) -> String;
}

static ALL_OR_NOTHING: AllOrNothing = AllOrNothing;
static TIERED_MULTI_KEYWORD: TieredMultiKeyword = TieredMultiKeyword;

/// Strategy implementation for a configured kind
pub fn strategy_for(kind: ScoringStrategyKind) -> &'static dyn ScoringStrategy {
    match kind {
        ScoringStrategyKind::AllOrNothing => &ALL_OR_NOTHING,
        ScoringStrategyKind::TieredMultiKeyword => &TIERED_MULTI_KEYWORD,
    }
}

/// Keyword coverage figures shared by both strategies
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Coverage {
    /// Keywords with a nonzero score
    pub matched: usize,
    /// Keywords in the query
    pub total: usize,
    /// matched / total, 0 when there are no keywords
    pub ratio: f64,
    /// Sum of keyword scores over all query keywords, 0 when there are none
    pub avg_quality: f64,
}

impl Coverage {
    pub(crate) fn of(keyword_scores: &KeywordScoreSet, total_keywords: usize) -> Self {
        let total = total_keywords.max(keyword_scores.len());
        if total == 0 {
            return Self {
                matched: 0,
                total: 0,
                ratio: 0.0,
                avg_quality: 0.0,
            };
        }

        let matched = keyword_scores.values().filter(|score| **score > 0.0).count();
        let sum: f64 = keyword_scores
            .values()
            .map(|score| clamp_unit(*score))
            .sum();

        Self {
            matched,
            total,
            ratio: matched as f64 / total as f64,
            avg_quality: sum / total as f64,
        }
    }

    pub(crate) fn is_full(&self) -> bool {
        self.total > 0 && self.matched == self.total
    }

    pub(crate) fn percent(&self) -> f64 {
        (self.ratio * 100.0).round()
    }
}

/// Clamp to [0, 1], mapping NaN to 0
pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}
