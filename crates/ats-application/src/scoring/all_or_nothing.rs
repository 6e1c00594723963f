use ats_domain::{KeywordScoreSet, ScoringStrategyKind};

use super::{Coverage, ScoringStrategy, clamp_unit};

/// Strict mandatory-skills strategy
///
/// Every keyword matched: 1.0 regardless of magnitudes. Anything less: the
/// semantic score unchanged, keyword information discarded. A query with
/// no keywords has nothing to cover and also yields the semantic score.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllOrNothing;

impl ScoringStrategy for AllOrNothing {
    fn kind(&self) -> ScoringStrategyKind {
        ScoringStrategyKind::AllOrNothing
    }

    fn calculate_score(
        &self,
        keyword_scores: &KeywordScoreSet,
        semantic_score: f64,
        total_keywords: usize,
    ) -> f64 {
        if Coverage::of(keyword_scores, total_keywords).is_full() {
            1.0
        } else {
            clamp_unit(semantic_score)
        }
    }

    fn explain(
        &self,
        keyword_scores: &KeywordScoreSet,
        semantic_score: f64,
        total_keywords: usize,
    ) -> String {
        let coverage = Coverage::of(keyword_scores, total_keywords);
        let head = format!(
            "AllOrNothing: {}/{} keywords matched ({}% coverage)",
            coverage.matched,
            coverage.total,
            coverage.percent()
        );
        if coverage.is_full() {
            format!("{head}; full coverage, score 1.00")
        } else {
            format!(
                "{head}; partial coverage, semantic score {:.2} kept",
                clamp_unit(semantic_score)
            )
        }
    }
}
