use ats_domain::{KeywordScoreSet, ScoringStrategyKind};

use super::{Coverage, ScoringStrategy, clamp_unit};

/// Floor applied to fully covered candidates
const FULL_COVERAGE_FLOOR: f64 = 0.85;

/// Coverage at or above which keyword quality is blended in
const PARTIAL_COVERAGE_MIN: f64 = 0.5;

/// Coverage-tiered blend of keyword quality and semantic similarity
///
/// | Coverage | Score |
/// |----------|-------|
/// | 100% | `max(0.85, quality*0.7 + semantic*0.3)` |
/// | 50% to 99% | `quality*coverage*0.6 + semantic*0.4` |
/// | below 50% | `semantic*0.8` |
///
/// `quality` is the sum of keyword scores divided by the number of query
/// keywords.
#[derive(Debug, Clone, Copy, Default)]
pub struct TieredMultiKeyword;

/// Branch of the tier table a candidate fell into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tier {
    Full,
    Partial,
    Weak,
}

impl TieredMultiKeyword {
    fn tier(coverage: &Coverage) -> Tier {
        if coverage.is_full() {
            Tier::Full
        } else if coverage.ratio >= PARTIAL_COVERAGE_MIN {
            Tier::Partial
        } else {
            Tier::Weak
        }
    }

    fn score(coverage: &Coverage, semantic: f64) -> f64 {
        let score = match Self::tier(coverage) {
            Tier::Full => {
                FULL_COVERAGE_FLOOR.max(coverage.avg_quality * 0.7 + semantic * 0.3)
            }
            Tier::Partial => coverage.avg_quality * coverage.ratio * 0.6 + semantic * 0.4,
            Tier::Weak => semantic * 0.8,
        };
        clamp_unit(score)
    }
}

impl ScoringStrategy for TieredMultiKeyword {
    fn kind(&self) -> ScoringStrategyKind {
        ScoringStrategyKind::TieredMultiKeyword
    }

    fn calculate_score(
        &self,
        keyword_scores: &KeywordScoreSet,
        semantic_score: f64,
        total_keywords: usize,
    ) -> f64 {
        let coverage = Coverage::of(keyword_scores, total_keywords);
        Self::score(&coverage, clamp_unit(semantic_score))
    }

    fn explain(
        &self,
        keyword_scores: &KeywordScoreSet,
        semantic_score: f64,
        total_keywords: usize,
    ) -> String {
        let coverage = Coverage::of(keyword_scores, total_keywords);
        let semantic = clamp_unit(semantic_score);
        let score = Self::score(&coverage, semantic);
        let branch = match Self::tier(&coverage) {
            Tier::Full => format!(
                "full coverage: max(0.85, {:.2}*0.7 + {semantic:.2}*0.3)",
                coverage.avg_quality
            ),
            Tier::Partial => format!(
                "partial coverage: {:.2}*{:.2}*0.6 + {semantic:.2}*0.4",
                coverage.avg_quality, coverage.ratio
            ),
            Tier::Weak => format!("low coverage: {semantic:.2}*0.8"),
        };
        format!(
            "TieredMultiKeyword: {}/{} keywords matched ({}% coverage); {branch} = {score:.2}",
            coverage.matched,
            coverage.total,
            coverage.percent()
        )
    }
}
