//! Tests for the scoring strategies

use ats_application::{AllOrNothing, ScoringStrategy, TieredMultiKeyword, strategy_for};
use ats_domain::{KeywordScoreSet, ScoringStrategyKind};

fn scores(entries: &[(&str, f64)]) -> KeywordScoreSet {
    entries
        .iter()
        .map(|(keyword, score)| ((*keyword).to_string(), *score))
        .collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_all_or_nothing_full_coverage_wins() {
    let set = scores(&[("kubernetes", 1.0), ("yugabyte", 0.5), ("postgresql", 0.7)]);
    assert_close(AllOrNothing.calculate_score(&set, 0.31, 3), 1.0);
}

#[test]
fn test_all_or_nothing_partial_coverage_falls_back_to_semantic() {
    let set = scores(&[("kubernetes", 1.0), ("yugabyte", 0.0), ("postgresql", 0.9)]);
    assert_close(AllOrNothing.calculate_score(&set, 0.64, 3), 0.64);
}

#[test]
fn test_all_or_nothing_without_keywords_uses_semantic() {
    assert_close(AllOrNothing.calculate_score(&KeywordScoreSet::new(), 0.42, 0), 0.42);
}

#[test]
fn test_tiered_full_coverage_blend() {
    let set = scores(&[("kubernetes", 1.0), ("yugabyte", 0.9), ("postgresql", 0.85)]);
    let score = TieredMultiKeyword.calculate_score(&set, 0.92, 3);
    assert_close(score, 0.9177);
}

#[test]
fn test_tiered_full_coverage_floor() {
    let set = scores(&[("kubernetes", 0.5), ("yugabyte", 0.5)]);
    assert_close(TieredMultiKeyword.calculate_score(&set, 0.2, 2), 0.85);
}

#[test]
fn test_tiered_partial_coverage_blend() {
    let set = scores(&[("kubernetes", 1.0), ("yugabyte", 0.0), ("postgresql", 0.8)]);
    let score = TieredMultiKeyword.calculate_score(&set, 0.70, 3);
    assert_close(score, 0.52);
}

#[test]
fn test_tiered_half_coverage_is_partial() {
    let set = scores(&[("rust", 1.0), ("golang", 0.0)]);
    // 1.0/2 * 0.5 * 0.6 + 0.5 * 0.4
    assert_close(TieredMultiKeyword.calculate_score(&set, 0.5, 2), 0.35);
    assert!(
        TieredMultiKeyword
            .explain(&set, 0.5, 2)
            .contains("partial coverage")
    );
}

#[test]
fn test_tiered_low_coverage_discounts_semantic() {
    let set = scores(&[("rust", 0.5), ("golang", 0.0), ("scala", 0.0)]);
    assert_close(TieredMultiKeyword.calculate_score(&set, 0.6, 3), 0.48);
    assert_close(
        TieredMultiKeyword.calculate_score(&KeywordScoreSet::new(), 0.6, 0),
        0.48,
    );
}

#[test]
fn test_missing_keywords_count_against_coverage() {
    // Only two of three query keywords made it into the score set
    let set = scores(&[("rust", 1.0), ("golang", 1.0)]);
    assert_close(AllOrNothing.calculate_score(&set, 0.4, 3), 0.4);
    assert!(TieredMultiKeyword.calculate_score(&set, 0.4, 3) < 0.85);
}

#[test]
fn test_scores_stay_in_unit_interval() {
    let strategies: [&dyn ScoringStrategy; 2] = [&AllOrNothing, &TieredMultiKeyword];
    let sets = [
        KeywordScoreSet::new(),
        scores(&[("a1x", 1.0)]),
        scores(&[("a1x", 1.3), ("b2y", 1.2)]),
        scores(&[("a1x", 0.0), ("b2y", 0.95), ("c3z", 0.5)]),
    ];

    for strategy in strategies {
        for set in &sets {
            for semantic in [-1.0, -0.2, 0.0, 0.3, 0.99, 1.0, 1.5, f64::NAN] {
                let score = strategy.calculate_score(set, semantic, set.len());
                assert!(
                    (0.0..=1.0).contains(&score),
                    "{:?} produced {score} for semantic {semantic}",
                    strategy.kind()
                );
            }
        }
    }
}

#[test]
fn test_tiered_is_monotone_in_coverage() {
    let keywords = ["k1x", "k2x", "k3x", "k4x", "k5x"];

    for quality in [0.6, 0.8, 1.0] {
        for semantic in [0.1, 0.2, 0.3] {
            let mut previous = f64::NEG_INFINITY;
            for matched in 0..=keywords.len() {
                let set: KeywordScoreSet = keywords
                    .iter()
                    .enumerate()
                    .map(|(i, k)| ((*k).to_string(), if i < matched { quality } else { 0.0 }))
                    .collect();
                let score = TieredMultiKeyword.calculate_score(&set, semantic, keywords.len());
                assert!(
                    score >= previous,
                    "coverage {matched}/5 at quality {quality}, semantic {semantic}: {score} < {previous}"
                );
                previous = score;
            }
        }
    }
}

#[test]
fn test_explanations_name_strategy_and_coverage() {
    let set = scores(&[("kubernetes", 1.0), ("yugabyte", 0.0), ("postgresql", 0.8)]);

    let tiered = TieredMultiKeyword.explain(&set, 0.70, 3);
    assert!(tiered.starts_with("TieredMultiKeyword: 2/3 keywords matched (67% coverage)"));
    assert!(tiered.ends_with("= 0.52"), "{tiered}");

    let all_or_nothing = AllOrNothing.explain(&set, 0.70, 3);
    assert!(all_or_nothing.starts_with("AllOrNothing: 2/3 keywords matched (67% coverage)"));
}

#[test]
fn test_strategy_for_maps_every_kind() {
    assert_eq!(
        strategy_for(ScoringStrategyKind::AllOrNothing).kind(),
        ScoringStrategyKind::AllOrNothing
    );
    assert_eq!(
        strategy_for(ScoringStrategyKind::TieredMultiKeyword).kind(),
        ScoringStrategyKind::TieredMultiKeyword
    );
}
