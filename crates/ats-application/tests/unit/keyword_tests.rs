//! Tests for keyword extraction and per-keyword scoring

use ats_application::{KeywordScorer, extract_keywords};
use ats_domain::{CandidateProfile, KeywordEvidence};

fn evidence(profile: &CandidateProfile, keywords: &[&str]) -> KeywordEvidence {
    let keywords: Vec<String> = keywords.iter().map(|k| (*k).to_string()).collect();
    KeywordEvidence::from_profile(profile, &keywords)
}

#[test]
fn test_extract_drops_conjunctions_and_short_tokens() {
    assert_eq!(
        extract_keywords("Kubernetes, Yugabyte and PostgreSQL"),
        vec!["kubernetes", "yugabyte", "postgresql"]
    );
    assert_eq!(extract_keywords("go or rust"), vec!["rust"]);
}

#[test]
fn test_extract_keeps_language_tokens() {
    assert_eq!(extract_keywords("C++ / Scala / .NET"), vec!["c++", "scala", ".net"]);
}

#[test]
fn test_extract_deduplicates_in_order() {
    assert_eq!(
        extract_keywords("Rust rust RUST; golang"),
        vec!["rust", "golang"]
    );
}

#[test]
fn test_extract_blank_query() {
    assert!(extract_keywords("   ").is_empty());
    assert!(extract_keywords("and or").is_empty());
}

#[test]
fn test_title_match_scores_highest() {
    let profile = CandidateProfile::new("c-1").with_title("Senior Kubernetes Engineer");
    let scorer = KeywordScorer::new();
    let score = scorer.score_keyword("kubernetes", &evidence(&profile, &["kubernetes"]));
    assert!((score - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_skill_tag_scores_below_title() {
    let profile = CandidateProfile::new("c-1")
        .with_title("Backend Engineer")
        .with_skills(["PostgreSQL", "Rust"]);
    let scorer = KeywordScorer::new();
    let score = scorer.score_keyword("postgresql", &evidence(&profile, &["postgresql"]));
    assert!((score - 0.95).abs() < f64::EPSILON);
}

#[test]
fn test_body_occurrence_tiers() {
    let scorer = KeywordScorer::new();
    let cases = [(0, 0.0), (1, 0.5), (2, 0.7), (4, 0.7), (5, 0.9), (9, 0.9)];

    for (occurrences, expected) in cases {
        let body = "yugabyte ".repeat(occurrences);
        let profile = CandidateProfile::new("c-1").with_body_text(body);
        let score = scorer.score_keyword("yugabyte", &evidence(&profile, &["yugabyte"]));
        assert!(
            (score - expected).abs() < f64::EPSILON,
            "{occurrences} occurrences scored {score}, expected {expected}"
        );
    }
}

#[test]
fn test_title_takes_precedence_over_body() {
    let profile = CandidateProfile::new("c-1")
        .with_title("Rust Developer")
        .with_body_text("rust");
    let scorer = KeywordScorer::new();
    let score = scorer.score_keyword("rust", &evidence(&profile, &["rust"]));
    assert!((score - 1.0).abs() < f64::EPSILON);
}

#[test]
fn test_score_all_covers_every_keyword() {
    let profile = CandidateProfile::new("c-1")
        .with_title("SRE")
        .with_skills(["terraform"])
        .with_body_text("Kubernetes clusters, kubernetes operators");
    let keywords = vec![
        "kubernetes".to_string(),
        "terraform".to_string(),
        "golang".to_string(),
    ];
    let evidence = KeywordEvidence::from_profile(&profile, &keywords);

    let scores = KeywordScorer::new().score_all(&keywords, &evidence);
    assert_eq!(scores.len(), 3);
    assert!((scores["kubernetes"] - 0.7).abs() < f64::EPSILON);
    assert!((scores["terraform"] - 0.95).abs() < f64::EPSILON);
    assert!(scores["golang"].abs() < f64::EPSILON);
}
