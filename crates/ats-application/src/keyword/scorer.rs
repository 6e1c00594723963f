use ats_domain::constants::{
    KEYWORD_FREQUENT_OCCURRENCES, KEYWORD_SCORE_FREQUENT, KEYWORD_SCORE_REPEATED,
    KEYWORD_SCORE_SINGLE, KEYWORD_SCORE_SKILL, KEYWORD_SCORE_TITLE,
};
use ats_domain::{KeywordEvidence, KeywordScoreSet};

/// Per-keyword relevance against one candidate
///
/// Rules are checked in priority order; the first that applies wins:
///
/// | Condition | Score |
/// |-----------|-------|
/// | substring of the title | 1.0 |
/// | equals a skill tag | 0.95 |
/// | >= 5 body occurrences | 0.9 |
/// | 2-4 body occurrences | 0.7 |
/// | 1 body occurrence | 0.5 |
/// | otherwise | 0.0 |
///
/// All comparisons are case-insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordScorer;

impl KeywordScorer {
    /// Create a scorer
    pub fn new() -> Self {
        Self
    }

    /// Score one keyword
    pub fn score_keyword(&self, keyword: &str, evidence: &KeywordEvidence) -> f64 {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return 0.0;
        }

        if evidence.title.to_lowercase().contains(&needle) {
            return KEYWORD_SCORE_TITLE;
        }

        if evidence
            .skills
            .iter()
            .any(|skill| skill.trim().to_lowercase() == needle)
        {
            return KEYWORD_SCORE_SKILL;
        }

        match evidence.occurrences(keyword) {
            n if n >= KEYWORD_FREQUENT_OCCURRENCES => KEYWORD_SCORE_FREQUENT,
            n if n >= 2 => KEYWORD_SCORE_REPEATED,
            1 => KEYWORD_SCORE_SINGLE,
            _ => 0.0,
        }
    }

    /// Score every keyword, producing the candidate's score set
    pub fn score_all(&self, keywords: &[String], evidence: &KeywordEvidence) -> KeywordScoreSet {
        keywords
            .iter()
            .map(|keyword| (keyword.clone(), self.score_keyword(keyword, evidence)))
            .collect()
    }
}
