//! Candidate records as seen by the search core

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Candidate fields the search core reads
///
/// The record itself lives in external storage; this is the projection the
/// keyword scorer and the embedding pipeline need.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CandidateProfile {
    /// Entity identifier
    pub entity_id: String,
    /// Current or headline job title
    pub title: String,
    /// Structured skill tags
    pub skills: Vec<String>,
    /// Short summary used as embedding context
    pub profile_text: String,
    /// Full long-form text (resume body, notes)
    pub body_text: String,
}

impl CandidateProfile {
    /// Create a profile with only an id; use the `with_*` builders for the rest
    pub fn new(entity_id: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            ..Default::default()
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the skill tags
    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.skills = skills.into_iter().map(Into::into).collect();
        self
    }

    /// Set the summary text
    pub fn with_profile_text(mut self, text: impl Into<String>) -> Self {
        self.profile_text = text.into();
        self
    }

    /// Set the long-form body text
    pub fn with_body_text(mut self, text: impl Into<String>) -> Self {
        self.body_text = text.into();
        self
    }
}

/// Everything the keyword scorer needs to know about one candidate
///
/// Fetched from storage in one call per candidate: title, skill tags and
/// the case-insensitive occurrence count of every requested keyword in the
/// body text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeywordEvidence {
    /// Candidate title
    pub title: String,
    /// Structured skill tags
    pub skills: Vec<String>,
    /// keyword -> occurrences in the body text
    pub body_occurrences: HashMap<String, usize>,
}

impl KeywordEvidence {
    /// Compute evidence locally from a full profile
    pub fn from_profile(profile: &CandidateProfile, keywords: &[String]) -> Self {
        let body = profile.body_text.to_lowercase();
        let body_occurrences = keywords
            .iter()
            .map(|keyword| (keyword.clone(), count_occurrences(&body, keyword)))
            .collect();

        Self {
            title: profile.title.clone(),
            skills: profile.skills.clone(),
            body_occurrences,
        }
    }

    /// Occurrences recorded for a keyword (0 when absent)
    pub fn occurrences(&self, keyword: &str) -> usize {
        self.body_occurrences.get(keyword).copied().unwrap_or(0)
    }
}

/// Non-overlapping, case-insensitive occurrences of `needle` in a lower-cased haystack
pub fn count_occurrences(lowered_haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    lowered_haystack.matches(&needle.to_lowercase()).count()
}
