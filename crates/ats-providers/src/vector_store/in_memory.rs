//! In-memory candidate store
//!
//! Holds candidate records and their vectors in a concurrent map. Useful
//! for development and tests; nothing is persisted.

use async_trait::async_trait;
use dashmap::DashMap;

use ats_domain::error::{Error, Result};
use ats_domain::ports::CandidateVectorStore;
use ats_domain::value_objects::{CandidateMatch, CandidateProfile, KeywordEvidence, StoredVector};

struct CandidateEntry {
    profile: CandidateProfile,
    vector: Option<StoredVector>,
}

/// In-memory candidate vector store
pub struct InMemoryCandidateStore {
    candidates: DashMap<String, CandidateEntry>,
    dimensions: Option<usize>,
}

impl InMemoryCandidateStore {
    /// Create an empty store accepting vectors of any length
    pub fn new() -> Self {
        Self {
            candidates: DashMap::new(),
            dimensions: None,
        }
    }

    /// Create an empty store whose vector column has a fixed dimension
    pub fn with_dimensions(dimensions: usize) -> Self {
        Self {
            candidates: DashMap::new(),
            dimensions: Some(dimensions),
        }
    }

    /// Insert or replace a candidate record, keeping its current vector
    pub fn insert_candidate(&self, profile: CandidateProfile) {
        match self.candidates.get_mut(&profile.entity_id) {
            Some(mut entry) => entry.profile = profile,
            None => {
                self.candidates.insert(
                    profile.entity_id.clone(),
                    CandidateEntry {
                        profile,
                        vector: None,
                    },
                );
            }
        }
    }

    /// Remove a candidate record and its vector
    pub fn remove_candidate(&self, entity_id: &str) -> bool {
        self.candidates.remove(entity_id).is_some()
    }

    /// Number of candidate records
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether the store holds no candidate
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of candidates that have a vector
    pub fn vector_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|entry| entry.vector.is_some())
            .count()
    }
}

impl Default for InMemoryCandidateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CandidateVectorStore for InMemoryCandidateStore {
    async fn search_similar(
        &self,
        query_vector: &[f32],
        threshold: f64,
        limit: usize,
    ) -> Result<Vec<CandidateMatch>> {
        let query_norm = l2_norm(query_vector);

        let mut matches: Vec<CandidateMatch> = self
            .candidates
            .iter()
            .filter_map(|entry| {
                let stored = entry.vector.as_ref()?;
                if stored.vector.len() != query_vector.len() {
                    return None;
                }
                let similarity =
                    cosine_similarity_with_norm(query_vector, &stored.vector, query_norm);
                (similarity >= threshold).then(|| CandidateMatch {
                    entity_id: entry.key().clone(),
                    similarity,
                })
            })
            .collect();

        matches.sort_by(|a, b| {
            b.similarity
                .total_cmp(&a.similarity)
                .then_with(|| a.entity_id.cmp(&b.entity_id))
        });
        matches.truncate(limit);
        Ok(matches)
    }

    async fn keyword_evidence(
        &self,
        entity_id: &str,
        keywords: &[String],
    ) -> Result<KeywordEvidence> {
        self.candidates
            .get(entity_id)
            .map(|entry| KeywordEvidence::from_profile(&entry.profile, keywords))
            .ok_or_else(|| Error::not_found(format!("candidate {entity_id}")))
    }

    async fn upsert_vector(&self, vector: StoredVector) -> Result<()> {
        if let Some(expected) = self.dimensions {
            if vector.dimensions() != expected {
                return Err(Error::dimension_mismatch(
                    &vector.model,
                    expected,
                    vector.dimensions(),
                ));
            }
        }

        let mut entry = self
            .candidates
            .get_mut(&vector.entity_id)
            .ok_or_else(|| Error::not_found(format!("candidate {}", vector.entity_id)))?;
        entry.vector = Some(vector);
        Ok(())
    }

    async fn get_vector(&self, entity_id: &str) -> Result<Option<StoredVector>> {
        Ok(self
            .candidates
            .get(entity_id)
            .and_then(|entry| entry.vector.clone()))
    }

    fn dimensions(&self) -> Option<usize> {
        self.dimensions
    }

    fn provider_name(&self) -> &str {
        "memory"
    }
}

fn l2_norm(vector: &[f32]) -> f64 {
    vector
        .iter()
        .map(|v| f64::from(*v) * f64::from(*v))
        .sum::<f64>()
        .sqrt()
}

/// Raw cosine similarity in [-1, 1], 0 when either vector is all zeros
fn cosine_similarity_with_norm(a: &[f32], b: &[f32], norm_a: f64) -> f64 {
    let dot: f64 = a
        .iter()
        .zip(b)
        .map(|(x, y)| f64::from(*x) * f64::from(*y))
        .sum();
    let norm_b = l2_norm(b);

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
    }
}
