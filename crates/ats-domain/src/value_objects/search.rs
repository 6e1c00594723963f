//! Search request and response types

use serde::{Deserialize, Serialize};

use super::scoring::{KeywordScoreSet, ScoringStrategyKind};
use crate::error::{Error, Result};

/// Inbound hybrid search request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Free-text query
    pub query: String,
    /// 1-based page number
    pub page: usize,
    /// Results per page
    pub page_size: usize,
    /// Tenant whose scoring settings apply
    pub tenant_id: String,
}

impl SearchRequest {
    /// Create a request for the first page
    pub fn new(query: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            page: 1,
            page_size: 20,
            tenant_id: tenant_id.into(),
        }
    }

    /// Select a page
    pub fn with_page(mut self, page: usize, page_size: usize) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// Reject pages and page sizes below 1
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(Error::invalid_argument("page must be >= 1"));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_argument("pageSize must be >= 1"));
        }
        Ok(())
    }

    /// Number of ranked items to skip for this page
    pub fn offset(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// One entry of the similarity-ranked candidate pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMatch {
    /// Entity identifier
    pub entity_id: String,
    /// Cosine similarity to the query vector
    pub similarity: f64,
}

/// One scored, explained search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResult {
    /// Entity identifier
    pub entity_id: String,
    /// Cosine similarity from the pool query
    pub semantic_score: f64,
    /// Per-keyword scores
    pub keyword_scores: KeywordScoreSet,
    /// Strategy output in [0, 1]
    pub final_score: f64,
    /// Human-readable account of the strategy branch taken
    pub explanation: String,
}

/// A page of ranked results
///
/// `total_scored` counts the bounded pool that was re-ranked, never the
/// whole corpus; `approximate` is always set to make that explicit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    /// Ranked results for the requested page
    pub results: Vec<RankedResult>,
    /// Number of pooled candidates that were scored
    pub total_scored: usize,
    /// Requested page
    pub page: usize,
    /// Requested page size
    pub page_size: usize,
    /// Pool cap in effect
    pub pool_size: usize,
    /// The ranking covers only the pool, not the full corpus
    pub approximate: bool,
    /// Strategy applied
    pub strategy: ScoringStrategyKind,
}

impl SearchPage {
    /// Page with no results (empty query, empty pool)
    pub fn empty(request: &SearchRequest, pool_size: usize, strategy: ScoringStrategyKind) -> Self {
        Self {
            results: Vec::new(),
            total_scored: 0,
            page: request.page,
            page_size: request.page_size,
            pool_size,
            approximate: true,
            strategy,
        }
    }
}
