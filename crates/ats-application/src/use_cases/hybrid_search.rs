//! Hybrid Search Use Case
//!
//! Request-time coordinator of the candidate search.
//!
//! ```text
//! query ──> keywords
//!   │
//!   └─> EmbeddingProvider ──> query vector
//!                               │
//!                               v
//!         CandidateVectorStore::search_similar  (threshold, pool cap)
//!                               │
//!                               v
//!         keyword evidence per candidate  (bounded parallelism)
//!                               │
//!                               v
//!         KeywordScorer + ScoringStrategy ──> full re-sort ──> page
//! ```

use std::cmp::Ordering;
use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use ats_domain::constants::DEFAULT_POOL_SIZE;
use ats_domain::error::{Error, Result};
use ats_domain::ports::{CandidateVectorStore, EmbeddingProvider};
use ats_domain::{CandidateMatch, RankedResult, ScoringConfig, SearchPage, SearchRequest};
use futures::{StreamExt, TryStreamExt, stream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::keyword::{KeywordScorer, extract_keywords};
use crate::scoring::strategy_for;

/// Limits applied to every search request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchSettings {
    /// Cap of the similarity-ranked pool that gets re-ranked
    pub pool_size: usize,
    /// Maximum concurrent keyword-evidence lookups
    pub keyword_concurrency: usize,
    /// Deadline for the whole request
    pub request_timeout: Duration,
    /// Deadline for each provider or storage call
    pub call_timeout: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            keyword_concurrency: 8,
            request_timeout: Duration::from_secs(30),
            call_timeout: Duration::from_secs(10),
        }
    }
}

/// Hybrid semantic/keyword candidate search
///
/// Stateless apart from its shared providers; one instance serves all
/// concurrent requests.
pub struct HybridSearchService {
    embedding_provider: Arc<dyn EmbeddingProvider>,
    vector_store: Arc<dyn CandidateVectorStore>,
    scorer: KeywordScorer,
    settings: SearchSettings,
}

impl HybridSearchService {
    /// Create the service with injected providers
    pub fn new(
        embedding_provider: Arc<dyn EmbeddingProvider>,
        vector_store: Arc<dyn CandidateVectorStore>,
        settings: SearchSettings,
    ) -> Self {
        Self {
            embedding_provider,
            vector_store,
            scorer: KeywordScorer::new(),
            settings,
        }
    }

    /// Limits in effect
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Run one search request
    ///
    /// The request fails as a whole when `cancel` fires or the request
    /// deadline passes; partial rankings are never returned. An empty query
    /// returns an empty page without calling any provider.
    pub async fn search(
        &self,
        request: &SearchRequest,
        config: &ScoringConfig,
        cancel: &CancellationToken,
    ) -> Result<SearchPage> {
        request.validate()?;

        if request.query.trim().is_empty() {
            debug!(tenant_id = %request.tenant_id, "Empty query, returning empty page");
            return Ok(self.empty_page(request, config));
        }

        let deadline = self.settings.request_timeout;
        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                warn!(tenant_id = %request.tenant_id, "Search request cancelled");
                Err(Error::cancelled("search"))
            }
            outcome = tokio::time::timeout(deadline, self.rank(request, config)) => {
                outcome.unwrap_or_else(|_| Err(Error::storage_timeout("search", deadline)))
            }
        }
    }

    async fn rank(&self, request: &SearchRequest, config: &ScoringConfig) -> Result<SearchPage> {
        let started = Instant::now();
        let keywords = extract_keywords(&request.query);
        let query_vector = self.embed_query(&request.query).await?;

        let pool = self
            .store_call(
                "search_similar",
                self.vector_store.search_similar(
                    &query_vector,
                    config.similarity_threshold,
                    self.settings.pool_size,
                ),
            )
            .await?;

        if pool.is_empty() {
            debug!(tenant_id = %request.tenant_id, "No candidate above the similarity threshold");
            return Ok(self.empty_page(request, config));
        }

        let mut ranked = self.score_pool(pool, &keywords, config).await?;
        ranked.sort_by(compare_ranked);

        let total_scored = ranked.len();
        let results: Vec<RankedResult> = ranked
            .into_iter()
            .skip(request.offset())
            .take(request.page_size)
            .collect();

        info!(
            tenant_id = %request.tenant_id,
            strategy = %config.strategy,
            keywords = keywords.len(),
            total_scored,
            returned = results.len(),
            elapsed_ms = started.elapsed().as_millis(),
            "Hybrid search completed"
        );

        Ok(SearchPage {
            results,
            total_scored,
            page: request.page,
            page_size: request.page_size,
            pool_size: self.settings.pool_size,
            approximate: true,
            strategy: config.strategy,
        })
    }

    async fn embed_query(&self, query: &str) -> Result<Vec<f32>> {
        let provider = self.embedding_provider.provider_name();
        let timeout = self.settings.call_timeout;
        let embedding = tokio::time::timeout(timeout, self.embedding_provider.embed(query))
            .await
            .map_err(|_| {
                Error::provider_unavailable(
                    provider,
                    format!("query embedding timed out after {timeout:?}"),
                )
            })??;

        if embedding.is_empty() {
            return Err(Error::empty_embedding("search query"));
        }
        embedding.validate_dimensions(self.embedding_provider.dimensions())?;
        Ok(embedding.vector)
    }

    /// Score every pooled candidate with bounded parallelism
    async fn score_pool(
        &self,
        pool: Vec<CandidateMatch>,
        keywords: &[String],
        config: &ScoringConfig,
    ) -> Result<Vec<RankedResult>> {
        let strategy = strategy_for(config.strategy);
        let concurrency = self.settings.keyword_concurrency.max(1);

        let scored: Vec<Option<RankedResult>> = stream::iter(pool)
            .map(|candidate| async move {
                let keyword_scores = if keywords.is_empty() {
                    Default::default()
                } else {
                    let lookup = self.store_call(
                        "keyword_evidence",
                        self.vector_store
                            .keyword_evidence(&candidate.entity_id, keywords),
                    );
                    match lookup.await {
                        Ok(evidence) => self.scorer.score_all(keywords, &evidence),
                        Err(Error::NotFound { resource }) => {
                            warn!(
                                entity_id = %candidate.entity_id,
                                %resource,
                                "Pooled candidate vanished, skipping"
                            );
                            return Ok(None);
                        }
                        Err(e) => return Err(e),
                    }
                };

                let semantic_score = candidate.similarity;
                let final_score =
                    strategy.calculate_score(&keyword_scores, semantic_score, keywords.len());
                let explanation =
                    strategy.explain(&keyword_scores, semantic_score, keywords.len());

                Ok(Some(RankedResult {
                    entity_id: candidate.entity_id,
                    semantic_score,
                    keyword_scores,
                    final_score,
                    explanation,
                }))
            })
            .buffer_unordered(concurrency)
            .try_collect()
            .await?;

        Ok(scored.into_iter().flatten().collect())
    }

    async fn store_call<T, F>(&self, operation: &str, call: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let timeout = self.settings.call_timeout;
        tokio::time::timeout(timeout, call)
            .await
            .map_err(|_| Error::storage_timeout(operation, timeout))?
    }

    fn empty_page(&self, request: &SearchRequest, config: &ScoringConfig) -> SearchPage {
        SearchPage::empty(request, self.settings.pool_size, config.strategy)
    }
}

/// Final score descending, then semantic score descending, then entity id
fn compare_ranked(a: &RankedResult, b: &RankedResult) -> Ordering {
    b.final_score
        .total_cmp(&a.final_score)
        .then_with(|| b.semantic_score.total_cmp(&a.semantic_score))
        .then_with(|| a.entity_id.cmp(&b.entity_id))
}
