//! Tests for the hybrid search use case

use std::sync::Arc;
use std::time::Duration;

use ats_application::{HybridSearchService, SearchSettings};
use ats_domain::{CandidateProfile, Error, ScoringConfig, ScoringStrategyKind, SearchRequest};
use tokio_util::sync::CancellationToken;

use crate::test_doubles::{
    InstrumentedStore, StubEmbeddingProvider, StubMode, vector_with_similarity,
};

fn service(
    provider: Arc<StubEmbeddingProvider>,
    store: Arc<InstrumentedStore>,
    settings: SearchSettings,
) -> HybridSearchService {
    HybridSearchService::new(provider, store, settings)
}

fn config() -> ScoringConfig {
    ScoringConfig::default().with_similarity_threshold(0.0)
}

#[tokio::test]
async fn test_empty_query_skips_providers() {
    let provider = Arc::new(StubEmbeddingProvider::axis(2));
    let store = Arc::new(InstrumentedStore::new());
    let search = service(provider.clone(), store, SearchSettings::default());

    let page = search
        .search(&SearchRequest::new("   ", "acme"), &config(), &CancellationToken::new())
        .await
        .expect("search");

    assert!(page.results.is_empty());
    assert_eq!(page.total_scored, 0);
    assert_eq!(provider.calls(), 0);
}

#[tokio::test]
async fn test_invalid_page_is_rejected() {
    let provider = Arc::new(StubEmbeddingProvider::axis(2));
    let store = Arc::new(InstrumentedStore::new());
    let search = service(provider, store, SearchSettings::default());

    let request = SearchRequest::new("rust", "acme").with_page(0, 10);
    let result = search.search(&request, &config(), &CancellationToken::new()).await;
    assert!(matches!(result, Err(ref e) if e.is_client_error()));
}

#[tokio::test]
async fn test_provider_failure_fails_the_request() {
    let provider = Arc::new(StubEmbeddingProvider::new(StubMode::Unavailable, 2));
    let store = Arc::new(InstrumentedStore::new());
    store
        .add(CandidateProfile::new("c-1"), vector_with_similarity(0.9))
        .await;
    let search = service(provider, store, SearchSettings::default());

    let result = search
        .search(&SearchRequest::new("rust", "acme"), &config(), &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(Error::ProviderUnavailable { .. })));
}

#[tokio::test]
async fn test_empty_query_embedding_is_an_error() {
    let provider = Arc::new(StubEmbeddingProvider::new(StubMode::Empty, 2));
    let store = Arc::new(InstrumentedStore::new());
    let search = service(provider, store, SearchSettings::default());

    let result = search
        .search(&SearchRequest::new("rust", "acme"), &config(), &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(Error::EmptyEmbedding { .. })));
}

#[tokio::test]
async fn test_keyword_match_outranks_closer_candidate() {
    let provider = Arc::new(StubEmbeddingProvider::axis(2));
    let store = Arc::new(InstrumentedStore::new());
    store
        .add(
            CandidateProfile::new("close").with_title("Data Analyst"),
            vector_with_similarity(0.95),
        )
        .await;
    store
        .add(
            CandidateProfile::new("matching")
                .with_title("Kubernetes Engineer")
                .with_skills(["PostgreSQL"])
                .with_body_text("Migrated to Yugabyte."),
            vector_with_similarity(0.5),
        )
        .await;
    let search = service(provider, store, SearchSettings::default());

    let page = search
        .search(
            &SearchRequest::new("Kubernetes, Yugabyte and PostgreSQL", "acme"),
            &config(),
            &CancellationToken::new(),
        )
        .await
        .expect("search");

    assert_eq!(page.total_scored, 2);
    assert_eq!(page.results[0].entity_id, "matching");
    assert!((page.results[0].final_score - 1.0).abs() < 1e-9);
    assert_eq!(page.results[0].keyword_scores.len(), 3);
    assert!(page.results[0].explanation.starts_with("AllOrNothing: 3/3"));
    assert_eq!(page.results[1].entity_id, "close");
    assert!((page.results[1].final_score - 0.95).abs() < 1e-4);
    assert!(page.approximate);
    assert_eq!(page.strategy, ScoringStrategyKind::AllOrNothing);
}

#[tokio::test]
async fn test_threshold_bounds_the_pool() {
    let provider = Arc::new(StubEmbeddingProvider::axis(2));
    let store = Arc::new(InstrumentedStore::new());
    store
        .add(CandidateProfile::new("near"), vector_with_similarity(0.8))
        .await;
    store
        .add(CandidateProfile::new("far"), vector_with_similarity(0.1))
        .await;
    let search = service(provider, store, SearchSettings::default());

    let page = search
        .search(
            &SearchRequest::new("platform engineer", "acme"),
            &ScoringConfig::default().with_similarity_threshold(0.3),
            &CancellationToken::new(),
        )
        .await
        .expect("search");

    let ids: Vec<&str> = page.results.iter().map(|r| r.entity_id.as_str()).collect();
    assert_eq!(ids, vec!["near"]);
}

#[tokio::test]
async fn test_pagination_slices_the_full_ranking() {
    let provider = Arc::new(StubEmbeddingProvider::axis(2));
    let store = Arc::new(InstrumentedStore::new());
    for i in 0..35_u16 {
        let similarity = 0.95 - f32::from(i) * 0.02;
        store
            .add(
                CandidateProfile::new(format!("c-{i:02}")),
                vector_with_similarity(similarity),
            )
            .await;
    }
    let search = service(provider, store, SearchSettings::default());
    let cancel = CancellationToken::new();

    let full = search
        .search(
            &SearchRequest::new("distributed systems", "acme").with_page(1, 35),
            &config(),
            &cancel,
        )
        .await
        .expect("full ranking");
    let page_two = search
        .search(
            &SearchRequest::new("distributed systems", "acme").with_page(2, 10),
            &config(),
            &cancel,
        )
        .await
        .expect("page two");

    assert_eq!(full.total_scored, 35);
    assert_eq!(page_two.total_scored, 35);
    assert_eq!(page_two.page, 2);
    assert_eq!(page_two.results, full.results[10..20].to_vec());

    let past_end = search
        .search(
            &SearchRequest::new("distributed systems", "acme").with_page(5, 10),
            &config(),
            &cancel,
        )
        .await
        .expect("past the end");
    assert!(past_end.results.is_empty());
}

#[tokio::test]
async fn test_pool_size_caps_scored_candidates() {
    let provider = Arc::new(StubEmbeddingProvider::axis(2));
    let store = Arc::new(InstrumentedStore::new());
    for i in 0..12_u16 {
        store
            .add(
                CandidateProfile::new(format!("c-{i:02}")),
                vector_with_similarity(0.9 - f32::from(i) * 0.01),
            )
            .await;
    }
    let settings = SearchSettings {
        pool_size: 5,
        ..SearchSettings::default()
    };
    let search = service(provider, store, settings);

    let page = search
        .search(&SearchRequest::new("rust", "acme"), &config(), &CancellationToken::new())
        .await
        .expect("search");
    assert_eq!(page.total_scored, 5);
    assert_eq!(page.pool_size, 5);
}

#[tokio::test(start_paused = true)]
async fn test_keyword_lookups_are_bounded() {
    let provider = Arc::new(StubEmbeddingProvider::axis(2));
    let store = Arc::new(InstrumentedStore::new().with_evidence_delay(Duration::from_millis(20)));
    for i in 0..20_u16 {
        store
            .add(
                CandidateProfile::new(format!("c-{i:02}")).with_body_text("rust"),
                vector_with_similarity(0.9),
            )
            .await;
    }
    let settings = SearchSettings {
        keyword_concurrency: 3,
        ..SearchSettings::default()
    };
    let search = service(provider, store.clone(), settings);

    let page = search
        .search(&SearchRequest::new("rust", "acme"), &config(), &CancellationToken::new())
        .await
        .expect("search");

    assert_eq!(page.total_scored, 20);
    assert_eq!(store.evidence_calls(), 20);
    assert!(store.max_in_flight() <= 3, "{} lookups ran at once", store.max_in_flight());
    assert!(store.max_in_flight() > 1);
}

#[tokio::test]
async fn test_vanished_candidate_is_skipped() {
    let provider = Arc::new(StubEmbeddingProvider::axis(2));
    let store = Arc::new(InstrumentedStore::new());
    store
        .add(CandidateProfile::new("kept"), vector_with_similarity(0.9))
        .await;
    store
        .add(CandidateProfile::new("deleted"), vector_with_similarity(0.8))
        .await;
    store.mark_vanished("deleted");
    let search = service(provider, store, SearchSettings::default());

    let page = search
        .search(&SearchRequest::new("rust", "acme"), &config(), &CancellationToken::new())
        .await
        .expect("search");
    let ids: Vec<&str> = page.results.iter().map(|r| r.entity_id.as_str()).collect();
    assert_eq!(ids, vec!["kept"]);
    assert_eq!(page.total_scored, 1);
}

#[tokio::test]
async fn test_cancelled_request_returns_no_results() {
    let provider = Arc::new(StubEmbeddingProvider::new(
        StubMode::Slow(Duration::from_secs(60), vec![1.0, 0.0]),
        2,
    ));
    let store = Arc::new(InstrumentedStore::new());
    let search = service(provider, store, SearchSettings::default());

    let cancel = CancellationToken::new();
    cancel.cancel();
    let result = search
        .search(&SearchRequest::new("rust", "acme"), &config(), &cancel)
        .await;
    assert!(matches!(result, Err(Error::Cancelled { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_request_deadline_fails_the_request() {
    let provider = Arc::new(StubEmbeddingProvider::new(
        StubMode::Slow(Duration::from_secs(60), vec![1.0, 0.0]),
        2,
    ));
    let store = Arc::new(InstrumentedStore::new());
    let settings = SearchSettings {
        request_timeout: Duration::from_secs(1),
        call_timeout: Duration::from_secs(10),
        ..SearchSettings::default()
    };
    let search = service(provider, store, settings);

    let result = search
        .search(&SearchRequest::new("rust", "acme"), &config(), &CancellationToken::new())
        .await;
    assert!(matches!(result, Err(Error::StorageTimeout { .. })));
}

#[tokio::test]
async fn test_tiered_strategy_is_applied() {
    let provider = Arc::new(StubEmbeddingProvider::axis(2));
    let store = Arc::new(InstrumentedStore::new());
    store
        .add(
            CandidateProfile::new("c-1").with_title("Rust Engineer"),
            vector_with_similarity(0.6),
        )
        .await;
    let search = service(provider, store, SearchSettings::default());

    let tiered = config().with_strategy(ScoringStrategyKind::TieredMultiKeyword);
    let page = search
        .search(&SearchRequest::new("rust golang", "acme"), &tiered, &CancellationToken::new())
        .await
        .expect("search");

    let result = &page.results[0];
    // 1.0/2 * 0.5 * 0.6 + 0.6 * 0.4
    assert!((result.final_score - 0.39).abs() < 1e-4, "{}", result.final_score);
    assert!(result.explanation.starts_with("TieredMultiKeyword: 1/2"));
    assert_eq!(page.strategy, ScoringStrategyKind::TieredMultiKeyword);
}
