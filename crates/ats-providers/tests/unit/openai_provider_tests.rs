//! Tests for the OpenAI-compatible provider against a mock server

use std::time::Duration;

use ats_domain::Error;
use ats_domain::ports::EmbeddingProvider;
use ats_providers::OpenAIEmbeddingProvider;
use mockito::Matcher;
use serde_json::json;

fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("http client")
}

fn provider(url: &str, dimensions: usize) -> OpenAIEmbeddingProvider {
    OpenAIEmbeddingProvider::new(
        "test-key",
        Some(url),
        "text-embedding-3-small",
        Duration::from_secs(5),
        http_client(),
    )
    .with_dimensions(Some(dimensions))
}

#[tokio::test]
async fn test_batch_request_and_response() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/embeddings")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "text-embedding-3-small",
            "input": ["first", "second"],
            "dimensions": 3
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "data": [
                    {"index": 1, "embedding": [0.0, 1.0, 0.0]},
                    {"index": 0, "embedding": [1.0, 0.0, 0.0]}
                ],
                "model": "text-embedding-3-small",
                "usage": {"prompt_tokens": 4, "total_tokens": 4}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let provider = provider(&server.url(), 3);
    let texts = vec!["first".to_string(), "second".to_string()];
    let embeddings = provider.embed_batch(&texts).await.expect("embed batch");

    mock.assert_async().await;
    assert_eq!(embeddings.len(), 2);
    assert_eq!(embeddings[0].vector, vec![1.0, 0.0, 0.0]);
    assert_eq!(embeddings[1].vector, vec![0.0, 1.0, 0.0]);
    assert_eq!(embeddings[0].model, "text-embedding-3-small");
}

#[tokio::test]
async fn test_rate_limit_is_provider_unavailable() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/embeddings")
        .with_status(429)
        .with_body("slow down")
        .create_async()
        .await;

    let error = provider(&server.url(), 3)
        .embed("query")
        .await
        .expect_err("429 must fail");
    assert!(matches!(error, Error::ProviderUnavailable { .. }), "{error}");
    assert!(error.is_transient());
}

#[tokio::test]
async fn test_bad_request_is_not_transient() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/embeddings")
        .with_status(400)
        .with_body("bad input")
        .create_async()
        .await;

    let error = provider(&server.url(), 3)
        .embed("query")
        .await
        .expect_err("400 must fail");
    assert!(matches!(error, Error::Embedding { .. }), "{error}");
    assert!(!error.is_transient());
}

#[tokio::test]
async fn test_wrong_dimension_is_rejected() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/embeddings")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({"data": [{"index": 0, "embedding": [1.0, 2.0]}]}).to_string())
        .create_async()
        .await;

    let error = provider(&server.url(), 3)
        .embed("query")
        .await
        .expect_err("dimension mismatch");
    assert!(matches!(
        error,
        Error::DimensionMismatch {
            expected: 3,
            actual: 2,
            ..
        }
    ));
}

#[tokio::test]
async fn test_unreachable_backend_is_provider_unavailable() {
    let provider = provider("http://127.0.0.1:9", 3);
    let error = provider.embed("query").await.expect_err("nothing listens");
    assert!(matches!(error, Error::ProviderUnavailable { .. }), "{error}");
    assert!(!provider.is_available().await);
}

#[tokio::test]
async fn test_availability_check() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/models")
        .with_status(200)
        .with_body("{\"data\": []}")
        .create_async()
        .await;

    assert!(provider(&server.url(), 3).is_available().await);
}

#[test]
fn test_declared_dimensions_per_model() {
    let client = http_client();
    let large = OpenAIEmbeddingProvider::new(
        "k",
        None,
        "text-embedding-3-large",
        Duration::from_secs(1),
        client.clone(),
    );
    assert_eq!(large.dimensions(), 3072);
    assert_eq!(large.base_url(), "https://api.openai.com/v1");

    let small = OpenAIEmbeddingProvider::new(
        "k",
        Some("http://gw/v1/"),
        "text-embedding-3-small",
        Duration::from_secs(1),
        client,
    );
    assert_eq!(small.dimensions(), 1536);
    assert_eq!(small.base_url(), "http://gw/v1");
}

#[test]
fn test_known_dimensions_only_for_published_models() {
    assert_eq!(
        OpenAIEmbeddingProvider::known_dimensions("text-embedding-ada-002"),
        Some(1536)
    );
    assert_eq!(OpenAIEmbeddingProvider::known_dimensions("bge-large-en-v1.5"), None);
}
