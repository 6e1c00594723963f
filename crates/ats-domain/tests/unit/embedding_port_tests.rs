//! Unit tests for the default methods of the EmbeddingProvider port

use async_trait::async_trait;
use ats_domain::ports::EmbeddingProvider;
use ats_domain::{Embedding, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

struct CountingProvider {
    calls: AtomicUsize,
}

#[async_trait]
impl EmbeddingProvider for CountingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts
            .iter()
            .map(|text| Embedding {
                vector: vec![text.len() as f32, 1.0],
                model: "counting".to_string(),
                dimensions: 2,
            })
            .collect())
    }

    fn dimensions(&self) -> usize {
        2
    }

    fn model_name(&self) -> &str {
        "counting"
    }

    fn provider_name(&self) -> &str {
        "counting"
    }

    async fn is_available(&self) -> bool {
        true
    }
}

#[tokio::test]
async fn test_blank_input_skips_backend() {
    let provider = CountingProvider {
        calls: AtomicUsize::new(0),
    };
    let embedding = provider.embed("   \n\t").await.expect("blank input is not an error");
    assert!(embedding.is_empty());
    assert_eq!(embedding.model, "counting");
    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_embed_delegates_to_batch() {
    let provider = CountingProvider {
        calls: AtomicUsize::new(0),
    };
    let embedding = provider.embed("rust").await.expect("embed");
    assert_eq!(embedding.vector.len(), provider.dimensions());
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}
