//! Ollama Embedding Provider
//!
//! Implements the EmbeddingProvider port using Ollama's local `/api/embed`
//! endpoint, which accepts a batch of inputs in one request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use ats_domain::error::Result;
use ats_domain::ports::EmbeddingProvider;
use ats_domain::value_objects::Embedding;

use super::helpers::{constructor, validate_batch};
use crate::constants::{
    AVAILABILITY_CHECK_TIMEOUT_SECS, CONTENT_TYPE_JSON, EMBEDDING_DIMENSION_OLLAMA_DEFAULT,
    EMBEDDING_DIMENSION_OLLAMA_MINILM, EMBEDDING_DIMENSION_OLLAMA_MXBAI,
    EMBEDDING_DIMENSION_OLLAMA_NOMIC, OLLAMA_DEFAULT_BASE_URL,
};
use crate::utils::{HttpResponseUtils, transport_error};

#[derive(Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
    truncate: bool,
}

#[derive(Deserialize)]
struct EmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

/// Ollama local embedding provider
///
/// ## Example
///
/// ```rust,no_run
/// use ats_providers::OllamaEmbeddingProvider;
/// use reqwest::Client;
/// use std::time::Duration;
///
/// let provider = OllamaEmbeddingProvider::new(
///     Some("http://localhost:11434"),
///     "nomic-embed-text",
///     Duration::from_secs(30),
///     Client::new(),
/// );
/// ```
pub struct OllamaEmbeddingProvider {
    base_url: String,
    model: String,
    dimensions_override: Option<usize>,
    timeout: Duration,
    http_client: Client,
}

impl OllamaEmbeddingProvider {
    /// Create a new Ollama embedding provider
    ///
    /// # Arguments
    /// * `base_url` - Ollama server URL (defaults to `http://localhost:11434`)
    /// * `model` - Model name (e.g. "nomic-embed-text")
    /// * `timeout` - Request timeout
    /// * `http_client` - Shared reqwest client
    pub fn new(
        base_url: Option<&str>,
        model: impl Into<String>,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            base_url: constructor::normalize_url(base_url, OLLAMA_DEFAULT_BASE_URL),
            model: model.into(),
            dimensions_override: None,
            timeout,
            http_client,
        }
    }

    /// Declare the dimension of a model missing from the built-in table
    pub fn with_dimensions(mut self, dimensions: Option<usize>) -> Self {
        self.dimensions_override = dimensions;
        self
    }

    /// Base URL in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let payload = EmbedRequest {
            model: &self.model,
            input: texts,
            truncate: true,
        };
        let response = self
            .http_client
            .post(format!("{}/api/embed", self.base_url))
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error(self.provider_name(), &e))?;

        let parsed: EmbedResponse =
            HttpResponseUtils::check_and_parse(response, self.provider_name()).await?;

        let dimensions = self.dimensions();
        let embeddings: Vec<Embedding> = parsed
            .embeddings
            .into_iter()
            .map(|vector| Embedding {
                vector,
                model: self.model.clone(),
                dimensions,
            })
            .collect();

        validate_batch(self.provider_name(), &embeddings, texts.len(), dimensions)?;
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        if let Some(dimensions) = self.dimensions_override {
            return dimensions;
        }
        let base_model = self.model.split(':').next().unwrap_or_default();
        match base_model {
            "nomic-embed-text" => EMBEDDING_DIMENSION_OLLAMA_NOMIC,
            "all-minilm" => EMBEDDING_DIMENSION_OLLAMA_MINILM,
            "mxbai-embed-large" => EMBEDDING_DIMENSION_OLLAMA_MXBAI,
            _ => EMBEDDING_DIMENSION_OLLAMA_DEFAULT,
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "ollama"
    }

    async fn is_available(&self) -> bool {
        self.http_client
            .get(format!("{}/api/tags", self.base_url))
            .timeout(Duration::from_secs(AVAILABILITY_CHECK_TIMEOUT_SECS))
            .send()
            .await
            .is_ok_and(|response| response.status().is_success())
    }
}
