//! OpenAI Embedding Provider
//!
//! Implements the EmbeddingProvider port against any OpenAI-compatible
//! `/embeddings` endpoint (OpenAI, Azure-style gateways, vLLM, LiteLLM).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use ats_domain::error::Result;
use ats_domain::ports::EmbeddingProvider;
use ats_domain::value_objects::Embedding;

use super::helpers::{constructor, validate_batch};
use crate::constants::{
    AVAILABILITY_CHECK_TIMEOUT_SECS, CONTENT_TYPE_JSON, EMBEDDING_DIMENSION_OPENAI_ADA,
    EMBEDDING_DIMENSION_OPENAI_LARGE, EMBEDDING_DIMENSION_OPENAI_SMALL, OPENAI_DEFAULT_BASE_URL,
};
use crate::utils::{HttpResponseUtils, transport_error};

#[derive(Serialize)]
struct EmbeddingRequest<'a> {
    model: &'a str,
    input: &'a [String],
    encoding_format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<usize>,
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    data: Vec<EmbeddingData>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct EmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Deserialize)]
struct Usage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    total_tokens: u64,
}

/// OpenAI-compatible remote embedding provider
///
/// ## Example
///
/// ```rust,no_run
/// use ats_providers::OpenAIEmbeddingProvider;
/// use reqwest::Client;
/// use std::time::Duration;
///
/// let provider = OpenAIEmbeddingProvider::new(
///     "sk-your-api-key",
///     None,
///     "text-embedding-3-small",
///     Duration::from_secs(30),
///     Client::new(),
/// );
/// ```
pub struct OpenAIEmbeddingProvider {
    api_key: String,
    base_url: String,
    model: String,
    dimensions_override: Option<usize>,
    timeout: Duration,
    http_client: Client,
}

impl OpenAIEmbeddingProvider {
    /// Create a new OpenAI embedding provider
    ///
    /// # Arguments
    /// * `api_key` - Bearer token
    /// * `base_url` - Optional custom base URL (defaults to the OpenAI API)
    /// * `model` - Model name (e.g. "text-embedding-3-small")
    /// * `timeout` - Request timeout
    /// * `http_client` - Shared reqwest client
    pub fn new(
        api_key: impl AsRef<str>,
        base_url: Option<&str>,
        model: impl Into<String>,
        timeout: Duration,
        http_client: Client,
    ) -> Self {
        Self {
            api_key: constructor::validate_api_key(api_key.as_ref()),
            base_url: constructor::normalize_url(base_url, OPENAI_DEFAULT_BASE_URL),
            model: model.into(),
            dimensions_override: None,
            timeout,
            http_client,
        }
    }

    /// Request a specific output dimension (text-embedding-3 models, custom gateways)
    pub fn with_dimensions(mut self, dimensions: Option<usize>) -> Self {
        self.dimensions_override = dimensions;
        self
    }

    /// Output dimension of a model this client knows about
    ///
    /// Gateway and fine-tuned models return `None`; their width must be
    /// configured with [`with_dimensions`](Self::with_dimensions).
    pub fn known_dimensions(model: &str) -> Option<usize> {
        match model {
            "text-embedding-3-small" => Some(EMBEDDING_DIMENSION_OPENAI_SMALL),
            "text-embedding-3-large" => Some(EMBEDDING_DIMENSION_OPENAI_LARGE),
            "text-embedding-ada-002" => Some(EMBEDDING_DIMENSION_OPENAI_ADA),
            _ => None,
        }
    }

    /// Base URL in use
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn fetch_embeddings(&self, texts: &[String]) -> Result<EmbeddingResponse> {
        let payload = EmbeddingRequest {
            model: &self.model,
            input: texts,
            encoding_format: "float",
            dimensions: self.dimensions_override,
        };

        let response = self
            .http_client
            .post(format!("{}/embeddings", self.base_url))
            .bearer_auth(&self.api_key)
            .header("Content-Type", CONTENT_TYPE_JSON)
            .timeout(self.timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| transport_error(self.provider_name(), &e))?;

        HttpResponseUtils::check_and_parse(response, self.provider_name()).await
    }
}

#[async_trait]
impl EmbeddingProvider for OpenAIEmbeddingProvider {
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut response = self.fetch_embeddings(texts).await?;
        if let Some(usage) = &response.usage {
            debug!(
                model = %self.model,
                inputs = texts.len(),
                prompt_tokens = usage.prompt_tokens,
                total_tokens = usage.total_tokens,
                "OpenAI embeddings generated"
            );
        }

        response.data.sort_by_key(|item| item.index);
        let dimensions = self.dimensions();
        let embeddings: Vec<Embedding> = response
            .data
            .into_iter()
            .map(|item| Embedding {
                vector: item.embedding,
                model: self.model.clone(),
                dimensions,
            })
            .collect();

        validate_batch(self.provider_name(), &embeddings, texts.len(), dimensions)?;
        Ok(embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions_override
            .or_else(|| Self::known_dimensions(&self.model))
            .unwrap_or(EMBEDDING_DIMENSION_OPENAI_SMALL)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn provider_name(&self) -> &str {
        "openai"
    }

    async fn is_available(&self) -> bool {
        self.http_client
            .get(format!("{}/models", self.base_url))
            .bearer_auth(&self.api_key)
            .timeout(Duration::from_secs(AVAILABILITY_CHECK_TIMEOUT_SECS))
            .send()
            .await
            .is_ok_and(|response| response.status().is_success())
    }
}
