//! Common helpers for embedding providers

use ats_domain::error::{Error, Result};
use ats_domain::value_objects::Embedding;

/// Constructor normalization shared by the HTTP providers
pub mod constructor {
    /// Trim an API key
    pub fn validate_api_key(api_key: &str) -> String {
        api_key.trim().to_string()
    }

    /// Base URL with surrounding whitespace and trailing slashes removed
    pub fn normalize_url(url: Option<&str>, default_url: &str) -> String {
        url.map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(default_url)
            .trim_end_matches('/')
            .to_string()
    }
}

/// Check that a backend answered one vector per input, each of the declared length
pub fn validate_batch(
    provider: &str,
    embeddings: &[Embedding],
    expected_count: usize,
    dimensions: usize,
) -> Result<()> {
    if embeddings.len() != expected_count {
        return Err(Error::embedding(format!(
            "{provider} response count mismatch: expected {expected_count}, got {}",
            embeddings.len()
        )));
    }
    embeddings
        .iter()
        .try_for_each(|embedding| embedding.validate_dimensions(dimensions))
}
