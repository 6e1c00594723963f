//! HTTP Response Utilities
//!
//! Maps HTTP outcomes of embedding backends onto the domain error taxonomy:
//! anything that may succeed later (transport failure, timeout, 408, 429,
//! 5xx) becomes `ProviderUnavailable`; the rest is a plain `Embedding` error.

use ats_domain::error::{Error, Result};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;

/// Classify a request that never produced a response
pub fn transport_error(provider: &str, error: &reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::provider_unavailable(provider, format!("request timed out: {error}"))
    } else if error.is_connect() {
        Error::provider_unavailable(provider, format!("connection failed: {error}"))
    } else {
        Error::provider_unavailable(provider, format!("HTTP request failed: {error}"))
    }
}

/// Utilities for processing HTTP responses
pub struct HttpResponseUtils;

impl HttpResponseUtils {
    /// Check response status and decode the JSON body
    pub async fn check_and_parse<T: DeserializeOwned>(
        response: Response,
        provider: &str,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(Self::status_error(provider, status, &body));
        }

        response.json::<T>().await.map_err(|e| {
            Error::embedding(format!("{provider} response parse failed: {e}"))
        })
    }

    fn status_error(provider: &str, status: StatusCode, body: &str) -> Error {
        let code = status.as_u16();
        match code {
            408 | 429 => {
                Error::provider_unavailable(provider, format!("throttled ({code}): {body}"))
            }
            500..=599 => {
                Error::provider_unavailable(provider, format!("server error ({code}): {body}"))
            }
            401 | 403 => {
                Error::embedding(format!("{provider} authentication failed ({code}): {body}"))
            }
            _ => Error::embedding(format!("{provider} request failed ({code}): {body}")),
        }
    }
}
