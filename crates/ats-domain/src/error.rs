//! Error handling types

use std::time::Duration;
use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the candidate search engine and embedding pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error
    #[error("I/O error: {message}")]
    Io {
        /// Description of the I/O error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// JSON parsing or serialization error
    #[error("JSON parsing error: {source}")]
    Json {
        /// The underlying JSON error
        #[from]
        source: serde_json::Error,
    },

    /// Embedding backend is unreachable, overloaded or timed out
    #[error("Embedding provider '{provider}' unavailable: {message}")]
    ProviderUnavailable {
        /// Provider identifier (e.g. "openai", "ollama")
        provider: String,
        /// Description of the failure
        message: String,
    },

    /// Provider returned no vector for non-trivial input
    #[error("Empty embedding returned: {context}")]
    EmptyEmbedding {
        /// What was being embedded
        context: String,
    },

    /// Generated vector does not match the dimension declared for the model
    #[error("Dimension mismatch for model '{model}': expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Model name
        model: String,
        /// Declared dimension
        expected: usize,
        /// Actual vector length
        actual: usize,
    },

    /// Storage call exceeded its deadline
    #[error("Storage timeout during {operation} after {timeout:?}")]
    StorageTimeout {
        /// Operation that timed out
        operation: String,
        /// Deadline that was exceeded
        timeout: Duration,
    },

    /// Persisting a vector failed
    #[error("Storage write failed: {message}")]
    StorageWrite {
        /// Description of the write failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Vector store query error
    #[error("Vector store error: {message}")]
    VectorStore {
        /// Description of the vector store error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Embedding provider error that is not an availability problem
    #[error("Embedding provider error: {message}")]
    Embedding {
        /// Description of the embedding provider error
        message: String,
    },

    /// Job queue transport error
    #[error("Queue error: {message}")]
    Queue {
        /// Description of the queue error
        message: String,
    },

    /// Job exhausted its retry budget
    #[error("Max retries exceeded for entity '{entity_id}' after {retries} attempts")]
    MaxRetriesExceeded {
        /// Entity whose vector could not be generated
        entity_id: String,
        /// Number of attempts made
        retries: u32,
    },

    /// Unknown strategy name or out-of-range scoring value
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the invalid value
        message: String,
    },

    /// Configuration loading error
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Resource not found error
    #[error("Not found: {resource}")]
    NotFound {
        /// The resource that was not found
        resource: String,
    },

    /// Invalid argument provided to a function
    #[error("Invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument
        message: String,
    },

    /// Inbound request was cancelled before completion
    #[error("Operation cancelled: {operation}")]
    Cancelled {
        /// Operation that was cancelled
        operation: String,
    },

    /// Internal system error
    #[error("Internal error: {message}")]
    Internal {
        /// Description of the internal error
        message: String,
    },
}

// Basic error creation methods
impl Error {
    /// Create a provider-unavailable error
    pub fn provider_unavailable<P: Into<String>, S: Into<String>>(provider: P, message: S) -> Self {
        Self::ProviderUnavailable {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create an empty-embedding error
    pub fn empty_embedding<S: Into<String>>(context: S) -> Self {
        Self::EmptyEmbedding {
            context: context.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<S: Into<String>>(model: S, expected: usize, actual: usize) -> Self {
        Self::DimensionMismatch {
            model: model.into(),
            expected,
            actual,
        }
    }

    /// Create a storage timeout error
    pub fn storage_timeout<S: Into<String>>(operation: S, timeout: Duration) -> Self {
        Self::StorageTimeout {
            operation: operation.into(),
            timeout,
        }
    }

    /// Create a storage write error
    pub fn storage_write<S: Into<String>>(message: S) -> Self {
        Self::StorageWrite {
            message: message.into(),
            source: None,
        }
    }

    /// Create a storage write error with source
    pub fn storage_write_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::StorageWrite {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a vector store error
    pub fn vector_store<S: Into<String>>(message: S) -> Self {
        Self::VectorStore {
            message: message.into(),
            source: None,
        }
    }

    /// Create a vector store error with source
    pub fn vector_store_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::VectorStore {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an embedding provider error
    pub fn embedding<S: Into<String>>(message: S) -> Self {
        Self::Embedding {
            message: message.into(),
        }
    }

    /// Create a queue error
    pub fn queue<S: Into<String>>(message: S) -> Self {
        Self::Queue {
            message: message.into(),
        }
    }

    /// Create a max-retries-exceeded error
    pub fn max_retries_exceeded<S: Into<String>>(entity_id: S, retries: u32) -> Self {
        Self::MaxRetriesExceeded {
            entity_id: entity_id.into(),
            retries,
        }
    }

    /// Create a not found error
    pub fn not_found<S: Into<String>>(resource: S) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Create a cancellation error
    pub fn cancelled<S: Into<String>>(operation: S) -> Self {
        Self::Cancelled {
            operation: operation.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

// I/O and configuration error creation methods
impl Error {
    /// Create an I/O error
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io {
            message: message.into(),
            source: None,
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
            source: None,
        }
    }

    /// Create a configuration error with source
    pub fn configuration_with_source<
        S: Into<String>,
        E: std::error::Error + Send + Sync + 'static,
    >(
        message: S,
        source: E,
    ) -> Self {
        Self::Configuration {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Classification
impl Error {
    /// Failures that may succeed if the same call is attempted again later
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::ProviderUnavailable { .. }
                | Self::StorageTimeout { .. }
                | Self::StorageWrite { .. }
                | Self::Queue { .. }
        )
    }

    /// Failures caused by the data itself; retrying the same job cannot help
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Self::EmptyEmbedding { .. }
                | Self::DimensionMismatch { .. }
                | Self::NotFound { .. }
                | Self::InvalidArgument { .. }
        )
    }

    /// Caller-side mistakes (4xx class); every other request failure is 5xx class
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            message: source.to_string(),
            source: Some(Box::new(source)),
        }
    }
}
