//! # ATS Candidate Search
//!
//! Hybrid candidate search for applicant tracking: a query is embedded,
//! matched against stored candidate vectors and the resulting pool is
//! re-ranked with keyword evidence under a tenant-selected strategy.
//! A background pipeline keeps candidate vectors fresh.
//!
//! ## Example
//!
//! ```ignore
//! use ats::infrastructure::{AppConfig, init_app};
//! use ats::SearchRequest;
//! use tokio_util::sync::CancellationToken;
//!
//! let context = init_app(AppConfig::default()).await?;
//! let page = context
//!     .search(&SearchRequest::new("kubernetes postgresql", "acme"), &CancellationToken::new())
//!     .await?;
//! ```
//!
//! ## Architecture
//!
//! - `domain` - Core types, errors and ports
//! - `application` - Hybrid search, scoring strategies, embedding worker
//! - `providers` - Embedding backends, vector stores, job queue
//! - `infrastructure` - Config, logging and the composition root
//! - `cli` - Command line entry points

pub mod cli;

/// Domain layer - core business types and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use ats_domain::*;
}

/// Application layer - use cases and scoring strategies
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use ats_application::*;
}

/// Provider implementations
///
/// Re-exports from the providers crate for convenience
pub mod providers {
    pub use ats_providers::*;
}

/// Infrastructure layer - config, logging and DI
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use ats_infrastructure::*;
}

// Re-export commonly used domain types at the crate root
pub use domain::*;

// Re-export the composition root
pub use infrastructure::{AppContext, init_app};
