//! Application Layer - ATS Candidate Search
//!
//! Use cases of the hybrid candidate search engine and of the background
//! pipeline that keeps candidate vectors fresh.
//!
//! ## Use Cases
//!
//! - Hybrid search: embed the query, pull a similarity pool, re-rank it with
//!   keyword evidence and a tenant-selected scoring strategy
//! - Embedding worker: drain the job queue, generate and store vectors,
//!   retry or drop failed jobs
//! - Job scheduling: turn ingestion events into embedding jobs
//!
//! ## Dependencies
//!
//! This crate depends only on `ats-domain` ports; concrete providers are
//! injected by `ats-infrastructure`.

pub mod keyword;
pub mod scoring;
pub mod use_cases;

pub use keyword::{KeywordScorer, extract_keywords};
pub use scoring::{
    AllOrNothing, ScoringConfigResolver, ScoringStrategy, TieredMultiKeyword,
    resolve_scoring_config, strategy_for,
};
pub use use_cases::*;
