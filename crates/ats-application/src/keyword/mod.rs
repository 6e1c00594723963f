//! Keyword extraction and per-keyword relevance scoring

mod extract;
mod scorer;

pub use extract::extract_keywords;
pub use scorer::KeywordScorer;
