use std::collections::HashSet;
use std::sync::LazyLock;

use ats_domain::constants::KEYWORD_MIN_LENGTH;
use regex::Regex;

/// Separators between query tokens: whitespace, commas, semicolons, slashes
static TOKEN_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s,;/]+").expect("Invalid regex"));

/// Conjunctions that split a query into keywords
const CONJUNCTIONS: &[&str] = &["and", "or"];

/// Common words that carry no search signal
const STOP_WORDS: &[&str] = &[
    "the", "for", "with", "who", "has", "have", "are", "was", "were", "from", "that", "this",
    "any", "all", "not", "but", "can", "our", "you", "your", "into", "plus", "also", "some",
    "experience", "years", "year", "looking", "candidate", "candidates", "someone", "knowledge",
];

/// Split a free-text query into scoring keywords
///
/// Lower-cases, splits on whitespace/commas and conjunctions, trims
/// surrounding punctuation, drops short tokens and stop-words and removes
/// duplicates while keeping first-seen order.
///
/// ```
/// use ats_application::extract_keywords;
///
/// let keywords = extract_keywords("Kubernetes, Yugabyte and PostgreSQL");
/// assert_eq!(keywords, vec!["kubernetes", "yugabyte", "postgresql"]);
/// ```
pub fn extract_keywords(query: &str) -> Vec<String> {
    let lowered = query.to_lowercase();
    let mut seen = HashSet::new();

    TOKEN_SEPARATOR
        .split(&lowered)
        .map(trim_token)
        .filter(|token| token.chars().count() >= KEYWORD_MIN_LENGTH)
        .filter(|token| !CONJUNCTIONS.contains(token) && !STOP_WORDS.contains(token))
        .filter(|token| seen.insert(*token))
        .map(str::to_string)
        .collect()
}

/// Strip punctuation around a token, keeping symbols that name skills (`c++`, `c#`, `.net`)
fn trim_token(token: &str) -> &str {
    token
        .trim_start_matches(|c: char| !c.is_alphanumeric() && c != '.')
        .trim_end_matches(|c: char| !c.is_alphanumeric() && c != '+' && c != '#')
        .trim_end_matches('.')
}
