//! pgvector text literal encoding
//!
//! Vectors are sent to Postgres as a bound text parameter (`'[0.1,0.2]'`)
//! and cast server-side with `$1::text::vector`; values are never spliced
//! into SQL text.

use std::fmt::Write;

/// Encode a vector as a pgvector literal
pub fn to_vector_literal(vector: &[f32]) -> String {
    let mut literal = String::with_capacity(vector.len() * 10 + 2);
    literal.push('[');
    for (i, value) in vector.iter().enumerate() {
        if i > 0 {
            literal.push(',');
        }
        let value = if value.is_finite() { *value } else { 0.0 };
        let _ = write!(literal, "{value}");
    }
    literal.push(']');
    literal
}

/// Decode a pgvector literal (`[1,2.5,-3]`) as returned by `embedding::text`
pub fn from_vector_literal(literal: &str) -> Option<Vec<f32>> {
    let inner = literal.trim().strip_prefix('[')?.strip_suffix(']')?;
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }
    inner
        .split(',')
        .map(|value| value.trim().parse::<f32>().ok())
        .collect()
}
