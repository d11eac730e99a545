//! Vocabulary diversity (type-token ratio).

use std::collections::HashSet;

/// Distinct words divided by total words. Returns 0 for an empty slice.
#[tracing::instrument(skip_all)]
pub fn diversity(words: &[String]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let unique: HashSet<&str> = words.iter().map(String::as_str).collect();
    unique.len() as f64 / words.len() as f64
}
