//! Sentence-opener diversity.

use std::collections::HashSet;

/// Distinct sentence-first-words divided by sentence count.
///
/// A sentence without any words contributes the empty string as its opener.
/// Returns 0 when there are no sentences.
#[tracing::instrument(skip_all)]
pub fn start_diversity(sentences: &[String]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }

    let openers: HashSet<&str> = sentences
        .iter()
        .map(|s| s.split_whitespace().next().unwrap_or(""))
        .collect();

    openers.len() as f64 / sentences.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(s: &[&str]) -> Vec<String> {
        s.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn empty_is_zero() {
        assert_eq!(start_diversity(&[]), 0.0);
    }

    #[test]
    fn same_opener_everywhere() {
        let s = sentences(&["the cat sat", "the dog ran", "the bird flew", "the fish swam"]);
        assert_eq!(start_diversity(&s), 0.25);
    }

    #[test]
    fn mixed_openers() {
        let s = sentences(&["the cat sat", "a dog ran", "the bird flew"]);
        assert!((start_diversity(&s) - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn empty_sentence_counts_as_blank_opener() {
        let s = sentences(&["", "   ", "hello there"]);
        assert!((start_diversity(&s) - 2.0 / 3.0).abs() < 1e-12);
    }
}
