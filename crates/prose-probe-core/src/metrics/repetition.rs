//! Bigram repetition.

use std::collections::HashMap;

/// Fraction of bigram positions taken up by distinct bigrams that repeat.
///
/// Bigrams are built over the whole word stream, so pairs may straddle a
/// sentence boundary. The numerator counts each repeated bigram once; the
/// denominator is the total number of bigrams (`words.len() - 1`). Returns 0
/// when there are fewer than two words.
#[tracing::instrument(skip_all)]
pub fn repetition(words: &[String]) -> f64 {
    if words.len() < 2 {
        return 0.0;
    }

    let mut bigram_counts: HashMap<(&str, &str), usize> = HashMap::new();
    for pair in words.windows(2) {
        *bigram_counts
            .entry((pair[0].as_str(), pair[1].as_str()))
            .or_insert(0) += 1;
    }

    let repeated = bigram_counts.values().filter(|&&count| count > 1).count();
    let total = words.len() - 1;
    repeated as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &[&str]) -> Vec<String> {
        s.iter().map(|w| (*w).to_string()).collect()
    }

    #[test]
    fn fewer_than_two_words() {
        assert_eq!(repetition(&[]), 0.0);
        assert_eq!(repetition(&words(&["alone"])), 0.0);
    }

    #[test]
    fn no_repeats() {
        assert_eq!(repetition(&words(&["the", "cat", "sat", "on", "a", "mat"])), 0.0);
    }

    #[test]
    fn alternating_pair() {
        // (the,cat) x2 and (cat,the) x2 over four bigrams
        let r = repetition(&words(&["the", "cat", "the", "cat", "the"]));
        assert_eq!(r, 0.5);
    }

    #[test]
    fn repeated_bigram_counted_once() {
        // (a,b) appears three times but counts once; 6 bigrams total
        let r = repetition(&words(&["a", "b", "a", "b", "x", "a", "b"]));
        assert!((r - 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn bigrams_cross_sentence_boundaries() {
        // "ran. the" straddles two sentences and still repeats
        let r = repetition(&words(&["dogs", "ran.", "the", "cats", "ran.", "the"]));
        assert!((r - 1.0 / 5.0).abs() < 1e-12);
    }
}
