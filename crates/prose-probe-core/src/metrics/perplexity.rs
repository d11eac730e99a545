//! Unigram perplexity approximation.

use std::collections::{HashMap, HashSet};

/// Two raised to the Shannon entropy (in bits) of the word distribution.
///
/// This is a proxy for lexical unpredictability, not a language-model
/// perplexity. A text of `n` distinct words scores `n`; heavy reuse of a few
/// words pulls the value down. Entropy terms are summed in first-occurrence
/// order so repeated runs produce bit-identical results.
#[tracing::instrument(skip_all)]
pub fn perplexity(words: &[String]) -> f64 {
    if words.is_empty() {
        return 1.0;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for w in words {
        *counts.entry(w.as_str()).or_insert(0) += 1;
    }

    let total = words.len() as f64;
    let mut seen: HashSet<&str> = HashSet::with_capacity(counts.len());
    let mut entropy = 0.0_f64;

    for w in words {
        if !seen.insert(w.as_str()) {
            continue;
        }
        let prob = counts[w.as_str()] as f64 / total;
        entropy -= prob * prob.log2();
    }

    2f64.powf(entropy)
}
