//! Sentence-length burstiness.

/// Coefficient of variation of sentence lengths (in words).
///
/// Population standard deviation divided by the mean. Uniform sentence
/// lengths give values near 0; a mix of very short and very long sentences
/// pushes the value above 1. Returns 0 when there are no sentences or every
/// sentence is empty.
#[tracing::instrument(skip_all)]
pub fn burstiness(sentences: &[String]) -> f64 {
    if sentences.is_empty() {
        return 0.0;
    }

    let lengths: Vec<f64> = sentences
        .iter()
        .map(|s| s.split_whitespace().count() as f64)
        .collect();

    let count = lengths.len() as f64;
    let mean = lengths.iter().sum::<f64>() / count;
    if mean <= 0.0 {
        return 0.0;
    }

    let variance = lengths.iter().map(|&l| (l - mean).powi(2)).sum::<f64>() / count;
    variance.sqrt() / mean
}
