//! Statistical signals extracted from tokenized text.
//!
//! Five independent features, each a pure function in its own module and
//! collected by [`compute_metrics`]:
//!
//! - [`burstiness`] - sentence-length irregularity
//! - [`perplexity`] - unigram entropy proxy
//! - [`diversity`] - type-token ratio (reported, not scored)
//! - [`repetition`] - repeated adjacent word pairs
//! - [`start_diversity`] - variety of sentence openers

pub mod burstiness;
pub mod diversity;
pub mod perplexity;
pub mod repetition;
pub mod start_diversity;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::text::TokenizedText;

/// The five signals computed for one text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricSet {
    /// Coefficient of variation of sentence lengths.
    pub burstiness: f64,
    /// Two to the power of the unigram entropy.
    pub perplexity: f64,
    /// Distinct words over total words.
    pub diversity: f64,
    /// Repeated distinct bigrams over total bigrams.
    pub repetition: f64,
    /// Distinct sentence openers over sentence count.
    pub start_diversity: f64,
}

impl MetricSet {
    /// Round each metric for presentation.
    ///
    /// Perplexity keeps two decimals; the ratios keep three.
    pub fn rounded(&self) -> Self {
        Self {
            burstiness: round_to(self.burstiness, 3),
            perplexity: round_to(self.perplexity, 2),
            diversity: round_to(self.diversity, 3),
            repetition: round_to(self.repetition, 3),
            start_diversity: round_to(self.start_diversity, 3),
        }
    }
}

/// Compute every metric over the same tokenized input.
#[tracing::instrument(skip_all, fields(
    sentences = tokens.sentences.len(),
    words = tokens.words.len(),
))]
pub fn compute_metrics(tokens: &TokenizedText) -> MetricSet {
    let metrics = MetricSet {
        burstiness: burstiness::burstiness(&tokens.sentences),
        perplexity: perplexity::perplexity(&tokens.words),
        diversity: diversity::diversity(&tokens.words),
        repetition: repetition::repetition(&tokens.words),
        start_diversity: start_diversity::start_diversity(&tokens.sentences),
    };
    tracing::debug!(?metrics, "metrics computed");
    metrics
}

/// Round `value` to `places` decimal places.
///
/// Ties on the exact binary value go to the even digit (`6.25` gives `6.2`),
/// matching the usual fixed-point formatting.
pub(crate) fn round_to(value: f64, places: usize) -> f64 {
    format!("{value:.places$}").parse().unwrap_or(value)
}
