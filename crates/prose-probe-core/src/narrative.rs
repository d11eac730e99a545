//! Human-readable rationale for a score.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::metrics::MetricSet;

/// Warning emitted for very uniform sentence lengths.
pub const UNIFORM_LENGTH_WARNING: &str = "⚠️ Sentences are very uniform in length";

/// Confirmation emitted for strongly varied sentence lengths.
pub const VARIED_LENGTH_NOTE: &str = "✓ Good sentence length variation";

/// Warning emitted when many bigrams repeat.
pub const REPETITION_WARNING: &str = "⚠️ High repetition in word patterns";

/// Warning emitted when few sentences start differently.
pub const OPENER_WARNING: &str = "⚠️ Limited variety in sentence beginnings";

/// Burstiness below which sentence lengths count as uniform.
const UNIFORM_BURSTINESS: f64 = 0.3;

/// Burstiness above which sentence lengths count as well varied.
const VARIED_BURSTINESS: f64 = 1.0;

/// Repetition above which word patterns count as repetitive.
const HIGH_REPETITION: f64 = 0.1;

/// Start diversity below which openers count as limited.
const LOW_START_DIVERSITY: f64 = 0.5;

/// Overall judgement bracket for an AI probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Above 80%.
    VeryLikelyAi,
    /// Above 60%.
    LikelyAi,
    /// Above 40%.
    Mixed,
    /// Above 20%.
    LikelyHuman,
    /// 20% or below.
    VeryLikelyHuman,
}

impl Verdict {
    /// Pick the bracket for `ai_probability` (percent). Thresholds are strict.
    pub fn from_probability(ai_probability: f64) -> Self {
        if ai_probability > 80.0 {
            Self::VeryLikelyAi
        } else if ai_probability > 60.0 {
            Self::LikelyAi
        } else if ai_probability > 40.0 {
            Self::Mixed
        } else if ai_probability > 20.0 {
            Self::LikelyHuman
        } else {
            Self::VeryLikelyHuman
        }
    }

    /// Short headline for the bracket.
    pub const fn headline(&self) -> &'static str {
        match self {
            Self::VeryLikelyAi => "Very likely AI-generated",
            Self::LikelyAi => "Likely AI-generated",
            Self::Mixed => "Mixed signals — could be AI or human",
            Self::LikelyHuman => "Likely human-written",
            Self::VeryLikelyHuman => "Very likely human-written",
        }
    }

    /// One-line elaboration of the headline.
    pub const fn detail(&self) -> &'static str {
        match self {
            Self::VeryLikelyAi => "Text shows high uniformity and predictable patterns",
            Self::LikelyAi => "Some indicators of artificial generation present",
            Self::Mixed => "Text shows both human and AI characteristics",
            Self::LikelyHuman => "Shows good variation and natural patterns",
            Self::VeryLikelyHuman => "Strong indicators of human creativity and variation",
        }
    }
}

/// Build the ordered analysis lines: headline, detail, then observations.
///
/// `metrics` must be the unrounded values the score was computed from.
#[tracing::instrument(skip(metrics))]
pub fn generate_analysis(ai_probability: f64, metrics: &MetricSet) -> Vec<String> {
    let verdict = Verdict::from_probability(ai_probability);
    let mut analysis = vec![verdict.headline().to_string(), verdict.detail().to_string()];

    if metrics.burstiness < UNIFORM_BURSTINESS {
        analysis.push(UNIFORM_LENGTH_WARNING.to_string());
    } else if metrics.burstiness > VARIED_BURSTINESS {
        analysis.push(VARIED_LENGTH_NOTE.to_string());
    }

    if metrics.repetition > HIGH_REPETITION {
        analysis.push(REPETITION_WARNING.to_string());
    }

    if metrics.start_diversity < LOW_START_DIVERSITY {
        analysis.push(OPENER_WARNING.to_string());
    }

    analysis
}
