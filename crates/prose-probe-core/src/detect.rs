//! End-to-end detection: tokenize, measure, score, explain.
//!
//! [`score_text`] is the single entry point. It never panics on any input;
//! inputs too small to judge come back as a [`DetectionError`], which
//! [`Detection`] renders as `{"error": "..."}`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::{DetectionError, DetectionResult};
use crate::metrics::{self, MetricSet};
use crate::narrative;
use crate::scoring;
use crate::text;

/// Result of scoring one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetectionReport {
    /// Likelihood (percent, 5–95, one decimal) that the text is machine-generated.
    pub ai_probability: f64,
    /// `100 - ai_probability`.
    pub human_probability: f64,
    /// Rounded metric values.
    pub metrics: MetricSet,
    /// Headline, detail, and any observations, in that order.
    pub analysis: Vec<String>,
}

/// Serializable outcome of a detection request.
///
/// Renders either as the full report or as `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Detection {
    /// The text was scored.
    Scored(DetectionReport),
    /// The text could not be scored.
    Rejected {
        /// One of the two insufficient-input messages.
        error: String,
    },
}

impl Detection {
    /// The report, if the text was scored.
    pub const fn report(&self) -> Option<&DetectionReport> {
        match self {
            Self::Scored(report) => Some(report),
            Self::Rejected { .. } => None,
        }
    }
}

impl From<DetectionResult<DetectionReport>> for Detection {
    fn from(result: DetectionResult<DetectionReport>) -> Self {
        match result {
            Ok(report) => Self::Scored(report),
            Err(err) => Self::Rejected {
                error: err.to_string(),
            },
        }
    }
}

impl From<DetectionError> for Detection {
    fn from(err: DetectionError) -> Self {
        Self::from(Err::<DetectionReport, _>(err))
    }
}

/// Score `text` for likely machine generation.
///
/// # Errors
///
/// Returns [`DetectionError::TooShort`] or [`DetectionError::Unreliable`]
/// when the input is too small to judge. No other failure is possible.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn score_text(text: &str) -> DetectionResult<DetectionReport> {
    let tokens = text::tokenize(text)?;
    let metrics = metrics::compute_metrics(&tokens);
    let score = scoring::score(&metrics);
    let analysis = narrative::generate_analysis(score.breakdown.clamped(), &metrics);

    tracing::info!(
        ai_probability = score.ai_probability,
        sentences = tokens.sentences.len(),
        words = tokens.words.len(),
        "text scored"
    );

    Ok(DetectionReport {
        ai_probability: score.ai_probability,
        human_probability: score.human_probability,
        metrics: metrics.rounded(),
        analysis,
    })
}

/// Score `text` and wrap the outcome for rendering.
pub fn detect(text: &str) -> Detection {
    score_text(text).into()
}
