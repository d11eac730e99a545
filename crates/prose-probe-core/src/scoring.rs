//! Composite AI-likelihood scoring.
//!
//! The score is a hand-tuned point rubric over four of the five metrics:
//!
//! | Signal          | Rule                    | Points |
//! |-----------------|-------------------------|--------|
//! | burstiness      | `< 0.3`                 | 40     |
//! |                 | `< 0.6`                 | 25     |
//! |                 | `< 1.0`                 | 10     |
//! | repetition      | `min(25, rep × 100)`    | 0–25   |
//! | start diversity | `< 0.5`                 | 20     |
//! |                 | `< 0.7`                 | 10     |
//! | perplexity      | `20 < p < 80`           | 15     |
//! |                 | `10 < p < 150`          | 8      |
//!
//! Diversity is reported but never scored. The summed points are clamped to
//! `[5, 95]` and rounded to one decimal place.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::metrics::{MetricSet, round_to};

/// Lowest AI probability ever reported.
pub const MIN_PROBABILITY: f64 = 5.0;

/// Highest AI probability ever reported.
pub const MAX_PROBABILITY: f64 = 95.0;

/// Points awarded when a metric falls strictly below `below`.
#[derive(Debug, Clone, Copy)]
struct Bracket {
    below: f64,
    points: f64,
}

/// Points awarded when a metric lies strictly between `above` and `below`.
#[derive(Debug, Clone, Copy)]
struct Band {
    above: f64,
    below: f64,
    points: f64,
}

/// Uniform sentence lengths read as machine-written.
const BURSTINESS_BRACKETS: &[Bracket] = &[
    Bracket {
        below: 0.3,
        points: 40.0,
    },
    Bracket {
        below: 0.6,
        points: 25.0,
    },
    Bracket {
        below: 1.0,
        points: 10.0,
    },
];

/// Few distinct sentence openers read as machine-written.
const START_DIVERSITY_BRACKETS: &[Bracket] = &[
    Bracket {
        below: 0.5,
        points: 20.0,
    },
    Bracket {
        below: 0.7,
        points: 10.0,
    },
];

/// Moderate lexical entropy is the generated-text sweet spot.
const PERPLEXITY_BANDS: &[Band] = &[
    Band {
        above: 20.0,
        below: 80.0,
        points: 15.0,
    },
    Band {
        above: 10.0,
        below: 150.0,
        points: 8.0,
    },
];

/// Repetition points per unit of repetition ratio.
const REPETITION_WEIGHT: f64 = 100.0;

/// Maximum points repetition can contribute.
const REPETITION_CAP: f64 = 25.0;

/// Points contributed by each scored signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreBreakdown {
    /// Points from sentence-length burstiness (0, 10, 25 or 40).
    pub burstiness: f64,
    /// Points from bigram repetition (fractional, 0–25).
    pub repetition: f64,
    /// Points from sentence-opener diversity (0, 10 or 20).
    pub start_diversity: f64,
    /// Points from the perplexity approximation (0, 8 or 15).
    pub perplexity: f64,
}

impl ScoreBreakdown {
    /// Sum of all contributions before clamping.
    pub fn total(&self) -> f64 {
        self.burstiness + self.repetition + self.start_diversity + self.perplexity
    }

    /// Total clamped to the reportable range, before rounding.
    pub fn clamped(&self) -> f64 {
        self.total().clamp(MIN_PROBABILITY, MAX_PROBABILITY)
    }
}

/// Final probability pair plus the breakdown it came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Score {
    /// Likelihood (percent) that the text is machine-generated.
    pub ai_probability: f64,
    /// `100 - ai_probability`.
    pub human_probability: f64,
    /// Unclamped per-signal points.
    pub breakdown: ScoreBreakdown,
}

/// Points for a burstiness value.
pub fn burstiness_points(burstiness: f64) -> f64 {
    bracket_points(BURSTINESS_BRACKETS, burstiness)
}

/// Points for a repetition ratio.
pub fn repetition_points(repetition: f64) -> f64 {
    (repetition * REPETITION_WEIGHT).min(REPETITION_CAP)
}

/// Points for a start-diversity ratio.
pub fn start_diversity_points(start_diversity: f64) -> f64 {
    bracket_points(START_DIVERSITY_BRACKETS, start_diversity)
}

/// Points for a perplexity value.
pub fn perplexity_points(perplexity: f64) -> f64 {
    PERPLEXITY_BANDS
        .iter()
        .find(|band| band.above < perplexity && perplexity < band.below)
        .map_or(0.0, |band| band.points)
}

fn bracket_points(brackets: &[Bracket], value: f64) -> f64 {
    brackets
        .iter()
        .find(|bracket| value < bracket.below)
        .map_or(0.0, |bracket| bracket.points)
}

/// Break a metric set down into per-signal points.
pub fn breakdown(metrics: &MetricSet) -> ScoreBreakdown {
    ScoreBreakdown {
        burstiness: burstiness_points(metrics.burstiness),
        repetition: repetition_points(metrics.repetition),
        start_diversity: start_diversity_points(metrics.start_diversity),
        perplexity: perplexity_points(metrics.perplexity),
    }
}

/// Score a metric set.
///
/// `human_probability` is derived from the already-rounded AI value, so the
/// pair always sums to 100.
#[tracing::instrument(skip_all)]
pub fn score(metrics: &MetricSet) -> Score {
    let breakdown = breakdown(metrics);
    let ai_probability = round_to(breakdown.clamped(), 1);
    let human_probability = round_to(100.0 - ai_probability, 1);

    tracing::debug!(raw = breakdown.total(), ai_probability, "score computed");

    Score {
        ai_probability,
        human_probability,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(
        burstiness: f64,
        perplexity: f64,
        repetition: f64,
        start_diversity: f64,
    ) -> MetricSet {
        MetricSet {
            burstiness,
            perplexity,
            diversity: 0.5,
            repetition,
            start_diversity,
        }
    }

    #[test]
    fn burstiness_brackets() {
        assert_eq!(burstiness_points(0.0), 40.0);
        assert_eq!(burstiness_points(0.299), 40.0);
        assert_eq!(burstiness_points(0.3), 25.0);
        assert_eq!(burstiness_points(0.599), 25.0);
        assert_eq!(burstiness_points(0.6), 10.0);
        assert_eq!(burstiness_points(0.999), 10.0);
        assert_eq!(burstiness_points(1.0), 0.0);
        assert_eq!(burstiness_points(2.5), 0.0);
    }

    #[test]
    fn start_diversity_brackets() {
        assert_eq!(start_diversity_points(0.25), 20.0);
        assert_eq!(start_diversity_points(0.5), 10.0);
        assert_eq!(start_diversity_points(0.69), 10.0);
        assert_eq!(start_diversity_points(0.7), 0.0);
        assert_eq!(start_diversity_points(1.0), 0.0);
    }

    #[test]
    fn perplexity_bands_are_exclusive() {
        assert_eq!(perplexity_points(10.0), 0.0);
        assert_eq!(perplexity_points(10.5), 8.0);
        assert_eq!(perplexity_points(20.0), 8.0);
        assert_eq!(perplexity_points(20.01), 15.0);
        assert_eq!(perplexity_points(79.99), 15.0);
        assert_eq!(perplexity_points(80.0), 8.0);
        assert_eq!(perplexity_points(149.9), 8.0);
        assert_eq!(perplexity_points(150.0), 0.0);
        assert_eq!(perplexity_points(3.0), 0.0);
    }

    #[test]
    fn repetition_is_fractional_and_capped() {
        assert_eq!(repetition_points(0.0), 0.0);
        assert!((repetition_points(0.125) - 12.5).abs() < 1e-12);
        assert_eq!(repetition_points(0.25), 25.0);
        assert_eq!(repetition_points(0.9), 25.0);
    }

    #[test]
    fn diversity_does_not_change_score() {
        let mut low = metrics(0.4, 50.0, 0.05, 0.6);
        let mut high = low;
        low.diversity = 0.01;
        high.diversity = 0.99;
        assert_eq!(score(&low), score(&high));
    }

    #[test]
    fn clamps_to_floor() {
        let s = score(&metrics(1.5, 500.0, 0.0, 1.0));
        assert_eq!(s.breakdown.total(), 0.0);
        assert_eq!(s.ai_probability, 5.0);
        assert_eq!(s.human_probability, 95.0);
    }

    #[test]
    fn clamps_to_ceiling() {
        let s = score(&metrics(0.1, 50.0, 0.5, 0.2));
        assert_eq!(s.breakdown.total(), 100.0);
        assert_eq!(s.ai_probability, 95.0);
        assert_eq!(s.human_probability, 5.0);
    }

    #[test]
    fn fractional_total_rounds_to_one_decimal() {
        // 25 + 3.04 + 10 + 8
        let s = score(&metrics(0.4, 100.0, 0.0304, 0.6));
        assert_eq!(s.ai_probability, 46.0);
        assert_eq!(s.human_probability, 54.0);

        // 10 + 6.66 + 0 + 15
        let s = score(&metrics(0.7, 30.0, 0.0666, 0.8));
        assert_eq!(s.ai_probability, 31.7);
        assert_eq!(s.human_probability, 68.3);
    }

    #[test]
    fn human_is_derived_from_rounded_ai() {
        for rep in [0.0, 0.0123, 0.0456, 0.0789, 0.111, 0.2049] {
            let s = score(&metrics(0.45, 60.0, rep, 0.55));
            assert_eq!(s.human_probability, round_to(100.0 - s.ai_probability, 1));
            assert!((s.ai_probability + s.human_probability - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn equalizing_lengths_never_lowers_burstiness_points() {
        let mut previous = burstiness_points(3.0);
        for step in (0..=30).rev() {
            let b = f64::from(step) / 10.0;
            let points = burstiness_points(b);
            assert!(points >= previous, "points dropped at burstiness {b}");
            previous = points;
        }
    }
}
