//! Full experiment analysis: rates, uplift, significance and interpretation

use serde::{Deserialize, Serialize};

use super::z_test::two_proportions_z_test;
use crate::constants::DEFAULT_CONFIDENCE_LEVEL;

/// Which group an analysis declares the winner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Winner {
    /// Baseline experience performs at least as well
    Control,
    /// Alternative being tested performs better
    Variant,
    /// Not enough evidence yet
    Inconclusive,
}

impl Winner {
    pub fn as_str(&self) -> &'static str {
        match self {
            Winner::Control => "control",
            Winner::Variant => "variant",
            Winner::Inconclusive => "inconclusive",
        }
    }
}

impl std::fmt::Display for Winner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable reading of an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub winner: Winner,
    pub message: String,
    pub recommendation: String,
}

/// Derived, read-only analysis of one control/variant comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentAnalysis {
    /// Control conversion rate in percent
    pub control_rate: f64,
    /// Variant conversion rate in percent
    pub variant_rate: f64,
    /// Relative change of variant over control in percent (0 when control rate is 0)
    pub uplift: f64,
    pub z_score: f64,
    pub p_value: f64,
    /// Formal significance decision at `confidence_level`
    pub is_significant: bool,
    /// Display-only "confidence so far" percentage.
    ///
    /// Equals `100 * confidence_level` once significant, otherwise
    /// `max(0, 100 * (1 - p_value))`. This is an illustrative progress figure,
    /// not a corrected p-value or a posterior probability.
    pub significance: f64,
    /// Confidence level the decision was taken at, as a fraction
    pub confidence_level: f64,
    pub interpretation: Interpretation,
}

/// Analyze an experiment at `confidence_level` (default 0.95)
///
/// Counts follow the same rules as
/// [`two_proportions_z_test`](super::two_proportions_z_test): invalid counts
/// produce an inconclusive analysis rather than an error.
///
/// ```
/// use abstats::statistics::{analyze_experiment, Winner};
///
/// let analysis = analyze_experiment(10_000, 300, 10_000, 450, None);
/// assert!(analysis.is_significant);
/// assert_eq!(analysis.interpretation.winner, Winner::Variant);
/// ```
pub fn analyze_experiment(
    control_visitors: i64,
    control_conversions: i64,
    variant_visitors: i64,
    variant_conversions: i64,
    confidence_level: Option<f64>,
) -> ExperimentAnalysis {
    let confidence_level = confidence_level.unwrap_or(DEFAULT_CONFIDENCE_LEVEL);

    let test = two_proportions_z_test(
        control_conversions,
        control_visitors,
        variant_conversions,
        variant_visitors,
    );

    let control_rate = percent_rate(control_conversions, control_visitors);
    let variant_rate = percent_rate(variant_conversions, variant_visitors);

    let uplift = if control_rate > 0.0 {
        100.0 * (variant_rate - control_rate) / control_rate
    } else {
        0.0
    };

    let is_significant = test.is_significant(confidence_level);

    let significance = if is_significant {
        100.0 * confidence_level
    } else {
        (100.0 * (1.0 - test.p_value)).max(0.0)
    };

    let winner = if !is_significant {
        Winner::Inconclusive
    } else if variant_rate > control_rate {
        Winner::Variant
    } else {
        Winner::Control
    };

    let interpretation = interpret(winner, uplift, significance, test.p_value);

    tracing::trace!(
        control_rate,
        variant_rate,
        uplift,
        p_value = test.p_value,
        winner = %winner,
        "experiment analyzed"
    );

    ExperimentAnalysis {
        control_rate,
        variant_rate,
        uplift,
        z_score: test.z_score,
        p_value: test.p_value,
        is_significant,
        significance,
        confidence_level,
        interpretation,
    }
}

fn percent_rate(conversions: i64, visitors: i64) -> f64 {
    if visitors > 0 {
        100.0 * conversions as f64 / visitors as f64
    } else {
        0.0
    }
}

fn interpret(winner: Winner, uplift: f64, significance: f64, p_value: f64) -> Interpretation {
    let (message, recommendation) = match winner {
        Winner::Variant => (
            format!(
                "Variant wins with a {uplift:.2}% uplift over control at {significance:.0}% confidence"
            ),
            "Implement the variant: the improvement is statistically significant".to_string(),
        ),
        Winner::Control => (
            format!(
                "Control wins: the variant changed conversion by {uplift:.2}% at {significance:.0}% confidence"
            ),
            "Keep the control: the variant performs significantly worse".to_string(),
        ),
        Winner::Inconclusive => (
            format!(
                "No significant difference yet: {uplift:.2}% uplift, current confidence {significance:.0}% (p-value {p_value:.4})"
            ),
            "Continue running the experiment to collect more data before deciding".to_string(),
        ),
    };

    Interpretation {
        winner,
        message,
        recommendation,
    }
}
