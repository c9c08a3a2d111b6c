//! Effect size, confidence interval and observed power
//!
//! Complements the significance decision with "how big" and "how sure":
//! a significant result with a negligible effect is rarely worth shipping.

use serde::{Deserialize, Serialize};

use super::counts::SampleCounts;
use super::normal::{norm_cdf, two_sided_critical_value};
use crate::constants::{COHENS_H_LARGE, COHENS_H_MEDIUM, COHENS_H_SMALL};

/// Confidence interval for the absolute rate difference (variant - control)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
    /// Confidence level as a fraction
    pub confidence_level: f64,
}

impl ConfidenceInterval {
    pub fn contains(&self, value: f64) -> bool {
        self.lower <= value && value <= self.upper
    }

    /// Whether the interval admits "no difference"
    pub fn spans_zero(&self) -> bool {
        self.lower < 0.0 && self.upper > 0.0
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }
}

/// Effect size interpretation (Cohen's conventions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffectSizeInterpretation {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectSizeInterpretation {
    fn from_cohens_h(h: f64) -> Self {
        if h < COHENS_H_SMALL {
            Self::Negligible
        } else if h < COHENS_H_MEDIUM {
            Self::Small
        } else if h < COHENS_H_LARGE {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

impl std::fmt::Display for EffectSizeInterpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Negligible => write!(f, "negligible"),
            Self::Small => write!(f, "small"),
            Self::Medium => write!(f, "medium"),
            Self::Large => write!(f, "large"),
        }
    }
}

/// Effect size metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectSize {
    /// Cohen's h for proportions (0.2 = small, 0.5 = medium, 0.8 = large)
    pub cohens_h: f64,
    /// Interpretation of effect size
    pub interpretation: EffectSizeInterpretation,
    /// Relative risk (variant rate / control rate), 0 when control rate is 0
    pub relative_risk: f64,
    /// Odds ratio, 0 when control odds are 0 or infinite
    pub odds_ratio: f64,
    /// Number needed to treat: visitors per one additional conversion
    pub nnt: f64,
}

/// Unpooled Wald interval for `p2 - p1`
///
/// Degenerates to `(0, 0)` when either group has no visitors.
pub fn difference_confidence_interval(
    control: &SampleCounts,
    variant: &SampleCounts,
    confidence_level: f64,
) -> ConfidenceInterval {
    if control.is_empty() || variant.is_empty() {
        return ConfidenceInterval {
            lower: 0.0,
            upper: 0.0,
            confidence_level,
        };
    }

    let p1 = control.rate();
    let p2 = variant.rate();
    let diff = p2 - p1;

    let se = ((p1 * (1.0 - p1) / control.visitors as f64)
        + (p2 * (1.0 - p2) / variant.visitors as f64))
        .sqrt();

    let margin = two_sided_critical_value(confidence_level) * se;

    ConfidenceInterval {
        lower: diff - margin,
        upper: diff + margin,
        confidence_level,
    }
}

/// Cohen's h, relative risk, odds ratio and NNT for two groups
pub fn effect_size(control: &SampleCounts, variant: &SampleCounts) -> EffectSize {
    let (p1, p2) = (control.rate(), variant.rate());
    let cohens_h = cohens_h(p1, p2).abs();

    let odds_ratio = match (odds(p1), odds(p2)) {
        (Some(control_odds), Some(variant_odds)) if control_odds > 0.0 => {
            variant_odds / control_odds
        }
        (Some(control_odds), None) if control_odds > 0.0 => f64::INFINITY,
        _ => 0.0,
    };

    let risk_difference = (p2 - p1).abs();

    EffectSize {
        cohens_h,
        interpretation: EffectSizeInterpretation::from_cohens_h(cohens_h),
        relative_risk: if p1 > 0.0 { p2 / p1 } else { 0.0 },
        odds_ratio,
        nnt: if risk_difference > 0.0 {
            risk_difference.recip()
        } else {
            f64::INFINITY
        },
    }
}

/// Odds `p / (1 - p)`, `None` when every visitor converted
fn odds(p: f64) -> Option<f64> {
    (p < 1.0).then(|| p / (1.0 - p))
}

/// Signed Cohen's h: `2·asin(√p2) − 2·asin(√p1)`
pub fn cohens_h(p1: f64, p2: f64) -> f64 {
    2.0 * p2.sqrt().asin() - 2.0 * p1.sqrt().asin()
}

/// Post-hoc power to detect the observed effect at `confidence_level`
///
/// `Φ(|h|·√(n_eff/2) − z_{1−α/2})` with `n_eff` the harmonic-mean group size.
/// Observed power says how reliable the current sample is for an effect of
/// the size seen so far; it is not evidence for or against the effect.
pub fn observed_power(
    control: &SampleCounts,
    variant: &SampleCounts,
    confidence_level: f64,
) -> f64 {
    let n1 = control.visitors as f64;
    let n2 = variant.visitors as f64;
    let p1 = control.rate();
    let p2 = variant.rate();

    if n1 == 0.0 || n2 == 0.0 {
        return 0.0;
    }

    let h = cohens_h(p1, p2).abs();
    let n_eff = 2.0 / (1.0 / n1 + 1.0 / n2);

    let z = h * (n_eff / 2.0).sqrt() - two_sided_critical_value(confidence_level);
    let power = norm_cdf(z);

    if power.is_nan() {
        return 0.0;
    }
    power.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(visitors: u64, conversions: u64) -> SampleCounts {
        SampleCounts::new(visitors, conversions).unwrap()
    }

    #[test]
    fn test_confidence_interval() {
        let ci = difference_confidence_interval(&counts(1000, 100), &counts(1000, 150), 0.95);

        // Difference is 5 points, CI excludes zero
        assert!(ci.contains(0.05));
        assert!(!ci.spans_zero());
        assert!((ci.lower - 0.021095).abs() < 1e-5);
        assert!((ci.upper - 0.078905).abs() < 1e-5);
    }

    #[test]
    fn test_confidence_interval_spans_zero_for_weak_evidence() {
        let ci = difference_confidence_interval(&counts(1000, 30), &counts(1000, 45), 0.95);
        assert!(ci.spans_zero());

        // Wider at higher confidence
        let wide = difference_confidence_interval(&counts(1000, 30), &counts(1000, 45), 0.99);
        assert!(wide.width() > ci.width());
    }

    #[test]
    fn test_confidence_interval_empty_group() {
        let ci = difference_confidence_interval(&counts(0, 0), &counts(100, 10), 0.95);
        assert_eq!((ci.lower, ci.upper), (0.0, 0.0));
    }

    #[test]
    fn test_effect_size_calculation() {
        let effect = effect_size(&counts(1000, 100), &counts(1000, 200));

        // 10% to 20% is a small effect by Cohen's h
        assert!((effect.cohens_h - 0.283794).abs() < 1e-5);
        assert_eq!(effect.interpretation, EffectSizeInterpretation::Small);
        assert!((effect.relative_risk - 2.0).abs() < 1e-12);
        assert!((effect.odds_ratio - 2.25).abs() < 1e-9);
        // NNT should be 10 (1/(0.2-0.1))
        assert!((effect.nnt - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_effect_size_edge_cases() {
        let no_change = effect_size(&counts(1000, 50), &counts(1000, 50));
        assert_eq!(no_change.cohens_h, 0.0);
        assert_eq!(no_change.interpretation, EffectSizeInterpretation::Negligible);
        assert!(no_change.nnt.is_infinite());

        let zero_control = effect_size(&counts(1000, 0), &counts(1000, 10));
        assert_eq!(zero_control.relative_risk, 0.0);
        assert_eq!(zero_control.odds_ratio, 0.0);

        let saturated = effect_size(&counts(10, 10), &counts(10, 5));
        assert_eq!(saturated.odds_ratio, 0.0);
        assert_eq!(saturated.interpretation, EffectSizeInterpretation::Large);

        // Variant converts everyone: infinite odds
        let all_variant = effect_size(&counts(10, 5), &counts(10, 10));
        assert!(all_variant.odds_ratio.is_infinite());
    }

    #[test]
    fn test_observed_power() {
        // 10% vs 20% with 500 per group: very high power
        let strong = observed_power(&counts(500, 50), &counts(500, 100), 0.95);
        assert!(strong > 0.99, "power was {strong}");

        // Tiny samples barely move the needle
        let weak = observed_power(&counts(10, 1), &counts(10, 2), 0.95);
        assert!(weak < 0.2, "power was {weak}");

        assert_eq!(observed_power(&counts(0, 0), &counts(10, 2), 0.95), 0.0);
    }

    #[test]
    fn test_observed_power_with_zero_control_rate() {
        // Cohen's h is defined at p = 0, so power is too
        let power = observed_power(&counts(10, 0), &counts(10, 2), 0.95);
        assert!((power - 0.545195).abs() < 1e-4, "power was {power}");

        let power = observed_power(&counts(200, 0), &counts(200, 3), 0.95);
        assert!((power - 0.689944).abs() < 1e-4, "power was {power}");
    }
}
