//! Sample-size planning for future experiments
//!
//! Two estimators share the Lehr-style two-proportion formula
//! `n = 2 (z_alpha + z_beta)^2 p(1-p) / effect^2`:
//!
//! - [`calculate_sample_size`] derives `z_alpha`/`z_beta` by re-scaling
//!   `norm_cdf` values. This is not a true inverse of the normal CDF and
//!   yields much smaller `z` values than textbook tables (about 0.48 instead
//!   of 1.96 at 95%). It is kept as the default so that existing dashboards
//!   keep showing the numbers they always have.
//! - [`calculate_sample_size_probit`] uses the real quantile function and
//!   matches standard power calculators.

use serde::{Deserialize, Serialize};

use super::normal::{inverse_normal_cdf, norm_cdf, two_sided_critical_value};
use crate::constants::{DEFAULT_CONFIDENCE_LEVEL, DEFAULT_POWER};

/// Required visitors per variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "visitors", rename_all = "snake_case")]
pub enum RequiredSampleSize {
    /// Finite number of visitors needed in each group
    PerVariant(u64),
    /// No finite sample can detect the effect: the effect is zero, or the
    /// target rate lies outside [0, 1]
    Unbounded,
}

impl RequiredSampleSize {
    /// Visitors per variant, `None` when unbounded
    pub fn per_variant(&self) -> Option<u64> {
        match self {
            Self::PerVariant(n) => Some(*n),
            Self::Unbounded => None,
        }
    }

    /// Visitors across both groups, `None` when unbounded or overflowing
    pub fn total(&self) -> Option<u64> {
        self.per_variant().and_then(|n| n.checked_mul(2))
    }

    /// Numeric form, `f64::INFINITY` when unbounded
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::PerVariant(n) => *n as f64,
            Self::Unbounded => f64::INFINITY,
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl std::fmt::Display for RequiredSampleSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PerVariant(n) => write!(f, "{n} visitors per variant"),
            Self::Unbounded => write!(f, "unbounded (no detectable effect)"),
        }
    }
}

/// Visitors per variant needed to detect a relative lift over a baseline rate
///
/// `baseline_rate` is a fraction (0.03 for 3%), `expected_lift` is relative
/// (0.10 for +10%). Defaults: `confidence_level` 0.95, `power` 0.80.
///
/// The `z` values come from the legacy `norm_cdf` re-scaling described in the
/// module docs; use [`calculate_sample_size_probit`] for textbook numbers.
/// A zero effect (zero baseline or zero lift) returns
/// [`RequiredSampleSize::Unbounded`], and so does a lift below -100%, whose
/// target rate is negative.
pub fn calculate_sample_size(
    baseline_rate: f64,
    expected_lift: f64,
    confidence_level: Option<f64>,
    power: Option<f64>,
) -> RequiredSampleSize {
    let confidence_level = confidence_level.unwrap_or(DEFAULT_CONFIDENCE_LEVEL);
    let power = power.unwrap_or(DEFAULT_POWER);

    let scale = norm_cdf(0.5);
    let z_alpha = (norm_cdf(1.0 - (1.0 - confidence_level) / 2.0) - 0.5).abs() / scale;
    let z_beta = (norm_cdf(power) - 0.5).abs() / scale;

    lehr_sample_size(baseline_rate, baseline_rate * expected_lift, z_alpha, z_beta)
}

/// Same as [`calculate_sample_size`] but with true normal quantiles
///
/// `z_alpha = Φ⁻¹(1 - α/2)` and `z_beta = Φ⁻¹(power)`.
pub fn calculate_sample_size_probit(
    baseline_rate: f64,
    expected_lift: f64,
    confidence_level: Option<f64>,
    power: Option<f64>,
) -> RequiredSampleSize {
    let (z_alpha, z_beta) = probit_z_values(confidence_level, power);
    lehr_sample_size(baseline_rate, baseline_rate * expected_lift, z_alpha, z_beta)
}

/// Visitors per variant needed to tell `target_rate` apart from `baseline_rate`
///
/// Planned from the absolute difference with true normal quantiles, so it
/// stays defined when the baseline rate is 0 and a relative lift is not.
pub fn calculate_sample_size_for_difference(
    baseline_rate: f64,
    target_rate: f64,
    confidence_level: Option<f64>,
    power: Option<f64>,
) -> RequiredSampleSize {
    let (z_alpha, z_beta) = probit_z_values(confidence_level, power);
    lehr_sample_size(baseline_rate, target_rate - baseline_rate, z_alpha, z_beta)
}

fn probit_z_values(confidence_level: Option<f64>, power: Option<f64>) -> (f64, f64) {
    let confidence_level = confidence_level.unwrap_or(DEFAULT_CONFIDENCE_LEVEL);
    let power = power.unwrap_or(DEFAULT_POWER);

    (
        two_sided_critical_value(confidence_level),
        inverse_normal_cdf(power),
    )
}

fn lehr_sample_size(
    baseline_rate: f64,
    effect: f64,
    z_alpha: f64,
    z_beta: f64,
) -> RequiredSampleSize {
    if effect == 0.0 {
        tracing::debug!(
            baseline_rate,
            effect,
            "zero effect size, sample size is unbounded"
        );
        return RequiredSampleSize::Unbounded;
    }

    let common_proportion = (baseline_rate + (baseline_rate + effect)) / 2.0;
    let n = (2.0 * (z_alpha + z_beta).powi(2) * common_proportion * (1.0 - common_proportion)
        / effect.powi(2))
    .ceil();

    // NaN/inf from non-finite inputs, or more visitors than a u64 can hold
    if !n.is_finite() || n >= u64::MAX as f64 {
        tracing::debug!(baseline_rate, effect, n, "sample size is not finite");
        return RequiredSampleSize::Unbounded;
    }

    // Target rate outside [0, 1] (lift below -100%) has no valid common proportion
    if n <= 0.0 {
        tracing::debug!(
            baseline_rate,
            effect,
            n,
            "target rate out of range, sample size is unbounded"
        );
        return RequiredSampleSize::Unbounded;
    }

    RequiredSampleSize::PerVariant(n as u64)
}
