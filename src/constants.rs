//! Documented constants for the statistics engine
//!
//! Changing any value here changes published golden test vectors.

// =============================================================================
// DEFAULTS
// =============================================================================

/// Default confidence level for significance decisions (95%)
///
/// Callers pass a fraction, never a percentage.
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 0.95;

/// Default statistical power for sample-size planning (80%)
pub const DEFAULT_POWER: f64 = 0.80;

/// Default share of traffic routed to the variant (50/50 split)
pub const DEFAULT_VARIANT_SHARE: f64 = 0.5;

/// Minimum visitors per group before a report stops flagging "insufficient data"
pub const MIN_SAMPLE_SIZE: u64 = 100;

// =============================================================================
// ABRAMOWITZ-STEGUN 7.1.26 (erf approximation, |error| <= 1.5e-7)
// =============================================================================

pub const ERF_P: f64 = 0.3275911;
pub const ERF_A1: f64 = 0.254829592;
pub const ERF_A2: f64 = -0.284496736;
pub const ERF_A3: f64 = 1.421413741;
pub const ERF_A4: f64 = -1.453152027;
pub const ERF_A5: f64 = 1.061405429;

// =============================================================================
// ACKLAM INVERSE NORMAL CDF (relative error < 1.15e-9)
// =============================================================================

/// Central-region numerator coefficients, highest power first
pub const PROBIT_CENTRAL_NUM: [f64; 6] = [
    -3.969683028665376e+01,
    2.209460984245205e+02,
    -2.759285104469687e+02,
    1.383577518672690e+02,
    -3.066479806614716e+01,
    2.506628277459239e+00,
];

/// Central-region denominator coefficients (constant term 1 implied)
pub const PROBIT_CENTRAL_DEN: [f64; 5] = [
    -5.447609879822406e+01,
    1.615858368580409e+02,
    -1.556989798598866e+02,
    6.680131188771972e+01,
    -1.328068155288572e+01,
];

/// Tail-region numerator coefficients
pub const PROBIT_TAIL_NUM: [f64; 6] = [
    -7.784894002430293e-03,
    -3.223964580411365e-01,
    -2.400758277161838e+00,
    -2.549732539343734e+00,
    4.374664141464968e+00,
    2.938163982698783e+00,
];

/// Tail-region denominator coefficients (constant term 1 implied)
pub const PROBIT_TAIL_DEN: [f64; 4] = [
    7.784695709041462e-03,
    3.224671290700398e-01,
    2.445134137142996e+00,
    3.754408661907416e+00,
];

/// Probabilities below this (or above its complement) use the tail expansion
pub const PROBIT_TAIL_CUTOFF: f64 = 0.02425;

// =============================================================================
// SAMPLE RATIO MISMATCH
// =============================================================================

/// p-value below which a traffic split is reported as mismatched
pub const SRM_P_VALUE_THRESHOLD: f64 = 0.01;

/// Absolute share deviation separating a warning from a critical mismatch (5 points)
pub const SRM_CRITICAL_DEVIATION: f64 = 0.05;

// =============================================================================
// EFFECT SIZE (Cohen's conventions for h)
// =============================================================================

pub const COHENS_H_SMALL: f64 = 0.2;
pub const COHENS_H_MEDIUM: f64 = 0.5;
pub const COHENS_H_LARGE: f64 = 0.8;
