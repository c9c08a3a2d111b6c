//! Standard normal distribution approximations
//!
//! `norm_cdf` must use the Abramowitz-Stegun 7.1.26 erf formula: dashboards
//! compute the same statistic client-side and compare exact values.

use crate::constants::{
    ERF_A1, ERF_A2, ERF_A3, ERF_A4, ERF_A5, ERF_P, PROBIT_CENTRAL_DEN, PROBIT_CENTRAL_NUM,
    PROBIT_TAIL_CUTOFF, PROBIT_TAIL_DEN, PROBIT_TAIL_NUM,
};

/// Error function approximation (A&S 7.1.26, |error| <= 1.5e-7)
pub fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();

    let t = 1.0 / (1.0 + ERF_P * x);
    let y = 1.0
        - (((((ERF_A5 * t + ERF_A4) * t) + ERF_A3) * t + ERF_A2) * t + ERF_A1)
            * t
            * (-x * x).exp();

    sign * y
}

/// Standard normal CDF: P(Z <= z)
///
/// Defined for every finite `z`. NaN in gives NaN out; rejecting non-finite
/// input is the caller's job.
///
/// ```
/// use abstats::statistics::norm_cdf;
///
/// assert!((norm_cdf(0.0) - 0.5).abs() < 1e-6);
/// assert!((norm_cdf(1.96) - 0.975).abs() < 1e-4);
/// ```
pub fn norm_cdf(z: f64) -> f64 {
    0.5 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Inverse standard normal CDF (probit), Acklam's rational approximation
///
/// Relative error below 1.15e-9 over the open unit interval.
/// Returns -inf/+inf at 0/1 and NaN outside [0, 1].
pub fn inverse_normal_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    if p < PROBIT_TAIL_CUTOFF {
        lower_tail_quantile(p)
    } else if p <= 1.0 - PROBIT_TAIL_CUTOFF {
        let q = p - 0.5;
        let r = q * q;
        q * horner(&PROBIT_CENTRAL_NUM, r) / (horner(&PROBIT_CENTRAL_DEN, r) * r + 1.0)
    } else {
        // Symmetric about 0.5
        -lower_tail_quantile(1.0 - p)
    }
}

fn lower_tail_quantile(p: f64) -> f64 {
    let q = (-2.0 * p.ln()).sqrt();
    horner(&PROBIT_TAIL_NUM, q) / (horner(&PROBIT_TAIL_DEN, q) * q + 1.0)
}

/// Evaluate a polynomial with coefficients ordered highest power first
fn horner(coefficients: &[f64], x: f64) -> f64 {
    coefficients.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Two-sided critical value for a confidence level, e.g. 1.96 for 0.95
pub fn two_sided_critical_value(confidence_level: f64) -> f64 {
    inverse_normal_cdf(1.0 - (1.0 - confidence_level) / 2.0)
}
