//! Sample Ratio Mismatch detection
//!
//! SRM occurs when the observed traffic split differs from the configured one,
//! which points at a bug in assignment or event collection. Results from an
//! experiment with SRM should not be trusted whatever their p-value.

use serde::{Deserialize, Serialize};

use super::normal::norm_cdf;
use crate::constants::{SRM_CRITICAL_DEVIATION, SRM_P_VALUE_THRESHOLD};

/// Severity of sample ratio mismatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SrmSeverity {
    None,
    Warning,
    Critical,
}

/// Sample Ratio Mismatch detection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SrmCheck {
    /// Whether SRM is detected (data quality issue)
    pub srm_detected: bool,
    /// Expected share of visitors in the variant
    pub expected_ratio: f64,
    /// Observed share of visitors in the variant
    pub observed_ratio: f64,
    /// Chi-squared statistic (df = 1)
    pub chi_squared: f64,
    pub p_value: f64,
    pub severity: SrmSeverity,
}

/// Chi-squared goodness-of-fit test of the visitor split
///
/// `expected_variant_share` is the configured fraction of traffic sent to the
/// variant (0.5 for 50/50). Shares outside (0, 1) and empty experiments skip
/// the test and report no mismatch.
pub fn check_srm(
    control_visitors: u64,
    variant_visitors: u64,
    expected_variant_share: f64,
) -> SrmCheck {
    let total = control_visitors.saturating_add(variant_visitors);

    if total == 0 || !(expected_variant_share > 0.0 && expected_variant_share < 1.0) {
        return SrmCheck {
            srm_detected: false,
            expected_ratio: expected_variant_share,
            observed_ratio: if total == 0 {
                expected_variant_share
            } else {
                variant_visitors as f64 / total as f64
            },
            chi_squared: 0.0,
            p_value: 1.0,
            severity: SrmSeverity::None,
        };
    }

    let total_f = total as f64;
    let observed_ratio = variant_visitors as f64 / total_f;

    let expected_control = total_f * (1.0 - expected_variant_share);
    let expected_variant = total_f * expected_variant_share;

    let chi_squared = (control_visitors as f64 - expected_control).powi(2) / expected_control
        + (variant_visitors as f64 - expected_variant).powi(2) / expected_variant;

    // df = 1: chi-squared is the square of a standard normal
    let p_value = (2.0 * (1.0 - norm_cdf(chi_squared.sqrt()))).clamp(0.0, 1.0);

    let srm_detected = p_value < SRM_P_VALUE_THRESHOLD;
    let deviation = (observed_ratio - expected_variant_share).abs();
    let severity = if !srm_detected {
        SrmSeverity::None
    } else if deviation < SRM_CRITICAL_DEVIATION {
        SrmSeverity::Warning
    } else {
        SrmSeverity::Critical
    };

    if srm_detected {
        tracing::debug!(
            control_visitors,
            variant_visitors,
            expected_variant_share,
            p_value,
            "sample ratio mismatch detected"
        );
    }

    SrmCheck {
        srm_detected,
        expected_ratio: expected_variant_share,
        observed_ratio,
        chi_squared,
        p_value,
        severity,
    }
}
