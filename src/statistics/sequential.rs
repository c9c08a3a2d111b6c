//! Group-sequential stopping boundaries (O'Brien-Fleming shape)
//!
//! Peeking at a running experiment and stopping at the first p < 0.05
//! inflates the false positive rate. With a planned number of looks, each
//! look gets its own, stricter threshold; early looks need overwhelming
//! evidence and the final look is close to the nominal level.

use serde::{Deserialize, Serialize};

use super::normal::{norm_cdf, two_sided_critical_value};

/// Stopping boundary for one interim analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SequentialBoundary {
    /// Current analysis number (1, 2, 3, ...)
    pub analysis_number: u32,
    /// Total planned analyses
    pub planned_analyses: u32,
    /// Fraction of the planned information collected so far
    pub information_fraction: f64,
    /// Critical |z| at this look
    pub z_boundary: f64,
    /// Two-sided p-value threshold at this look
    pub nominal_alpha: f64,
}

impl SequentialBoundary {
    /// Whether a p-value at this look justifies stopping for efficacy
    pub fn can_stop_early(&self, p_value: f64) -> bool {
        p_value < self.nominal_alpha
    }
}

/// Boundary for look `analysis_number` out of `planned_analyses`
///
/// `analysis_number` is clamped to `1..=planned_analyses` and a plan of zero
/// looks is treated as a single look.
pub fn sequential_boundary(
    confidence_level: f64,
    analysis_number: u32,
    planned_analyses: u32,
) -> SequentialBoundary {
    let planned_analyses = planned_analyses.max(1);
    let analysis_number = analysis_number.clamp(1, planned_analyses);

    let information_fraction = analysis_number as f64 / planned_analyses as f64;
    let z_boundary = two_sided_critical_value(confidence_level) / information_fraction.sqrt();
    let nominal_alpha = (2.0 * (1.0 - norm_cdf(z_boundary))).clamp(0.0, 1.0);

    SequentialBoundary {
        analysis_number,
        planned_analyses,
        information_fraction,
        z_boundary,
        nominal_alpha,
    }
}
