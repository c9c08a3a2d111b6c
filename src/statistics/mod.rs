//! Statistical significance engine for conversion experiments
//!
//! Pure functions over visitor and conversion counts: no I/O, no clock, no
//! randomness and no shared state, so every call is independent and can run
//! on any thread.
//!
//! - [`norm_cdf`]: standard normal CDF
//! - [`two_proportions_z_test`]: z-score, two-tailed p-value, significance
//! - [`analyze_experiment`]: rates, uplift, winner and interpretation
//! - [`calculate_sample_size`]: visitors per variant for a planned lift
//!
//! Supporting analyses (interval, effect size, power, sample ratio mismatch,
//! sequential boundaries) live in their own submodules and are combined by
//! [`crate::report::ExperimentReport`].
//!
//! # Example
//!
//! ```
//! use abstats::statistics::{analyze_experiment, calculate_sample_size, Winner};
//!
//! let analysis = analyze_experiment(1000, 30, 1000, 45, Some(0.95));
//! assert_eq!(analysis.interpretation.winner, Winner::Inconclusive);
//!
//! let needed = calculate_sample_size(0.03, 0.10, None, None);
//! assert_eq!(needed.per_variant(), Some(5510));
//! ```

mod analysis;
mod counts;
mod effect;
mod normal;
mod sample_size;
mod sequential;
mod srm;

pub use analysis::{analyze_experiment, ExperimentAnalysis, Interpretation, Winner};
pub use counts::SampleCounts;
pub use effect::{
    cohens_h, difference_confidence_interval, effect_size, observed_power, ConfidenceInterval,
    EffectSize, EffectSizeInterpretation,
};
pub use normal::{erf, inverse_normal_cdf, norm_cdf, two_sided_critical_value};
pub use sample_size::{
    calculate_sample_size, calculate_sample_size_for_difference, calculate_sample_size_probit,
    RequiredSampleSize,
};
pub use sequential::{sequential_boundary, SequentialBoundary};
pub use srm::{check_srm, SrmCheck, SrmSeverity};
pub use z_test::{two_proportions_z_test, ZTestResult};

/// Analyze validated counts; same semantics as [`analyze_experiment`]
pub fn analyze_counts(
    control: &SampleCounts,
    variant: &SampleCounts,
    confidence_level: Option<f64>,
) -> ExperimentAnalysis {
    let (control_visitors, control_conversions) = control.as_signed();
    let (variant_visitors, variant_conversions) = variant.as_signed();
    analyze_experiment(
        control_visitors,
        control_conversions,
        variant_visitors,
        variant_conversions,
        confidence_level,
    )
}
