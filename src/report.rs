//! Experiment reports combining every analysis into one decision
//!
//! What a dashboard's stats endpoint needs in one call:
//! - Is there a winner, and should we ship it?
//! - How large is the effect and how uncertain is it?
//! - Is the data trustworthy (enough visitors, no sample ratio mismatch)?
//! - If undecided, how much more traffic is needed?

use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::errors::{Result, ValidationErrorExt};
use crate::statistics::{
    analyze_counts, calculate_sample_size, calculate_sample_size_for_difference,
    calculate_sample_size_probit, check_srm,
    difference_confidence_interval, effect_size, observed_power, ConfidenceInterval,
    EffectSize, EffectSizeInterpretation, ExperimentAnalysis, RequiredSampleSize, SampleCounts,
    SrmCheck, Winner,
};
use crate::validation;

/// Full report for one control/variant comparison
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub control: SampleCounts,
    pub variant: SampleCounts,
    /// Significance analysis at the configured confidence level
    pub analysis: ExperimentAnalysis,
    /// Interval for the absolute rate difference (variant - control)
    pub confidence_interval: ConfidenceInterval,
    pub effect_size: EffectSize,
    /// Post-hoc power for the observed effect
    pub observed_power: f64,
    pub srm: SrmCheck,
    /// Visitors per variant needed to detect the observed difference at the configured power
    pub required_sample_size: RequiredSampleSize,
    /// Both groups reached the configured minimum sample size
    pub has_sufficient_data: bool,
    /// Significant variant win on trustworthy data
    pub should_ship: bool,
    /// Plain-language findings, most important first
    pub insights: Vec<String>,
}

impl ExperimentReport {
    /// Build a report using the parameters in `config`
    pub fn build(control: SampleCounts, variant: SampleCounts, config: &AnalysisConfig) -> Self {
        let analysis = analyze_counts(&control, &variant, Some(config.confidence_level));
        let confidence_interval =
            difference_confidence_interval(&control, &variant, config.confidence_level);
        let effect_size = effect_size(&control, &variant);
        let observed_power = observed_power(&control, &variant, config.confidence_level);
        let srm = check_srm(
            control.visitors,
            variant.visitors,
            config.expected_variant_share,
        );

        let required_sample_size = calculate_sample_size_for_difference(
            control.rate(),
            variant.rate(),
            Some(config.confidence_level),
            Some(config.power),
        );

        let has_sufficient_data = control.visitors >= config.min_sample_size
            && variant.visitors >= config.min_sample_size;

        let should_ship = analysis.interpretation.winner == Winner::Variant
            && has_sufficient_data
            && !srm.srm_detected;

        let mut report = Self {
            control,
            variant,
            analysis,
            confidence_interval,
            effect_size,
            observed_power,
            srm,
            required_sample_size,
            has_sufficient_data,
            should_ship,
            insights: Vec::new(),
        };
        report.insights = report.generate_insights(config);

        tracing::debug!(
            winner = %report.analysis.interpretation.winner,
            should_ship = report.should_ship,
            p_value = report.analysis.p_value,
            srm = report.srm.srm_detected,
            "experiment report built"
        );

        report
    }

    fn generate_insights(&self, config: &AnalysisConfig) -> Vec<String> {
        let mut insights = Vec::new();

        if !self.has_sufficient_data {
            insights.push(format!(
                "Insufficient data: {} control and {} variant visitors, need at least {} per group",
                self.control.visitors, self.variant.visitors, config.min_sample_size
            ));
        }

        if self.srm.srm_detected {
            insights.push(format!(
                "Data quality: sample ratio mismatch ({:.1}% of visitors in variant, expected {:.1}%). Check assignment before trusting results",
                self.srm.observed_ratio * 100.0,
                self.srm.expected_ratio * 100.0
            ));
        }

        insights.push(self.analysis.interpretation.message.clone());

        if self.control.conversions == 0 && self.variant.conversions > 0 {
            insights.push(format!(
                "Control has no conversions yet, so relative uplift is undefined: compare absolute rates ({:.2}% control vs {:.2}% variant)",
                self.analysis.control_rate, self.analysis.variant_rate
            ));
        }

        if self.should_ship {
            insights.push(self.analysis.interpretation.recommendation.clone());
        } else if self.analysis.interpretation.winner == Winner::Variant {
            insights.push(
                "Variant looks better, but resolve the data issues above before shipping"
                    .to_string(),
            );
        } else {
            insights.push(self.analysis.interpretation.recommendation.clone());
        }

        if self.confidence_interval.spans_zero() {
            insights.push(format!(
                "The {:.0}% interval for the difference ({:+.2} to {:+.2} points) includes zero",
                self.confidence_interval.confidence_level * 100.0,
                self.confidence_interval.lower * 100.0,
                self.confidence_interval.upper * 100.0
            ));
        }

        if self.analysis.is_significant
            && self.effect_size.interpretation == EffectSizeInterpretation::Negligible
        {
            insights.push(format!(
                "Effect is {} (Cohen's h = {:.3}); check it matters to the business",
                self.effect_size.interpretation, self.effect_size.cohens_h
            ));
        }

        if !self.analysis.is_significant && self.observed_power < config.power {
            match self.required_sample_size {
                RequiredSampleSize::PerVariant(needed) => insights.push(format!(
                    "Current power {:.1}%: need ~{} visitors per variant for {:.0}% power at the observed difference",
                    self.observed_power * 100.0,
                    needed,
                    config.power * 100.0
                )),
                RequiredSampleSize::Unbounded => insights.push(
                    "No difference observed so far: no sample size can confirm a zero lift"
                        .to_string(),
                ),
            }
        }

        insights
    }
}

/// Sample-size plan for a future experiment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplePlan {
    pub baseline_rate: f64,
    pub expected_lift: f64,
    pub confidence_level: f64,
    pub power: f64,
    /// Estimate from the legacy dashboard formula
    pub legacy: RequiredSampleSize,
    /// Estimate from true normal quantiles
    pub probit: RequiredSampleSize,
}

/// Validate planning inputs and compute both sample-size estimates
///
/// `baseline_rate` is a fraction (0.03), `expected_lift` is relative (0.10).
pub fn plan_experiment(
    baseline_rate: f64,
    expected_lift: f64,
    config: &AnalysisConfig,
) -> Result<SamplePlan> {
    validation::validate_rate(baseline_rate).map_validation_err("baseline_rate")?;
    validation::validate_lift(expected_lift).map_validation_err("expected_lift")?;
    config.validate()?;

    let legacy = calculate_sample_size(
        baseline_rate,
        expected_lift,
        Some(config.confidence_level),
        Some(config.power),
    );
    let probit = calculate_sample_size_probit(
        baseline_rate,
        expected_lift,
        Some(config.confidence_level),
        Some(config.power),
    );

    Ok(SamplePlan {
        baseline_rate,
        expected_lift,
        confidence_level: config.confidence_level,
        power: config.power,
        legacy,
        probit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(visitors: u64, conversions: u64) -> SampleCounts {
        SampleCounts::new(visitors, conversions).unwrap()
    }

    #[test]
    fn test_clear_winner_ships() {
        let report = ExperimentReport::build(
            counts(10_000, 300),
            counts(10_000, 450),
            &AnalysisConfig::default(),
        );

        assert!(report.analysis.is_significant);
        assert!(report.has_sufficient_data);
        assert!(!report.srm.srm_detected);
        assert!(report.should_ship);
        assert!(!report.confidence_interval.spans_zero());
        assert!(report
            .insights
            .iter()
            .any(|i| i.contains("Implement the variant")));
    }

    #[test]
    fn test_small_sample_keeps_testing() {
        let report =
            ExperimentReport::build(counts(10, 1), counts(10, 2), &AnalysisConfig::default());

        assert!(!report.should_ship);
        assert!(!report.has_sufficient_data);
        assert_eq!(report.analysis.interpretation.winner, Winner::Inconclusive);
        assert!(report.insights[0].starts_with("Insufficient data"));
        assert!(report.insights.iter().any(|i| i.contains("Current power")));
        assert!(report.insights.iter().any(|i| i.contains("includes zero")));
    }

    #[test]
    fn test_srm_blocks_shipping() {
        // Variant wins clearly, but traffic split is 60/40 instead of 50/50
        let report = ExperimentReport::build(
            counts(12_000, 360),
            counts(8_000, 400),
            &AnalysisConfig::default(),
        );

        assert_eq!(report.analysis.interpretation.winner, Winner::Variant);
        assert!(report.srm.srm_detected);
        assert!(!report.should_ship);
        assert!(report.insights[0].starts_with("Data quality"));
        assert!(report
            .insights
            .iter()
            .any(|i| i.contains("resolve the data issues")));
    }

    #[test]
    fn test_configured_split_avoids_false_srm() {
        let config = AnalysisConfig::default().with_expected_variant_share(0.4);
        let report = ExperimentReport::build(counts(12_000, 360), counts(8_000, 400), &config);

        assert!(!report.srm.srm_detected);
        assert!(report.should_ship);
    }

    #[test]
    fn test_no_difference_is_unbounded() {
        let report = ExperimentReport::build(
            counts(1000, 50),
            counts(1000, 50),
            &AnalysisConfig::default(),
        );

        assert!(report.required_sample_size.is_unbounded());
        assert!(report
            .insights
            .iter()
            .any(|i| i.contains("no sample size can confirm")));
    }

    #[test]
    fn test_report_serializes() {
        let report = ExperimentReport::build(
            counts(1000, 30),
            counts(1000, 45),
            &AnalysisConfig::default(),
        );
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["analysis"]["interpretation"]["winner"], "inconclusive");
        assert_eq!(json["control"]["visitors"], 1000);
        assert_eq!(json["srm"]["severity"], "none");
        assert_eq!(json["required_sample_size"]["kind"], "per_variant");
    }

    #[test]
    fn test_plan_experiment() {
        let plan = plan_experiment(0.03, 0.10, &AnalysisConfig::default()).unwrap();
        assert_eq!(plan.legacy, RequiredSampleSize::PerVariant(5510));
        assert!(plan.probit.as_f64() > plan.legacy.as_f64());
    }

    #[test]
    fn test_plan_experiment_rejects_bad_input() {
        let err = plan_experiment(3.0, 0.10, &AnalysisConfig::default()).unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
        assert!(err.to_string().contains("baseline_rate"));

        let err = plan_experiment(0.03, -1.5, &AnalysisConfig::default()).unwrap_err();
        assert!(err.to_string().contains("expected_lift"));

        let config = AnalysisConfig::default().with_power(1.0);
        let err = plan_experiment(0.03, 0.10, &config).unwrap_err();
        assert_eq!(err.code(), "INVALID_PROBABILITY");
    }

    #[test]
    fn test_zero_conversion_control_is_not_reported_as_no_difference() {
        // 0% vs 1.5%: not significant yet, but the groups do differ
        let report =
            ExperimentReport::build(counts(200, 0), counts(200, 3), &AnalysisConfig::default());

        assert_eq!(report.analysis.interpretation.winner, Winner::Inconclusive);
        assert_eq!(report.analysis.uplift, 0.0);
        assert_eq!(
            report.required_sample_size,
            RequiredSampleSize::PerVariant(520)
        );
        assert!((report.observed_power - 0.689944).abs() < 1e-4);

        assert!(!report
            .insights
            .iter()
            .any(|i| i.contains("No difference observed")));
        assert!(report
            .insights
            .iter()
            .any(|i| i.contains("relative uplift is undefined") && i.contains("1.50% variant")));
        assert!(report
            .insights
            .iter()
            .any(|i| i.starts_with("Current power 69.0%") && i.contains("~520 visitors")));
    }
}
