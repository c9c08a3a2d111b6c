//! Configuration for experiment analysis
//!
//! Sensible defaults with environment variable overrides, so reporting jobs
//! can tighten the confidence level without a code change.

use std::env;
use tracing::info;

use crate::constants::{
    DEFAULT_CONFIDENCE_LEVEL, DEFAULT_POWER, DEFAULT_VARIANT_SHARE, MIN_SAMPLE_SIZE,
};
use crate::errors::{Result, StatsError, ValidationErrorExt};
use crate::validation;

/// Analysis parameters with documented defaults
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Confidence level for significance decisions (default: 0.95)
    pub confidence_level: f64,

    /// Statistical power for sample-size planning (default: 0.80)
    pub power: f64,

    /// Configured share of traffic sent to the variant (default: 0.5)
    /// Used by the sample ratio mismatch check
    pub expected_variant_share: f64,

    /// Visitors per group below which reports flag insufficient data (default: 100)
    pub min_sample_size: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            power: DEFAULT_POWER,
            expected_variant_share: DEFAULT_VARIANT_SHARE,
            min_sample_size: MIN_SAMPLE_SIZE,
        }
    }
}

impl AnalysisConfig {
    /// Load configuration from environment variables with defaults
    ///
    /// Unparseable values are ignored; parsed values are clamped into range.
    #[allow(clippy::field_reassign_with_default)] // Environment overrides require mutable config
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = env::var("ABSTATS_CONFIDENCE_LEVEL") {
            if let Ok(n) = val.parse::<f64>() {
                config.confidence_level = n.clamp(0.5, 0.9999);
            }
        }

        if let Ok(val) = env::var("ABSTATS_POWER") {
            if let Ok(n) = val.parse::<f64>() {
                config.power = n.clamp(0.5, 0.9999);
            }
        }

        if let Ok(val) = env::var("ABSTATS_VARIANT_SHARE") {
            if let Ok(n) = val.parse::<f64>() {
                config.expected_variant_share = n.clamp(0.01, 0.99);
            }
        }

        if let Ok(val) = env::var("ABSTATS_MIN_SAMPLE_SIZE") {
            if let Ok(n) = val.parse() {
                config.min_sample_size = n;
            }
        }

        config
    }

    /// Builder-style override of the confidence level
    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    /// Builder-style override of the planning power
    pub fn with_power(mut self, power: f64) -> Self {
        self.power = power;
        self
    }

    /// Builder-style override of the expected traffic split
    pub fn with_expected_variant_share(mut self, share: f64) -> Self {
        self.expected_variant_share = share;
        self
    }

    /// Builder-style override of the insufficient-data threshold
    pub fn with_min_sample_size(mut self, min: u64) -> Self {
        self.min_sample_size = min;
        self
    }

    /// Reject parameters outside their mathematical domain
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("confidence_level", self.confidence_level),
            ("power", self.power),
            ("expected_variant_share", self.expected_variant_share),
        ] {
            if validation::validate_open_unit(value).is_err() {
                return Err(StatsError::InvalidProbability {
                    field: field.to_string(),
                    value,
                });
            }
        }

        validation::validate_sample_threshold(self.min_sample_size)
            .map_validation_err("min_sample_size")
    }

    /// Log the current configuration
    pub fn log(&self) {
        info!("📋 Analysis configuration:");
        info!("   Confidence level: {:.2}%", self.confidence_level * 100.0);
        info!("   Planning power: {:.0}%", self.power * 100.0);
        info!(
            "   Expected split: {:.0}% variant / {:.0}% control",
            self.expected_variant_share * 100.0,
            (1.0 - self.expected_variant_share) * 100.0
        );
        info!("   Min sample size: {} per group", self.min_sample_size);
    }
}
