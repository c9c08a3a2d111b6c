//! abstats
//!
//! Statistical significance engine for conversion-rate A/B experiments.
//! Given visitor and conversion counts for a control and a variant group, it
//! answers the questions an experimentation dashboard asks.
//!
//! # Key Features
//! - Two-proportion z-test with a two-tailed p-value
//! - Experiment analysis: rates, uplift, winner and a readable interpretation
//! - Sample-size planning (legacy dashboard formula and textbook probit form)
//! - Confidence intervals, effect size, observed power
//! - Sample ratio mismatch and sequential-look boundaries
//!
//! # Design
//! - Pure functions: no I/O, no clock, no randomness, no shared state
//! - Invalid counts degrade to an inconclusive result instead of erroring
//! - Results derive `serde` traits for direct JSON responses

pub mod config;
pub mod constants;
pub mod errors;
pub mod report;
pub mod statistics;
pub mod tracing_setup;
pub mod validation;

pub use config::AnalysisConfig;
pub use errors::{Result, StatsError};
pub use report::{plan_experiment, ExperimentReport, SamplePlan};
pub use statistics::{
    analyze_experiment, calculate_sample_size, norm_cdf, two_proportions_z_test,
    ExperimentAnalysis, RequiredSampleSize, SampleCounts, Winner, ZTestResult,
};
