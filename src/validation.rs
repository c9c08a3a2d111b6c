//! Input validation for callers that want invariants checked up front
//!
//! The statistics functions themselves accept anything and degrade softly;
//! these helpers exist for request handlers and config loading.

use anyhow::{anyhow, Result};

/// Validate a probability-like parameter lies strictly inside (0, 1)
pub fn validate_open_unit(value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(anyhow!("value must be finite, got {value}"));
    }

    if value <= 0.0 || value >= 1.0 {
        return Err(anyhow!("value must be strictly between 0 and 1, got {value}"));
    }

    Ok(())
}

/// Validate a conversion rate expressed as a fraction in [0, 1]
pub fn validate_rate(rate: f64) -> Result<()> {
    if !rate.is_finite() {
        return Err(anyhow!("rate must be finite, got {rate}"));
    }

    if !(0.0..=1.0).contains(&rate) {
        return Err(anyhow!(
            "rate must be a fraction between 0 and 1, got {rate} (did you pass a percentage?)"
        ));
    }

    Ok(())
}

/// Validate a relative lift (e.g. 0.10 for +10%)
///
/// Negative lifts are allowed; a lift of -100% or below is not.
pub fn validate_lift(lift: f64) -> Result<()> {
    if !lift.is_finite() {
        return Err(anyhow!("lift must be finite, got {lift}"));
    }

    if lift <= -1.0 {
        return Err(anyhow!("lift must be greater than -1.0, got {lift}"));
    }

    Ok(())
}

/// Validate a minimum-sample threshold
pub fn validate_sample_threshold(min: u64) -> Result<()> {
    if min == 0 {
        return Err(anyhow!("minimum sample size must be at least 1"));
    }

    Ok(())
}
