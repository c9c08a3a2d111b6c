//! Structured error types with machine-readable codes
//!
//! The numeric core never fails: invalid counts degrade to an inconclusive
//! result. These errors only surface from the checked constructors and from
//! configuration validation, where a caller asked for the invariant up front.

use serde::{Deserialize, Serialize};

/// Structured error payload for API clients embedding this crate
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Additional error context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Errors raised by checked constructors and config validation
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Invalid sample counts: {conversions} conversions out of {visitors} visitors")]
    InvalidSampleCounts { visitors: u64, conversions: u64 },

    #[error("Invalid probability for '{field}': {value} (must be strictly between 0 and 1)")]
    InvalidProbability { field: String, value: f64 },
}

impl StatsError {
    /// Get error code for client identification
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::InvalidSampleCounts { .. } => "INVALID_SAMPLE_COUNTS",
            Self::InvalidProbability { .. } => "INVALID_PROBABILITY",
        }
    }

    /// Convert to structured error response
    pub fn to_response(&self) -> ErrorResponse {
        let details = match self {
            Self::InvalidInput { field, .. } | Self::InvalidProbability { field, .. } => {
                Some(format!("field: {field}"))
            }
            Self::InvalidSampleCounts { .. } => None,
        };

        ErrorResponse {
            code: self.code().to_string(),
            message: self.to_string(),
            details,
        }
    }
}

/// Helper trait to convert validation errors
pub trait ValidationErrorExt<T> {
    fn map_validation_err(self, field: &str) -> Result<T>;
}

impl<T> ValidationErrorExt<T> for anyhow::Result<T> {
    fn map_validation_err(self, field: &str) -> Result<T> {
        self.map_err(|e| StatsError::InvalidInput {
            field: field.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Type alias for Results using StatsError
pub type Result<T> = std::result::Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = StatsError::InvalidSampleCounts {
            visitors: 10,
            conversions: 20,
        };
        assert_eq!(err.code(), "INVALID_SAMPLE_COUNTS");
        assert_eq!(
            StatsError::InvalidProbability {
                field: "power".to_string(),
                value: 1.5
            }
            .code(),
            "INVALID_PROBABILITY"
        );
    }

    #[test]
    fn test_error_response_serialization() {
        let err = StatsError::InvalidSampleCounts {
            visitors: 10,
            conversions: 20,
        };
        let response = err.to_response();

        assert_eq!(response.code, "INVALID_SAMPLE_COUNTS");
        assert!(response.message.contains("20 conversions"));

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_map_validation_err() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("must be finite"));
        let err = result.map_validation_err("baseline_rate").unwrap_err();

        assert_eq!(err.code(), "INVALID_INPUT");
        assert_eq!(
            err.to_string(),
            "Invalid input for field 'baseline_rate': must be finite"
        );
    }
}
