//! Validated visitor/conversion counts for one experiment group

use serde::{Deserialize, Serialize};

use crate::errors::{Result, StatsError};

/// Visitors and conversions observed for a single group (control or variant)
///
/// Invariant: `conversions <= visitors`. Use [`SampleCounts::new`] to have it
/// checked; the raw `i64` entry points in this module accept anything and
/// degrade to an inconclusive result instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SampleCounts {
    pub visitors: u64,
    pub conversions: u64,
}

impl SampleCounts {
    /// Create counts, rejecting more conversions than visitors
    pub fn new(visitors: u64, conversions: u64) -> Result<Self> {
        if conversions > visitors {
            return Err(StatsError::InvalidSampleCounts {
                visitors,
                conversions,
            });
        }
        Ok(Self {
            visitors,
            conversions,
        })
    }

    /// Conversion rate as a fraction (0 for an empty group)
    pub fn rate(&self) -> f64 {
        if self.visitors == 0 {
            0.0
        } else {
            self.conversions as f64 / self.visitors as f64
        }
    }

    /// Visitors who did not convert
    pub fn non_conversions(&self) -> u64 {
        self.visitors.saturating_sub(self.conversions)
    }

    /// Whether no visitors were recorded yet
    pub fn is_empty(&self) -> bool {
        self.visitors == 0
    }

    /// Counts as signed integers for the raw statistical entry points
    pub(crate) fn as_signed(&self) -> (i64, i64) {
        (
            i64::try_from(self.visitors).unwrap_or(i64::MAX),
            i64::try_from(self.conversions).unwrap_or(i64::MAX),
        )
    }
}
