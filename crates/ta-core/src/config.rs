//! Run configuration for an assignment.

use crate::{TaError, TaResult};

/// Stopping parameters and engine selection for one assignment run.
///
/// Typically filled in from command-line flags by the application crate and
/// passed to the assignment builder.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AssignmentConfig {
    /// Upper bound on outer iterations.  0 performs only the initial
    /// all-or-nothing loading.
    pub max_iterations: u32,

    /// Relative-gap threshold.  The run stops as soon as the relative gap
    /// drops to or below this value.  `0.0` disables the gap computation
    /// entirely and runs exactly `max_iterations` iterations.
    pub relative_gap: f64,

    /// Worker count.  `0` selects the sequential engine; any other value the
    /// parallel engine with that many Rayon workers.
    pub threads: usize,
}

impl AssignmentConfig {
    /// `true` if the gap metric is evaluated after every iteration.
    #[inline]
    pub fn gap_enabled(&self) -> bool {
        self.relative_gap != 0.0
    }

    /// `true` if the parallel engine is requested.
    #[inline]
    pub fn is_parallel(&self) -> bool {
        self.threads > 0
    }

    /// Reject thresholds that can never be compared meaningfully.
    pub fn validate(&self) -> TaResult<()> {
        if !self.relative_gap.is_finite() || self.relative_gap < 0.0 {
            return Err(TaError::Config(format!(
                "relative gap must be a finite non-negative number, got {}",
                self.relative_gap
            )));
        }
        Ok(())
    }
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100,
            relative_gap:   1e-4,
            threads:        0,
        }
    }
}
