//! Relative-gap bookkeeping and the stopping rule.

/// Tracks the best lower bound seen so far and the resulting relative gap.
///
/// ```text
/// lower bound    = objective + gap
/// relative gap   = -gap / |max lower bound|
/// ```
///
/// The relative gap starts at `+∞` so the first iteration always runs.  A
/// gap of exactly 0 yields a relative gap of 0 even when the lower bound is
/// also 0.
#[derive(Debug, Clone)]
pub struct ConvergenceTracker {
    threshold:       f64,
    max_lower_bound: f64,
    relative_gap:    f64,
    last_gap:        Option<f64>,
}

impl ConvergenceTracker {
    /// `threshold == 0` disables gap-based stopping.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold,
            max_lower_bound: f64::NEG_INFINITY,
            relative_gap:    f64::INFINITY,
            last_gap:        None,
        }
    }

    pub fn gap_enabled(&self) -> bool {
        self.threshold != 0.0
    }

    /// Fold in one iteration's objective and gap; returns the new relative gap.
    pub fn record(&mut self, objective: f64, gap: f64) -> f64 {
        let lower_bound = objective + gap;
        if lower_bound > self.max_lower_bound {
            self.max_lower_bound = lower_bound;
        }
        self.relative_gap = if gap == 0.0 {
            0.0
        } else {
            -gap / self.max_lower_bound.abs()
        };
        self.last_gap = Some(gap);
        self.relative_gap
    }

    /// `true` while another iteration should run.
    pub fn keep_going(&self, iteration: u32, max_iterations: u32) -> bool {
        iteration < max_iterations && (!self.gap_enabled() || self.relative_gap > self.threshold)
    }

    /// `true` once the relative gap is at or below a non-zero threshold.
    pub fn converged(&self) -> bool {
        self.gap_enabled() && self.relative_gap <= self.threshold
    }

    /// Most recent relative gap, if any gap has been recorded.
    pub fn relative_gap(&self) -> Option<f64> {
        self.last_gap.map(|_| self.relative_gap)
    }

    pub fn last_gap(&self) -> Option<f64> {
        self.last_gap
    }

    pub fn max_lower_bound(&self) -> f64 {
        self.max_lower_bound
    }
}
