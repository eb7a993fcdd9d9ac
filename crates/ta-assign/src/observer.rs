//! Assignment observer trait for progress reporting.

use std::time::Duration;

use log::info;
use ta_core::AssignmentConfig;

use crate::AssignmentReport;

/// Per-iteration figures handed to [`AssignObserver::on_iteration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStats {
    /// Zero-based iteration index.
    pub iteration: u32,
    pub objective: f64,
    /// `None` when the gap is disabled (threshold 0).
    pub gap: Option<f64>,
    pub relative_gap: Option<f64>,
    /// Wall time spent in this iteration.
    pub elapsed: Duration,
}

/// Callbacks invoked by [`Assignment::run`][crate::Assignment::run] at key
/// points of the run.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: objective recorder
///
/// ```rust,ignore
/// struct Objectives(Vec<f64>);
///
/// impl AssignObserver for Objectives {
///     fn on_iteration(&mut self, stats: &IterationStats) {
///         self.0.push(stats.objective);
///     }
/// }
/// ```
pub trait AssignObserver {
    /// Called once after the initial loading, before the first iteration.
    ///
    /// `objective` is the objective of the all-or-nothing starting flows.
    fn on_start(&mut self, _engine: &str, _config: &AssignmentConfig, _objective: f64) {}

    /// Called at the end of every iteration.
    fn on_iteration(&mut self, _stats: &IterationStats) {}

    /// Called once after the last iteration.
    fn on_finish(&mut self, _report: &AssignmentReport) {}
}

/// An [`AssignObserver`] that does nothing.
pub struct NoopObserver;

impl AssignObserver for NoopObserver {}

/// Reports progress through the `log` facade at `info` level.
#[derive(Debug, Default)]
pub struct LogObserver;

impl AssignObserver for LogObserver {
    fn on_start(&mut self, engine: &str, config: &AssignmentConfig, objective: f64) {
        info!("static traffic assignment, algorithm B ({engine})");
        info!("max. iterations: {}", config.max_iterations);
        if config.gap_enabled() {
            info!("relative gap: {:.15}", config.relative_gap);
        }
        info!("starting objective function: {objective:.15}");
    }

    fn on_iteration(&mut self, stats: &IterationStats) {
        info!("iteration {}: objective function {:.15}", stats.iteration, stats.objective);
        if let (Some(gap), Some(rg)) = (stats.gap, stats.relative_gap) {
            info!("iteration {}: gap {gap:.15}, relative gap {rg:.15}", stats.iteration);
        }
    }

    fn on_finish(&mut self, report: &AssignmentReport) {
        info!(
            "finished after {} iterations in {} ms ({})",
            report.iterations,
            report.elapsed.as_millis(),
            if report.converged { "converged" } else { "iteration limit" },
        );
    }
}
