//! The `Assignment` driver and its run loop.

use std::time::{Duration, Instant};

use log::debug;
use ta_core::AssignmentConfig;
use ta_network::{ArcFlow, Network, OdMatrix};

use crate::bush::Bush;
use crate::convergence::ConvergenceTracker;
use crate::engine::Orchestrator;
use crate::observer::{AssignObserver, IterationStats, NoopObserver};
use crate::{AssignResult, AssignmentBuilder};

// ── AssignmentReport ──────────────────────────────────────────────────────────

/// Outcome of [`Assignment::run`].
#[derive(Debug, Clone)]
pub struct AssignmentReport {
    /// Completed iterations.
    pub iterations: u32,
    /// Objective at the final flows.
    pub objective: f64,
    /// Gap after the last iteration; `None` if the gap was disabled or no
    /// iteration ran.
    pub gap: Option<f64>,
    pub relative_gap: Option<f64>,
    /// `true` if the run stopped on the relative-gap threshold rather than
    /// the iteration limit.
    pub converged: bool,
    /// Wall time of the whole run, initial loading included.
    pub elapsed: Duration,
    /// Final flow and cost per arc, in arc-index order.
    pub arcs: Vec<ArcFlow>,
}

// ── Assignment ────────────────────────────────────────────────────────────────

/// Owns the network, the demand, one bush per zone, and the chosen engine.
///
/// The run loop:
///
/// 1. Reset flows and refresh costs to free flow.
/// 2. Create every bush, add the bush flows to the network, refresh costs.
/// 3. While the stopping rule allows: one engine sweep over all bushes, then
///    the objective and (if enabled) the gap.
///
/// Create via [`AssignmentBuilder`].
pub struct Assignment {
    pub config: AssignmentConfig,

    /// Road network.  Holds the final flows after [`run`](Self::run).
    pub network: Network,

    pub od: OdMatrix,

    pub(crate) engine: Box<dyn Orchestrator>,

    /// Bushes from the last run, indexed by origin zone.
    pub bushes: Vec<Bush>,
}

impl Assignment {
    pub fn builder(network: Network, od: OdMatrix) -> AssignmentBuilder {
        AssignmentBuilder::new(network, od)
    }

    /// Engine description, e.g. `"Parallel version (4 threads)"`.
    pub fn engine(&self) -> String {
        self.engine.describe()
    }

    /// Run the assignment from zero flow until the stopping rule fires.
    ///
    /// Calling `run` again starts over from zero flow.
    pub fn run<O: AssignObserver>(&mut self, observer: &mut O) -> AssignResult<AssignmentReport> {
        let started = Instant::now();

        // ── Initial loading ───────────────────────────────────────────────
        self.network.reset_flows();
        self.bushes = self.engine.create_bushes(&self.network, &self.od)?;
        for bush in &self.bushes {
            for (flow, bush_flow) in self.network.flow.iter_mut().zip(&bush.flow) {
                *flow += bush_flow;
            }
        }
        self.network.update_costs();
        debug!("created {} bushes in {:?}", self.bushes.len(), started.elapsed());

        let engine = self.engine.describe();
        observer.on_start(&engine, &self.config, self.network.objective());

        // ── Iterations ────────────────────────────────────────────────────
        let mut tracker = ConvergenceTracker::new(self.config.relative_gap);
        let mut iteration = 0;
        while tracker.keep_going(iteration, self.config.max_iterations) {
            let iteration_started = Instant::now();

            self.engine.sweep(&mut self.network, &mut self.bushes)?;
            let objective = self.network.objective();

            let (gap, relative_gap) = if tracker.gap_enabled() {
                let gap = self.engine.gap(&self.network, &self.od)?;
                (Some(gap), Some(tracker.record(objective, gap)))
            } else {
                (None, None)
            };

            observer.on_iteration(&IterationStats {
                iteration,
                objective,
                gap,
                relative_gap,
                elapsed: iteration_started.elapsed(),
            });
            iteration += 1;
        }

        let report = AssignmentReport {
            iterations:   iteration,
            objective:    self.network.objective(),
            gap:          tracker.last_gap(),
            relative_gap: tracker.relative_gap(),
            converged:    tracker.converged(),
            elapsed:      started.elapsed(),
            arcs:         self.network.arc_flows(),
        };
        observer.on_finish(&report);
        Ok(report)
    }

    /// Consume the assignment and return the network with its final flows.
    pub fn into_network(self) -> Network {
        self.network
    }
}

/// Build and run an assignment in one call, without progress callbacks.
pub fn assign(network: Network, od: OdMatrix, config: AssignmentConfig) -> AssignResult<AssignmentReport> {
    AssignmentBuilder::new(network, od)
        .config(config)
        .build()?
        .run(&mut NoopObserver)
}
