//! Fluent builder for constructing an [`Assignment`].

use log::debug;
use ta_core::AssignmentConfig;
use ta_network::{Network, OdMatrix};

use crate::engine::{Orchestrator, SequentialEngine};
use crate::{AssignError, AssignResult, Assignment};

/// Fluent builder for [`Assignment`].
///
/// # Required inputs
///
/// - [`Network`]: built by [`ta_network::NetworkBuilder`] or a loader
/// - [`OdMatrix`]: one row and column per network zone
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                           |
/// |------------------------|-----------------------------------|
/// | `.config(c)`           | `AssignmentConfig::default()`     |
/// | `.max_iterations(n)`   | 100                               |
/// | `.relative_gap(g)`     | 1e-4                              |
/// | `.threads(t)`          | 0 (sequential engine)             |
///
/// # Example
///
/// ```rust,ignore
/// let mut assignment = AssignmentBuilder::new(network, od)
///     .max_iterations(50)
///     .relative_gap(1e-6)
///     .threads(4)
///     .build()?;
/// let report = assignment.run(&mut LogObserver)?;
/// ```
pub struct AssignmentBuilder {
    network: Network,
    od:      OdMatrix,
    config:  AssignmentConfig,
}

impl AssignmentBuilder {
    pub fn new(network: Network, od: OdMatrix) -> Self {
        Self { network, od, config: AssignmentConfig::default() }
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: AssignmentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn max_iterations(mut self, n: u32) -> Self {
        self.config.max_iterations = n;
        self
    }

    /// `0.0` disables the gap and runs exactly `max_iterations` iterations.
    pub fn relative_gap(mut self, threshold: f64) -> Self {
        self.config.relative_gap = threshold;
        self
    }

    /// `0` selects the sequential engine.
    pub fn threads(mut self, threads: usize) -> Self {
        self.config.threads = threads;
        self
    }

    /// Validate inputs, pick the engine, and return a ready-to-run
    /// [`Assignment`].  No bush exists yet at this point.
    pub fn build(self) -> AssignResult<Assignment> {
        self.config.validate()?;

        if self.od.zone_count() != self.network.zone_count() {
            return Err(AssignError::ZoneCountMismatch {
                network: self.network.zone_count(),
                matrix:  self.od.zone_count(),
            });
        }

        let engine = make_engine(self.config.threads, self.network.node_count())?;
        debug!(
            "assignment ready: {} nodes, {} arcs, {} zones, engine: {}",
            self.network.node_count(),
            self.network.arc_count(),
            self.network.zone_count(),
            engine.describe(),
        );

        Ok(Assignment {
            config:  self.config,
            network: self.network,
            od:      self.od,
            engine,
            bushes:  Vec::new(),
        })
    }
}

fn make_engine(threads: usize, node_count: usize) -> AssignResult<Box<dyn Orchestrator>> {
    if threads == 0 {
        return Ok(Box::new(SequentialEngine::new(node_count)));
    }

    #[cfg(feature = "parallel")]
    {
        Ok(Box::new(crate::engine::ParallelEngine::new(threads, node_count)?))
    }

    #[cfg(not(feature = "parallel"))]
    {
        Err(AssignError::ParallelUnavailable(threads))
    }
}
