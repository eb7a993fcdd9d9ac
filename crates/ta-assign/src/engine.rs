//! Sequential and parallel orchestration of the per-bush steps.
//!
//! Both engines run the same three steps for every bush and differ only in
//! scheduling:
//!
//! ```text
//! prepare      improve the bush, extract min/max trees, find every LCA
//! equilibrate  Newton shift per node with an LCA      (mutates the network)
//! prune        drop unused arcs, keep the min tree
//! ```
//!
//! followed by a network-wide cost refresh.  `SequentialEngine` refreshes
//! after every bush.  `ParallelEngine` takes bushes in batches of `threads`,
//! runs prepare and prune for a batch concurrently, keeps equilibrate on the
//! calling thread, and refreshes once per batch.

use ta_core::{NodeId, NodeSet};
use ta_network::{Network, OdMatrix};

use crate::bush::{create_bush, improve_bush, remove_unused_arcs, Bush};
use crate::shift::{find_flow_delta, lca, shift_flows};
use crate::trees::{BushTrees, TopoSweep};
use crate::AssignResult;

// ── BushWorker ────────────────────────────────────────────────────────────────

/// Scratch state for processing one bush at a time, sized to the network
/// once and reused across bushes and iterations.
#[derive(Debug, Clone)]
pub struct BushWorker {
    sweep: TopoSweep,
    set:   NodeSet,
    /// Trees of the bush most recently prepared.
    pub trees: BushTrees,
    /// LCA per node for the bush most recently prepared.
    pub lcas: Vec<Option<NodeId>>,
}

impl BushWorker {
    pub fn new(node_count: usize) -> Self {
        Self {
            sweep: TopoSweep::new(node_count),
            set:   NodeSet::new(),
            trees: BushTrees::new(node_count),
            lcas:  vec![None; node_count],
        }
    }

    /// Improve `bush`, then record its trees and the LCA of every node.
    /// Reads the network only.
    pub fn prepare(&mut self, network: &Network, bush: &mut Bush) {
        improve_bush(network, bush, &mut self.sweep);
        self.sweep.trees(network, bush, &mut self.trees);
        for (i, slot) in self.lcas.iter_mut().enumerate() {
            *slot = lca(network, &self.trees, NodeId(i as u32), &mut self.set);
        }
    }

    /// Shift flow on every segment pair found by the last
    /// [`prepare`](Self::prepare).  Returns the number of non-zero shifts.
    pub fn equilibrate(&self, network: &mut Network, bush: &mut Bush) -> usize {
        let mut shifts = 0;
        for (i, slot) in self.lcas.iter().enumerate() {
            let Some(lca) = *slot else { continue };
            let node = NodeId(i as u32);
            let delta = find_flow_delta(network, &self.trees, bush, node, lca);
            if delta == 0.0 {
                continue;
            }
            shift_flows(network, &self.trees, bush, node, lca, delta);
            shifts += 1;
        }
        shifts
    }

    /// Prune `bush` against the min tree from the last prepare.
    pub fn prune(&self, bush: &mut Bush) {
        remove_unused_arcs(bush, &self.trees.min);
    }
}

// ── Orchestrator trait ────────────────────────────────────────────────────────

/// Scheduling strategy for one assignment run.
///
/// The driver in [`Assignment`](crate::Assignment) owns the bushes and the
/// convergence bookkeeping; an orchestrator only decides how the per-bush
/// work is spread over threads.
pub trait Orchestrator: Send {
    /// Human-readable engine name for progress output.
    fn describe(&self) -> String;

    /// One bush per zone, rooted at that zone, in zone order.
    fn create_bushes(&mut self, network: &Network, od: &OdMatrix) -> AssignResult<Vec<Bush>>;

    /// One full pass over all bushes.  Costs are refreshed before returning.
    fn sweep(&mut self, network: &mut Network, bushes: &mut [Bush]) -> AssignResult<()>;

    /// Duality gap at the network's current flows and costs.
    fn gap(&mut self, network: &Network, od: &OdMatrix) -> AssignResult<f64>;
}

// ── SequentialEngine ──────────────────────────────────────────────────────────

/// Single-threaded engine.  Costs are refreshed after every bush, so later
/// bushes in the same iteration see earlier shifts.
#[derive(Debug, Clone)]
pub struct SequentialEngine {
    worker: BushWorker,
}

impl SequentialEngine {
    pub fn new(node_count: usize) -> Self {
        Self { worker: BushWorker::new(node_count) }
    }
}

impl Orchestrator for SequentialEngine {
    fn describe(&self) -> String {
        "Sequential version".to_string()
    }

    fn create_bushes(&mut self, network: &Network, od: &OdMatrix) -> AssignResult<Vec<Bush>> {
        Ok((0..network.zone_count())
            .map(|root| create_bush(network, od, NodeId(root as u32)))
            .collect())
    }

    fn sweep(&mut self, network: &mut Network, bushes: &mut [Bush]) -> AssignResult<()> {
        for bush in bushes {
            self.worker.prepare(network, bush);
            self.worker.equilibrate(network, bush);
            self.worker.prune(bush);
            network.update_costs();
        }
        Ok(())
    }

    fn gap(&mut self, network: &Network, od: &OdMatrix) -> AssignResult<f64> {
        Ok(network.gap(od))
    }
}

// ── ParallelEngine ────────────────────────────────────────────────────────────

#[cfg(feature = "parallel")]
pub use parallel::ParallelEngine;

#[cfg(feature = "parallel")]
mod parallel {
    use std::panic::{catch_unwind, AssertUnwindSafe};

    use log::debug;
    use rayon::prelude::*;
    use rayon::{ThreadPool, ThreadPoolBuilder};
    use ta_core::NodeId;
    use ta_network::{Network, OdMatrix};

    use super::{BushWorker, Orchestrator};
    use crate::bush::{create_bush, Bush};
    use crate::{AssignError, AssignResult};

    /// Batched engine on a dedicated Rayon pool of `threads` workers.
    ///
    /// Bush-local steps of a batch run concurrently; flow shifts on the
    /// shared network run on the calling thread in bush order, so flows and
    /// costs do not depend on thread timing.  Only the parallel gap may
    /// differ in its last bits between runs.
    ///
    /// The pool is shut down when the engine is dropped.
    pub struct ParallelEngine {
        threads: usize,
        pool:    ThreadPool,
        workers: Vec<BushWorker>,
    }

    impl ParallelEngine {
        pub fn new(threads: usize, node_count: usize) -> AssignResult<Self> {
            let pool = ThreadPoolBuilder::new()
                .num_threads(threads)
                .thread_name(|i| format!("ta-worker-{i}"))
                .build()?;
            Ok(Self {
                threads,
                pool,
                workers: vec![BushWorker::new(node_count); threads],
            })
        }

        /// Run `job` on the pool, turning a worker panic into an error.
        fn barrier<T: Send>(&self, phase: &str, job: impl FnOnce() -> T + Send) -> AssignResult<T> {
            catch_unwind(AssertUnwindSafe(|| self.pool.install(job)))
                .map_err(|payload| AssignError::WorkerPanicked(describe_panic(phase, payload.as_ref())))
        }
    }

    impl Drop for ParallelEngine {
        fn drop(&mut self) {
            debug!("shutting down worker pool ({} threads)", self.threads);
        }
    }

    impl Orchestrator for ParallelEngine {
        fn describe(&self) -> String {
            format!("Parallel version ({} threads)", self.threads)
        }

        fn create_bushes(&mut self, network: &Network, od: &OdMatrix) -> AssignResult<Vec<Bush>> {
            debug!("creating {} bushes on {} threads", network.zone_count(), self.threads);
            self.barrier("bush creation", || {
                (0..network.zone_count())
                    .into_par_iter()
                    .map(|root| create_bush(network, od, NodeId(root as u32)))
                    .collect()
            })
        }

        fn sweep(&mut self, network: &mut Network, bushes: &mut [Bush]) -> AssignResult<()> {
            let mut workers = std::mem::take(&mut self.workers);
            let result = self.sweep_batches(network, bushes, &mut workers);
            self.workers = workers;
            result
        }

        fn gap(&mut self, network: &Network, od: &OdMatrix) -> AssignResult<f64> {
            // gap_parallel installs itself on the pool; the barrier only adds
            // panic capture.
            catch_unwind(AssertUnwindSafe(|| network.gap_parallel(od, &self.pool)))
                .map_err(|payload| AssignError::WorkerPanicked(describe_panic("gap", payload.as_ref())))
        }
    }

    impl ParallelEngine {
        fn sweep_batches(
            &self,
            network: &mut Network,
            bushes: &mut [Bush],
            workers: &mut [BushWorker],
        ) -> AssignResult<()> {
            for batch in bushes.chunks_mut(self.threads) {
                let workers = &mut workers[..batch.len()];

                {
                    let network: &Network = network;
                    self.barrier("tree extraction", || {
                        batch
                            .par_iter_mut()
                            .zip(workers.par_iter_mut())
                            .for_each(|(bush, worker)| worker.prepare(network, bush));
                    })?;
                }

                for (bush, worker) in batch.iter_mut().zip(workers.iter()) {
                    worker.equilibrate(network, bush);
                }

                self.barrier("pruning", || {
                    batch
                        .par_iter_mut()
                        .zip(workers.par_iter())
                        .for_each(|(bush, worker)| worker.prune(bush));
                })?;

                network.update_costs();
            }
            Ok(())
        }
    }

    fn describe_panic(phase: &str, payload: &(dyn std::any::Any + Send)) -> String {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown panic payload".to_string());
        format!("{phase}: {message}")
    }
}
