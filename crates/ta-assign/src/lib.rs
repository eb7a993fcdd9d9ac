//! `ta-assign`: bush-based user-equilibrium traffic assignment.
//!
//! Implements Algorithm B: every origin zone keeps an acyclic "bush" of
//! arcs it may use, and flow is repeatedly moved from the costliest used
//! path to the cheapest path inside each bush until the relative gap falls
//! below a threshold.
//!
//! # Iteration
//!
//! ```text
//! initial:  one bush per zone from a shortest-path tree, all-or-nothing
//!           loading of that zone's demand, cost refresh
//!
//! per iteration, per bush:
//!   ① Improve   add arcs that point forward in the max-distance potential
//!   ② Trees     min-cost tree and max-cost (used arcs only) tree
//!   ③ LCA       common start node of the two segments ending at each node
//!   ④ Shift     Newton step equalising the two segment costs
//!   ⑤ Prune     drop arcs without bush flow, keep the min tree
//!   then refresh arc costs
//!
//! after all bushes: objective, gap, relative gap, stopping rule
//! ```
//!
//! | Module          | Contents                                                 |
//! |-----------------|----------------------------------------------------------|
//! | [`bush`]        | `Bush`, `create_bush`, `improve_bush`, `remove_unused_arcs` |
//! | [`trees`]       | `BushTrees`, `TopoSweep`, `max_distances`, `bush_trees`  |
//! | [`shift`]       | `lca`, `find_flow_delta`, `shift_flows`                  |
//! | [`engine`]      | `Orchestrator`, `SequentialEngine`, `ParallelEngine`     |
//! | [`convergence`] | `ConvergenceTracker`                                     |
//! | [`assignment`]  | `Assignment`, `AssignmentReport`, `assign`               |
//! | [`observer`]    | `AssignObserver`, `NoopObserver`, `LogObserver`          |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | (default) `ParallelEngine` on a dedicated Rayon pool.     |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ta_assign::{AssignmentBuilder, LogObserver};
//!
//! let mut assignment = AssignmentBuilder::new(network, od)
//!     .relative_gap(1e-6)
//!     .build()?;
//! let report = assignment.run(&mut LogObserver)?;
//! println!("{} iterations, objective {}", report.iterations, report.objective);
//! ```

pub mod assignment;
pub mod builder;
pub mod bush;
pub mod convergence;
pub mod engine;
pub mod error;
pub mod observer;
pub mod shift;
pub mod trees;


pub use assignment::{assign, Assignment, AssignmentReport};
pub use builder::AssignmentBuilder;
pub use bush::{create_bush, improve_bush, remove_unused_arcs, Bush};
pub use convergence::ConvergenceTracker;
pub use engine::{BushWorker, Orchestrator, SequentialEngine};
#[cfg(feature = "parallel")]
pub use engine::ParallelEngine;
pub use error::{AssignError, AssignResult};
pub use observer::{AssignObserver, IterationStats, LogObserver, NoopObserver};
pub use shift::{find_flow_delta, lca, shift_flows};
pub use trees::{bush_trees, in_degrees, max_distances, BushTrees, TopoSweep};
