//! Per-origin bushes: construction, improvement, and pruning.
//!
//! A bush is the acyclic set of arcs an origin may route over, together with
//! that origin's share of the flow on each arc.  Both arrays are indexed by
//! `ArcId` and sized to the whole network; the arcs themselves stay owned by
//! [`Network`].

use ta_core::{ArcId, NodeId};
use ta_network::{Network, OdMatrix};

use crate::trees::TopoSweep;

// ── Bush ──────────────────────────────────────────────────────────────────────

/// Acyclic sub-network rooted at one origin zone.
///
/// Member arcs reachable from `root` must form a DAG.  Nothing checks this
/// at runtime; [`create_bush`] and [`improve_bush`] only ever add arcs that
/// point "forward" in a consistent distance potential.
#[derive(Debug, Clone)]
pub struct Bush {
    pub root: NodeId,
    /// Membership flag per arc.
    pub member: Vec<bool>,
    /// This origin's flow per arc.  Non-member arcs normally carry 0.
    pub flow: Vec<f64>,
}

impl Bush {
    /// Empty bush over `arc_count` arcs.
    pub fn new(root: NodeId, arc_count: usize) -> Self {
        Self {
            root,
            member: vec![false; arc_count],
            flow:   vec![0.0; arc_count],
        }
    }

    #[inline]
    pub fn contains(&self, arc: ArcId) -> bool {
        self.member[arc.index()]
    }

    #[inline]
    pub fn insert(&mut self, arc: ArcId) {
        self.member[arc.index()] = true;
    }

    #[inline]
    pub fn remove(&mut self, arc: ArcId) {
        self.member[arc.index()] = false;
    }

    #[inline]
    pub fn flow(&self, arc: ArcId) -> f64 {
        self.flow[arc.index()]
    }

    #[inline]
    pub fn add_flow(&mut self, arc: ArcId, delta: f64) {
        self.flow[arc.index()] += delta;
    }

    /// Iterator over member arcs in index order.
    pub fn arcs(&self) -> impl Iterator<Item = ArcId> + '_ {
        self.member
            .iter()
            .enumerate()
            .filter(|(_, m)| **m)
            .map(|(i, _)| ArcId(i as u32))
    }

    pub fn arc_count(&self) -> usize {
        self.member.iter().filter(|m| **m).count()
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

/// Build the initial bush for `root` from a shortest-path tree at the
/// network's cached costs.
///
/// Membership: every arc whose start node is strictly closer to `root` than
/// its end node.  Flow: each destination zone's demand is loaded onto its
/// shortest path (all-or-nothing for this origin).
pub fn create_bush(network: &Network, od: &OdMatrix, root: NodeId) -> Bush {
    let tree = network.shortest_path_tree(root);
    let mut bush = Bush::new(root, network.arc_count());

    for arc in network.arcs() {
        let from = network.arc_from[arc.index()];
        let to   = network.arc_to[arc.index()];
        if tree.distance(from) < tree.distance(to) {
            bush.insert(arc);
        }
    }

    for (destination, &trips) in od.row(root).iter().enumerate() {
        if trips == 0.0 {
            continue;
        }
        for arc in tree.path_to(network, NodeId(destination as u32)) {
            bush.add_flow(arc, trips);
        }
    }

    bush
}

// ── Improvement ───────────────────────────────────────────────────────────────

/// Add every network arc that points forward in the bush's max-distance
/// potential.
///
/// Both endpoints must be reachable inside the bush, and the start node's
/// maximum distance from the root must be strictly smaller than the end
/// node's.  Keying on a single potential keeps the bush acyclic.
pub fn improve_bush(network: &Network, bush: &mut Bush, sweep: &mut TopoSweep) {
    let max_distance = sweep.max_distances(network, bush);

    for arc in network.arcs() {
        let from = max_distance[network.arc_from[arc.index()].index()];
        let to   = max_distance[network.arc_to[arc.index()].index()];
        if from == f64::NEG_INFINITY || to == f64::NEG_INFINITY {
            continue;
        }
        if from < to {
            bush.insert(arc);
        }
    }
}

// ── Pruning ───────────────────────────────────────────────────────────────────

/// Drop every member arc without positive bush flow, then re-admit the arcs
/// of `min_tree` so the current shortest paths stay in the bush.
pub fn remove_unused_arcs(bush: &mut Bush, min_tree: &[Option<ArcId>]) {
    for i in 0..bush.member.len() {
        if bush.flow[i] <= 0.0 {
            bush.member[i] = false;
        }
    }
    for arc in min_tree.iter().flatten() {
        bush.insert(*arc);
    }
}
