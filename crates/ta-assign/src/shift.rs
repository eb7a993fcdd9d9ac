//! Segment search and Newton flow shifting between the min and max trees.
//!
//! For a node `n` reached by both trees, the two predecessor chains leave a
//! common ancestor (the "LCA") along arc-disjoint segments and meet again at
//! `n`.  Moving flow from the max segment to the min segment until both have
//! equal cost is the elementary equilibration step.

use log::trace;
use ta_core::{ArcId, NodeId, NodeSet};
use ta_network::Network;

use crate::bush::Bush;
use crate::trees::BushTrees;

/// Cap on Newton iterations per segment pair.
pub const NEWTON_MAX_ITERATIONS: usize = 100;

/// Newton stops once successive iterates differ by less than this.
pub const NEWTON_EPSILON: f64 = 1e-10;

// ── LCA ───────────────────────────────────────────────────────────────────────

/// Start node shared by the min and max segments ending at `node`.
///
/// Returns `None` when either tree does not reach `node`, when both
/// predecessor arcs start at the same node (nothing to balance), or when the
/// max chain runs out without touching the min chain.  `set` is scratch
/// space; its contents on entry are discarded.
pub fn lca(network: &Network, trees: &BushTrees, node: NodeId, set: &mut NodeSet) -> Option<NodeId> {
    let min_prev = trees.min[node.index()]?;
    let max_prev = trees.max[node.index()]?;
    if network.arc_from[min_prev.index()] == network.arc_from[max_prev.index()] {
        return None;
    }

    set.clear();
    let mut next = Some(min_prev);
    while let Some(arc) = next {
        let from = network.arc_from[arc.index()];
        set.insert(from);
        next = trees.min[from.index()];
    }

    let mut next = Some(max_prev);
    while let Some(arc) = next {
        let from = network.arc_from[arc.index()];
        if set.contains(from) {
            return Some(from);
        }
        next = trees.max[from.index()];
    }
    None
}

// ── Segments ──────────────────────────────────────────────────────────────────

/// Arcs of `tree`'s predecessor chain from `node` back to `lca`, excluding
/// the arc that ends at `lca` and everything before it.
fn segment<'a>(
    network: &'a Network,
    tree: &'a [Option<ArcId>],
    node: NodeId,
    lca: NodeId,
) -> impl Iterator<Item = ArcId> + 'a {
    let mut next = tree[node.index()];
    std::iter::from_fn(move || {
        let arc = next.filter(|a| network.arc_to[a.index()] != lca)?;
        next = tree[network.arc_from[arc.index()].index()];
        Some(arc)
    })
}

// ── Flow delta ────────────────────────────────────────────────────────────────

/// Flow to move from the max segment to the min segment so both segment
/// costs become equal.
///
/// The result is clamped to `[0, μ]`, where `μ` is the smallest bush flow
/// on the max segment.  Newton iterates from 0 on
/// `Σ_max cost(x - Δ) - Σ_min cost(x + Δ)`; if it has not settled after
/// [`NEWTON_MAX_ITERATIONS`] steps the last iterate is clamped and used.
/// A non-finite iterate clamps to 0 or `μ`.
pub fn find_flow_delta(
    network: &Network,
    trees: &BushTrees,
    bush: &Bush,
    node: NodeId,
    lca: NodeId,
) -> f64 {
    let max_delta = segment(network, &trees.max, node, lca)
        .map(|arc| bush.flow(arc))
        .fold(f64::INFINITY, f64::min);
    if max_delta == 0.0 {
        return 0.0;
    }

    let mut delta = 0.0;
    let mut settled = false;
    for _ in 0..NEWTON_MAX_ITERATIONS {
        let (mut min_cost, mut min_slope) = (0.0, 0.0);
        for arc in segment(network, &trees.min, node, lca) {
            min_cost  += network.cost_at(arc, delta);
            min_slope += network.cost_derivative_at(arc, delta);
        }

        let (mut max_cost, mut max_slope) = (0.0, 0.0);
        for arc in segment(network, &trees.max, node, lca) {
            max_cost  += network.cost_at(arc, -delta);
            max_slope += network.cost_derivative_at(arc, -delta);
        }

        let next = delta + (max_cost - min_cost) / (max_slope + min_slope);
        let step = (delta - next).abs();
        delta = next;
        if step < NEWTON_EPSILON {
            settled = true;
            break;
        }
    }

    if !settled {
        trace!("Newton did not settle for {node} (lca {lca}); last iterate {delta}");
    }
    // max/min rather than clamp: a NaN iterate must not survive.
    delta.max(0.0).min(max_delta)
}

// ── Shift ─────────────────────────────────────────────────────────────────────

/// Move `delta` from the max segment to the min segment, in both the network
/// flow and the bush flow.  Arcs outside the two segments are untouched and
/// costs are not refreshed.
pub fn shift_flows(
    network: &mut Network,
    trees: &BushTrees,
    bush: &mut Bush,
    node: NodeId,
    lca: NodeId,
    delta: f64,
) {
    shift_segment(network, &trees.min, bush, node, lca, delta);
    shift_segment(network, &trees.max, bush, node, lca, -delta);
}

fn shift_segment(
    network: &mut Network,
    tree: &[Option<ArcId>],
    bush: &mut Bush,
    node: NodeId,
    lca: NodeId,
    delta: f64,
) {
    let mut next = tree[node.index()];
    while let Some(arc) = next {
        if network.arc_to[arc.index()] == lca {
            break;
        }
        network.add_flow(arc, delta);
        bush.add_flow(arc, delta);
        next = tree[network.arc_from[arc.index()].index()];
    }
}
