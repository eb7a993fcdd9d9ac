//! Topological sweeps over a bush.
//!
//! Every sweep starts at the root and releases a node once all of its
//! incoming member arcs have been scanned (in-degree countdown).  Because the
//! bush is acyclic this visits nodes in topological order, and each node's
//! distance is final by the time its outgoing arcs are relaxed.  Nodes not
//! reachable from the root inside the bush are never released.

use ta_core::{ArcId, NodeId, NodeQueue};
use ta_network::Network;

use crate::bush::Bush;

/// Predecessor arcs of the cheapest and of the costliest used path from the
/// bush root, indexed by `NodeId`.  `None` means unreached (and always holds
/// at the root).
#[derive(Debug, Clone, PartialEq)]
pub struct BushTrees {
    pub min: Vec<Option<ArcId>>,
    pub max: Vec<Option<ArcId>>,
}

impl BushTrees {
    pub fn new(node_count: usize) -> Self {
        Self {
            min: vec![None; node_count],
            max: vec![None; node_count],
        }
    }
}

/// Reusable buffers for the sweeps, sized once to the network.
#[derive(Debug, Clone)]
pub struct TopoSweep {
    in_degree: Vec<i32>,
    queue:     NodeQueue,
    min_dist:  Vec<f64>,
    max_dist:  Vec<f64>,
}

impl TopoSweep {
    pub fn new(node_count: usize) -> Self {
        Self {
            in_degree: vec![0; node_count],
            queue:     NodeQueue::new(node_count),
            min_dist:  vec![f64::INFINITY; node_count],
            max_dist:  vec![f64::NEG_INFINITY; node_count],
        }
    }

    /// Longest cost distance from the root to every node, over member arcs
    /// only.  Unreachable nodes report `f64::NEG_INFINITY`.
    pub fn max_distances(&mut self, network: &Network, bush: &Bush) -> &[f64] {
        self.count_in_degrees(network, bush);
        self.max_dist.fill(f64::NEG_INFINITY);
        self.max_dist[bush.root.index()] = 0.0;

        self.queue.clear();
        self.queue.push(bush.root);
        while let Some(from) = self.queue.pop() {
            let base = self.max_dist[from.index()];
            for arc in network.out_arcs(from) {
                if !bush.contains(arc) {
                    continue;
                }
                let to = network.arc_to[arc.index()];
                let candidate = base + network.cost[arc.index()];
                if self.max_dist[to.index()] < candidate {
                    self.max_dist[to.index()] = candidate;
                }
                self.release(to);
            }
        }

        &self.max_dist
    }

    /// Fill `trees` with the min-cost and max-cost predecessor trees in one
    /// sweep.
    ///
    /// The min tree relaxes every member arc.  The max tree only relaxes
    /// arcs that carry bush flow, so it follows paths actually in use.
    pub fn trees(&mut self, network: &Network, bush: &Bush, trees: &mut BushTrees) {
        self.count_in_degrees(network, bush);
        self.min_dist.fill(f64::INFINITY);
        self.max_dist.fill(f64::NEG_INFINITY);
        self.min_dist[bush.root.index()] = 0.0;
        self.max_dist[bush.root.index()] = 0.0;
        trees.min.fill(None);
        trees.max.fill(None);

        self.queue.clear();
        self.queue.push(bush.root);
        while let Some(from) = self.queue.pop() {
            let (min_base, max_base) = (self.min_dist[from.index()], self.max_dist[from.index()]);
            for arc in network.out_arcs(from) {
                if !bush.contains(arc) {
                    continue;
                }
                let to   = network.arc_to[arc.index()];
                let t    = to.index();
                let cost = network.cost[arc.index()];

                if self.min_dist[t] > min_base + cost {
                    self.min_dist[t] = min_base + cost;
                    trees.min[t] = Some(arc);
                }
                if self.max_dist[t] < max_base + cost && bush.flow(arc) != 0.0 {
                    self.max_dist[t] = max_base + cost;
                    trees.max[t] = Some(arc);
                }
                self.release(to);
            }
        }
    }

    fn count_in_degrees(&mut self, network: &Network, bush: &Bush) {
        self.in_degree.fill(0);
        for arc in bush.arcs() {
            self.in_degree[network.arc_to[arc.index()].index()] += 1;
        }
    }

    #[inline]
    fn release(&mut self, node: NodeId) {
        let d = &mut self.in_degree[node.index()];
        *d -= 1;
        if *d == 0 {
            self.queue.push(node);
        }
    }
}

// ── One-shot helpers ──────────────────────────────────────────────────────────

/// Number of member arcs entering each node.
pub fn in_degrees(network: &Network, bush: &Bush) -> Vec<i32> {
    let mut sweep = TopoSweep::new(network.node_count());
    sweep.count_in_degrees(network, bush);
    sweep.in_degree
}

/// Allocating form of [`TopoSweep::max_distances`].
pub fn max_distances(network: &Network, bush: &Bush) -> Vec<f64> {
    TopoSweep::new(network.node_count()).max_distances(network, bush).to_vec()
}

/// Allocating form of [`TopoSweep::trees`].
pub fn bush_trees(network: &Network, bush: &Bush) -> BushTrees {
    let mut trees = BushTrees::new(network.node_count());
    TopoSweep::new(network.node_count()).trees(network, bush, &mut trees);
    trees
}
