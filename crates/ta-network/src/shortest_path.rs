//! Single-source shortest paths over the cached arc costs.
//!
//! # Tie-breaking
//!
//! A node's predecessor is fixed the first time the node is seen and is only
//! replaced by a **strictly** shorter path.  Among equal-cost paths the one
//! discovered first wins, which in turn depends on the CSR arc order and on
//! [`IndexedMinHeap`]'s tie behaviour.  Bush construction relies on this
//! being deterministic.

use ta_core::{ArcId, IndexedMinHeap, NodeId};

use crate::network::Network;

// ── ShortestPathTree ──────────────────────────────────────────────────────────

/// Result of [`Network::shortest_path_tree`]: distance and predecessor arc
/// for every node, indexed by `NodeId`.
#[derive(Debug, Clone)]
pub struct ShortestPathTree {
    pub root: NodeId,
    /// `f64::INFINITY` for nodes unreachable from the root.
    pub distance: Vec<f64>,
    /// `None` for the root and for unreachable nodes.
    pub predecessor: Vec<Option<ArcId>>,
}

impl ShortestPathTree {
    #[inline]
    pub fn distance(&self, node: NodeId) -> f64 {
        self.distance[node.index()]
    }

    #[inline]
    pub fn predecessor(&self, node: NodeId) -> Option<ArcId> {
        self.predecessor[node.index()]
    }

    pub fn is_reachable(&self, node: NodeId) -> bool {
        self.distance[node.index()].is_finite()
    }

    /// Arcs on the tree path to `target`, walked backwards (the arc entering
    /// `target` comes first).  Empty for the root and for unreachable nodes.
    pub fn path_to<'a>(
        &'a self,
        network: &'a Network,
        target: NodeId,
    ) -> impl Iterator<Item = ArcId> + 'a {
        let mut next = self.predecessor[target.index()];
        std::iter::from_fn(move || {
            let arc = next?;
            next = self.predecessor[network.arc_from[arc.index()].index()];
            Some(arc)
        })
    }
}

// ── Dijkstra ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unseen,
    Queued,
    Settled,
}

impl Network {
    /// Dijkstra from `root` using the cached `cost` array.
    ///
    /// Costs must be non-negative, which BPR guarantees for valid arcs.
    pub fn shortest_path_tree(&self, root: NodeId) -> ShortestPathTree {
        let n = self.node_count();
        let mut distance    = vec![f64::INFINITY; n];
        let mut predecessor = vec![None; n];
        let mut mark        = vec![Mark::Unseen; n];
        let mut heap        = IndexedMinHeap::new(n);

        distance[root.index()] = 0.0;
        heap.push(root, 0.0);

        while let Some(from) = heap.pop_min() {
            mark[from.index()] = Mark::Settled;
            let base = distance[from.index()];

            for arc in self.out_arcs(from) {
                let to = self.arc_to[arc.index()];
                let t  = to.index();
                let candidate = base + self.cost[arc.index()];

                match mark[t] {
                    Mark::Settled => {}
                    Mark::Unseen => {
                        mark[t] = Mark::Queued;
                        distance[t] = candidate;
                        predecessor[t] = Some(arc);
                        heap.push(to, candidate);
                    }
                    Mark::Queued if candidate < distance[t] => {
                        distance[t] = candidate;
                        predecessor[t] = Some(arc);
                        heap.decrease_priority(to, candidate);
                    }
                    Mark::Queued => {}
                }
            }
        }

        ShortestPathTree { root, distance, predecessor }
    }
}
