//! Road network representation and builder.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing arcs.
//! Given a `NodeId n`, its outgoing arcs occupy the slice:
//!
//! ```text
//! arc_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! All arc arrays are sorted by start node and indexed by `ArcId`.  Within
//! one start node, arcs keep the order in which they were added.  Iteration
//! over a node's outgoing arcs is a contiguous memory scan.
//!
//! # Mutable state
//!
//! Topology, capacities and free-flow costs never change after
//! [`NetworkBuilder::build`].  Only `flow` and `cost` mutate.  `cost` is a
//! cache refreshed by [`Network::update_costs`]; flow changes are not
//! reflected in it until the caller refreshes explicitly, so a batch of flow
//! shifts can be applied before the next shortest-path query sees them.

use ta_core::{ArcId, NodeId};

use crate::bpr;
use crate::{NetworkError, NetworkResult};

// ── Network ───────────────────────────────────────────────────────────────────

/// Directed road graph in CSR format with per-arc BPR parameters and the
/// current assignment state.
///
/// All fields are `pub` for direct indexed access on hot paths.  Do not
/// construct directly; use [`NetworkBuilder`].
#[derive(Debug, Clone)]
pub struct Network {
    /// Number of traffic zones.  Nodes `0..zone_count` are zones.
    pub zone_count: usize,

    // ── CSR arc adjacency ─────────────────────────────────────────────────
    /// CSR row pointer.  Outgoing arcs of node `n` are at ArcIds
    /// `node_out_start[n] .. node_out_start[n+1]`.
    /// Length = `node_count + 1`.
    pub node_out_start: Vec<u32>,

    // ── Arc data (indexed by ArcId = position in sorted order) ────────────
    /// Start node of each arc.  Redundant with CSR but required for walking
    /// predecessor chains back towards a root.
    pub arc_from: Vec<NodeId>,

    /// End node of each arc.
    pub arc_to: Vec<NodeId>,

    /// Practical capacity (BPR `c`).
    pub capacity: Vec<f64>,

    /// Free-flow cost (BPR `t0`).  Never zero, see [`bpr::FREE_FLOW_EPSILON`].
    pub free_flow: Vec<f64>,

    /// Total flow from all origins.
    pub flow: Vec<f64>,

    /// Cached BPR cost, valid as of the last [`update_costs`](Self::update_costs).
    pub cost: Vec<f64>,
}

/// Final state of one arc, as handed to output writers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArcFlow {
    pub from: NodeId,
    pub to:   NodeId,
    pub flow: f64,
    pub cost: f64,
}

impl Network {
    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_out_start.len() - 1
    }

    pub fn arc_count(&self) -> usize {
        self.arc_to.len()
    }

    pub fn zone_count(&self) -> usize {
        self.zone_count
    }

    /// Iterator over every `ArcId` in index order.
    pub fn arcs(&self) -> impl Iterator<Item = ArcId> + '_ {
        (0..self.arc_count()).map(|i| ArcId(i as u32))
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `ArcId`s of all outgoing arcs from `node`.
    ///
    /// This is a contiguous index range, so no allocation happens.
    #[inline]
    pub fn out_arcs(&self, node: NodeId) -> impl Iterator<Item = ArcId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| ArcId(i as u32))
    }

    /// Out-degree of `node`.
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end   = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    #[inline]
    pub fn from(&self, arc: ArcId) -> NodeId {
        self.arc_from[arc.index()]
    }

    #[inline]
    pub fn to(&self, arc: ArcId) -> NodeId {
        self.arc_to[arc.index()]
    }

    // ── Flow and cost ─────────────────────────────────────────────────────

    /// Add `delta` (possibly negative) to the total flow on `arc`.  The
    /// cached cost is left untouched.
    #[inline]
    pub fn add_flow(&mut self, arc: ArcId, delta: f64) {
        self.flow[arc.index()] += delta;
    }

    /// BPR cost of `arc` at its current flow plus `delta`.
    #[inline]
    pub fn cost_at(&self, arc: ArcId, delta: f64) -> f64 {
        let i = arc.index();
        bpr::cost(self.free_flow[i], self.capacity[i], self.flow[i] + delta)
    }

    /// BPR cost derivative of `arc` at its current flow plus `delta`.
    #[inline]
    pub fn cost_derivative_at(&self, arc: ArcId, delta: f64) -> f64 {
        let i = arc.index();
        bpr::derivative(self.free_flow[i], self.capacity[i], self.flow[i] + delta)
    }

    /// Refresh every cached arc cost from the current flows.
    pub fn update_costs(&mut self) {
        for i in 0..self.arc_count() {
            self.cost[i] = bpr::cost(self.free_flow[i], self.capacity[i], self.flow[i]);
        }
    }

    /// Beckmann objective: the sum of BPR integrals at the current flows.
    pub fn objective(&self) -> f64 {
        (0..self.arc_count())
            .map(|i| bpr::integral(self.free_flow[i], self.capacity[i], self.flow[i]))
            .sum()
    }

    /// Reset all flows to zero and costs to free-flow.
    pub fn reset_flows(&mut self) {
        self.flow.iter_mut().for_each(|f| *f = 0.0);
        self.update_costs();
    }

    /// `(from, to, flow, cost)` for every arc in index order.
    pub fn arc_flows(&self) -> Vec<ArcFlow> {
        (0..self.arc_count())
            .map(|i| ArcFlow {
                from: self.arc_from[i],
                to:   self.arc_to[i],
                flow: self.flow[i],
                cost: self.cost[i],
            })
            .collect()
    }
}

// ── NetworkBuilder ────────────────────────────────────────────────────────────

/// Construct a [`Network`] incrementally, then call [`build`](Self::build).
///
/// The node and zone counts are fixed up front; arcs may be added in any
/// order.  `build()` validates every arc, sorts arcs by start node (stable,
/// so per-node insertion order is kept) and constructs the CSR arrays.
///
/// # Example
///
/// ```
/// use ta_core::NodeId;
/// use ta_network::NetworkBuilder;
///
/// let mut b = NetworkBuilder::new(3, 2);
/// b.add_arc(NodeId(0), NodeId(2), 1_000.0, 6.0);
/// b.add_arc(NodeId(2), NodeId(1), 1_000.0, 4.0);
/// let net = b.build().unwrap();
/// assert_eq!(net.node_count(), 3);
/// assert_eq!(net.arc_count(), 2);
/// ```
pub struct NetworkBuilder {
    node_count: usize,
    zone_count: usize,
    raw_arcs:   Vec<RawArc>,
}

struct RawArc {
    from:      NodeId,
    to:        NodeId,
    capacity:  f64,
    free_flow: f64,
}

impl NetworkBuilder {
    pub fn new(node_count: usize, zone_count: usize) -> Self {
        Self::with_capacity(node_count, zone_count, 0)
    }

    /// Pre-allocate for the expected number of arcs.
    pub fn with_capacity(node_count: usize, zone_count: usize, arcs: usize) -> Self {
        Self {
            node_count,
            zone_count,
            raw_arcs: Vec::with_capacity(arcs),
        }
    }

    /// Add a **directed** arc.  Validation is deferred to [`build`](Self::build).
    pub fn add_arc(&mut self, from: NodeId, to: NodeId, capacity: f64, free_flow: f64) -> &mut Self {
        self.raw_arcs.push(RawArc { from, to, capacity, free_flow });
        self
    }

    /// Add arcs in **both directions** with the same parameters.
    pub fn add_link(&mut self, a: NodeId, b: NodeId, capacity: f64, free_flow: f64) -> &mut Self {
        self.add_arc(a, b, capacity, free_flow);
        self.add_arc(b, a, capacity, free_flow)
    }

    pub fn node_count(&self) -> usize { self.node_count }
    pub fn zone_count(&self) -> usize { self.zone_count }
    pub fn arc_count(&self) -> usize { self.raw_arcs.len() }

    /// Validate all arcs and produce a [`Network`] with zero flow and
    /// free-flow costs.
    ///
    /// A free-flow cost of exactly 0 is replaced by
    /// [`bpr::FREE_FLOW_EPSILON`].
    pub fn build(self) -> NetworkResult<Network> {
        let node_count = self.node_count;
        let arc_count  = self.raw_arcs.len();

        if self.zone_count > node_count {
            return Err(NetworkError::ZoneCountExceedsNodes {
                zones: self.zone_count,
                nodes: node_count,
            });
        }
        if u32::try_from(node_count).is_err() {
            return Err(NetworkError::TooManyNodes(node_count));
        }
        if u32::try_from(arc_count).is_err() {
            return Err(NetworkError::TooManyArcs(arc_count));
        }

        for (i, arc) in self.raw_arcs.iter().enumerate() {
            for node in [arc.from, arc.to] {
                if node.index() >= node_count {
                    return Err(NetworkError::NodeOutOfRange { arc: i, node, node_count });
                }
            }
            // NaN fails the comparison and is rejected too.
            if !(arc.capacity > 0.0) {
                return Err(NetworkError::InvalidCapacity { arc: i, capacity: arc.capacity });
            }
            if !arc.free_flow.is_finite() || arc.free_flow < 0.0 {
                return Err(NetworkError::InvalidFreeFlow { arc: i, free_flow: arc.free_flow });
            }
        }

        // Stable sort keeps insertion order among arcs of the same start node.
        let mut raw = self.raw_arcs;
        raw.sort_by_key(|a| a.from.0);

        let arc_from: Vec<NodeId> = raw.iter().map(|a| a.from).collect();
        let arc_to:   Vec<NodeId> = raw.iter().map(|a| a.to).collect();
        let capacity: Vec<f64>    = raw.iter().map(|a| a.capacity).collect();
        let free_flow: Vec<f64>   = raw
            .iter()
            .map(|a| if a.free_flow == 0.0 { bpr::FREE_FLOW_EPSILON } else { a.free_flow })
            .collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for a in &raw {
            node_out_start[a.from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, arc_count);

        let mut network = Network {
            zone_count: self.zone_count,
            node_out_start,
            arc_from,
            arc_to,
            capacity,
            free_flow,
            flow: vec![0.0; arc_count],
            cost: vec![0.0; arc_count],
        };
        network.update_costs();
        Ok(network)
    }
}
