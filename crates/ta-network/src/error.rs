//! Network-subsystem error type.

use thiserror::Error;

use ta_core::NodeId;

/// Errors produced by `ta-network`.  All of them describe malformed input and
/// are raised while the network or OD matrix is being built, never during an
/// assignment.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("arc #{arc} references {node}, but the network has only {node_count} nodes")]
    NodeOutOfRange { arc: usize, node: NodeId, node_count: usize },

    #[error("zone count {zones} exceeds node count {nodes}")]
    ZoneCountExceedsNodes { zones: usize, nodes: usize },

    #[error("arc #{arc} has invalid capacity {capacity} (must be positive)")]
    InvalidCapacity { arc: usize, capacity: f64 },

    #[error("arc #{arc} has invalid free-flow cost {free_flow} (must be finite and non-negative)")]
    InvalidFreeFlow { arc: usize, free_flow: f64 },

    #[error("demand {origin} -> {destination} is {trips}; trips must be finite and non-negative")]
    NegativeDemand { origin: NodeId, destination: NodeId, trips: f64 },

    #[error("{node} is not a zone (zone count {zone_count})")]
    ZoneOutOfRange { node: NodeId, zone_count: usize },

    #[error("{0} arcs exceed the u32 arc index space")]
    TooManyArcs(usize),

    #[error("{0} nodes exceed the u32 node index space")]
    TooManyNodes(usize),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
