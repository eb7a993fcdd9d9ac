//! Origin-destination demand matrix.

use ta_core::NodeId;

use crate::{NetworkError, NetworkResult};

/// Dense row-major `zones × zones` matrix of trips.
///
/// Row `o` holds the demand leaving zone `o`.  The diagonal is stored but
/// never assigned (a trip from a zone to itself has no path).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OdMatrix {
    zones: usize,
    trips: Vec<f64>,
}

impl OdMatrix {
    /// All-zero matrix for `zones` zones.
    pub fn new(zones: usize) -> Self {
        Self { zones, trips: vec![0.0; zones * zones] }
    }

    /// Build from nested rows, e.g. a literal in tests.
    pub fn from_rows(rows: &[Vec<f64>]) -> NetworkResult<Self> {
        let zones = rows.len();
        let mut od = Self::new(zones);
        for (o, row) in rows.iter().enumerate() {
            for (d, &trips) in row.iter().enumerate() {
                od.set(NodeId(o as u32), NodeId(d as u32), trips)?;
            }
        }
        Ok(od)
    }

    pub fn zone_count(&self) -> usize {
        self.zones
    }

    #[inline]
    pub fn get(&self, origin: NodeId, destination: NodeId) -> f64 {
        self.trips[origin.index() * self.zones + destination.index()]
    }

    /// Store `trips` for the pair, replacing any previous value.
    pub fn set(&mut self, origin: NodeId, destination: NodeId, trips: f64) -> NetworkResult<()> {
        for node in [origin, destination] {
            if !node.is_zone(self.zones) {
                return Err(NetworkError::ZoneOutOfRange { node, zone_count: self.zones });
            }
        }
        if !trips.is_finite() || trips < 0.0 {
            return Err(NetworkError::NegativeDemand { origin, destination, trips });
        }
        self.trips[origin.index() * self.zones + destination.index()] = trips;
        Ok(())
    }

    /// Demand leaving `origin`, indexed by destination zone.
    pub fn row(&self, origin: NodeId) -> &[f64] {
        let start = origin.index() * self.zones;
        &self.trips[start..start + self.zones]
    }

    pub fn total_demand(&self) -> f64 {
        self.trips.iter().sum()
    }
}
