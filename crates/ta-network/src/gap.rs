//! All-or-nothing loading and the duality gap.
//!
//! The gap compares the current cost-weighted flow with the cost of loading
//! every OD pair onto its current shortest path:
//!
//! ```text
//! gap = Σ_a cost[a] * (aon[a] - flow[a])
//! ```
//!
//! It is never positive at a feasible assignment and reaches 0 at
//! equilibrium.  Both variants read the cached `cost` array, so callers must
//! run [`Network::update_costs`] after the last flow change.

use ta_core::NodeId;

use crate::network::Network;
use crate::od::OdMatrix;

impl Network {
    /// Flow per arc if each origin sends all its demand along its current
    /// shortest-path tree.
    pub fn all_or_nothing(&self, od: &OdMatrix) -> Vec<f64> {
        let mut aon = vec![0.0; self.arc_count()];
        for origin in 0..self.zone_count {
            self.load_origin(NodeId(origin as u32), od, |arc, trips| aon[arc] += trips);
        }
        aon
    }

    /// Duality gap at the current flows and cached costs.
    pub fn gap(&self, od: &OdMatrix) -> f64 {
        let aon = self.all_or_nothing(od);
        self.gap_from_aon(&aon)
    }

    /// Same as [`gap`](Self::gap), but with one shortest-path tree per worker
    /// task on `pool`.  Arc totals are accumulated with lock-free `f64`
    /// adds, so the summation order (and the last bits of the result) may
    /// differ from the sequential version.
    #[cfg(feature = "parallel")]
    pub fn gap_parallel(&self, od: &OdMatrix, pool: &rayon::ThreadPool) -> f64 {
        use rayon::prelude::*;
        use std::sync::atomic::AtomicU64;

        let aon: Vec<AtomicU64> = (0..self.arc_count())
            .map(|_| AtomicU64::new(0f64.to_bits()))
            .collect();

        pool.install(|| {
            (0..self.zone_count).into_par_iter().for_each(|origin| {
                self.load_origin(NodeId(origin as u32), od, |arc, trips| {
                    atomic_add(&aon[arc], trips)
                });
            });
        });

        let aon: Vec<f64> = aon.into_iter().map(|a| f64::from_bits(a.into_inner())).collect();
        self.gap_from_aon(&aon)
    }

    fn load_origin(&self, origin: NodeId, od: &OdMatrix, mut add: impl FnMut(usize, f64)) {
        let tree = self.shortest_path_tree(origin);
        for (destination, &trips) in od.row(origin).iter().enumerate() {
            if trips == 0.0 {
                continue;
            }
            for arc in tree.path_to(self, NodeId(destination as u32)) {
                add(arc.index(), trips);
            }
        }
    }

    fn gap_from_aon(&self, aon: &[f64]) -> f64 {
        (0..self.arc_count())
            .map(|i| self.cost[i] * (aon[i] - self.flow[i]))
            .sum()
    }
}

#[cfg(feature = "parallel")]
fn atomic_add(cell: &std::sync::atomic::AtomicU64, value: f64) {
    use std::sync::atomic::Ordering;

    // The closure always returns Some, so the update cannot fail.
    let _ = cell.fetch_update(Ordering::AcqRel, Ordering::Acquire, |bits| {
        Some((f64::from_bits(bits) + value).to_bits())
    });
}
