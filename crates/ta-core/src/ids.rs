//! Strongly typed, zero-cost identifier wrappers.
//!
//! Nodes and arcs are plain indices into the network's arrays.  Every other
//! structure (bushes, predecessor trees, gap accumulators) refers to an arc
//! by its `ArcId` and never holds a copy of the arc itself.  "No arc" is
//! spelled `Option<ArcId>`, not a sentinel value.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a network node.  Nodes `0..zone_count` are traffic zones.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a directed arc in the network's CSR arc arrays.
    pub struct ArcId(u32);
}

impl NodeId {
    /// `true` if this node is one of the first `zone_count` nodes.
    #[inline]
    pub fn is_zone(self, zone_count: usize) -> bool {
        self.index() < zone_count
    }
}
