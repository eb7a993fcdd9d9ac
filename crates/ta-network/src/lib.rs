//! `ta-network`: road network, demand, and network-wide measures.
//!
//! # Crate layout
//!
//! | Module            | Contents                                                 |
//! |-------------------|----------------------------------------------------------|
//! | [`network`]       | `Network` (CSR + flow/cost state), `NetworkBuilder`      |
//! | [`bpr`]           | BPR cost, derivative, integral                           |
//! | [`od`]            | `OdMatrix`                                               |
//! | [`shortest_path`] | `ShortestPathTree`, Dijkstra over cached costs           |
//! | [`gap`]           | all-or-nothing loading and the duality gap               |
//! | [`error`]         | `NetworkError`, `NetworkResult<T>`                       |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                    |
//! |------------|-----------------------------------------------------------|
//! | `parallel` | Adds `Network::gap_parallel` on a Rayon thread pool.      |
//! | `serde`    | Serde derives on `ArcFlow`, `OdMatrix`, and the ta-core ids. |

pub mod bpr;
pub mod error;
pub mod gap;
pub mod network;
pub mod od;
pub mod shortest_path;


pub use error::{NetworkError, NetworkResult};
pub use network::{ArcFlow, Network, NetworkBuilder};
pub use od::OdMatrix;
pub use shortest_path::ShortestPathTree;
