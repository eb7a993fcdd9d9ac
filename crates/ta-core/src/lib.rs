//! `ta-core`: foundational types for the traffic assignment workspace.
//!
//! This crate is a dependency of every other `ta-*` crate.  It has no
//! `ta-*` dependencies and minimal external ones (only `thiserror`, plus
//! optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `ArcId`                                     |
//! | [`config`]      | `AssignmentConfig`                                    |
//! | [`containers`]  | `IndexedMinHeap`, `NodeQueue`, `NodeSet`              |
//! | [`error`]       | `TaError`, `TaResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to ids and the config.      |

pub mod config;
pub mod containers;
pub mod error;
pub mod ids;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::AssignmentConfig;
pub use containers::{IndexedMinHeap, NodeQueue, NodeSet};
pub use error::{TaError, TaResult};
pub use ids::{ArcId, NodeId};
