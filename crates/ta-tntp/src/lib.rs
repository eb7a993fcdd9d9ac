//! `ta-tntp`: reading and writing the TNTP file formats.
//!
//! | Function                | Input / output                              |
//! |-------------------------|---------------------------------------------|
//! | [`parse_network`]       | `_net.tntp` link table → `Network`          |
//! | [`parse_trips`]         | `_trips.tntp` demand table → `OdMatrix`     |
//! | [`write_flows`]         | final `ArcFlow`s → tab-separated flow table |
//!
//! Each file-based function has a `_reader` / `_writer` twin for in-memory
//! sources.

pub mod error;
pub mod flows;
pub mod loader;
pub mod metadata;


pub use flows::{write_flows, write_flows_writer};
pub use error::{TntpError, TntpResult};
pub use loader::{parse_network, parse_network_reader, parse_trips, parse_trips_reader};
pub use metadata::Metadata;
