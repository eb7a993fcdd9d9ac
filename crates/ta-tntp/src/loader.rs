//! TNTP network and trip-table loaders.
//!
//! # Network file
//!
//! ```text
//! <NUMBER OF ZONES> 2
//! <NUMBER OF NODES> 4
//! <END OF METADATA>
//! ~ init  term  capacity  length  free_flow_time  b  power  ...  ;
//!   1     3     100       1       1               0.15  4      ;
//! ```
//!
//! Only `init`, `term`, `capacity` and `free_flow_time` are read; the other
//! columns may be present or not.  Node numbers are 1-based.
//!
//! # Trips file
//!
//! ```text
//! <NUMBER OF ZONES> 2
//! <END OF METADATA>
//! Origin 1
//!     2 :    400.0;
//! ```
//!
//! Several `dest : trips;` pairs may share a line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;
use ta_core::NodeId;
use ta_network::{Network, NetworkBuilder, OdMatrix};

use crate::metadata::{Lines, NUMBER_OF_NODES, NUMBER_OF_ZONES};
use crate::{TntpError, TntpResult};

// ── Network ───────────────────────────────────────────────────────────────────

/// Load a road network from a TNTP `_net` file.
pub fn parse_network(path: &Path) -> TntpResult<Network> {
    let file = File::open(path)?;
    parse_network_reader(BufReader::new(file))
}

/// Like [`parse_network`] but accepts any `BufRead` source.
pub fn parse_network_reader<R: BufRead>(reader: R) -> TntpResult<Network> {
    let mut lines = Lines::new(reader);
    let metadata = lines.metadata()?;
    let nodes = metadata.count(NUMBER_OF_NODES)?;
    let zones = metadata.count(NUMBER_OF_ZONES)?;

    let mut builder = NetworkBuilder::new(nodes, zones);
    while let Some((number, line)) = lines.next_line()? {
        let fields: Vec<&str> = line
            .trim_end_matches(';')
            .split_whitespace()
            .collect();
        if fields.len() < 5 {
            return Err(TntpError::parse(
                number,
                format!("expected at least 5 link columns, found {}", fields.len()),
            ));
        }
        let from = node(fields[0], number)?;
        let to = node(fields[1], number)?;
        let capacity = number_field(fields[2], "capacity", number)?;
        let free_flow = number_field(fields[4], "free flow time", number)?;
        builder.add_arc(from, to, capacity, free_flow);
    }

    debug!("parsed network: {nodes} nodes, {zones} zones, {} arcs", builder.arc_count());
    Ok(builder.build()?)
}

// ── Trips ─────────────────────────────────────────────────────────────────────

/// Load an OD matrix from a TNTP `_trips` file.
pub fn parse_trips(path: &Path) -> TntpResult<OdMatrix> {
    let file = File::open(path)?;
    parse_trips_reader(BufReader::new(file))
}

/// Like [`parse_trips`] but accepts any `BufRead` source.
pub fn parse_trips_reader<R: BufRead>(reader: R) -> TntpResult<OdMatrix> {
    let mut lines = Lines::new(reader);
    let zones = lines.metadata()?.count(NUMBER_OF_ZONES)?;
    let mut od = OdMatrix::new(zones);

    let mut origin: Option<NodeId> = None;
    while let Some((number, line)) = lines.next_line()? {
        if let Some(rest) = line.strip_prefix("Origin") {
            origin = Some(node(rest.trim(), number)?);
            continue;
        }
        let Some(from) = origin else {
            return Err(TntpError::parse(number, "demand entry before the first Origin line"));
        };

        let compact: String = line.chars().filter(|c| !c.is_whitespace()).collect();
        for pair in compact.split(';').filter(|p| !p.is_empty()) {
            let Some((dest, trips)) = pair.split_once(':') else {
                return Err(TntpError::parse(number, format!("expected `dest : trips`, found {pair:?}")));
            };
            let to = node(dest, number)?;
            let trips = number_field(trips, "trips", number)?;
            od.set(from, to, trips)?;
        }
    }

    debug!("parsed trips: {zones} zones, {} total", od.total_demand());
    Ok(od)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Parse a 1-based node number into a 0-based `NodeId`.
fn node(field: &str, line: usize) -> TntpResult<NodeId> {
    field
        .parse::<u32>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .map(NodeId)
        .ok_or_else(|| TntpError::parse(line, format!("invalid node number {field:?}")))
}

fn number_field(field: &str, what: &str, line: usize) -> TntpResult<f64> {
    field
        .parse()
        .map_err(|_| TntpError::parse(line, format!("invalid {what} {field:?}")))
}
