//! Tab-separated flow table.
//!
//! ```text
//! From    To      Volume                  Cost
//! 1       3       100.000000000000000     1.150000000000000
//! ```
//!
//! One row per arc in arc-index order.  Node numbers are written 1-based.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::{Writer, WriterBuilder};
use ta_network::ArcFlow;

use crate::TntpResult;

/// Write `arcs` to a new file at `path`.
pub fn write_flows(path: &Path, arcs: &[ArcFlow]) -> TntpResult<()> {
    let file = File::create(path)?;
    write_flows_writer(file, arcs)
}

/// Like [`write_flows`] but accepts any `Write` sink.
pub fn write_flows_writer<W: Write>(sink: W, arcs: &[ArcFlow]) -> TntpResult<()> {
    let mut writer: Writer<W> = WriterBuilder::new().delimiter(b'\t').from_writer(sink);
    writer.write_record(["From", "To", "Volume", "Cost"])?;
    for arc in arcs {
        writer.write_record(&[
            (arc.from.0 + 1).to_string(),
            (arc.to.0 + 1).to_string(),
            format!("{:.15}", arc.flow),
            format!("{:.15}", arc.cost),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
