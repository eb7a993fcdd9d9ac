//! ta-run: static user-equilibrium assignment on TNTP inputs.
//!
//! ```text
//! ta-run --network SiouxFalls_net.tntp --trips SiouxFalls_trips.tntp \
//!        --output flows.tsv -i 200 -g 1e-6 -t 4
//! ```
//!
//! Progress goes to stderr through `env_logger`; `RUST_LOG` overrides the
//! level chosen by `-v`.

use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{LevelFilter, info};

use ta_assign::{AssignmentBuilder, LogObserver};
use ta_core::AssignmentConfig;
use ta_tntp::{parse_network, parse_trips, write_flows};

/// Static traffic assignment with Algorithm B.
#[derive(Parser)]
#[command(name = "ta-run", version)]
struct Cli {
    /// TNTP network file
    #[arg(short, long)]
    network: PathBuf,

    /// TNTP trips (OD matrix) file
    #[arg(short = 'm', long)]
    trips: PathBuf,

    /// Output flow table
    #[arg(short, long, default_value = "flows.tsv")]
    output: PathBuf,

    /// Maximum number of iterations
    #[arg(short, long, default_value_t = 100)]
    iterations: u32,

    /// Relative-gap threshold; 0 runs every iteration
    #[arg(short = 'g', long, default_value_t = 1e-4)]
    relative_gap: f64,

    /// Worker threads; 0 runs the sequential engine
    #[arg(short, long, default_value_t = 0)]
    threads: usize,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .target(env_logger::Target::Stderr)
        .init();

    let t0 = Instant::now();
    let network = parse_network(&cli.network)
        .with_context(|| format!("loading network {}", cli.network.display()))?;
    info!(
        "loaded network: {} nodes, {} arcs, {} zones ({} ms)",
        network.node_count(),
        network.arc_count(),
        network.zone_count(),
        t0.elapsed().as_millis()
    );

    let t0 = Instant::now();
    let od = parse_trips(&cli.trips)
        .with_context(|| format!("loading trips {}", cli.trips.display()))?;
    info!("loaded OD matrix: {} total trips ({} ms)", od.total_demand(), t0.elapsed().as_millis());

    let config = AssignmentConfig {
        max_iterations: cli.iterations,
        relative_gap:   cli.relative_gap,
        threads:        cli.threads,
    };
    let mut assignment = AssignmentBuilder::new(network, od)
        .config(config)
        .build()
        .context("setting up the assignment")?;

    let t0 = Instant::now();
    let report = assignment.run(&mut LogObserver)?;
    info!("static traffic assignment computation time is {} ms", t0.elapsed().as_millis());

    write_flows(&cli.output, &report.arcs)
        .with_context(|| format!("writing flows to {}", cli.output.display()))?;
    info!("wrote {} arcs to {}", report.arcs.len(), cli.output.display());

    Ok(())
}
