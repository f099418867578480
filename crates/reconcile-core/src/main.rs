//! Reconciliation Sweep Simulator
//!
//! Sweeps willingness to compromise against emotional reactivity and prints
//! the reconciliation success rate of every cell as a heatmap.
//!
//! Examples:
//!   cargo run -p reconcile-core -- --seed 7
//!   cargo run -p reconcile-core -- --config reconcile.toml --json

use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use reconcile_core::{HeatmapSink, JsonSink, SimulationConfig, TextHeatmap};

/// Command line arguments for the sweep
#[derive(Parser, Debug)]
#[command(name = "reconcile_sim")]
#[command(about = "Monte Carlo sweep of negotiation reconciliation rates")]
struct Args {
    /// Random seed for reproducibility
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// TOML config file (defaults to reconcile.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the number of trials per grid cell
    #[arg(long)]
    trials: Option<u32>,

    /// Print the full report as JSON instead of the text heatmap
    #[arg(long)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Print the default configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

fn main() {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    if args.print_default_config {
        print!("{}", reconcile_core::default_config_toml());
        return Ok(());
    }

    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::load_or_default(),
    };
    if let Some(trials) = args.trials {
        config.sweep.trials_per_cell = trials;
    }

    let runner = config.runner()?;
    tracing::info!(seed = args.seed, "configuration loaded");

    let report = runner.run_seeded(config.willingness_axis(), config.reactivity_axis(), args.seed)?;

    let stdout = io::stdout().lock();
    if args.json {
        JsonSink::new(stdout).render(&report)?;
    } else {
        TextHeatmap::new(stdout).render(&report)?;
    }

    tracing::info!(
        report_id = %report.report_id,
        overall_rate = report.overall_success_rate(),
        "sweep finished"
    );
    Ok(())
}
