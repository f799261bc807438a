use std::path::Path;

use anyhow::Context;
use clap::Parser;
use depth_core::WhirlpoolMath;

use depth_inspector::{create_example_config, inspect_pool, InspectorConfig, PoolSnapshot};

#[derive(Parser, Debug)]
#[command(name = "depth-inspector")]
#[command(about = "Simulate tradable liquidity around the current price of a Whirlpool")]
struct Args {
    /// Path to the pool snapshot (JSON)
    #[arg(short, long, required_unless_present = "write_default_config")]
    snapshot: Option<String>,

    /// Path to inspector configuration file
    #[arg(short, long, default_value = "inspector.toml")]
    config: String,

    /// Override the number of per-step records in each direction
    #[arg(long)]
    max_steps: Option<usize>,

    /// Override the number of tick arrays on each side of the current one
    #[arg(short, long)]
    radius: Option<i32>,

    /// Write an example configuration file to this path and exit
    #[arg(long)]
    write_default_config: Option<String>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    if let Some(path) = &args.write_default_config {
        create_example_config(path)?;
        log::info!("Wrote example configuration to {}", path);
        return Ok(());
    }

    // Load configuration
    let mut config = if Path::new(&args.config).exists() {
        InspectorConfig::load(&args.config)?
    } else {
        log::warn!("Config file {} not found, using defaults", args.config);
        InspectorConfig::default()
    };
    if let Some(max_steps) = args.max_steps {
        config.max_steps = max_steps;
    }
    if let Some(radius) = args.radius {
        config.window_radius = radius;
    }
    config.validate()?;

    let snapshot_path = args.snapshot.context("--snapshot is required")?;
    let snapshot = PoolSnapshot::load(&snapshot_path)?;

    log::info!(
        "Loaded snapshot for {} with {} tick arrays",
        snapshot.whirlpool,
        snapshot.tick_arrays.len()
    );

    let report = inspect_pool(&snapshot, &config, &WhirlpoolMath);
    if report.steps.error || report.tick_arrays.error {
        log::warn!("Report for {} is incomplete", snapshot.whirlpool);
    }

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
