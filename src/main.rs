//! Veldt - entry point
//!
//! Builds a map, scatters an initial population, then either runs a fixed
//! number of ticks headless (JSON summary on stdout) or opens the terminal
//! viewer with the simulation driven by its input loop.

use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use veldt::core::config::SimulationConfig;
use veldt::core::error::Result;
use veldt::mapgen::{self, MapKind};
use veldt::pathfind::AStar;
use veldt::simulation::TickEvent;
use veldt::ui;

#[derive(Parser)]
#[command(name = "veldt", about = "Grassland foraging simulation")]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 16)]
    width: i32,

    /// Grid height in cells
    #[arg(long, default_value_t = 16)]
    height: i32,

    /// Organisms scattered at start
    #[arg(long, default_value_t = 12)]
    organisms: usize,

    /// RNG seed; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Terrain preset
    #[arg(long, value_enum, default_value = "patchy")]
    map: MapKind,

    /// Ticks to run in headless mode
    #[arg(long, default_value_t = 200)]
    ticks: u64,

    /// Open the terminal viewer instead of running headless
    #[arg(long)]
    watch: bool,

    /// Milliseconds between ticks in the viewer
    #[arg(long, default_value_t = 250)]
    interval_ms: u64,

    /// Starting energy override (e.g. 20 starts everyone hungry)
    #[arg(long)]
    energy: Option<f32>,

    /// TOML file overriding organism parameters
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Headless run statistics, printed as JSON
#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    population_start: usize,
    survivors: usize,
    starved: usize,
    grazes: usize,
    vegetation_remaining: f32,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("veldt=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if let Some(energy) = args.energy {
        config.energy_start = energy;
    }
    config.validate()?;

    let seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, map = ?args.map, "building {}x{} map", args.width, args.height);

    let mut grid = mapgen::build(args.map, args.width, args.height, seed);
    mapgen::populate(&mut grid, args.organisms, &config);

    if args.watch {
        return ui::run(grid, args.interval_ms);
    }

    let planner = AStar;
    let population_start = grid.live_count();
    let mut starved = 0usize;
    let mut grazes = 0usize;

    for _ in 0..args.ticks {
        for event in grid.advance(&planner)? {
            match event {
                TickEvent::Died { .. } => starved += 1,
                TickEvent::Grazed { .. } => grazes += 1,
                _ => {}
            }
        }
        if grid.live_count() == 0 {
            tracing::info!(tick = grid.current_tick(), "population extinct");
            break;
        }
    }

    let summary = RunSummary {
        seed,
        ticks: grid.current_tick(),
        population_start,
        survivors: grid.live_count(),
        starved,
        grazes,
        vegetation_remaining: grid.total_vegetation(),
    };
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).expect("summary serializes")
    );
    Ok(())
}
