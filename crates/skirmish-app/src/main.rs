//! Headless skirmish runner.
//!
//! Sets up a battlefield (stock opening, or a saved scenario and map), lets the
//! opposing-force controller fight player two's side, and prints the outcome.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use skirmish_app::game_loop;
use skirmish_app::report::battle_report;
use skirmish_core::enums::Player;
use skirmish_core::Result;
use skirmish_sim::persistence;
use skirmish_sim::{BattleEngine, SimConfig};
use skirmish_terrain::Dimensions;

/// Headless skirmish runner
#[derive(Parser, Debug)]
#[command(name = "skirmish")]
#[command(about = "Run a regiment-level battle and report the outcome")]
struct Args {
    /// Random seed for deterministic runs
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 120.0)]
    seconds: f64,

    /// Battlefield width for the stock opening
    #[arg(long, default_value_t = 1200)]
    width: u32,

    /// Battlefield height for the stock opening
    #[arg(long, default_value_t = 800)]
    height: u32,

    /// Map document to load (elevation grid plus editor strokes)
    #[arg(long)]
    map: Option<PathBuf>,

    /// Scenario document to load instead of the stock opening
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Save the final battlefield as a scenario document
    #[arg(long)]
    save: Option<PathBuf>,

    /// Pace the loop against the wall clock instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Time scale (0 to 4)
    #[arg(long, default_value_t = 1.0)]
    speed: f64,

    /// Leave player two without the opposing-force controller
    #[arg(long)]
    no_opfor: bool,

    /// Print the final snapshot as JSON instead of the text report
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Skirmish run failed");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<()> {
    let mut engine = BattleEngine::new(SimConfig {
        seed: args.seed,
        time_scale: args.speed,
        opfor: (!args.no_opfor).then_some(Player::Two),
        ..Default::default()
    });

    let mut dimensions = Dimensions {
        width: args.width,
        height: args.height,
    };
    if let Some(path) = &args.map {
        let map = persistence::load_map(path)?;
        dimensions = map.map.dimensions;
        engine.set_map(map);
    }
    match &args.scenario {
        Some(path) => engine.load_scenario_file(path)?,
        None => engine.setup_default_scenario(dimensions),
    }

    tracing::info!(
        seed = args.seed,
        seconds = args.seconds,
        realtime = args.realtime,
        "Battle starting"
    );

    let (engine, snapshot) = if args.realtime {
        let handle = game_loop::spawn_game_loop(engine, args.seconds)?;
        let mut engine = handle
            .join()
            .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "game loop thread panicked"))?;
        let snapshot = engine.snapshot();
        (engine, snapshot)
    } else {
        let snapshot = game_loop::run_batch(&mut engine, args.seconds);
        (engine, snapshot)
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("{}", battle_report(&snapshot));
    }

    if let Some(path) = &args.save {
        engine.save_scenario_file(path)?;
    }
    Ok(())
}
