//! Game loop: drives the battle engine at 30Hz, either paced against the wall
//! clock on its own thread or as fast as possible for headless batch runs.
//!
//! The paced loop owns the engine while it runs. Commands arrive via an `mpsc`
//! channel and the latest snapshot is stored in shared state for polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use skirmish_core::constants::TICK_RATE;
use skirmish_core::enums::GamePhase;
use skirmish_core::state::BattleSnapshot;
use skirmish_sim::BattleEngine;

use crate::state::{GameLoopCommand, LoopHandle, SharedSnapshot};

/// Wall duration of one tick. The engine applies the time scale to the
/// simulated step itself, so pacing never changes with speed.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawn the paced game loop on a new thread. It stops after `until`
/// simulated seconds, on `Shutdown`, or when every sender is dropped.
pub fn spawn_game_loop(engine: BattleEngine, until: f64) -> io::Result<LoopHandle> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot: SharedSnapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let thread = std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || run_game_loop(engine, cmd_rx, &shared, until))?;

    Ok(LoopHandle {
        command_tx: cmd_tx,
        latest_snapshot,
        thread,
    })
}

fn run_game_loop(
    mut engine: BattleEngine,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<BattleSnapshot>>,
    until: f64,
) -> BattleEngine {
    let mut next_tick_time = Instant::now();
    tracing::info!(until, "Game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => engine.queue_command(cmd),
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::info!(time = engine.time().elapsed_secs, "Game loop stopped");
                    return engine;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        if engine.time().elapsed_secs >= until {
            tracing::info!(time = engine.time().elapsed_secs, "Battle time limit reached");
            return engine;
        }

        // 2. Advance one tick (pause and time scale are handled by the engine)
        let snapshot = engine.tick();

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset to avoid a catch-up spiral
            next_tick_time = now;
        }
    }
}

/// Tick without sleeping until `seconds` of simulated time have passed.
///
/// Stops early if the battle cannot advance (paused or time scale 0).
pub fn run_batch(engine: &mut BattleEngine, seconds: f64) -> BattleSnapshot {
    let mut snapshot = engine.snapshot();
    while engine.time().elapsed_secs < seconds {
        if engine.phase() == GamePhase::Paused || engine.time_scale() <= 0.0 {
            tracing::warn!(
                time = engine.time().elapsed_secs,
                "Battle is frozen, ending batch run early"
            );
            break;
        }
        snapshot = engine.tick();
    }
    snapshot
}
