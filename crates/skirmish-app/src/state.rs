//! State shared between the caller and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::state::BattleSnapshot;
use skirmish_sim::BattleEngine;

/// Commands sent to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the battle engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot, written by the loop after every tick.
pub type SharedSnapshot = Arc<Mutex<Option<BattleSnapshot>>>;

/// Handle to a running game loop thread.
///
/// The thread hands the engine back when it stops, so the caller can
/// save or inspect the final battlefield.
pub struct LoopHandle {
    pub(crate) command_tx: mpsc::Sender<GameLoopCommand>,
    pub(crate) latest_snapshot: SharedSnapshot,
    pub(crate) thread: JoinHandle<BattleEngine>,
}

impl LoopHandle {
    /// Forward a player command. False once the loop has stopped.
    pub fn send(&self, command: PlayerCommand) -> bool {
        self.command_tx
            .send(GameLoopCommand::PlayerCommand(command))
            .is_ok()
    }

    /// Clone of the most recent snapshot, if a tick has run.
    pub fn latest(&self) -> Option<BattleSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Wait for the loop to stop on its own and take back the engine.
    /// `None` if the loop thread panicked.
    pub fn join(self) -> Option<BattleEngine> {
        self.thread.join().ok()
    }

    /// Ask the loop to stop, then take back the engine.
    pub fn shutdown(self) -> Option<BattleEngine> {
        // The loop may already have exited; a closed channel is fine.
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
        self.join()
    }
}
