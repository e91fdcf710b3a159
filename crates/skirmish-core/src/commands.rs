//! Player commands sent from the frontend to the simulation.
//!
//! Commands are queued and applied at the start of the next tick.

use serde::{Deserialize, Serialize};

use crate::regiment::RegimentId;
use crate::types::Position;

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Regiment orders ---
    /// March a regiment toward a point.
    Move { regiment: RegimentId, target: Position },
    /// Entrench a regiment where it stands.
    DigIn { regiment: RegimentId },
    /// Form a regiment on a line between two points.
    HoldLine {
        regiment: RegimentId,
        start: Position,
        end: Position,
    },
    /// Order a regiment back toward its side's depot.
    Retreat { regiment: RegimentId },

    // --- Simulation control ---
    /// Set time scale (1.0 = normal, 2.0 = double).
    SetTimeScale { scale: f64 },
    Pause,
    Resume,
}
