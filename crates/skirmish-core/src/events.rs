//! Events emitted by the simulation for UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{Player, StrategicGoal};
use crate::regiment::RegimentId;

/// Notable state changes during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BattleEvent {
    /// Morale broke below the retreat threshold.
    RetreatBegan { regiment: RegimentId },
    /// Morale recovered; the regiment stopped falling back.
    RetreatEnded { regiment: RegimentId },
    /// Morale collapsed; the regiment routed.
    Scattered { regiment: RegimentId },
    /// A routed regiment rallied.
    Reassembled { regiment: RegimentId },
    /// The opposing-force controller changed its strategic stance.
    GoalsChanged {
        player: Player,
        goals: Vec<StrategicGoal>,
    },
}
