//! Battle snapshot: the complete observable state handed to renderers after each tick.

use serde::{Deserialize, Serialize};

use crate::components::{Camp, Depot, SupplyLine};
use crate::enums::*;
use crate::events::BattleEvent;
use crate::regiment::{HoldLine, Regiment, RegimentId};
use crate::types::{Position, SimTime, Velocity};

/// Complete battle state after a tick. Read-only for consumers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub time_scale: f64,
    pub regiments: Vec<RegimentView>,
    pub supplies: SupplyView,
    /// Latest strategic assessment of the opposing-force controller, if any.
    pub assessment: Option<StrategicAssessment>,
    pub events: Vec<BattleEvent>,
}

/// One regiment as seen by a renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegimentView {
    pub id: RegimentId,
    pub player: Player,
    pub position: Position,
    pub velocity: Velocity,
    pub facing: f64,
    pub target: Option<Position>,
    pub hold_line: Option<HoldLine>,
    /// Enemies inside this regiment's range during the last tick.
    pub engaged_with: Vec<RegimentId>,
    pub info: UnitInfo,
}

/// Per-unit summary for the HUD info panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitInfo {
    pub kind: UnitKind,
    pub troops: u32,
    pub max_troops: u32,
    /// Gauges rounded to whole percent.
    pub strength_pct: u32,
    pub morale_pct: u32,
    pub ammo_pct: u32,
    pub food_pct: u32,
    pub dug_in: bool,
    pub retreating: bool,
    pub scattered: bool,
}

impl UnitInfo {
    /// Space-separated status flags, e.g. "Dug In" or "Retreating".
    pub fn status_label(&self) -> String {
        let mut parts = Vec::new();
        if self.dug_in {
            parts.push("Dug In");
        }
        if self.retreating {
            parts.push("Retreating");
        }
        if self.scattered {
            parts.push("Scattered");
        }
        parts.join(" ")
    }
}

impl From<&Regiment> for UnitInfo {
    fn from(r: &Regiment) -> Self {
        let pct = |v: f64| v.round().clamp(0.0, 100.0) as u32;
        Self {
            kind: r.kind,
            troops: r.troops,
            max_troops: r.max_troops,
            strength_pct: pct(r.strength),
            morale_pct: pct(r.morale),
            ammo_pct: pct(r.ammo),
            food_pct: pct(r.food),
            dug_in: r.dug_in,
            retreating: r.retreating,
            scattered: r.scattered,
        }
    }
}

/// Supply structures, derived lines, and the advisory allowance.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SupplyView {
    pub depots: Vec<Depot>,
    pub camps: Vec<Camp>,
    pub supply_lines: Vec<SupplyLine>,
    pub total_allowed_length: f64,
}

/// Result of one strategic assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategicAssessment {
    pub player: Player,
    pub own_strength: f64,
    pub enemy_strength: f64,
    pub own_center: Position,
    pub enemy_center: Position,
    /// Ordered goals; `Resupply`, when present, comes first.
    pub goals: Vec<StrategicGoal>,
}

impl StrategicAssessment {
    pub fn has_goal(&self, goal: StrategicGoal) -> bool {
        self.goals.contains(&goal)
    }
}
