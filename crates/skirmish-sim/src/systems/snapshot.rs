//! Snapshot system: queries the ECS world and builds a complete BattleSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use skirmish_core::enums::GamePhase;
use skirmish_core::events::BattleEvent;
use skirmish_core::regiment::Regiment;
use skirmish_core::state::*;
use skirmish_core::supply::SupplyNetwork;
use skirmish_core::types::{Position, SimTime, Velocity};

use crate::engagement::EngagementMap;

/// Everything the snapshot needs besides the world itself.
pub struct SnapshotInputs<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub time_scale: f64,
    pub supplies: &'a SupplyNetwork,
    pub engagements: &'a EngagementMap,
    pub assessment: Option<&'a StrategicAssessment>,
    pub events: Vec<BattleEvent>,
}

pub fn build_snapshot(world: &World, inputs: SnapshotInputs) -> BattleSnapshot {
    BattleSnapshot {
        time: inputs.time,
        phase: inputs.phase,
        time_scale: inputs.time_scale,
        regiments: build_regiments(world, inputs.engagements),
        supplies: build_supplies(inputs.supplies),
        assessment: inputs.assessment.cloned(),
        events: inputs.events,
    }
}

/// RegimentView list, sorted by id.
fn build_regiments(world: &World, engagements: &EngagementMap) -> Vec<RegimentView> {
    let mut regiments: Vec<RegimentView> = world
        .query::<(&Position, &Velocity, &Regiment)>()
        .iter()
        .map(|(entity, (pos, vel, r))| RegimentView {
            id: r.id,
            player: r.player,
            position: *pos,
            velocity: *vel,
            facing: r.facing,
            target: r.target,
            hold_line: r.hold_line,
            engaged_with: engagements.engaged_with(entity),
            info: UnitInfo::from(r),
        })
        .collect();

    regiments.sort_by_key(|r| r.id);
    regiments
}

fn build_supplies(supplies: &SupplyNetwork) -> SupplyView {
    SupplyView {
        depots: supplies.depots.clone(),
        camps: supplies.camps.clone(),
        supply_lines: supplies.supply_lines.clone(),
        total_allowed_length: supplies.total_allowed_length,
    }
}
