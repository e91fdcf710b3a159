//! Opposing-force system: ticks the controller's think clock and, when a cycle
//! is due, builds the battlefield view and applies the returned orders.
//!
//! Orders go through the same `Regiment` command methods as player intents, so
//! they take effect in the next tick's movement stage.

use std::collections::HashMap;

use hecs::World;
use rand_chacha::ChaCha8Rng;

use skirmish_core::events::BattleEvent;
use skirmish_core::regiment::{Regiment, RegimentId};
use skirmish_core::supply::SupplyNetwork;
use skirmish_core::types::Position;
use skirmish_opfor::{
    Battlefield, ForceUnit, OpposingForceController, TacticalOrder, ThinkOutcome,
};
use skirmish_terrain::TerrainQuery;

use crate::engagement::EngagementMap;

/// Read-only context for one controller pass.
pub struct OpforContext<'a> {
    pub supplies: &'a SupplyNetwork,
    pub terrain: Option<&'a dyn TerrainQuery>,
    pub engagements: &'a EngagementMap,
}

pub fn run(
    world: &mut World,
    controller: &mut OpposingForceController,
    ctx: &OpforContext,
    rng: &mut ChaCha8Rng,
    dt: f64,
    events: &mut Vec<BattleEvent>,
) {
    if !controller.update(dt) {
        return;
    }

    let outcome: ThinkOutcome = {
        let mut query = world.query::<(&Position, &Regiment)>();
        let units: Vec<ForceUnit> = query
            .iter()
            .map(|(entity, (pos, regiment))| ForceUnit {
                position: *pos,
                regiment,
                engaged: ctx.engagements.is_engaged(entity),
            })
            .collect();
        let field = Battlefield {
            units: &units,
            supplies: ctx.supplies,
            terrain: ctx.terrain,
        };
        controller.think(&field, rng)
    };

    if outcome.goals_changed {
        events.push(BattleEvent::GoalsChanged {
            player: controller.player,
            goals: controller.goals().to_vec(),
        });
    }
    if outcome.orders.is_empty() {
        return;
    }

    let orders: HashMap<RegimentId, TacticalOrder> = outcome
        .orders
        .iter()
        .map(|issued| (issued.regiment, issued.order))
        .collect();
    for (_entity, regiment) in world.query_mut::<&mut Regiment>() {
        if let Some(&order) = orders.get(&regiment.id) {
            if !apply_order(regiment, order) {
                tracing::debug!(id = %regiment.id, ?order, "Order not applicable");
            }
        }
    }
}

/// Write one tactical order onto a regiment. Returns false when the
/// regiment's state rejects it.
pub fn apply_order(regiment: &mut Regiment, order: TacticalOrder) -> bool {
    match order {
        TacticalOrder::MoveTo(target) => regiment.set_target(target),
        TacticalOrder::Halt => {
            regiment.halt();
            true
        }
        TacticalOrder::StandTo => {
            regiment.stand_to();
            true
        }
        TacticalOrder::DigIn => regiment.dig_in(),
        TacticalOrder::FallBackTo(target) => regiment.redirect_retreat(target),
    }
}
