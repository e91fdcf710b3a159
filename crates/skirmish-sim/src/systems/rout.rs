//! Retreat/scatter state machine, evaluated after the morale update.
//!
//! Level-triggered: a regiment's flags follow its current morale, so running
//! the stage twice on unchanged morale changes nothing further.

use glam::DVec2;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::*;
use skirmish_core::enums::Player;
use skirmish_core::events::BattleEvent;
use skirmish_core::regiment::Regiment;
use skirmish_core::types::Position;

pub fn run(world: &mut World, rng: &mut ChaCha8Rng, events: &mut Vec<BattleEvent>) {
    let everyone: Vec<(Player, Position)> = world
        .query::<(&Position, &Regiment)>()
        .iter()
        .map(|(_, (pos, r))| (r.player, *pos))
        .collect();

    for (_entity, (pos, regiment)) in world.query_mut::<(&Position, &mut Regiment)>() {
        if let Some(event) = transition(regiment, pos, &everyone) {
            events.push(event);
        }

        if regiment.scattered
            && (regiment.target.is_none() || rng.gen::<f64>() < WANDER_RETARGET_CHANCE)
        {
            let flee = flee_direction(pos, regiment.player, &everyone);
            let jitter_x = (rng.gen::<f64>() - 0.5) * WANDER_JITTER;
            let jitter_y = (rng.gen::<f64>() - 0.5) * WANDER_JITTER;
            let base = pos.offset(flee, WANDER_DISTANCE);
            regiment.target = Some(Position::new(base.x + jitter_x, base.y + jitter_y));
        }
    }
}

/// Apply at most one state change for the regiment's current morale.
pub fn transition(
    regiment: &mut Regiment,
    pos: &Position,
    everyone: &[(Player, Position)],
) -> Option<BattleEvent> {
    let id = regiment.id;
    let morale = regiment.morale;

    if morale < SCATTER_THRESHOLD && !regiment.scattered {
        regiment.scatter();
        tracing::debug!(%id, morale, "Regiment scattered");
        Some(BattleEvent::Scattered { regiment: id })
    } else if morale < RETREAT_THRESHOLD && !regiment.scattered && !regiment.retreating {
        let flee = flee_direction(pos, regiment.player, everyone);
        regiment.begin_retreat(pos.offset(flee, RETREAT_DISTANCE));
        tracing::debug!(%id, morale, "Regiment began retreat");
        Some(BattleEvent::RetreatBegan { regiment: id })
    } else if morale >= RETREAT_THRESHOLD && regiment.retreating {
        regiment.stop_retreat();
        tracing::debug!(%id, morale, "Regiment stopped retreating");
        Some(BattleEvent::RetreatEnded { regiment: id })
    } else if morale >= RETREAT_THRESHOLD && regiment.scattered {
        regiment.reassemble();
        tracing::debug!(%id, morale, "Regiment reassembled");
        Some(BattleEvent::Reassembled { regiment: id })
    } else {
        None
    }
}

/// Unit vector away from the nearest enemy (scattered or not).
/// Defaults to (0, -1) when there is no enemy or it stands on the same spot.
pub fn flee_direction(from: &Position, player: Player, everyone: &[(Player, Position)]) -> DVec2 {
    everyone
        .iter()
        .filter(|(p, _)| *p != player)
        .map(|(_, pos)| pos)
        .min_by(|a, b| a.distance_to(from).total_cmp(&b.distance_to(from)))
        .map(|enemy| enemy.direction_to(from))
        .filter(|dir| *dir != DVec2::ZERO)
        .unwrap_or(DVec2::NEG_Y)
}
