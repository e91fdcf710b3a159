//! Morale system: recovery out of contact, flanking shock, and rout contagion.

use hecs::{Entity, World};

use skirmish_core::constants::*;
use skirmish_core::enums::Player;
use skirmish_core::regiment::Regiment;
use skirmish_core::types::{angle_between, Position};

use crate::engagement::{Contact, EngagementMap};

pub fn run(world: &mut World, engagements: &EngagementMap, dt: f64) {
    // Flags do not change during this stage, so one pass of wavering units is enough.
    let wavering: Vec<(Entity, Player, Position)> = world
        .query::<(&Position, &Regiment)>()
        .iter()
        .filter(|(_, (_, r))| r.retreating || r.scattered)
        .map(|(entity, (pos, r))| (entity, r.player, *pos))
        .collect();

    for (entity, (pos, regiment)) in world.query_mut::<(&Position, &mut Regiment)>() {
        let contacts = engagements.contacts(entity);
        if contacts.is_empty() {
            regiment.recover_morale(dt);
        }

        if is_flanked(contacts) {
            regiment.lose_morale(dt * FLANKED_MORALE_RATE);
        }

        let shaken_by = wavering
            .iter()
            .filter(|(other, player, other_pos)| {
                *other != entity
                    && *player == regiment.player
                    && other_pos.distance_to(pos) < ROUT_CONTAGION_RADIUS
            })
            .count();
        if shaken_by > 0 {
            regiment.lose_morale(shaken_by as f64 * dt * ROUT_CONTAGION_RATE);
        }
    }
}

/// Two or more contacts whose bearings differ by more than 135 degrees.
pub fn is_flanked(contacts: &[Contact]) -> bool {
    contacts.iter().enumerate().any(|(i, a)| {
        contacts[i + 1..]
            .iter()
            .any(|b| angle_between(a.bearing, b.bearing) > FLANK_ANGLE)
    })
}
