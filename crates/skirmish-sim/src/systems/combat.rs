//! Combat systems: range detection, then one-directional damage resolution.
//!
//! Detection fills the engine's `EngagementMap`; resolution walks it in
//! detection order so casualty rolls draw from the RNG deterministically.

use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::constants::{DAMAGE_SCALE, PROXIMITY_FALLOFF};
use skirmish_core::enums::Player;
use skirmish_core::regiment::{Regiment, RegimentId};
use skirmish_core::types::Position;

use crate::engagement::{Contact, EngagementMap};

struct Combatant {
    entity: Entity,
    id: RegimentId,
    player: Player,
    position: Position,
    range: f64,
    scattered: bool,
}

/// Rebuild the engagement map: every enemy inside each regiment's effective range.
/// Scattered regiments neither engage nor get engaged.
pub fn detect(world: &World, engagements: &mut EngagementMap) {
    engagements.clear();

    let combatants: Vec<Combatant> = world
        .query::<(&Position, &Regiment)>()
        .iter()
        .map(|(entity, (pos, r))| Combatant {
            entity,
            id: r.id,
            player: r.player,
            position: *pos,
            range: r.effective_range(),
            scattered: r.scattered,
        })
        .collect();

    for attacker in &combatants {
        if attacker.scattered {
            continue;
        }
        let contacts: Vec<Contact> = combatants
            .iter()
            .filter(|other| other.player != attacker.player && !other.scattered)
            .filter_map(|other| {
                let distance = attacker.position.distance_to(&other.position);
                (distance <= attacker.range).then(|| Contact {
                    entity: other.entity,
                    regiment: other.id,
                    distance,
                    range: attacker.range,
                    bearing: attacker.position.bearing_to(&other.position),
                })
            })
            .collect();
        engagements.insert(attacker.entity, contacts);
    }
}

/// Apply damage for every (attacker, contact) pair and spend the attacker's ammunition.
pub fn resolve(world: &mut World, engagements: &EngagementMap, rng: &mut ChaCha8Rng, dt: f64) {
    for (attacker, contacts) in engagements.iter() {
        for contact in contacts {
            // Attack power is re-read per contact: ammo may run dry mid-volley.
            let power = match world.get::<&Regiment>(attacker) {
                Ok(r) => r.attack_power(),
                Err(_) => break,
            };
            let damage = power * proximity_factor(contact) * dt * DAMAGE_SCALE;
            let roll: f64 = rng.gen();

            if let Ok(mut target) = world.get::<&mut Regiment>(contact.entity) {
                target.take_damage(damage, roll);
            }
            if let Ok(mut r) = world.get::<&mut Regiment>(attacker) {
                r.consume_ammo(dt);
            }
        }
    }
}

/// Closer is deadlier: 1 at point blank, 0.5 at the edge of range.
pub fn proximity_factor(contact: &Contact) -> f64 {
    if contact.range <= 0.0 {
        return 1.0;
    }
    1.0 - PROXIMITY_FALLOFF * (contact.distance / contact.range)
}
