//! Movement system.
//!
//! Marches every regiment with a pending order straight at its target,
//! slowed by the local elevation gradient. Arrival clears the order.

use hecs::World;

use skirmish_core::constants::*;
use skirmish_core::regiment::Regiment;
use skirmish_core::types::{Position, Velocity};
use skirmish_terrain::TerrainQuery;

pub fn run(world: &mut World, terrain: Option<&dyn TerrainQuery>, dt: f64) {
    for (_entity, (pos, vel, regiment)) in
        world.query_mut::<(&mut Position, &mut Velocity, &mut Regiment)>()
    {
        if regiment.scattered || regiment.dug_in {
            *vel = Velocity::zero();
            continue;
        }
        let Some(target) = regiment.target else {
            *vel = Velocity::zero();
            continue;
        };

        let dist = pos.distance_to(&target);
        if dist < ARRIVAL_RADIUS {
            regiment.target = None;
            *vel = Velocity::zero();
            continue;
        }

        let dir = pos.direction_to(&target);
        let modifier = terrain.map_or(1.0, |t| terrain_modifier(t, pos));
        let speed = regiment.speed() * modifier;

        *pos = pos.offset(dir, speed * dt);
        *vel = Velocity::from(dir * speed);
        regiment.facing = dir.y.atan2(dir.x);
    }
}

/// Speed multiplier from a one-step finite difference of elevation to the east.
pub fn terrain_modifier(terrain: &dyn TerrainQuery, pos: &Position) -> f64 {
    let here = terrain.elevation_at(pos.x, pos.y);
    let ahead = terrain.elevation_at(pos.x + GRADIENT_SAMPLE_OFFSET, pos.y);
    let gradient = (ahead - here).abs();
    (1.0 - GRADIENT_SLOWDOWN * gradient).max(MIN_TERRAIN_MODIFIER)
}
