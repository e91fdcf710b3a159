//! Supply system: rations drain, camps resupply, empty stomachs cost strength and morale.

use hecs::World;

use skirmish_core::constants::{CAMP_AMMO_RATE, CAMP_FOOD_RATE};
use skirmish_core::regiment::Regiment;
use skirmish_core::supply::SupplyNetwork;
use skirmish_core::types::Position;

pub fn run(world: &mut World, supplies: &SupplyNetwork, dt: f64) {
    for (_entity, (pos, regiment)) in world.query_mut::<(&Position, &mut Regiment)>() {
        regiment.consume_food(dt);
        if supplies.near_friendly_camp(pos, regiment.player) {
            regiment.resupply(dt * CAMP_FOOD_RATE, dt * CAMP_AMMO_RATE);
        }
        regiment.starve(dt);
    }
}
