//! Entity spawn factories and the default battle layout.

use hecs::World;

use skirmish_core::constants::DEFAULT_DEPOT_RATE;
use skirmish_core::enums::{Player, UnitKind};
use skirmish_core::regiment::{Regiment, RegimentId};
use skirmish_core::supply::SupplyNetwork;
use skirmish_core::types::{Position, Velocity};

use crate::persistence::{RegimentRecord, Scenario};

/// Spawn a regiment entity with its placement components.
pub fn spawn_regiment(world: &mut World, record: RegimentRecord) -> hecs::Entity {
    world.spawn((record.position, record.velocity, record.regiment))
}

/// Sum of troops across every regiment on the field.
pub fn total_troops(world: &World) -> u64 {
    world
        .query::<&Regiment>()
        .iter()
        .map(|(_, r)| r.troops as u64)
        .sum()
}

/// Distances from a side's own map edge.
const DEPOT_EDGE_OFFSET: f64 = 50.0;
const CAMP_EDGE_OFFSET: f64 = 150.0;
const INFANTRY_EDGE_OFFSET: f64 = 200.0;
const CAVALRY_EDGE_OFFSET: f64 = 180.0;
const ARTILLERY_EDGE_OFFSET: f64 = 120.0;

/// Vertical spacing of the infantry line and the cavalry's wing offset.
const INFANTRY_SPACING: f64 = 80.0;
const CAVALRY_WING_OFFSET: f64 = 150.0;

/// The stock opening: each side gets a depot and camp near its own edge,
/// three infantry regiments in line, a cavalry wing, and a battery.
/// Player one deploys on the west edge, player two on the east.
pub fn default_scenario(width: f64, height: f64) -> Scenario {
    let mid_y = height / 2.0;
    let mut supplies = SupplyNetwork::new();
    let mut regiments = Vec::new();
    let mut next_id = 1u32;

    for player in [Player::One, Player::Two] {
        // Distance from the side's own edge to an x coordinate.
        let x_at = |offset: f64| match player {
            Player::One => offset,
            Player::Two => width - offset,
        };
        let wing = match player {
            Player::One => -CAVALRY_WING_OFFSET,
            Player::Two => CAVALRY_WING_OFFSET,
        };

        supplies.add_depot(
            Position::new(x_at(DEPOT_EDGE_OFFSET), mid_y),
            player,
            DEFAULT_DEPOT_RATE,
            DEFAULT_DEPOT_RATE,
        );
        supplies.add_camp(Position::new(x_at(CAMP_EDGE_OFFSET), mid_y), player);

        let layout = [
            (UnitKind::Infantry, INFANTRY_EDGE_OFFSET, -INFANTRY_SPACING, 100),
            (UnitKind::Infantry, INFANTRY_EDGE_OFFSET, 0.0, 100),
            (UnitKind::Infantry, INFANTRY_EDGE_OFFSET, INFANTRY_SPACING, 100),
            (UnitKind::Cavalry, CAVALRY_EDGE_OFFSET, wing, 50),
            (UnitKind::Artillery, ARTILLERY_EDGE_OFFSET, 0.0, 30),
        ];
        for (kind, edge_offset, dy, troops) in layout {
            regiments.push(RegimentRecord {
                position: Position::new(x_at(edge_offset), mid_y + dy),
                velocity: Velocity::zero(),
                regiment: Regiment::new(RegimentId(next_id), kind, player, troops),
            });
            next_id += 1;
        }
    }

    Scenario {
        regiments,
        supplies,
    }
}
