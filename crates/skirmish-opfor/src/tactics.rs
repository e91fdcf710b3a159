//! Per-arm tactical behavior trees.
//!
//! Each handler looks at one controlled regiment and its nearest enemy and
//! returns at most one order. No ECS dependency, operates on the battlefield view.

use glam::DVec2;
use rand::Rng;

use skirmish_core::constants::*;
use skirmish_core::enums::{StrategicGoal, UnitKind};
use skirmish_core::types::Position;
use skirmish_terrain::TerrainQuery;

use crate::battlefield::{Battlefield, ForceUnit, TacticalOrder};

/// Pick the order for one controlled regiment, given the current goals.
pub fn decide(
    unit: &ForceUnit,
    field: &Battlefield,
    goals: &[StrategicGoal],
    rng: &mut impl Rng,
) -> Option<TacticalOrder> {
    let regiment = unit.regiment;
    if regiment.scattered {
        return None;
    }
    if regiment.retreating {
        return retreat_order(unit, field, rng);
    }

    let (enemy, dist) = field.nearest_enemy(unit)?;
    match unit.kind() {
        UnitKind::Artillery => artillery(unit, enemy, dist, field),
        UnitKind::Cavalry => cavalry(unit, enemy, dist, field),
        UnitKind::Infantry => infantry(unit, enemy, dist, field, goals),
    }
}

/// Redirect a retreating regiment to the nearest friendly camp or depot, jittered.
pub fn retreat_order(
    unit: &ForceUnit,
    field: &Battlefield,
    rng: &mut impl Rng,
) -> Option<TacticalOrder> {
    let rally = field
        .supplies
        .nearest_friendly_structure(&unit.position, unit.player())?;
    let jitter_x = (rng.gen::<f64>() - 0.5) * RETREAT_JITTER;
    let jitter_y = (rng.gen::<f64>() - 0.5) * RETREAT_JITTER;
    Some(TacticalOrder::FallBackTo(Position::new(
        rally.x + jitter_x,
        rally.y + jitter_y,
    )))
}

/// Guns keep a standoff band and entrench behind an infantry screen.
fn artillery(
    unit: &ForceUnit,
    enemy: &ForceUnit,
    dist: f64,
    field: &Battlefield,
) -> Option<TacticalOrder> {
    let toward = unit.position.direction_to(&enemy.position);

    if dist < ARTILLERY_MIN_RANGE {
        return Some(TacticalOrder::MoveTo(
            unit.position.offset(-toward, ARTILLERY_FALLBACK_STEP),
        ));
    }
    if dist > ARTILLERY_MAX_RANGE {
        return Some(TacticalOrder::MoveTo(
            unit.position.offset(toward, ARTILLERY_ADVANCE_STEP),
        ));
    }

    let screened = field.side(unit.player()).any(|friend| {
        friend.kind() == UnitKind::Infantry
            && friend.id() != unit.id()
            && friend.distance_to(unit) < ARTILLERY_SCREEN_RADIUS
    });
    let regiment = unit.regiment;
    if screened && !regiment.dug_in && regiment.is_stationary() {
        return Some(TacticalOrder::DigIn);
    }
    None
}

fn cavalry(
    unit: &ForceUnit,
    enemy: &ForceUnit,
    dist: f64,
    field: &Battlefield,
) -> Option<TacticalOrder> {
    if let Some(point) = flank_point(unit, field) {
        return Some(TacticalOrder::MoveTo(point));
    }

    let regiment = unit.regiment;
    if regiment.ammo < CAVALRY_CHARGE_AMMO {
        // Out of powder: close to sabre range.
        if dist > CAVALRY_CHARGE_MIN_DISTANCE {
            return Some(TacticalOrder::MoveTo(enemy.position));
        }
        return None;
    }

    if dist > CAVALRY_HARASS_MIN && dist < CAVALRY_HARASS_MAX && regiment.is_stationary() {
        let perp = unit.position.direction_to(&enemy.position).perp();
        return Some(TacticalOrder::MoveTo(
            unit.position.offset(perp, CAVALRY_HARASS_STEP),
        ));
    }
    None
}

/// Side point of the first enemy already tied up in a fight, placed square
/// to the bearing from `unit`.
fn flank_point(unit: &ForceUnit, field: &Battlefield) -> Option<Position> {
    let enemy = field
        .side(unit.player().opponent())
        .find(|e| e.engaged && !e.regiment.scattered)?;
    let angle = unit.position.bearing_to(&enemy.position) + std::f64::consts::FRAC_PI_2;
    Some(
        enemy
            .position
            .offset(DVec2::from_angle(angle), CAVALRY_FLANK_DISTANCE),
    )
}

fn infantry(
    unit: &ForceUnit,
    enemy: &ForceUnit,
    dist: f64,
    field: &Battlefield,
    goals: &[StrategicGoal],
) -> Option<TacticalOrder> {
    if unit.regiment.morale < INFANTRY_SHAKEN_MORALE {
        let away = -unit.position.direction_to(&enemy.position);
        return Some(TacticalOrder::MoveTo(
            unit.position.offset(away, INFANTRY_FALLBACK_STEP),
        ));
    }

    if goals.contains(&StrategicGoal::Defend) {
        defend(unit, dist, field)
    } else if goals.contains(&StrategicGoal::Attack) {
        attack(unit, enemy, dist)
    } else {
        probe(unit, enemy, dist)
    }
}

fn defend(unit: &ForceUnit, dist: f64, field: &Battlefield) -> Option<TacticalOrder> {
    if dist > ENGAGE_FAR {
        let high_ground = field
            .terrain
            .and_then(|terrain| find_high_ground(&unit.position, terrain));
        return Some(match high_ground {
            Some(point) => TacticalOrder::MoveTo(point),
            None => TacticalOrder::StandTo,
        });
    }
    if dist > ENGAGE_NEAR {
        let regiment = unit.regiment;
        if !regiment.dug_in && regiment.is_stationary() {
            return Some(TacticalOrder::DigIn);
        }
        return None;
    }
    Some(TacticalOrder::DigIn)
}

fn attack(unit: &ForceUnit, enemy: &ForceUnit, dist: f64) -> Option<TacticalOrder> {
    if dist > ASSAULT_FAR {
        let toward = unit.position.direction_to(&enemy.position);
        Some(TacticalOrder::MoveTo(
            unit.position.offset(toward, INFANTRY_ADVANCE_STEP),
        ))
    } else if dist > ASSAULT_NEAR {
        Some(TacticalOrder::Halt)
    } else {
        Some(TacticalOrder::MoveTo(enemy.position))
    }
}

fn probe(unit: &ForceUnit, enemy: &ForceUnit, dist: f64) -> Option<TacticalOrder> {
    if dist > ENGAGE_FAR {
        let toward = unit.position.direction_to(&enemy.position);
        return Some(TacticalOrder::MoveTo(
            unit.position.offset(toward, INFANTRY_PROBE_STEP),
        ));
    }
    if dist > ENGAGE_NEAR && !unit.regiment.is_stationary() {
        return None;
    }
    Some(TacticalOrder::DigIn)
}

/// Highest of eight points on a 100-unit ring around `from` that lies on the
/// map. `None` when nothing rises above elevation 0.
pub fn find_high_ground(from: &Position, terrain: &dyn TerrainQuery) -> Option<Position> {
    let dims = terrain.dimensions();
    let mut best: Option<Position> = None;
    let mut best_elevation = 0.0;

    for i in 0..HIGH_GROUND_SAMPLES {
        let angle = i as f64 / HIGH_GROUND_SAMPLES as f64 * std::f64::consts::TAU;
        let sample = from.offset(DVec2::from_angle(angle), HIGH_GROUND_RADIUS);
        if !dims.contains(sample.x, sample.y) {
            continue;
        }
        let elevation = terrain.elevation_at(sample.x, sample.y);
        if elevation > best_elevation {
            best_elevation = elevation;
            best = Some(sample);
        }
    }
    best
}
