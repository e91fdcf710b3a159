//! Strategic assessment: compare force strengths and pick a stance.

use skirmish_core::constants::*;
use skirmish_core::enums::{Player, StrategicGoal, UnitKind};
use skirmish_core::regiment::Regiment;
use skirmish_core::state::StrategicAssessment;
use skirmish_core::types::Position;

use crate::battlefield::{Battlefield, ForceUnit};

/// Combat weight of one regiment: troops scaled by strength and morale,
/// doubled for guns, half again for horse.
pub fn unit_strength(r: &Regiment) -> f64 {
    let base = r.troops as f64 * (r.strength / 100.0) * (r.morale / 100.0);
    match r.kind {
        UnitKind::Artillery => base * ARTILLERY_FORCE_WEIGHT,
        UnitKind::Cavalry => base * CAVALRY_FORCE_WEIGHT,
        UnitKind::Infantry => base,
    }
}

pub fn force_strength<'s, 'a: 's>(units: impl IntoIterator<Item = &'s ForceUnit<'a>>) -> f64 {
    units.into_iter().map(|u| unit_strength(u.regiment)).sum()
}

pub fn center_of_mass<'s, 'a: 's>(
    units: impl IntoIterator<Item = &'s ForceUnit<'a>>,
) -> Position {
    let (mut x, mut y, mut n) = (0.0, 0.0, 0usize);
    for u in units {
        x += u.position.x;
        y += u.position.y;
        n += 1;
    }
    if n == 0 {
        return Position::default();
    }
    Position::new(x / n as f64, y / n as f64)
}

/// Stance from the strength ratio, with `Resupply` prepended when the
/// force is hungry or short of powder.
pub fn choose_goals(own: f64, enemy: f64, avg_food: f64, avg_ammo: f64) -> Vec<StrategicGoal> {
    let mut goals = if own > enemy * ATTACK_RATIO {
        vec![StrategicGoal::Attack, StrategicGoal::Flank]
    } else if own < enemy * DEFEND_RATIO {
        vec![StrategicGoal::Defend, StrategicGoal::Regroup]
    } else {
        vec![StrategicGoal::Probe, StrategicGoal::Hold]
    };

    if avg_food < RESUPPLY_FOOD_THRESHOLD || avg_ammo < RESUPPLY_AMMO_THRESHOLD {
        goals.insert(0, StrategicGoal::Resupply);
    }
    goals
}

/// Assess the field from `player`'s side. `None` when either side has no regiments.
pub fn assess(player: Player, field: &Battlefield) -> Option<StrategicAssessment> {
    let own: Vec<&ForceUnit> = field.side(player).collect();
    let enemy: Vec<&ForceUnit> = field.side(player.opponent()).collect();
    if own.is_empty() || enemy.is_empty() {
        return None;
    }

    let own_strength = force_strength(own.iter().copied());
    let enemy_strength = force_strength(enemy.iter().copied());

    let count = own.len() as f64;
    let avg_food = own.iter().map(|u| u.regiment.food).sum::<f64>() / count;
    let avg_ammo = own.iter().map(|u| u.regiment.ammo).sum::<f64>() / count;

    Some(StrategicAssessment {
        player,
        own_strength,
        enemy_strength,
        own_center: center_of_mass(own.iter().copied()),
        enemy_center: center_of_mass(enemy.iter().copied()),
        goals: choose_goals(own_strength, enemy_strength, avg_food, avg_ammo),
    })
}
