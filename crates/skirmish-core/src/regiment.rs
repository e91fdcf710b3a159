//! The regiment entity: stat block, per-type profile, and command intents.
//!
//! Every mutator clamps its gauges before returning, so a `Regiment` can never be
//! observed with strength outside [10, 100], morale/ammo/food outside [0, 100],
//! or fewer than one trooper.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Player, UnitKind};
use crate::types::Position;

/// Stable identifier assigned by the engine when a regiment is raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegimentId(pub u32);

impl std::fmt::Display for RegimentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "regiment_{}", self.0)
    }
}

/// Constant per-arm parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitProfile {
    /// Marching speed (units/s).
    pub speed: f64,
    /// Combat range with ammunition.
    pub range: f64,
    pub firepower: f64,
    /// Ammunition spent per second per engaged enemy.
    pub ammo_consumption: f64,
    /// Attack multiplier once ammunition is exhausted.
    pub out_of_ammo_multiplier: f64,
    /// Range once ammunition is exhausted.
    pub out_of_ammo_range: f64,
}

impl UnitKind {
    pub fn profile(&self) -> UnitProfile {
        match self {
            UnitKind::Infantry => UnitProfile {
                speed: 60.0,
                range: 100.0,
                firepower: 1.0,
                ammo_consumption: 2.0,
                out_of_ammo_multiplier: 0.25,
                out_of_ammo_range: OUT_OF_AMMO_RANGE,
            },
            UnitKind::Cavalry => UnitProfile {
                speed: 120.0,
                range: 100.0,
                firepower: 1.0,
                ammo_consumption: 2.0,
                // Sabres work without powder.
                out_of_ammo_multiplier: 1.0,
                out_of_ammo_range: CAVALRY_MELEE_RANGE,
            },
            UnitKind::Artillery => UnitProfile {
                speed: 30.0,
                range: 250.0,
                firepower: 3.0,
                ammo_consumption: 3.0,
                out_of_ammo_multiplier: 0.0625,
                out_of_ammo_range: OUT_OF_AMMO_RANGE,
            },
        }
    }
}

/// A formation-line order: the regiment forms up between two points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoldLine {
    pub start: Position,
    pub end: Position,
}

/// Regiment component. Position and velocity live in their own components.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regiment {
    pub id: RegimentId,
    pub kind: UnitKind,
    pub player: Player,
    pub troops: u32,
    pub max_troops: u32,
    pub strength: f64,
    pub morale: f64,
    pub ammo: f64,
    pub food: f64,
    /// Facing angle in radians (atan2 convention).
    pub facing: f64,
    pub dug_in: bool,
    pub retreating: bool,
    pub scattered: bool,
    /// Pending movement order. `None` means the regiment has no order.
    pub target: Option<Position>,
    pub hold_line: Option<HoldLine>,
}

impl Regiment {
    /// A fresh regiment at full gauges.
    pub fn new(id: RegimentId, kind: UnitKind, player: Player, troops: u32) -> Self {
        let troops = troops.max(MIN_TROOPS);
        Self {
            id,
            kind,
            player,
            troops,
            max_troops: troops,
            strength: GAUGE_MAX,
            morale: GAUGE_MAX,
            ammo: GAUGE_MAX,
            food: GAUGE_MAX,
            facing: player.initial_facing(),
            dug_in: false,
            retreating: false,
            scattered: false,
            target: None,
            hold_line: None,
        }
    }

    pub fn profile(&self) -> UnitProfile {
        self.kind.profile()
    }

    pub fn speed(&self) -> f64 {
        self.profile().speed
    }

    pub fn has_ammo(&self) -> bool {
        self.ammo > 0.0
    }

    /// Current combat range; collapses to melee distance without ammunition.
    pub fn effective_range(&self) -> f64 {
        let profile = self.profile();
        if self.has_ammo() {
            profile.range
        } else {
            profile.out_of_ammo_range
        }
    }

    /// Raw attack power before proximity and time scaling.
    pub fn attack_power(&self) -> f64 {
        let profile = self.profile();
        let mut power = self.troops as f64 * (self.strength / 100.0) * profile.firepower;
        if !self.has_ammo() {
            power *= profile.out_of_ammo_multiplier;
        }
        if self.dug_in {
            power *= DUG_IN_ATTACK_BONUS;
        }
        power
    }

    /// Multiplier applied to incoming damage.
    pub fn defense_modifier(&self) -> f64 {
        if self.dug_in {
            DUG_IN_DEFENSE_FACTOR
        } else {
            1.0
        }
    }

    /// Whether the regiment has no pending movement order.
    pub fn is_stationary(&self) -> bool {
        self.target.is_none()
    }

    /// Apply incoming damage. `casualty_roll` is a uniform draw in [0, 1);
    /// at most one trooper falls per call.
    pub fn take_damage(&mut self, damage: f64, casualty_roll: f64) {
        let effective = (damage * self.defense_modifier()).max(0.0);
        let casualty_chance = effective / self.troops.max(MIN_TROOPS) as f64;
        if casualty_roll < casualty_chance {
            self.troops = self.troops.saturating_sub(1).max(MIN_TROOPS);
        }
        self.morale -= effective * DAMAGE_MORALE_FACTOR;
        self.strength -= effective * DAMAGE_STRENGTH_FACTOR;
        self.clamp_gauges();
    }

    /// Daily rations: food drains continuously.
    pub fn consume_food(&mut self, dt: f64) {
        self.food -= dt * FOOD_DEPLETION_RATE;
        self.clamp_gauges();
    }

    pub fn resupply(&mut self, food: f64, ammo: f64) {
        self.food += food;
        self.ammo += ammo;
        self.clamp_gauges();
    }

    /// Strength and morale penalties while the regiment has no food.
    pub fn starve(&mut self, dt: f64) {
        if self.food <= 0.0 {
            self.strength -= dt * STARVATION_STRENGTH_RATE;
            self.morale -= dt * STARVATION_MORALE_RATE;
            self.clamp_gauges();
        }
    }

    /// Spend ammunition for one engaged enemy over `dt`.
    pub fn consume_ammo(&mut self, dt: f64) {
        if self.has_ammo() {
            self.ammo -= dt * self.profile().ammo_consumption;
            self.clamp_gauges();
        }
    }

    /// Passive recovery out of contact. Scattered regiments only drift up to the rally cap.
    pub fn recover_morale(&mut self, dt: f64) {
        if self.scattered {
            if self.morale < SCATTERED_RECOVERY_CAP {
                self.morale =
                    (self.morale + dt * SCATTERED_RECOVERY_RATE).min(SCATTERED_RECOVERY_CAP);
            }
        } else {
            self.morale += dt * MORALE_RECOVERY_RATE;
            self.clamp_gauges();
        }
    }

    pub fn lose_morale(&mut self, amount: f64) {
        self.morale -= amount;
        self.clamp_gauges();
    }

    // --- State machine transitions ---

    /// Rout: drop every order and posture.
    pub fn scatter(&mut self) {
        self.scattered = true;
        self.retreating = false;
        self.dug_in = false;
        self.target = None;
        self.hold_line = None;
    }

    /// Fall back toward `target`, abandoning posture and formation.
    pub fn begin_retreat(&mut self, target: Position) {
        self.retreating = true;
        self.dug_in = false;
        self.hold_line = None;
        self.target = Some(target);
    }

    pub fn stop_retreat(&mut self) {
        self.retreating = false;
    }

    pub fn reassemble(&mut self) {
        self.scattered = false;
    }

    // --- Command intents ---

    /// Move order. Rejected while scattered.
    pub fn set_target(&mut self, target: Position) -> bool {
        if self.scattered {
            return false;
        }
        self.target = Some(target);
        self.dug_in = false;
        self.retreating = false;
        self.hold_line = None;
        true
    }

    /// Entrench in place. Rejected while scattered or retreating.
    pub fn dig_in(&mut self) -> bool {
        if self.scattered || self.retreating {
            return false;
        }
        self.dug_in = true;
        self.target = None;
        true
    }

    /// Form a line between two points, marching to its centre.
    /// Rejected while scattered or retreating.
    pub fn set_hold_line(&mut self, start: Position, end: Position) -> bool {
        if self.scattered || self.retreating {
            return false;
        }
        self.hold_line = Some(HoldLine { start, end });
        self.target = Some(start.midpoint(&end));
        self.dug_in = false;
        true
    }

    /// Ordered retreat, optionally toward a rally point. Rejected while scattered.
    pub fn order_retreat(&mut self, rally_point: Option<Position>) -> bool {
        if self.scattered {
            return false;
        }
        self.retreating = true;
        self.dug_in = false;
        self.hold_line = None;
        if let Some(point) = rally_point {
            self.target = Some(point);
        }
        true
    }

    /// Cancel the pending move and stand ready (not entrenched).
    pub fn halt(&mut self) {
        self.target = None;
        self.dug_in = false;
    }

    /// Climb out of the earthworks, keeping any march order.
    pub fn stand_to(&mut self) {
        self.dug_in = false;
    }

    /// Re-point an ongoing retreat without leaving the retreating state.
    pub fn redirect_retreat(&mut self, target: Position) -> bool {
        if !self.retreating || self.scattered {
            return false;
        }
        self.target = Some(target);
        true
    }

    /// Restore every gauge to its legal range. Also used after loading external data.
    pub fn clamp_gauges(&mut self) {
        self.troops = self.troops.max(MIN_TROOPS);
        self.max_troops = self.max_troops.max(self.troops);
        self.strength = clamp_or(self.strength, STRENGTH_MIN, GAUGE_MAX);
        self.morale = clamp_or(self.morale, 0.0, GAUGE_MAX);
        self.ammo = clamp_or(self.ammo, 0.0, GAUGE_MAX);
        self.food = clamp_or(self.food, 0.0, GAUGE_MAX);
    }
}

/// Clamp that maps NaN to the lower bound instead of propagating it.
fn clamp_or(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}
