//! The opposing-force controller: a throttled think loop that assesses the
//! field and dispatches tactical orders for one side.

use rand::Rng;

use skirmish_core::constants::THINK_INTERVAL_SECS;
use skirmish_core::enums::{Player, StrategicGoal};
use skirmish_core::state::StrategicAssessment;

use crate::battlefield::{Battlefield, IssuedOrder};
use crate::strategy::assess;
use crate::tactics::decide;

/// Result of one think cycle.
#[derive(Debug, Default)]
pub struct ThinkOutcome {
    pub orders: Vec<IssuedOrder>,
    /// Whether the strategic goals differ from the previous cycle.
    pub goals_changed: bool,
}

#[derive(Debug, Clone)]
pub struct OpposingForceController {
    pub player: Player,
    pub think_interval: f64,
    time_since_think: f64,
    assessment: Option<StrategicAssessment>,
}

impl OpposingForceController {
    pub fn new(player: Player) -> Self {
        Self::with_interval(player, THINK_INTERVAL_SECS)
    }

    pub fn with_interval(player: Player, think_interval: f64) -> Self {
        Self {
            player,
            think_interval,
            time_since_think: 0.0,
            assessment: None,
        }
    }

    /// Accumulate `dt`. Returns true, and resets the accumulator, once a
    /// think cycle is due.
    pub fn update(&mut self, dt: f64) -> bool {
        self.time_since_think += dt;
        if self.time_since_think >= self.think_interval {
            self.time_since_think = 0.0;
            true
        } else {
            false
        }
    }

    /// Assess the field and issue one order per controlled regiment that needs one.
    /// Does nothing while either side has no regiments.
    pub fn think(&mut self, field: &Battlefield, rng: &mut impl Rng) -> ThinkOutcome {
        let Some(assessment) = assess(self.player, field) else {
            return ThinkOutcome::default();
        };

        let goals_changed = self
            .assessment
            .as_ref()
            .map_or(true, |prev| prev.goals != assessment.goals);
        if goals_changed {
            tracing::info!(
                player = self.player.number(),
                goals = ?assessment.goals,
                own = assessment.own_strength,
                enemy = assessment.enemy_strength,
                "Strategic goals changed"
            );
        }

        let mut orders = Vec::new();
        for unit in field.side(self.player) {
            if let Some(order) = decide(unit, field, &assessment.goals, rng) {
                orders.push(IssuedOrder {
                    regiment: unit.id(),
                    order,
                });
            }
        }

        self.assessment = Some(assessment);
        ThinkOutcome {
            orders,
            goals_changed,
        }
    }

    pub fn goals(&self) -> &[StrategicGoal] {
        self.assessment
            .as_ref()
            .map_or(&[], |a| a.goals.as_slice())
    }

    pub fn assessment(&self) -> Option<&StrategicAssessment> {
        self.assessment.as_ref()
    }

    /// Forget accumulated time and the last assessment (e.g. after loading a scenario).
    pub fn reset(&mut self) {
        self.time_since_think = 0.0;
        self.assessment = None;
    }
}
