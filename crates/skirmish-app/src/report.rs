//! End-of-run summary printed by the command-line runner.

use std::fmt;

use skirmish_core::enums::Player;
use skirmish_core::state::BattleSnapshot;

/// Per-side tallies taken from a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SideSummary {
    pub player: Option<Player>,
    pub regiments: usize,
    pub troops: u32,
    pub max_troops: u32,
    pub average_morale: f64,
    pub engaged: usize,
    pub retreating: usize,
    pub scattered: usize,
}

impl SideSummary {
    pub fn from_snapshot(snapshot: &BattleSnapshot, player: Player) -> Self {
        let mut summary = SideSummary {
            player: Some(player),
            ..Default::default()
        };
        let mut morale_total = 0u32;

        for view in snapshot.regiments.iter().filter(|r| r.player == player) {
            summary.regiments += 1;
            summary.troops += view.info.troops;
            summary.max_troops += view.info.max_troops;
            morale_total += view.info.morale_pct;
            if !view.engaged_with.is_empty() {
                summary.engaged += 1;
            }
            if view.info.retreating {
                summary.retreating += 1;
            }
            if view.info.scattered {
                summary.scattered += 1;
            }
        }

        if summary.regiments > 0 {
            summary.average_morale = morale_total as f64 / summary.regiments as f64;
        }
        summary
    }

    pub fn casualties(&self) -> u32 {
        self.max_troops.saturating_sub(self.troops)
    }
}

impl fmt::Display for SideSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.player.map_or("Unknown", |p| p.name());
        write!(
            f,
            "{name}: {} regiments, {}/{} troops ({} lost), morale {:.0}%, {} engaged, {} retreating, {} scattered",
            self.regiments,
            self.troops,
            self.max_troops,
            self.casualties(),
            self.average_morale,
            self.engaged,
            self.retreating,
            self.scattered,
        )
    }
}

/// Both sides plus the clock, one line each.
pub fn battle_report(snapshot: &BattleSnapshot) -> String {
    let mut lines = vec![format!(
        "Battle time {:.1}s after {} ticks",
        snapshot.time.elapsed_secs, snapshot.time.tick
    )];
    for player in [Player::One, Player::Two] {
        lines.push(SideSummary::from_snapshot(snapshot, player).to_string());
    }
    if let Some(assessment) = &snapshot.assessment {
        lines.push(format!(
            "{} goals: {:?} (strength {:.0} vs {:.0})",
            assessment.player.name(),
            assessment.goals,
            assessment.own_strength,
            assessment.enemy_strength,
        ));
    }
    lines.join("\n")
}
