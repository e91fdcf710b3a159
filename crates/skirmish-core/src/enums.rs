//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Regiment arm. Each variant carries its constant profile (see `regiment::UnitProfile`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    #[default]
    Infantry,
    Cavalry,
    Artillery,
}

impl UnitKind {
    pub fn name(&self) -> &'static str {
        match self {
            UnitKind::Infantry => "Infantry",
            UnitKind::Cavalry => "Cavalry",
            UnitKind::Artillery => "Artillery",
        }
    }
}

/// One of the two opposing sides. Serialized as the player number (1 or 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn number(&self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn opponent(&self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Display name of the side.
    pub fn name(&self) -> &'static str {
        match self {
            Player::One => "Union",
            Player::Two => "Confederacy",
        }
    }

    /// Display color (CSS hex) of the side.
    pub fn color(&self) -> &'static str {
        match self {
            Player::One => "#4169E1",
            Player::Two => "#DC143C",
        }
    }

    /// Initial facing of freshly raised regiments: toward the opposing edge.
    pub fn initial_facing(&self) -> f64 {
        match self {
            Player::One => 0.0,
            Player::Two => std::f64::consts::PI,
        }
    }
}

impl From<Player> for u8 {
    fn from(p: Player) -> u8 {
        p.number()
    }
}

impl TryFrom<u8> for Player {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(format!("invalid player number {other}, expected 1 or 2")),
        }
    }
}

/// Strategic goals produced by the opposing-force assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategicGoal {
    Attack,
    Flank,
    Defend,
    Regroup,
    Probe,
    Hold,
    Resupply,
}

/// Top-level simulation phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
}

/// Kind of supply structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureKind {
    Depot,
    Camp,
}
