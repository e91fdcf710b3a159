//! Supply structures and derived supply lines.
//!
//! Plain data; the bookkeeping lives in `supply::SupplyNetwork`.

use serde::{Deserialize, Serialize};

use crate::enums::Player;
use crate::types::Position;

/// Identifier shared by depots and camps (one id space per network).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StructureId(pub u32);

/// Rear supply depot: source of food and ammunition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depot {
    pub id: StructureId,
    pub position: Position,
    pub player: Player,
    pub food_rate: f64,
    pub ammo_rate: f64,
}

/// Forward camp: regiments within reach draw rations and powder here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camp {
    pub id: StructureId,
    pub position: Position,
    pub player: Player,
    /// Nearest same-side depot, derived on every network change.
    #[serde(default)]
    pub connected_to_depot: Option<StructureId>,
}

/// Derived depot-to-camp association. Never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyLine {
    pub from_depot: StructureId,
    pub to_camp: StructureId,
    pub from_position: Position,
    pub to_position: Position,
    pub length: f64,
    pub player: Player,
}
