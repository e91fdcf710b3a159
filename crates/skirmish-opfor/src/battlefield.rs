//! Read-only battlefield view handed to the controller each think cycle,
//! and the orders it hands back.

use skirmish_core::enums::{Player, UnitKind};
use skirmish_core::regiment::{Regiment, RegimentId};
use skirmish_core::supply::SupplyNetwork;
use skirmish_core::types::Position;
use skirmish_terrain::TerrainQuery;

/// One regiment as the controller sees it.
#[derive(Debug, Clone, Copy)]
pub struct ForceUnit<'a> {
    pub position: Position,
    pub regiment: &'a Regiment,
    /// Whether this regiment had any enemy in range on the last tick.
    pub engaged: bool,
}

impl ForceUnit<'_> {
    pub fn id(&self) -> RegimentId {
        self.regiment.id
    }

    pub fn player(&self) -> Player {
        self.regiment.player
    }

    pub fn kind(&self) -> UnitKind {
        self.regiment.kind
    }

    pub fn distance_to(&self, other: &ForceUnit) -> f64 {
        self.position.distance_to(&other.position)
    }
}

/// Shared state snapshot for one think cycle.
pub struct Battlefield<'a> {
    pub units: &'a [ForceUnit<'a>],
    pub supplies: &'a SupplyNetwork,
    pub terrain: Option<&'a dyn TerrainQuery>,
}

impl<'a> Battlefield<'a> {
    pub fn side(&self, player: Player) -> impl Iterator<Item = &'a ForceUnit<'a>> + 'a {
        self.units.iter().filter(move |u| u.player() == player)
    }

    /// Nearest enemy of `unit` that has not scattered (first wins ties).
    pub fn nearest_enemy(&self, unit: &ForceUnit) -> Option<(&'a ForceUnit<'a>, f64)> {
        let mut nearest: Option<(&'a ForceUnit<'a>, f64)> = None;
        for enemy in self.side(unit.player().opponent()) {
            if enemy.regiment.scattered {
                continue;
            }
            let dist = unit.distance_to(enemy);
            if nearest.map_or(true, |(_, best)| dist < best) {
                nearest = Some((enemy, dist));
            }
        }
        nearest
    }
}

/// Intent written to a controlled regiment. The engine applies these through
/// the same command methods player intents use.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TacticalOrder {
    /// March to a point (drops entrenchment and line).
    MoveTo(Position),
    /// Cancel any pending move and stand ready.
    Halt,
    /// Leave entrenchments but keep the current move order.
    StandTo,
    /// Entrench in place.
    DigIn,
    /// Re-point an ongoing retreat.
    FallBackTo(Position),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IssuedOrder {
    pub regiment: RegimentId,
    pub order: TacticalOrder,
}
