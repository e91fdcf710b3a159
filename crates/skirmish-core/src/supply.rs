//! Supply network: depots, camps, and nearest-depot supply lines per camp.

use serde::{Deserialize, Serialize};

use crate::components::{Camp, Depot, StructureId, SupplyLine};
use crate::constants::{CAMP_RESUPPLY_RADIUS, SUPPLY_LENGTH_PER_TROOP};
use crate::enums::{Player, StructureKind};
use crate::types::Position;

/// All supply structures of both sides plus the derived lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplyNetwork {
    pub depots: Vec<Depot>,
    pub camps: Vec<Camp>,
    #[serde(default)]
    pub supply_lines: Vec<SupplyLine>,
    /// Advisory capacity: two units of line per soldier on the field.
    #[serde(default)]
    pub total_allowed_length: f64,
    #[serde(default)]
    next_id: u32,
}

impl SupplyNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_depot(
        &mut self,
        position: Position,
        player: Player,
        food_rate: f64,
        ammo_rate: f64,
    ) -> StructureId {
        let id = self.allocate_id();
        self.depots.push(Depot {
            id,
            position,
            player,
            food_rate,
            ammo_rate,
        });
        self.recompute_supply_lines();
        id
    }

    pub fn add_camp(&mut self, position: Position, player: Player) -> StructureId {
        let id = self.allocate_id();
        self.camps.push(Camp {
            id,
            position,
            player,
            connected_to_depot: None,
        });
        self.recompute_supply_lines();
        id
    }

    /// Remove a depot or camp by id. Returns whether anything was removed.
    pub fn remove_structure(&mut self, id: StructureId) -> bool {
        let before = self.depots.len() + self.camps.len();
        self.depots.retain(|d| d.id != id);
        self.camps.retain(|c| c.id != id);
        let removed = self.depots.len() + self.camps.len() != before;
        if removed {
            self.recompute_supply_lines();
        }
        removed
    }

    /// Rebuild every supply line from scratch: each camp links to its nearest
    /// same-side depot (first encountered wins ties). Camps without a depot get no line.
    pub fn recompute_supply_lines(&mut self) {
        self.supply_lines.clear();

        for camp in &mut self.camps {
            let mut nearest: Option<(&Depot, f64)> = None;
            for depot in self.depots.iter().filter(|d| d.player == camp.player) {
                let dist = depot.position.distance_to(&camp.position);
                if nearest.map_or(true, |(_, best)| dist < best) {
                    nearest = Some((depot, dist));
                }
            }

            camp.connected_to_depot = nearest.map(|(depot, _)| depot.id);
            if let Some((depot, length)) = nearest {
                self.supply_lines.push(SupplyLine {
                    from_depot: depot.id,
                    to_camp: camp.id,
                    from_position: depot.position,
                    to_position: camp.position,
                    length,
                    player: camp.player,
                });
            }
        }
    }

    /// Recompute the advisory line allowance from the current troop total.
    pub fn update_allowance(&mut self, total_troops: u64) {
        self.total_allowed_length = total_troops as f64 * SUPPLY_LENGTH_PER_TROOP;
    }

    /// Whether `position` lies within resupply reach of a camp of `player`.
    pub fn near_friendly_camp(&self, position: &Position, player: Player) -> bool {
        self.camps
            .iter()
            .any(|c| c.player == player && c.position.distance_to(position) < CAMP_RESUPPLY_RADIUS)
    }

    /// Nearest camp or depot of `player` to `position`.
    pub fn nearest_friendly_structure(
        &self,
        position: &Position,
        player: Player,
    ) -> Option<Position> {
        let camps = self.camps.iter().filter(|c| c.player == player).map(|c| c.position);
        let depots = self.depots.iter().filter(|d| d.player == player).map(|d| d.position);
        camps.chain(depots).min_by(|a, b| {
            a.distance_to(position)
                .total_cmp(&b.distance_to(position))
        })
    }

    pub fn first_depot(&self, player: Player) -> Option<&Depot> {
        self.depots.iter().find(|d| d.player == player)
    }

    /// Structure under a point (depots checked before camps).
    pub fn structure_at(&self, point: &Position, radius: f64) -> Option<(StructureKind, StructureId)> {
        let depot = self
            .depots
            .iter()
            .find(|d| d.position.distance_to(point) < radius)
            .map(|d| (StructureKind::Depot, d.id));
        depot.or_else(|| {
            self.camps
                .iter()
                .find(|c| c.position.distance_to(point) < radius)
                .map(|c| (StructureKind::Camp, c.id))
        })
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn allocate_id(&mut self) -> StructureId {
        // Loaded documents may carry ids without a counter.
        let floor = self
            .depots
            .iter()
            .map(|d| d.id.0)
            .chain(self.camps.iter().map(|c| c.id.0))
            .max()
            .map_or(0, |m| m + 1);
        self.next_id = self.next_id.max(floor);
        let id = StructureId(self.next_id);
        self.next_id += 1;
        id
    }
}
