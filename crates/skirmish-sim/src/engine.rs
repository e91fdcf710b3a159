//! Battle engine: the core of the simulation.
//!
//! `BattleEngine` owns the hecs ECS world, the supply network, the terrain,
//! and the opposing-force controller. It processes queued player commands,
//! runs all systems in their fixed order, and produces `BattleSnapshot`s.
//! Completely headless, enabling deterministic testing.

use std::collections::VecDeque;
use std::path::Path;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::components::StructureId;
use skirmish_core::constants::*;
use skirmish_core::enums::{GamePhase, Player, StructureKind, UnitKind};
use skirmish_core::events::BattleEvent;
use skirmish_core::regiment::{Regiment, RegimentId};
use skirmish_core::state::{BattleSnapshot, StrategicAssessment};
use skirmish_core::supply::SupplyNetwork;
use skirmish_core::types::{Position, SimTime, Velocity};
use skirmish_core::Result;
use skirmish_opfor::OpposingForceController;
use skirmish_terrain::{Dimensions, MapData, TerrainQuery};

use crate::engagement::EngagementMap;
use crate::persistence::{RegimentRecord, Scenario};
use crate::systems;
use crate::systems::opposing_force::OpforContext;
use crate::systems::snapshot::SnapshotInputs;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same battle.
    pub seed: u64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
    /// Side driven by the opposing-force controller, if any.
    pub opfor: Option<Player>,
    /// Seconds between controller think cycles.
    pub think_interval: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            time_scale: 1.0,
            opfor: Some(Player::Two),
            think_interval: THINK_INTERVAL_SECS,
        }
    }
}

/// The battle engine. Owns the ECS world and all sim state.
pub struct BattleEngine {
    world: World,
    supplies: SupplyNetwork,
    map: Option<MapData>,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    controller: Option<OpposingForceController>,
    command_queue: VecDeque<PlayerCommand>,
    next_regiment_id: u32,
    engagements: EngagementMap,
    events: Vec<BattleEvent>,
}

impl BattleEngine {
    /// Create an empty battlefield with the given config.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            supplies: SupplyNetwork::new(),
            map: None,
            time: SimTime::default(),
            phase: GamePhase::default(),
            time_scale: clamp_time_scale(config.time_scale).unwrap_or(1.0),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            controller: config
                .opfor
                .map(|player| OpposingForceController::with_interval(player, config.think_interval)),
            command_queue: VecDeque::new(),
            next_regiment_id: 1,
            engagements: EngagementMap::default(),
            events: Vec::new(),
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance by one fixed step of `DT` seconds.
    pub fn tick(&mut self) -> BattleSnapshot {
        self.advance(DT)
    }

    /// Advance by `dt` wall seconds and return the resulting snapshot.
    ///
    /// Queued commands apply first. While paused the world is left untouched;
    /// otherwise the systems run once with `dt` scaled by the time scale.
    pub fn advance(&mut self, dt: f64) -> BattleSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            let scaled = dt * self.time_scale;
            if scaled > 0.0 {
                self.run_systems(scaled);
                self.time.advance(scaled);
            }
        }

        self.snapshot()
    }

    /// Build a snapshot of the current state, draining pending events.
    pub fn snapshot(&mut self) -> BattleSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            SnapshotInputs {
                time: self.time,
                phase: self.phase,
                time_scale: self.time_scale,
                supplies: &self.supplies,
                engagements: &self.engagements,
                assessment: self.assessment(),
                events,
            },
        )
    }

    // --- Accessors ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn supplies(&self) -> &SupplyNetwork {
        &self.supplies
    }

    pub fn map(&self) -> Option<&MapData> {
        self.map.as_ref()
    }

    pub fn terrain(&self) -> Option<&dyn TerrainQuery> {
        self.map.as_ref().map(|m| &m.map as &dyn TerrainQuery)
    }

    pub fn controller(&self) -> Option<&OpposingForceController> {
        self.controller.as_ref()
    }

    pub fn assessment(&self) -> Option<&StrategicAssessment> {
        self.controller.as_ref().and_then(|c| c.assessment())
    }

    /// Copy of a regiment's stat block.
    pub fn regiment(&self, id: RegimentId) -> Option<Regiment> {
        self.world
            .query::<&Regiment>()
            .iter()
            .find(|(_, r)| r.id == id)
            .map(|(_, r)| r.clone())
    }

    pub fn regiment_position(&self, id: RegimentId) -> Option<Position> {
        self.world
            .query::<(&Position, &Regiment)>()
            .iter()
            .find(|(_, (_, r))| r.id == id)
            .map(|(_, (pos, _))| *pos)
    }

    /// Enemies inside the regiment's range on the last simulated tick.
    pub fn engaged_with(&self, id: RegimentId) -> Vec<RegimentId> {
        self.find_entity(id)
            .map(|entity| self.engagements.engaged_with(entity))
            .unwrap_or_default()
    }

    /// Edit a regiment in place (editor stat tweaks, tests). Gauges are
    /// clamped afterwards. Returns false if no such regiment exists.
    pub fn update_regiment(&mut self, id: RegimentId, edit: impl FnOnce(&mut Regiment)) -> bool {
        for (_entity, regiment) in self.world.query_mut::<&mut Regiment>() {
            if regiment.id == id {
                edit(regiment);
                regiment.clamp_gauges();
                return true;
            }
        }
        false
    }

    // --- Terrain ---

    /// Install a map. Movement and high-ground search read its elevation grid.
    pub fn set_map(&mut self, map: MapData) {
        self.map = Some(map);
    }

    pub fn clear_map(&mut self) {
        self.map = None;
    }

    // --- Editor operations ---

    /// Raise a fresh regiment at full gauges. Recomputes the supply allowance.
    pub fn add_regiment(
        &mut self,
        kind: UnitKind,
        player: Player,
        position: Position,
        troops: u32,
    ) -> RegimentId {
        let id = RegimentId(self.next_regiment_id);
        self.next_regiment_id += 1;
        world_setup::spawn_regiment(
            &mut self.world,
            RegimentRecord {
                position,
                velocity: Velocity::zero(),
                regiment: Regiment::new(id, kind, player, troops),
            },
        );
        self.refresh_allowance();
        id
    }

    /// Remove a regiment. Recomputes the supply allowance.
    pub fn remove_regiment(&mut self, id: RegimentId) -> bool {
        let Some(entity) = self.find_entity(id) else {
            return false;
        };
        if self.world.despawn(entity).is_err() {
            return false;
        }
        self.engagements.clear();
        self.refresh_allowance();
        true
    }

    pub fn add_depot(&mut self, position: Position, player: Player) -> StructureId {
        self.supplies
            .add_depot(position, player, DEFAULT_DEPOT_RATE, DEFAULT_DEPOT_RATE)
    }

    pub fn add_camp(&mut self, position: Position, player: Player) -> StructureId {
        self.supplies.add_camp(position, player)
    }

    pub fn remove_structure(&mut self, id: StructureId) -> bool {
        self.supplies.remove_structure(id)
    }

    /// Remove every regiment and structure. The map is kept.
    pub fn clear(&mut self) {
        self.world.clear();
        self.supplies.clear();
        self.engagements.clear();
        self.events.clear();
        self.next_regiment_id = 1;
        if let Some(controller) = self.controller.as_mut() {
            controller.reset();
        }
    }

    // --- Hit testing ---

    /// Regiment under a point (lowest id wins overlaps).
    pub fn regiment_at(&self, point: Position) -> Option<RegimentId> {
        self.world
            .query::<(&Position, &Regiment)>()
            .iter()
            .filter(|(_, (pos, _))| pos.distance_to(&point) < REGIMENT_PICK_RADIUS)
            .map(|(_, (_, r))| r.id)
            .min()
    }

    /// Supply structure under a point (depots before camps).
    pub fn structure_at(&self, point: Position) -> Option<(StructureKind, StructureId)> {
        self.supplies.structure_at(&point, STRUCTURE_PICK_RADIUS)
    }

    // --- Scenarios ---

    /// Replace the battlefield with the stock opening sized to `dimensions`.
    pub fn setup_default_scenario(&mut self, dimensions: Dimensions) {
        let scenario =
            world_setup::default_scenario(dimensions.width as f64, dimensions.height as f64);
        self.load_scenario(scenario);
    }

    /// Current regiments and supplies as a saveable document.
    pub fn scenario(&self) -> Scenario {
        let mut regiments: Vec<RegimentRecord> = self
            .world
            .query::<(&Position, &Velocity, &Regiment)>()
            .iter()
            .map(|(_, (pos, vel, r))| RegimentRecord {
                position: *pos,
                velocity: *vel,
                regiment: r.clone(),
            })
            .collect();
        regiments.sort_by_key(|rec| rec.regiment.id);

        Scenario {
            regiments,
            supplies: self.supplies.clone(),
        }
    }

    /// Replace the battlefield with a loaded document. Gauges are clamped,
    /// supply lines and the allowance recomputed.
    pub fn load_scenario(&mut self, scenario: Scenario) {
        self.clear();

        let count = scenario.regiments.len();
        for mut record in scenario.regiments {
            record.regiment.clamp_gauges();
            self.next_regiment_id = self.next_regiment_id.max(record.regiment.id.0 + 1);
            world_setup::spawn_regiment(&mut self.world, record);
        }

        self.supplies = scenario.supplies;
        self.supplies.recompute_supply_lines();
        self.refresh_allowance();

        tracing::info!(
            regiments = count,
            depots = self.supplies.depots.len(),
            camps = self.supplies.camps.len(),
            "Scenario installed"
        );
    }

    pub fn save_scenario_file(&self, path: &Path) -> Result<()> {
        self.scenario().save_to_file(path)
    }

    pub fn load_scenario_file(&mut self, path: &Path) -> Result<()> {
        let scenario = Scenario::load_from_file(path)?;
        self.load_scenario(scenario);
        Ok(())
    }

    pub fn load_scenario_json(&mut self, json: &str) -> Result<()> {
        let scenario = Scenario::from_json(json)?;
        self.load_scenario(scenario);
        Ok(())
    }

    // --- Internals ---

    fn find_entity(&self, id: RegimentId) -> Option<hecs::Entity> {
        self.world
            .query::<&Regiment>()
            .iter()
            .find(|(_, r)| r.id == id)
            .map(|(entity, _)| entity)
    }

    fn refresh_allowance(&mut self) {
        let troops = world_setup::total_troops(&self.world);
        self.supplies.update_allowance(troops);
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
            PlayerCommand::SetTimeScale { scale } => match clamp_time_scale(scale) {
                Some(scale) => self.time_scale = scale,
                None => tracing::warn!(scale, "Ignoring non-numeric time scale"),
            },
            PlayerCommand::Move { regiment, target } => {
                self.order_regiment(regiment, "move", |r, _| r.set_target(target));
            }
            PlayerCommand::DigIn { regiment } => {
                self.order_regiment(regiment, "dig in", |r, _| r.dig_in());
            }
            PlayerCommand::HoldLine {
                regiment,
                start,
                end,
            } => {
                self.order_regiment(regiment, "hold line", |r, _| r.set_hold_line(start, end));
            }
            PlayerCommand::Retreat { regiment } => {
                self.order_regiment(regiment, "retreat", |r, supplies| {
                    let rally = supplies.first_depot(r.player).map(|depot| {
                        Position::new(
                            depot.position.x + MANUAL_RETREAT_DEPOT_OFFSET,
                            depot.position.y,
                        )
                    });
                    r.order_retreat(rally)
                });
            }
        }
    }

    /// Apply an order to a player-controlled regiment. Regiments of the
    /// controller's side, unknown ids, and state rejections are logged and skipped.
    fn order_regiment(
        &mut self,
        id: RegimentId,
        name: &str,
        order: impl FnOnce(&mut Regiment, &SupplyNetwork) -> bool,
    ) {
        let controlled = self.controller.as_ref().map(|c| c.player);
        let supplies = &self.supplies;

        let Some((_, regiment)) = self
            .world
            .query_mut::<&mut Regiment>()
            .into_iter()
            .find(|(_, r)| r.id == id)
        else {
            tracing::warn!(%id, order = name, "Command for unknown regiment");
            return;
        };

        if controlled == Some(regiment.player) {
            tracing::warn!(%id, order = name, "Command for a controller-owned regiment rejected");
            return;
        }
        if !order(regiment, supplies) {
            tracing::warn!(%id, order = name, "Command rejected in current state");
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f64) {
        let terrain = self.map.as_ref().map(|m| &m.map as &dyn TerrainQuery);

        // 1. Rations and resupply
        systems::supply::run(&mut self.world, &self.supplies, dt);
        // 2. Movement
        systems::movement::run(&mut self.world, terrain, dt);
        // 3. Range detection
        systems::combat::detect(&self.world, &mut self.engagements);
        // 4. Damage resolution
        systems::combat::resolve(&mut self.world, &self.engagements, &mut self.rng, dt);
        // 5. Morale
        systems::morale::run(&mut self.world, &self.engagements, dt);
        // 6. Retreat / scatter
        systems::rout::run(&mut self.world, &mut self.rng, &mut self.events);
        // 7. Opposing force
        if let Some(controller) = self.controller.as_mut() {
            let ctx = OpforContext {
                supplies: &self.supplies,
                terrain,
                engagements: &self.engagements,
            };
            systems::opposing_force::run(
                &mut self.world,
                controller,
                &ctx,
                &mut self.rng,
                dt,
                &mut self.events,
            );
        }
    }
}

/// Clamp a requested time scale to `[0, MAX_TIME_SCALE]`. `None` for NaN.
pub fn clamp_time_scale(scale: f64) -> Option<f64> {
    if scale.is_nan() {
        None
    } else {
        Some(scale.clamp(0.0, MAX_TIME_SCALE))
    }
}
