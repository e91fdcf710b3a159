//! Battle simulation engine for the skirmish game.
//!
//! Owns the hecs ECS world, runs the ordered tick systems (supply, movement,
//! combat, morale, rout, opposing force), persists scenarios, and produces
//! BattleSnapshots for renderers.

pub mod engagement;
pub mod engine;
pub mod persistence;
pub mod systems;
pub mod world_setup;

pub use skirmish_core as core;
pub use engine::{BattleEngine, SimConfig};
pub use persistence::{RegimentRecord, Scenario};
