//! Opposing-force controller for the skirmish simulation.
//!
//! Strategic assessment of relative force strength, high-ground search,
//! and per-arm tactical behavior trees. Works on a read-only battlefield
//! view and returns orders; the engine applies them.

pub mod battlefield;
pub mod controller;
pub mod strategy;
pub mod tactics;

pub use skirmish_core as core;

pub use battlefield::{Battlefield, ForceUnit, IssuedOrder, TacticalOrder};
pub use controller::{OpposingForceController, ThinkOutcome};

#[cfg(test)]
mod tests;
