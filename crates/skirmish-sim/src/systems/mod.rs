//! ECS systems that operate on the battle world each tick.
//!
//! Systems are free functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components or is passed in by the engine.

pub mod combat;
pub mod morale;
pub mod movement;
pub mod opposing_force;
pub mod rout;
pub mod snapshot;
pub mod supply;
