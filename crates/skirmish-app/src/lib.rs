//! Command-line front end for the skirmish simulation.
//!
//! Wires the battle engine to a 30Hz game loop (paced or batch) and
//! prints an end-of-run report.

pub mod game_loop;
pub mod report;
pub mod state;

pub use skirmish_core as core;
