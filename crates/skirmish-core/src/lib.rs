//! Core types and definitions for the skirmish battle simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! the regiment entity, supply network, commands, snapshots, events,
//! errors, and constants. It has no dependency on any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod regiment;
pub mod state;
pub mod supply;
pub mod types;

pub use error::{Result, SkirmishError};
pub use regiment::{Regiment, RegimentId};
