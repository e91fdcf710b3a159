//! Terrain query surface for the skirmish simulation.
//!
//! Elevation lookup, map dimensions, and the read-only vector features
//! (isolines, waterways, foliage) an external generator produces.

pub use skirmish_core as core;

pub mod grid;
pub mod map;

// Re-export key types for convenience.
pub use grid::{Dimensions, FlatTerrain, TerrainGrid, TerrainQuery};
pub use map::{BrushData, BrushStroke, MapData};
