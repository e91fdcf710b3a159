//! Map document: editor brush strokes plus the terrain generated from them.

use serde::{Deserialize, Serialize};

use skirmish_core::types::Position;

use crate::grid::TerrainGrid;

/// One freehand stroke painted in the map editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrushStroke {
    pub points: Vec<Position>,
    pub size: f64,
    #[serde(default)]
    pub density: f64,
}

/// Strokes per brush layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BrushData {
    pub elevation: Vec<BrushStroke>,
    pub water: Vec<BrushStroke>,
    pub foliage: Vec<BrushStroke>,
}

impl BrushData {
    pub fn is_empty(&self) -> bool {
        self.elevation.is_empty() && self.water.is_empty() && self.foliage.is_empty()
    }
}

/// Saved map: `{ brush_data, map }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    #[serde(default)]
    pub brush_data: BrushData,
    pub map: TerrainGrid,
}
