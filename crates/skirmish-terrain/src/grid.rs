//! TerrainGrid: read-only heightfield with elevation queries.

use serde::{Deserialize, Serialize};

use skirmish_core::types::Position;

/// Map extent in map units (one unit per elevation cell).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    /// Whether a point lies on the map (`[0, width) x [0, height)`).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && y >= 0.0 && x < self.width as f64 && y < self.height as f64
    }
}

/// The terrain surface the simulation is allowed to see.
///
/// Out-of-bounds or missing data reads as elevation 0.
pub trait TerrainQuery {
    fn elevation_at(&self, x: f64, y: f64) -> f64;
    fn dimensions(&self) -> Dimensions;
}

/// Contour line at an integer elevation level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Isoline {
    pub elevation: i32,
    pub points: Vec<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterwayKind {
    River,
    Lake,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waterway {
    #[serde(rename = "type")]
    pub kind: WaterwayKind,
    pub points: Vec<Position>,
    #[serde(default)]
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Foliage {
    pub density: f64,
    /// Closed outline of the wood.
    pub shape: Vec<Position>,
}

/// Generated terrain: elevation grid plus vector features for drawing.
///
/// Produced by an external generator; the simulation only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TerrainGrid {
    pub dimensions: Dimensions,
    /// Elevation values 0–10, row-major (y * width + x).
    pub elevation_data: Vec<f32>,
    #[serde(default)]
    pub isolines: Vec<Isoline>,
    #[serde(default)]
    pub waterways: Vec<Waterway>,
    #[serde(default)]
    pub foliage: Vec<Foliage>,
}

impl TerrainGrid {
    /// Wrap a raw heightfield. Short data reads as 0 past its end.
    pub fn new(width: u32, height: u32, elevation_data: Vec<f32>) -> Self {
        Self {
            dimensions: Dimensions { width, height },
            elevation_data,
            isolines: Vec::new(),
            waterways: Vec::new(),
            foliage: Vec::new(),
        }
    }

    /// A level plain of the given size.
    pub fn flat(width: u32, height: u32) -> Self {
        Self::new(width, height, vec![0.0; width as usize * height as usize])
    }

    /// Build a grid by sampling `f(x, y)` at every cell.
    pub fn from_fn(width: u32, height: u32, f: impl Fn(u32, u32) -> f32) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::new(width, height, data)
    }

    /// Raw cell lookup; missing cells read as 0.
    fn cell(&self, col: usize, row: usize) -> f64 {
        let idx = row * self.dimensions.width as usize + col;
        self.elevation_data
            .get(idx)
            .copied()
            .filter(|e| e.is_finite())
            .unwrap_or(0.0) as f64
    }
}

impl TerrainQuery for TerrainGrid {
    fn elevation_at(&self, x: f64, y: f64) -> f64 {
        if !self.dimensions.contains(x, y) {
            return 0.0;
        }
        self.cell(x.floor() as usize, y.floor() as usize)
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}

/// Terrain with no relief: every query reads 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatTerrain {
    pub dimensions: Dimensions,
}

impl TerrainQuery for FlatTerrain {
    fn elevation_at(&self, _x: f64, _y: f64) -> f64 {
        0.0
    }

    fn dimensions(&self) -> Dimensions {
        self.dimensions
    }
}
