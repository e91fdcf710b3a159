//! Fundamental geometric and simulation types.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// 2D position on the battlefield (map units).
/// x grows east, y grows south (screen convention of the map).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// 2D velocity (map units per second).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity {
    pub x: f64,
    pub y: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks actually simulated (paused frames do not count).
    pub tick: u64,
    /// Elapsed scaled simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn as_vec(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    /// Euclidean distance to another position.
    pub fn distance_to(&self, other: &Position) -> f64 {
        (other.as_vec() - self.as_vec()).length()
    }

    /// Angle of the vector from `self` to `other` (radians, atan2 convention).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let dy = other.y - self.y;
        let dx = other.x - self.x;
        dy.atan2(dx)
    }

    /// Unit vector pointing from `self` toward `other`, or zero when coincident.
    pub fn direction_to(&self, other: &Position) -> DVec2 {
        (other.as_vec() - self.as_vec()).normalize_or_zero()
    }

    /// Position displaced by `dir * distance`.
    pub fn offset(&self, dir: DVec2, distance: f64) -> Position {
        (self.as_vec() + dir * distance).into()
    }

    /// Midpoint between two positions.
    pub fn midpoint(&self, other: &Position) -> Position {
        ((self.as_vec() + other.as_vec()) * 0.5).into()
    }
}

impl From<DVec2> for Position {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl Velocity {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Speed magnitude (units/s).
    pub fn speed(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl From<DVec2> for Velocity {
    fn from(v: DVec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl SimTime {
    /// Advance by one simulated step of `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Smallest absolute difference between two angles, in [0, PI].
pub fn angle_between(a: f64, b: f64) -> f64 {
    let diff = (a - b).rem_euclid(std::f64::consts::TAU);
    if diff > std::f64::consts::PI {
        std::f64::consts::TAU - diff
    } else {
        diff
    }
}
