//! Error type for the fallible edges of the system (persistence).
//!
//! The simulation itself never fails: gauges clamp and missing terrain
//! degrades to neutral defaults.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SkirmishError {
    #[error("load failed: {0}")]
    LoadFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SkirmishError>;
