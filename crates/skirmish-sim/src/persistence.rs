//! Scenario and map documents: plain JSON dumps, no versioning.
//!
//! Every failure to read or parse a document surfaces as
//! `SkirmishError::LoadFailed` with the underlying message.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use skirmish_core::regiment::Regiment;
use skirmish_core::supply::SupplyNetwork;
use skirmish_core::types::{Position, Velocity};
use skirmish_core::{Result, SkirmishError};
use skirmish_terrain::MapData;

/// One regiment with its placement, as stored on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimentRecord {
    pub position: Position,
    #[serde(default)]
    pub velocity: Velocity,
    #[serde(flatten)]
    pub regiment: Regiment,
}

/// Saved scenario: `{ regiments, supplies }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub regiments: Vec<RegimentRecord>,
    #[serde(default)]
    pub supplies: SupplyNetwork,
}

impl Scenario {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| SkirmishError::LoadFailed(format!("invalid scenario document: {e}")))
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        write_document(path, &self.to_json()?)?;
        tracing::info!(
            path = %path.display(),
            regiments = self.regiments.len(),
            "Scenario saved"
        );
        Ok(())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let scenario = Self::from_json(&read_document(path)?)?;
        tracing::info!(
            path = %path.display(),
            regiments = scenario.regiments.len(),
            "Scenario loaded"
        );
        Ok(scenario)
    }
}

pub fn map_to_json(map: &MapData) -> Result<String> {
    Ok(serde_json::to_string_pretty(map)?)
}

pub fn map_from_json(json: &str) -> Result<MapData> {
    serde_json::from_str(json)
        .map_err(|e| SkirmishError::LoadFailed(format!("invalid map document: {e}")))
}

pub fn save_map(path: &Path, map: &MapData) -> Result<()> {
    write_document(path, &map_to_json(map)?)
}

pub fn load_map(path: &Path) -> Result<MapData> {
    let map = map_from_json(&read_document(path)?)?;
    tracing::info!(
        path = %path.display(),
        width = map.map.dimensions.width,
        height = map.map.dimensions.height,
        "Map loaded"
    );
    Ok(map)
}

fn write_document(path: &Path, json: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, json)?;
    Ok(())
}

fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Failed to read document");
        SkirmishError::LoadFailed(format!("cannot read {}: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use skirmish_core::enums::{Player, UnitKind};
    use skirmish_core::regiment::RegimentId;
    use skirmish_terrain::TerrainGrid;

    fn make_scenario() -> Scenario {
        let mut supplies = SupplyNetwork::new();
        supplies.add_depot(Position::new(50.0, 400.0), Player::One, 10.0, 10.0);
        supplies.add_camp(Position::new(150.0, 400.0), Player::One);

        let mut regiment = Regiment::new(RegimentId(7), UnitKind::Cavalry, Player::One, 50);
        regiment.morale = 42.5;
        regiment.target = Some(Position::new(300.0, 300.0));

        Scenario {
            regiments: vec![RegimentRecord {
                position: Position::new(180.0, 250.0),
                velocity: Velocity::zero(),
                regiment,
            }],
            supplies,
        }
    }

    #[test]
    fn scenario_json_roundtrip() {
        let scenario = make_scenario();
        let json = scenario.to_json().unwrap();
        let restored = Scenario::from_json(&json).unwrap();
        assert_eq!(restored, scenario);
    }

    #[test]
    fn regiment_fields_are_flattened() {
        let json = make_scenario().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let first = &value["regiments"][0];
        assert_eq!(first["kind"], "cavalry");
        assert_eq!(first["player"], 1);
        assert_eq!(first["position"]["x"], 180.0);
    }

    #[test]
    fn malformed_scenario_is_load_failed() {
        let err = Scenario::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SkirmishError::LoadFailed(_)));

        let err = Scenario::from_json(r#"{ "regiments": 3 }"#).unwrap_err();
        assert!(err.to_string().starts_with("load failed"));
    }

    #[test]
    fn missing_file_is_load_failed() {
        let path = std::env::temp_dir().join("skirmish_test_missing/nope.json");
        let err = Scenario::load_from_file(&path).unwrap_err();
        assert!(matches!(err, SkirmishError::LoadFailed(_)));
    }

    #[test]
    fn save_and_load_file() {
        let dir = std::env::temp_dir().join("skirmish_test_save_load");
        let _ = fs::remove_dir_all(&dir);

        let path = dir.join("battle.json");
        let scenario = make_scenario();
        scenario.save_to_file(&path).unwrap();
        let loaded = Scenario::load_from_file(&path).unwrap();
        assert_eq!(loaded, scenario);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn map_document_roundtrip() {
        let dir = std::env::temp_dir().join("skirmish_test_map");
        let _ = fs::remove_dir_all(&dir);

        let map = MapData {
            brush_data: Default::default(),
            map: TerrainGrid::from_fn(4, 3, |x, y| (x + y) as f32),
        };
        let path = dir.join("map.json");
        save_map(&path, &map).unwrap();
        assert_eq!(load_map(&path).unwrap(), map);

        assert!(matches!(
            map_from_json("[]").unwrap_err(),
            SkirmishError::LoadFailed(_)
        ));

        let _ = fs::remove_dir_all(&dir);
    }
}
