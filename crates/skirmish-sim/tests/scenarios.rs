use skirmish_core::commands::PlayerCommand;
use skirmish_core::enums::{Player, StrategicGoal, UnitKind};
use skirmish_core::regiment::RegimentId;
use skirmish_core::types::Position;
use skirmish_sim::persistence;
use skirmish_sim::{BattleEngine, Scenario, SimConfig};
use skirmish_terrain::{Dimensions, MapData, TerrainGrid, TerrainQuery};

const FIELD: Dimensions = Dimensions {
    width: 1200,
    height: 800,
};

fn run_for(engine: &mut BattleEngine, ticks: usize) {
    for _ in 0..ticks {
        engine.tick();
    }
}

fn quiet_engine() -> BattleEngine {
    BattleEngine::new(SimConfig {
        opfor: None,
        ..Default::default()
    })
}

#[test]
fn infantry_duel_wears_both_sides_down() {
    let mut engine = quiet_engine();
    let a = engine.add_regiment(UnitKind::Infantry, Player::One, Position::new(400.0, 400.0), 100);
    let b = engine.add_regiment(UnitKind::Infantry, Player::Two, Position::new(450.0, 400.0), 100);

    let mut last_strength = [100.0, 100.0];
    for _ in 0..15 {
        run_for(&mut engine, 30);
        for (slot, id) in [a, b].into_iter().enumerate() {
            let regiment = engine.regiment(id).unwrap();
            assert!(regiment.strength < last_strength[slot]);
            last_strength[slot] = regiment.strength;
        }
    }

    assert_eq!(engine.engaged_with(a), vec![b]);
    assert_eq!(engine.engaged_with(b), vec![a]);
    for id in [a, b] {
        let regiment = engine.regiment(id).unwrap();
        assert!(regiment.troops <= 100);
        assert!(!regiment.retreating && !regiment.scattered);
    }
    assert_eq!(engine.regiment_position(a), Some(Position::new(400.0, 400.0)));
}

#[test]
fn starving_regiment_loses_strength() {
    let mut engine = quiet_engine();
    let id = engine.add_regiment(UnitKind::Cavalry, Player::One, Position::new(600.0, 400.0), 50);
    engine.update_regiment(id, |r| r.food = 0.0);

    run_for(&mut engine, 300);

    let regiment = engine.regiment(id).unwrap();
    assert!((regiment.strength - 80.0).abs() < 1e-6);
    assert!(regiment.morale < 100.0);
    assert_eq!(regiment.food, 0.0);
}

#[test]
fn stronger_controller_attacks() {
    let mut engine = BattleEngine::new(SimConfig::default());
    engine.add_regiment(UnitKind::Infantry, Player::One, Position::new(200.0, 400.0), 100);
    engine.add_regiment(UnitKind::Infantry, Player::Two, Position::new(1000.0, 350.0), 100);
    engine.add_regiment(UnitKind::Infantry, Player::Two, Position::new(1000.0, 450.0), 100);

    run_for(&mut engine, 40);

    let assessment = engine.assessment().unwrap();
    assert_eq!(assessment.player, Player::Two);
    assert!(assessment.has_goal(StrategicGoal::Attack));
    assert!((assessment.own_strength - 2.0 * assessment.enemy_strength).abs() < 1.0);

    // Both attackers advance toward the enemy line.
    for id in [RegimentId(2), RegimentId(3)] {
        assert!(engine.regiment_position(id).unwrap().x < 1000.0);
    }
}

#[test]
fn weaker_controller_defends() {
    let mut engine = BattleEngine::new(SimConfig::default());
    engine.add_regiment(UnitKind::Infantry, Player::One, Position::new(200.0, 350.0), 100);
    engine.add_regiment(UnitKind::Infantry, Player::One, Position::new(200.0, 450.0), 100);
    let lone = engine.add_regiment(UnitKind::Infantry, Player::Two, Position::new(1000.0, 400.0), 100);

    run_for(&mut engine, 40);

    let assessment = engine.assessment().unwrap();
    assert!(assessment.has_goal(StrategicGoal::Defend));
    assert!(!assessment.has_goal(StrategicGoal::Attack));
    // Far from the enemy with no map: stand to in place.
    assert_eq!(engine.regiment_position(lone), Some(Position::new(1000.0, 400.0)));
}

#[test]
fn scenario_round_trips_through_disk() {
    let dir = std::env::temp_dir().join("skirmish_scenario_roundtrip");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("opening.json");

    let mut original = BattleEngine::new(SimConfig::default());
    original.setup_default_scenario(FIELD);
    // Move a regiment so the saved state is not the stock layout.
    original.queue_command(PlayerCommand::Move {
        regiment: RegimentId(1),
        target: Position::new(400.0, 320.0),
    });
    run_for(&mut original, 20);
    original.save_scenario_file(&path).unwrap();

    let mut restored = BattleEngine::new(SimConfig::default());
    restored.load_scenario_file(&path).unwrap();

    assert_eq!(restored.scenario(), original.scenario());
    assert_eq!(
        restored.supplies().supply_lines,
        original.supplies().supply_lines
    );
    assert_eq!(
        restored.supplies().total_allowed_length,
        original.supplies().total_allowed_length
    );

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn scenario_json_is_plain_document() {
    let mut engine = quiet_engine();
    engine.setup_default_scenario(FIELD);
    let json = engine.scenario().to_json().unwrap();

    let doc: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(doc["regiments"].as_array().unwrap().len(), 10);
    assert_eq!(doc["supplies"]["depots"].as_array().unwrap().len(), 2);

    let parsed = Scenario::from_json(&json).unwrap();
    assert_eq!(parsed, engine.scenario());
}

#[test]
fn map_document_drives_terrain() {
    let dir = std::env::temp_dir().join("skirmish_map_roundtrip");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("hills.json");

    let map = MapData {
        brush_data: Default::default(),
        map: TerrainGrid::from_fn(200, 200, |x, y| ((x + y) / 40) as f32),
    };
    persistence::save_map(&path, &map).unwrap();

    let mut engine = quiet_engine();
    engine.set_map(persistence::load_map(&path).unwrap());
    let terrain = engine.terrain().unwrap();
    assert_eq!(terrain.elevation_at(100.0, 100.0), 5.0);
    assert_eq!(terrain.elevation_at(-5.0, 100.0), 0.0);
    assert_eq!(terrain.dimensions(), map.map.dimensions);

    engine.clear_map();
    assert!(engine.terrain().is_none());

    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn default_battle_runs_a_minute() {
    let mut engine = BattleEngine::new(SimConfig {
        seed: 9,
        ..Default::default()
    });
    engine.setup_default_scenario(FIELD);
    engine.queue_commands((1..=3).map(|id| PlayerCommand::Move {
        regiment: RegimentId(id),
        target: Position::new(900.0, 320.0 + 80.0 * (id - 1) as f64),
    }));

    let mut snapshot = engine.tick();
    for _ in 1..1800 {
        snapshot = engine.tick();
    }

    assert!((snapshot.time.elapsed_secs - 60.0).abs() < 1e-6);
    assert_eq!(snapshot.time.tick, 1800);
    assert_eq!(snapshot.regiments.len(), 10);
    assert!(snapshot.assessment.is_some());
}
