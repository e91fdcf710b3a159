#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use skirmish_core::enums::{Player, StrategicGoal, UnitKind};
    use skirmish_core::regiment::{Regiment, RegimentId};
    use skirmish_core::supply::SupplyNetwork;
    use skirmish_core::types::Position;
    use skirmish_terrain::{TerrainGrid, TerrainQuery};

    use crate::battlefield::{Battlefield, ForceUnit, TacticalOrder};
    use crate::controller::OpposingForceController;
    use crate::strategy::{assess, center_of_mass, choose_goals, force_strength, unit_strength};
    use crate::tactics::{decide, find_high_ground};

    /// Owns regiments so tests can borrow a `Battlefield` from them.
    #[derive(Default)]
    struct Fixture {
        regiments: Vec<(Position, Regiment, bool)>,
        supplies: SupplyNetwork,
    }

    impl Fixture {
        fn add(
            &mut self,
            kind: UnitKind,
            player: Player,
            troops: u32,
            x: f64,
            y: f64,
        ) -> &mut Regiment {
            let id = RegimentId(self.regiments.len() as u32 + 1);
            self.regiments
                .push((Position::new(x, y), Regiment::new(id, kind, player, troops), false));
            &mut self.regiments.last_mut().unwrap().1
        }

        fn engage_last(&mut self) {
            self.regiments.last_mut().unwrap().2 = true;
        }

        fn units(&self) -> Vec<ForceUnit<'_>> {
            self.regiments
                .iter()
                .map(|(position, regiment, engaged)| ForceUnit {
                    position: *position,
                    regiment,
                    engaged: *engaged,
                })
                .collect()
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn assert_near(p: Position, x: f64, y: f64) {
        assert!(
            (p.x - x).abs() < 1e-9 && (p.y - y).abs() < 1e-9,
            "expected ({x}, {y}), got ({}, {})",
            p.x,
            p.y
        );
    }

    /// Order for the first regiment in the fixture.
    fn order_for_first(f: &Fixture, goals: &[StrategicGoal]) -> Option<TacticalOrder> {
        let units = f.units();
        let field = Battlefield {
            units: &units,
            supplies: &f.supplies,
            terrain: None,
        };
        decide(&units[0], &field, goals, &mut rng())
    }

    // --- Strategy ---

    #[test]
    fn test_unit_strength_weights() {
        let inf = Regiment::new(RegimentId(1), UnitKind::Infantry, Player::One, 100);
        let cav = Regiment::new(RegimentId(2), UnitKind::Cavalry, Player::One, 100);
        let art = Regiment::new(RegimentId(3), UnitKind::Artillery, Player::One, 100);
        assert_eq!(unit_strength(&inf), 100.0);
        assert_eq!(unit_strength(&cav), 150.0);
        assert_eq!(unit_strength(&art), 200.0);

        let mut worn = inf.clone();
        worn.strength = 50.0;
        worn.morale = 50.0;
        assert_eq!(unit_strength(&worn), 25.0);
    }

    #[test]
    fn test_force_totals_over_borrowed_units() {
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 0.0, 0.0);
        f.add(UnitKind::Artillery, Player::Two, 50, 200.0, 100.0);
        let units = f.units();

        assert_eq!(force_strength(&units), 200.0);
        let none = units.iter().filter(|u| u.player() == Player::One);
        assert_eq!(force_strength(none), 0.0);
        assert_near(center_of_mass(&units), 100.0, 50.0);
        assert_near(center_of_mass(&units[..0]), 0.0, 0.0);
    }

    #[test]
    fn test_superior_force_attacks() {
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 200, 0.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 500.0, 0.0);
        let units = f.units();
        let field = Battlefield {
            units: &units,
            supplies: &f.supplies,
            terrain: None,
        };

        let assessment = assess(Player::Two, &field).unwrap();
        assert!(assessment.has_goal(StrategicGoal::Attack));
        assert_eq!(assessment.goals, vec![StrategicGoal::Attack, StrategicGoal::Flank]);
        assert_eq!(assessment.own_strength, 200.0);
        assert_eq!(assessment.enemy_strength, 100.0);
        assert_near(assessment.enemy_center, 500.0, 0.0);
    }

    #[test]
    fn test_inferior_force_defends() {
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 0.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 500.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 500.0, 100.0);
        let units = f.units();
        let field = Battlefield {
            units: &units,
            supplies: &f.supplies,
            terrain: None,
        };

        let assessment = assess(Player::Two, &field).unwrap();
        assert!(assessment.has_goal(StrategicGoal::Defend));
        assert!(!assessment.has_goal(StrategicGoal::Attack));
        assert_near(assessment.enemy_center, 500.0, 50.0);
    }

    #[test]
    fn test_even_force_probes() {
        assert_eq!(
            choose_goals(100.0, 100.0, 100.0, 100.0),
            vec![StrategicGoal::Probe, StrategicGoal::Hold]
        );
        // Thresholds are strict.
        assert_eq!(choose_goals(130.0, 100.0, 100.0, 100.0)[0], StrategicGoal::Probe);
        assert_eq!(choose_goals(70.0, 100.0, 100.0, 100.0)[0], StrategicGoal::Probe);
    }

    #[test]
    fn test_short_supplies_prepend_resupply() {
        let goals = choose_goals(300.0, 100.0, 20.0, 100.0);
        assert_eq!(
            goals,
            vec![StrategicGoal::Resupply, StrategicGoal::Attack, StrategicGoal::Flank]
        );
        let goals = choose_goals(100.0, 100.0, 100.0, 10.0);
        assert_eq!(goals[0], StrategicGoal::Resupply);
        assert!(goals.contains(&StrategicGoal::Probe));
    }

    #[test]
    fn test_assess_needs_both_sides() {
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 0.0, 0.0);
        let units = f.units();
        let field = Battlefield {
            units: &units,
            supplies: &f.supplies,
            terrain: None,
        };
        assert!(assess(Player::Two, &field).is_none());
    }

    // --- Battlefield view ---

    #[test]
    fn test_nearest_enemy_skips_scattered() {
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 0.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 50.0, 0.0).scattered = true;
        f.add(UnitKind::Infantry, Player::One, 100, 120.0, 0.0);
        f.add(UnitKind::Infantry, Player::Two, 100, 10.0, 0.0);
        let units = f.units();
        let field = Battlefield {
            units: &units,
            supplies: &f.supplies,
            terrain: None,
        };

        let (enemy, dist) = field.nearest_enemy(&units[0]).unwrap();
        assert_eq!(enemy.id(), RegimentId(3));
        assert_eq!(dist, 120.0);
    }

    // --- Artillery ---

    #[test]
    fn test_artillery_falls_back_when_too_close() {
        let mut f = Fixture::default();
        f.add(UnitKind::Artillery, Player::Two, 30, 100.0, 100.0);
        f.add(UnitKind::Infantry, Player::One, 100, 150.0, 100.0);
        match order_for_first(&f, &[StrategicGoal::Probe]) {
            Some(TacticalOrder::MoveTo(p)) => assert_near(p, 0.0, 100.0),
            other => panic!("expected fall back, got {other:?}"),
        }
    }

    #[test]
    fn test_artillery_advances_when_too_far() {
        let mut f = Fixture::default();
        f.add(UnitKind::Artillery, Player::Two, 30, 0.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 300.0, 0.0);
        match order_for_first(&f, &[StrategicGoal::Probe]) {
            Some(TacticalOrder::MoveTo(p)) => assert_near(p, 50.0, 0.0),
            other => panic!("expected advance, got {other:?}"),
        }
    }

    #[test]
    fn test_artillery_digs_in_behind_screen() {
        let mut f = Fixture::default();
        f.add(UnitKind::Artillery, Player::Two, 30, 0.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 200.0, 0.0);
        // No screen yet.
        assert_eq!(order_for_first(&f, &[StrategicGoal::Probe]), None);

        f.add(UnitKind::Infantry, Player::Two, 100, 40.0, 0.0);
        assert_eq!(
            order_for_first(&f, &[StrategicGoal::Probe]),
            Some(TacticalOrder::DigIn)
        );

        // Already entrenched: nothing to do.
        f.regiments[0].1.dug_in = true;
        assert_eq!(order_for_first(&f, &[StrategicGoal::Probe]), None);
    }

    // --- Cavalry ---

    #[test]
    fn test_cavalry_flanks_engaged_enemy() {
        let mut f = Fixture::default();
        f.add(UnitKind::Cavalry, Player::Two, 50, 0.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 100.0, 0.0);
        f.engage_last();
        match order_for_first(&f, &[StrategicGoal::Probe]) {
            Some(TacticalOrder::MoveTo(p)) => assert_near(p, 100.0, 100.0),
            other => panic!("expected flank, got {other:?}"),
        }
    }

    #[test]
    fn test_cavalry_charges_without_ammo() {
        let mut f = Fixture::default();
        f.add(UnitKind::Cavalry, Player::Two, 50, 0.0, 0.0).ammo = 10.0;
        f.add(UnitKind::Infantry, Player::One, 100, 200.0, 0.0);
        assert_eq!(
            order_for_first(&f, &[StrategicGoal::Probe]),
            Some(TacticalOrder::MoveTo(Position::new(200.0, 0.0)))
        );

        // Already in sabre reach.
        f.regiments[1].0 = Position::new(20.0, 0.0);
        assert_eq!(order_for_first(&f, &[StrategicGoal::Probe]), None);
    }

    #[test]
    fn test_cavalry_harasses_at_skirmish_range() {
        let mut f = Fixture::default();
        f.add(UnitKind::Cavalry, Player::Two, 50, 0.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 100.0, 0.0);
        match order_for_first(&f, &[StrategicGoal::Probe]) {
            Some(TacticalOrder::MoveTo(p)) => assert_near(p, 0.0, 30.0),
            other => panic!("expected harass, got {other:?}"),
        }

        // Busy riders keep their current order.
        f.regiments[0].1.target = Some(Position::new(-50.0, 0.0));
        assert_eq!(order_for_first(&f, &[StrategicGoal::Probe]), None);
    }

    // --- Infantry ---

    #[test]
    fn test_shaken_infantry_falls_back() {
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 0.0, 0.0).morale = 35.0;
        f.add(UnitKind::Infantry, Player::One, 100, 0.0, 100.0);
        match order_for_first(&f, &[StrategicGoal::Attack]) {
            Some(TacticalOrder::MoveTo(p)) => assert_near(p, 0.0, -50.0),
            other => panic!("expected fall back, got {other:?}"),
        }
    }

    #[test]
    fn test_infantry_attack_bands() {
        let goals = [StrategicGoal::Attack, StrategicGoal::Flank];
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 0.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 300.0, 0.0);
        assert_eq!(
            order_for_first(&f, &goals),
            Some(TacticalOrder::MoveTo(Position::new(60.0, 0.0)))
        );

        f.regiments[1].0 = Position::new(100.0, 0.0);
        assert_eq!(order_for_first(&f, &goals), Some(TacticalOrder::Halt));

        f.regiments[1].0 = Position::new(50.0, 0.0);
        assert_eq!(
            order_for_first(&f, &goals),
            Some(TacticalOrder::MoveTo(Position::new(50.0, 0.0)))
        );
    }

    #[test]
    fn test_defend_takes_precedence_over_attack() {
        let goals = [StrategicGoal::Resupply, StrategicGoal::Defend, StrategicGoal::Attack];
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 0.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 50.0, 0.0);
        assert_eq!(order_for_first(&f, &goals), Some(TacticalOrder::DigIn));
    }

    #[test]
    fn test_defend_bands_without_terrain() {
        let goals = [StrategicGoal::Defend, StrategicGoal::Regroup];
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 0.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 300.0, 0.0);
        assert_eq!(order_for_first(&f, &goals), Some(TacticalOrder::StandTo));

        f.regiments[1].0 = Position::new(150.0, 0.0);
        assert_eq!(order_for_first(&f, &goals), Some(TacticalOrder::DigIn));
        f.regiments[0].1.target = Some(Position::new(10.0, 0.0));
        assert_eq!(order_for_first(&f, &goals), None);
    }

    #[test]
    fn test_defend_seeks_high_ground() {
        let grid = TerrainGrid::from_fn(400, 400, |x, _| if x > 250 { 5.0 } else { 0.0 });
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 200.0, 200.0);
        f.add(UnitKind::Infantry, Player::One, 100, 200.0, -150.0);

        let units = f.units();
        let field = Battlefield {
            units: &units,
            supplies: &f.supplies,
            terrain: Some(&grid),
        };
        match decide(&units[0], &field, &[StrategicGoal::Defend], &mut rng()) {
            Some(TacticalOrder::MoveTo(p)) => assert_near(p, 300.0, 200.0),
            other => panic!("expected high ground, got {other:?}"),
        }
    }

    #[test]
    fn test_probe_bands() {
        let goals = [StrategicGoal::Probe, StrategicGoal::Hold];
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 0.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 0.0, 300.0);
        assert_eq!(
            order_for_first(&f, &goals),
            Some(TacticalOrder::MoveTo(Position::new(0.0, 40.0)))
        );

        f.regiments[1].0 = Position::new(0.0, 150.0);
        assert_eq!(order_for_first(&f, &goals), Some(TacticalOrder::DigIn));
        f.regiments[0].1.target = Some(Position::new(0.0, 20.0));
        assert_eq!(order_for_first(&f, &goals), None);

        // In range: fight in place regardless of orders.
        f.regiments[1].0 = Position::new(0.0, 60.0);
        assert_eq!(order_for_first(&f, &goals), Some(TacticalOrder::DigIn));
    }

    // --- Routed and retreating units ---

    #[test]
    fn test_scattered_units_get_no_orders() {
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 0.0, 0.0).scattered = true;
        f.add(UnitKind::Infantry, Player::One, 100, 50.0, 0.0);
        assert_eq!(order_for_first(&f, &[StrategicGoal::Attack]), None);
    }

    #[test]
    fn test_retreating_units_fall_back_to_supplies() {
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 0.0, 0.0).retreating = true;
        f.add(UnitKind::Infantry, Player::One, 100, 50.0, 0.0);
        // Nothing friendly to fall back to.
        assert_eq!(order_for_first(&f, &[StrategicGoal::Attack]), None);

        f.supplies.add_depot(Position::new(900.0, 0.0), Player::Two, 10.0, 10.0);
        f.supplies.add_camp(Position::new(-300.0, 0.0), Player::Two);
        f.supplies.add_camp(Position::new(0.0, -100.0), Player::One);
        match order_for_first(&f, &[StrategicGoal::Attack]) {
            Some(TacticalOrder::FallBackTo(p)) => {
                assert!((p.x + 300.0).abs() <= 25.0, "x jitter out of range: {}", p.x);
                assert!(p.y.abs() <= 25.0, "y jitter out of range: {}", p.y);
            }
            other => panic!("expected fall back, got {other:?}"),
        }
    }

    // --- High ground ---

    #[test]
    fn test_high_ground_none_on_flat_map() {
        let grid = TerrainGrid::flat(400, 400);
        assert_eq!(find_high_ground(&Position::new(200.0, 200.0), &grid), None);
    }

    #[test]
    fn test_high_ground_ignores_off_map_samples() {
        let grid = TerrainGrid::from_fn(200, 200, |_, _| 2.0);
        let best = find_high_ground(&Position::new(10.0, 10.0), &grid).unwrap();
        assert!(grid.dimensions().contains(best.x, best.y));
        // First in-bounds sample wins ties.
        assert_near(best, 110.0, 10.0);
    }

    // --- Controller cadence ---

    #[test]
    fn test_think_cadence() {
        let mut controller = OpposingForceController::new(Player::Two);
        assert!(!controller.update(0.5));
        assert!(controller.update(0.5));
        assert!(!controller.update(0.25));
        assert!(!controller.update(0.25));
        assert!(controller.update(0.5));
    }

    #[test]
    fn test_think_orders_own_side_only() {
        let mut f = Fixture::default();
        f.add(UnitKind::Infantry, Player::Two, 100, 0.0, 0.0);
        f.add(UnitKind::Infantry, Player::One, 100, 300.0, 0.0);
        let units = f.units();
        let field = Battlefield {
            units: &units,
            supplies: &f.supplies,
            terrain: None,
        };

        let mut controller = OpposingForceController::new(Player::Two);
        let mut rng = rng();
        let outcome = controller.think(&field, &mut rng);
        assert!(outcome.goals_changed);
        assert_eq!(outcome.orders.len(), 1);
        assert_eq!(outcome.orders[0].regiment, RegimentId(1));
        assert_eq!(
            outcome.orders[0].order,
            TacticalOrder::MoveTo(Position::new(40.0, 0.0))
        );
        assert_eq!(controller.goals(), &[StrategicGoal::Probe, StrategicGoal::Hold]);

        let again = controller.think(&field, &mut rng);
        assert!(!again.goals_changed);
        assert!(controller.assessment().is_some());
    }
}
