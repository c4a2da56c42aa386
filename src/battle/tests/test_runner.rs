#[cfg(test)]
mod tests {
    use crate::battle::ai::{FirstMoveAI, HeuristicAI};
    use crate::battle::engine::BattleEngine;
    use crate::battle::rng::SeededRng;
    use crate::battle::runner::BattleRunner;
    use crate::battle::state::{BattleEvent, BattleOutcome, BattlePhase, Side};
    use crate::battle::tests::common::{assert_ok, create_test_battle, create_test_roster, TestCombatantBuilder};
    use crate::combatant::StatusCondition;
    use crate::dex::Dex;
    use crate::errors::{BattleEngineError, StateError};
    use crate::prefab_teams::{get_prefab_team, OPPONENT_TEAM_ID, PLAYER_TEAM_ID};
    use crate::roster::BattleFormat;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn lopsided_battle() -> BattleEngine {
        let strong = (0..6)
            .map(|i| {
                TestCombatantBuilder::new(&format!("brute{}", i))
                    .with_stats(100, 250, 100, 100, 100, 200)
                    .build()
            })
            .collect();
        create_test_battle(
            create_test_roster("A", BattleFormat::Single, strong),
            create_test_roster("B", BattleFormat::Single, vec![]),
        )
    }

    fn turn_starts(events: &[BattleEvent]) -> usize {
        events
            .iter()
            .filter(|e| matches!(e, BattleEvent::TurnStarted { .. }))
            .count()
    }

    #[test]
    fn test_stronger_side_wins() {
        let mut runner = BattleRunner::new(lopsided_battle(), Box::new(FirstMoveAI), Box::new(FirstMoveAI));
        let mut rng = SeededRng::new(11);

        let summary = assert_ok(runner.run(&mut rng));

        assert_eq!(summary.outcome, Some(BattleOutcome::Winner(Side::A)));
        assert!(runner.is_battle_ended());
        assert_eq!(runner.engine().winner(), Ok(Some(Side::A)));
        assert!(runner.engine().roster(Side::B).is_defeated());
        assert_eq!(turn_starts(runner.events().events()), summary.turns as usize);
        assert_eq!(
            runner.events().events().last(),
            Some(&BattleEvent::BattleEnded {
                outcome: BattleOutcome::Winner(Side::A)
            })
        );
    }

    #[test]
    fn test_step_after_end_is_rejected() {
        let mut runner = BattleRunner::new(lopsided_battle(), Box::new(FirstMoveAI), Box::new(FirstMoveAI));
        let mut rng = SeededRng::new(3);
        assert_ok(runner.run(&mut rng));

        let err = runner.step(&mut rng).unwrap_err();
        assert!(matches!(err, BattleEngineError::State(StateError::BattleAlreadyOver)));
    }

    #[test]
    fn test_turn_limit_stops_run() {
        let engine = create_test_battle(
            create_test_roster("A", BattleFormat::Single, vec![]),
            create_test_roster("B", BattleFormat::Single, vec![]),
        );
        let mut runner =
            BattleRunner::new(engine, Box::new(HeuristicAI::new()), Box::new(HeuristicAI::new())).with_max_turns(2);

        let summary = assert_ok(runner.run(&mut SeededRng::new(5)));

        assert_eq!(summary.outcome, None);
        assert_eq!(summary.turns, 2);
        assert!(!runner.is_battle_ended());
    }

    #[test]
    fn test_step_reports_turn() {
        let mut runner = BattleRunner::new(lopsided_battle(), Box::new(FirstMoveAI), Box::new(FirstMoveAI));

        let result = assert_ok(runner.step(&mut SeededRng::new(1)));

        assert_eq!(result.events.first(), Some(&BattleEvent::TurnStarted { turn_number: 1 }));
        assert!(!result.battle_ended);
        assert_eq!(result.winner, None);
        assert_eq!(result.phase, runner.engine().phase().clone());
        assert_eq!(runner.events().len(), result.events.len());
    }

    #[test]
    fn test_battle_info_snapshot() {
        let runner = BattleRunner::new(lopsided_battle(), Box::new(FirstMoveAI), Box::new(FirstMoveAI));

        let info = runner.battle_info();

        assert_eq!(info.turn_number, 0);
        assert_eq!(info.phase, BattlePhase::AwaitingActions);
        assert_eq!(info.sides.len(), 2);
        let a = &info.sides[0];
        assert_eq!(a.side, Side::A);
        assert_eq!(a.name, "A");
        assert_eq!(a.team.len(), 6);
        assert_eq!(a.fainted_count, 0);
        assert_eq!(a.active.len(), 1);
        assert_eq!(a.active[0].as_ref().map(|c| c.name.as_str()), Some("brute0"));
        assert_eq!(info.sides[1].active[0].as_ref().map(|c| c.current_hp), Some(160));
    }

    #[test]
    fn test_battle_info_reports_status_conditions() {
        let engine = create_test_battle(
            create_test_roster(
                "A",
                BattleFormat::Single,
                vec![
                    TestCombatantBuilder::new("scorched").with_status(StatusCondition::Burn).build(),
                    TestCombatantBuilder::new("drowsy")
                        .with_status(StatusCondition::Sleep)
                        .with_hp(80)
                        .build(),
                ],
            ),
            create_test_roster("B", BattleFormat::Single, vec![]),
        );
        let runner = BattleRunner::new(engine, Box::new(FirstMoveAI), Box::new(FirstMoveAI));

        let info = runner.battle_info();

        let a = &info.sides[0];
        assert_eq!(
            a.active[0].as_ref().map(|c| c.status),
            Some(Some(StatusCondition::Burn))
        );
        assert_eq!(a.team[1].name, "drowsy");
        assert_eq!(a.team[1].status, Some(StatusCondition::Sleep));
        assert_eq!(a.team[1].current_hp, 80);
        assert_eq!(a.team[2].status, None);
        assert_eq!(info.sides[1].active[0].as_ref().and_then(|c| c.status), None);
    }

    #[rstest]
    #[case(BattleFormat::Single, 1)]
    #[case(BattleFormat::Single, 42)]
    #[case(BattleFormat::Double, 7)]
    fn test_prefab_teams_battle_to_completion(#[case] format: BattleFormat, #[case] seed: u64) {
        let dex = assert_ok(Dex::builtin().map_err(Into::into));
        let mut rng = SeededRng::new(seed);
        let player = get_prefab_team(PLAYER_TEAM_ID).unwrap();
        let opponent = get_prefab_team(OPPONENT_TEAM_ID).unwrap();

        let engine = assert_ok(BattleEngine::new(
            assert_ok(player.build_roster(&dex, format, &mut rng)),
            assert_ok(opponent.build_roster(&dex, format, &mut rng)),
            dex.type_chart().clone(),
        )
        .map_err(Into::into));
        let mut runner = BattleRunner::new(engine, Box::new(HeuristicAI::new()), Box::new(HeuristicAI::new()));

        let summary = assert_ok(runner.run(&mut rng));

        match summary.outcome {
            Some(BattleOutcome::Winner(side)) => {
                assert!(runner.engine().roster(side.opponent()).is_defeated());
                assert!(!runner.engine().roster(side).is_defeated());
            }
            Some(BattleOutcome::Draw) => panic!("Draws need simultaneous defeat"),
            None => assert_eq!(summary.turns, crate::battle::runner::DEFAULT_MAX_TURNS),
        }
    }
}
