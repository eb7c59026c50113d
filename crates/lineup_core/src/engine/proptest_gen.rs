//! Property tests over random action sequences.

use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

use crate::config::RulesConfig;
use crate::engine::test_fixtures::*;
use crate::engine::*;
use crate::models::{FormationId, MatchFormat, PairRoleRotation, PositionKey, TeamConfig};

/// Action template; ids and keys are resolved against the current snapshot.
#[derive(Debug, Clone)]
enum Step {
    Substitution,
    PositionSwitch(usize, usize),
    GoalieSwitch(usize),
    ToggleInactive(usize),
    PairSwap(bool),
    NextOff(usize),
    NextOn(usize),
    Pause,
    Resume,
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => Just(Step::Substitution),
        1 => (0..6usize, 0..6usize).prop_map(|(a, b)| Step::PositionSwitch(a, b)),
        1 => (0..15usize).prop_map(Step::GoalieSwitch),
        1 => (0..15usize).prop_map(Step::ToggleInactive),
        1 => any::<bool>().prop_map(Step::PairSwap),
        1 => (0..15usize).prop_map(Step::NextOff),
        1 => (0..15usize).prop_map(Step::NextOn),
        1 => Just(Step::Pause),
        1 => Just(Step::Resume),
    ]
}

fn config_strategy() -> impl Strategy<Value = TeamConfig> {
    prop_oneof![
        (5..=10usize)
            .prop_map(|n| TeamConfig::individual(MatchFormat::FiveVFive, n, FormationId::F22)),
        (5..=10usize)
            .prop_map(|n| TeamConfig::individual(MatchFormat::FiveVFive, n, FormationId::F121)),
        (7..=12usize)
            .prop_map(|n| TeamConfig::individual(MatchFormat::SevenVSeven, n, FormationId::F231)),
        Just(TeamConfig::pairs(PairRoleRotation::Swap)),
        Just(TeamConfig::pairs(PairRoleRotation::Keep)),
    ]
}

fn to_action(state: &GameState, step: &Step, now_ms: i64) -> GameAction {
    let ids: Vec<String> = state.all_players.keys().cloned().collect();
    let pick = |i: usize| ids[i % ids.len()].clone();
    let field: Vec<PositionKey> = state.layout().map(|l| l.field_positions).unwrap_or_default();
    let key = |i: usize| field[i % field.len()];

    match step {
        Step::Substitution => GameAction::Substitution { now_ms },
        Step::PositionSwitch(a, b) => {
            GameAction::PositionSwitch { position_a: key(*a), position_b: key(*b), now_ms }
        }
        Step::GoalieSwitch(i) => GameAction::GoalieSwitch { new_goalie_id: pick(*i), now_ms },
        Step::ToggleInactive(i) => GameAction::ToggleInactive { player_id: pick(*i), now_ms },
        Step::PairSwap(left) => GameAction::PairPositionSwap {
            pair_key: if *left { PositionKey::LeftPair } else { PositionKey::RightPair },
            now_ms,
        },
        Step::NextOff(i) => GameAction::SetNextToSubOut { player_id: pick(*i) },
        Step::NextOn(i) => GameAction::SetNextSubstitute { player_id: pick(*i) },
        Step::Pause => GameAction::PauseClock { now_ms },
        Step::Resume => GameAction::ResumeClock { now_ms },
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_random_play_keeps_invariants(
        config in config_strategy(),
        steps in prop::collection::vec((step_strategy(), 1..120u32), 1..60),
    ) {
        let start = GameState::from_setup(&setup_for(config), &RulesConfig::default()).unwrap();
        let outfield: BTreeSet<String> =
            start.rotation_queue.to_vec().into_iter().collect();
        let mut squad_ids: BTreeSet<String> = outfield.clone();
        squad_ids.insert(start.goalie().clone());

        let mut state = calculate_clock_resume(&start, 0).unwrap();
        let mut now_ms = 0i64;
        let mut running_secs = 0u64;
        let mut ever_inactive = HashSet::new();

        for (step, secs) in &steps {
            if !state.clock_paused {
                running_secs += u64::from(*secs);
            }
            now_ms += i64::from(*secs) * 1000;

            let action = to_action(&state, step, now_ms);
            match apply_action(&state, &action) {
                Ok(next) => {
                    if let GameAction::ToggleInactive { player_id, .. } = &action {
                        ever_inactive.insert(player_id.clone());
                    }
                    state = next;
                }
                Err(err) => prop_assert!(err.is_caller_fault(), "{err}"),
            }

            prop_assert!(state.validate().is_ok(), "{:?}", state.validate());

            // queue conservation: every non-goalie exactly once
            let mut expected = squad_ids.clone();
            expected.remove(state.goalie());
            let queued: Vec<String> = state.rotation_queue.to_vec();
            prop_assert_eq!(queued.len(), expected.len());
            prop_assert_eq!(queued.into_iter().collect::<BTreeSet<_>>(), expected);
        }

        let done = calculate_clock_pause(&state, now_ms).unwrap();
        for player in done.all_players.values() {
            if ever_inactive.contains(&player.id) {
                continue;
            }
            let s = &player.stats;
            prop_assert_eq!(s.time_on_field_seconds + s.time_as_substitute_seconds, running_secs);
        }
    }

    #[test]
    fn test_full_rotation_restores_queue(squad_size in 6..=12usize, seven_a_side in any::<bool>()) {
        let config = if seven_a_side {
            TeamConfig::individual(MatchFormat::SevenVSeven, squad_size.max(8), FormationId::F222)
        } else {
            TeamConfig::individual(MatchFormat::FiveVFive, squad_size, FormationId::F22)
        };
        let start = GameState::from_setup(&setup_for(config), &RulesConfig::default()).unwrap();
        let cycle = start.rotation_queue.len();

        let mut state = start.clone();
        let mut subbed_out = BTreeSet::new();
        for _ in 0..cycle {
            let next_off = state.next_player_id_to_sub_out.clone().unwrap();
            prop_assert!(subbed_out.insert(next_off));
            state = calculate_substitution(&state, 0).unwrap();
        }
        prop_assert_eq!(state.rotation_queue, start.rotation_queue);
    }
}
