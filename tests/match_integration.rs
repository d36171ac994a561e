//! Full-match integration tests: many seeded bot matches, determinism,
//! and recording round trips.
//!
//! Run with: cargo test --release match_integration

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use ludo::game::{ActivePlayers, Color, check_invariants};
use ludo::match_runner::{MatchConfig, MatchRunner, TurnAction, run_match};
use ludo::replay::{Recording, ReplayEngine};
use ludo::{BotConfig, MoveAction};
use tempfile::tempdir;

fn config(players: &[Color]) -> MatchConfig {
    MatchConfig {
        players: ActivePlayers::new(players).unwrap(),
        ..MatchConfig::default()
    }
}

#[test]
fn test_many_seeds_finish_cleanly() {
    let setups: [&[Color]; 3] = [
        &[Color::Red, Color::Green],
        &[Color::Green, Color::Yellow, Color::Blue],
        &[Color::Red, Color::Green, Color::Yellow, Color::Blue],
    ];
    for players in setups {
        let config = config(players);
        for seed in 0..50 {
            let result = run_match(seed, &config).unwrap();
            let winner = result.winner.unwrap_or_else(|| panic!("seed {seed} hit the turn cap"));
            assert!(config.players.contains(winner));
            assert!(check_invariants(&result.final_state).is_empty());

            let wins = result
                .events
                .iter()
                .filter(|e| matches!(e.action, TurnAction::Moved(o) if o.action == MoveAction::Win))
                .count();
            assert_eq!(wins, 1, "seed {seed}");
            assert_eq!(result.events.last().map(|e| e.player), Some(winner));
        }
    }
}

#[test]
fn test_events_respect_turn_rules() {
    let result = run_match(99, &config(&[Color::Red, Color::Blue])).unwrap();
    for pair in result.events.windows(2) {
        let (prev, next) = (&pair[0], &pair[1]);
        assert_eq!(next.turn, prev.turn + 1);

        let keeps_turn = matches!(prev.action, TurnAction::Moved(o) if o.extra_turn);
        if keeps_turn {
            assert_eq!(next.player, prev.player, "turn {}", next.turn);
        } else {
            assert_ne!(next.player, prev.player, "turn {}", next.turn);
        }
    }
}

#[test]
fn test_bot_jitter_changes_play_not_rules() {
    let calm = MatchConfig {
        bot: BotConfig { jitter: 0.0 },
        ..MatchConfig::default()
    };
    for seed in 0..10 {
        let result = run_match(seed, &calm).unwrap();
        assert!(result.winner.is_some());
        assert_eq!(run_match(seed, &calm).unwrap(), result);
    }
}

#[test]
fn test_replay_reproduces_match() {
    let config = config(&[Color::Yellow, Color::Blue]);
    let seed = 2024;
    let result = run_match(seed, &config).unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("match.json");
    Recording::new(seed, config).save(&path).unwrap();
    let recording = Recording::load(&path).unwrap();

    let mut replay = ReplayEngine::new(recording).unwrap();
    for expected in &result.events {
        let event = replay.step_forward().unwrap();
        assert_eq!(&event, expected);
    }
    assert!(replay.is_game_over());
    assert_eq!(replay.state(), &result.final_state);

    let middle = result.turns_played / 2;
    replay.goto_turn(middle).unwrap();
    assert_eq!(replay.turn(), middle);
    assert_eq!(replay.last_event(), result.events.get(middle as usize - 1));
}

#[test]
fn test_runner_state_matches_replay_at_every_turn() {
    let config = config(&[Color::Red, Color::Green, Color::Yellow]);
    let mut runner = MatchRunner::new(5, &config).unwrap();
    for _ in 0..40 {
        runner.step().unwrap();
    }
    let replay = ReplayEngine::new_at_turn(Recording::new(5, config), 40).unwrap();
    assert_eq!(replay.state(), runner.state());
}
