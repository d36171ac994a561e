#![no_main]

//! Engine operation fuzzer.
//!
//! Drives one engine with an arbitrary sequence of public operations,
//! including out-of-turn moves, bogus piece ids, passes with moves available,
//! and resets. Every call must either succeed or fail without touching the
//! state, and the state must satisfy the invariants after every call.

use arbitrary::Arbitrary;
use ludo::game::{ActivePlayers, Color, TURN_ORDER, check_invariants};
use ludo::{LudoEngine, ScriptedDice};
use libfuzzer_sys::fuzz_target;

/// A fuzzer-generated engine call.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum Op {
    /// Queue a face and roll it.
    Roll(u8),
    /// Move a piece for a seat.
    Move { seat: u8, piece: u8 },
    /// Move the first legal piece for the player on turn.
    MoveFirstLegal,
    /// Pass the turn.
    Pass,
    /// End the current roll.
    Advance,
    /// Restart with a seat mask.
    Reset(u8),
}

/// Structured input for engine fuzzing.
#[derive(Arbitrary, Debug)]
struct EngineInput {
    /// Seat mask for the starting players.
    seats: u8,
    /// Operations to apply.
    ops: Vec<Op>,
}

fn players_from_mask(mask: u8) -> Vec<Color> {
    TURN_ORDER
        .iter()
        .copied()
        .filter(|c| mask & (1 << c.index()) != 0)
        .collect()
}

fuzz_target!(|input: EngineInput| {
    let Ok(players) = ActivePlayers::new(&players_from_mask(input.seats)) else {
        return;
    };
    let mut engine = LudoEngine::with_dice(players, ScriptedDice::default());

    for op in input.ops.into_iter().take(2000) {
        let before = engine.snapshot();
        let changed = match op {
            Op::Roll(face) => {
                engine.dice_mut().push(face % 6 + 1);
                engine.roll_dice().is_some()
            }
            Op::Move { seat, piece } => {
                let Some(color) = Color::from_index(usize::from(seat % 4)) else {
                    continue;
                };
                engine.move_piece(color, piece % 6).is_ok()
            }
            Op::MoveFirstLegal => {
                let player = engine.current_player();
                match engine.legal_moves(player).first() {
                    Some(&piece) => {
                        assert!(engine.move_piece(player, piece).is_ok());
                        true
                    }
                    None => false,
                }
            }
            Op::Pass => engine.pass_turn().is_ok(),
            Op::Advance => {
                engine.advance_turn();
                true
            }
            Op::Reset(mask) => engine.reset(Some(&players_from_mask(mask))).is_ok(),
        };

        if !changed {
            assert_eq!(engine.state(), &before, "failed {op:?} mutated state");
        }
        let violations = check_invariants(engine.state());
        assert!(violations.is_empty(), "after {op:?}: {violations:?}");
    }
});
