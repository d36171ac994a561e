//! Game layer.
//!
//! Implements the rules on one owned [`GameState`]:
//! - Board geometry (track, safe cells, home stretches)
//! - Turn scheduling and six streaks
//! - Move legality and resolution (release, advance, capture, finish, win)
//! - Invariant checks for tests and debug builds

mod board;
mod dice;
mod invariants;
mod piece;
mod player;
mod rules;
mod state;
mod turn;

pub use board::{
    HOME_POSITION, RELEASE_ROLL, SAFE_CELLS, STRETCH_ENTRY_DISTANCE, Square, TRACK_LEN,
    advance_on_track, distance_from_start, entry_cell, is_safe, start_cell,
};
pub use dice::{DIE_FACES, DiceRoll, DiceSource, MAX_CONSECUTIVE_SIXES, ScriptedDice, SeededDice};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use piece::{PIECES_PER_PLAYER, Piece, PieceId, PieceState};
pub use player::{ActivePlayers, Color, NUM_COLORS, TURN_ORDER};
pub use rules::{CapturedPiece, MoveAction, MoveOutcome};
pub use state::{GameState, TurnPhase};
