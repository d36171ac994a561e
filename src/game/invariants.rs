//! Game invariants - sanity checks that detect bugs.
//!
//! These should NEVER trigger for a state reached through the engine's own
//! operations. If they do, it indicates a bug in the rules or a state that
//! was assembled by hand.

#![allow(clippy::cast_possible_wrap)]

use crate::game::{
    Color, GameState, HOME_POSITION, NUM_COLORS, PieceState, TRACK_LEN, TURN_ORDER,
};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let mut push = |message: String| violations.push(InvariantViolation { message });

    if state.active_players.len() < 2 {
        push(format!(
            "Active player set has {} players, need at least 2",
            state.active_players.len()
        ));
    }

    if usize::from(state.current_player_index) >= NUM_COLORS
        || !state
            .active_players
            .contains_index(usize::from(state.current_player_index))
    {
        push(format!(
            "Turn pointer {} is not on an active seat",
            state.current_player_index
        ));
    }

    if state.dice_value > 6 {
        push(format!("Dice value {} outside 0..=6", state.dice_value));
    }

    if state.consecutive_sixes >= 3 {
        push(format!(
            "Six streak {} should have forfeited the turn",
            state.consecutive_sixes
        ));
    }

    for color in TURN_ORDER {
        for (slot, piece) in state.pieces(color).iter().enumerate() {
            if usize::from(piece.id) != slot {
                push(format!("{color} piece in slot {slot} has id {}", piece.id));
            }

            if piece.position < -1 || piece.position >= TRACK_LEN as i8 {
                push(format!(
                    "{color} piece {} has track position {} outside -1..=51",
                    piece.id, piece.position
                ));
            }

            if piece.in_home_stretch {
                let pos = piece.home_stretch_position;
                if pos < 0 || pos > HOME_POSITION as i8 {
                    push(format!(
                        "{color} piece {} has stretch position {pos} outside 0..=5",
                        piece.id
                    ));
                }
                if piece.finished != (pos == HOME_POSITION as i8) {
                    push(format!(
                        "{color} piece {} at stretch position {pos} has finished={}",
                        piece.id, piece.finished
                    ));
                }
            } else if piece.finished {
                push(format!("{color} piece {} finished outside the stretch", piece.id));
            }

            if !state.active_players.contains(color) && piece.state() != PieceState::InBase {
                push(format!("Inactive {color} piece {} left base", piece.id));
            }
        }
    }

    check_winner(state, &mut push);

    violations
}

fn check_winner(state: &GameState, push: &mut impl FnMut(String)) {
    let complete: Vec<Color> = state
        .active_players
        .iter()
        .filter(|&c| state.all_finished(c))
        .collect();

    match state.winner {
        Some(winner) => {
            if !state.game_over {
                push(format!("Winner {winner} set but game not over"));
            }
            if !state.all_finished(winner) {
                push(format!("Winner {winner} has unfinished pieces"));
            }
            if complete.len() > 1 {
                push(format!("More than one player finished: {complete:?}"));
            }
        }
        None => {
            if state.game_over {
                push("Game over without a winner".to_string());
            }
            if let Some(color) = complete.first() {
                push(format!("{color} finished every piece but is not the winner"));
            }
        }
    }
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ActivePlayers;

    fn create_valid_game() -> GameState {
        GameState::new(ActivePlayers::new(&[Color::Red, Color::Yellow]).unwrap())
    }

    #[test]
    fn test_valid_game_passes() {
        let game = create_valid_game();
        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_turn_pointer_on_inactive_seat_detected() {
        let mut game = create_valid_game();
        game.current_player_index = 1;
        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Turn pointer"));
    }

    #[test]
    fn test_stretch_position_bounds() {
        let mut game = create_valid_game();
        let piece = &mut game.pieces[Color::Red.index()][0];
        piece.in_home_stretch = true;
        piece.home_stretch_position = 6;

        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("outside 0..=5")));
    }

    #[test]
    fn test_stretch_position_exactly_home_requires_finished() {
        let mut game = create_valid_game();
        let piece = &mut game.pieces[Color::Red.index()][0];
        piece.in_home_stretch = true;
        piece.home_stretch_position = 5;
        piece.finished = false;

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1, "{violations:?}");

        game.pieces[Color::Red.index()][0].finished = true;
        assert!(check_invariants(&game).is_empty());
    }

    #[test]
    fn test_track_position_bounds() {
        let mut game = create_valid_game();
        game.pieces[Color::Yellow.index()][3].position = 52;
        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("outside -1..=51"));
    }

    #[test]
    fn test_inactive_piece_on_board_detected() {
        let mut game = create_valid_game();
        game.pieces[Color::Blue.index()][0].place_on_track(20);
        let violations = check_invariants(&game);
        assert!(violations[0].message.contains("Inactive blue"));
    }

    #[test]
    fn test_unclaimed_win_detected() {
        let mut game = create_valid_game();
        for piece in &mut game.pieces[Color::Red.index()] {
            piece.place_in_stretch(HOME_POSITION);
        }
        let violations = check_invariants(&game);
        assert!(violations.iter().any(|v| v.message.contains("not the winner")));

        game.winner = Some(Color::Red);
        game.game_over = true;
        assert!(check_invariants(&game).is_empty());
    }

    #[test]
    fn test_winner_without_game_over_detected() {
        let mut game = create_valid_game();
        game.winner = Some(Color::Yellow);
        let violations = check_invariants(&game);
        // Not game over, and yellow has no finished pieces
        assert_eq!(violations.len(), 2, "{violations:?}");
    }

    #[test]
    fn test_six_streak_bound() {
        let mut game = create_valid_game();
        game.consecutive_sixes = 2;
        assert!(check_invariants(&game).is_empty());
        game.consecutive_sixes = 3;
        assert_eq!(check_invariants(&game).len(), 1);
    }
}
