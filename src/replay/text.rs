//! Structured text output for machine consumption.
//!
//! This format is optimized for machine readability while remaining
//! human-parseable. It lists every piece of every active player, and the
//! moves open to the player on turn.

// format! with push_str reads better here than write! and the allocation is irrelevant
#![allow(clippy::format_push_string)]

use crate::game::{
    Color, GameState, PieceState, Square, distance_from_start, is_safe,
};

/// Render game state to structured text.
///
/// Output format:
/// ```text
/// === TURN 42 ===
///
/// TO MOVE: red
/// DIE: 4
/// LEGAL MOVES: 0 -> track 17, 2 -> stretch 3
///
/// PLAYER red:
/// - piece 0: track 13 (travelled 13, safe)
/// - piece 1: base
/// - piece 2: stretch 0
/// - piece 3: home
/// - finished: 1/4
///
/// STATUS: in progress
/// ```
#[must_use]
pub fn render_text(state: &GameState, turn: u32) -> String {
    let mut output = String::new();

    output.push_str(&format!("=== TURN {turn} ===\n\n"));

    render_turn(&mut output, state);

    for color in state.active_players.iter() {
        render_player(&mut output, state, color);
    }

    match state.winner {
        Some(winner) => output.push_str(&format!("STATUS: game over, {winner} wins\n")),
        None => output.push_str("STATUS: in progress\n"),
    }

    output
}

fn render_turn(output: &mut String, state: &GameState) {
    if state.game_over {
        return;
    }
    let player = state.current_player();
    output.push_str(&format!("TO MOVE: {player}\n"));

    if state.dice_value == 0 {
        output.push_str("DIE: not rolled\n\n");
        return;
    }
    output.push_str(&format!("DIE: {}\n", state.dice_value));

    let moves: Vec<String> = state
        .legal_moves(player)
        .into_iter()
        .filter_map(|piece| {
            let square = state.landing(player, piece, state.dice_value)?;
            Some(format!("{piece} -> {}", describe_square(square)))
        })
        .collect();
    if moves.is_empty() {
        output.push_str("LEGAL MOVES: none (pass)\n\n");
    } else {
        output.push_str(&format!("LEGAL MOVES: {}\n\n", moves.join(", ")));
    }
}

fn render_player(output: &mut String, state: &GameState, color: Color) {
    output.push_str(&format!("PLAYER {color}:\n"));
    for piece in state.pieces(color) {
        let location = match piece.state() {
            PieceState::InBase => "base".to_string(),
            PieceState::OnTrack(cell) => {
                let safe = if is_safe(cell) { ", safe" } else { "" };
                format!(
                    "track {cell} (travelled {}{safe})",
                    distance_from_start(color, cell)
                )
            }
            PieceState::InHomeStretch(pos) => format!("stretch {pos}"),
            PieceState::Finished => "home".to_string(),
        };
        output.push_str(&format!("- piece {}: {location}\n", piece.id));
    }
    output.push_str(&format!("- finished: {}/4\n\n", state.finished_count(color)));
}

fn describe_square(square: Square) -> String {
    match square {
        Square::Track(cell) => format!("track {cell}"),
        Square::Stretch(pos) => format!("stretch {pos}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ActivePlayers;

    fn state() -> GameState {
        GameState::new(ActivePlayers::new(&[Color::Red, Color::Blue]).unwrap())
    }

    #[test]
    fn test_fresh_state() {
        let output = render_text(&state(), 0);
        assert!(output.starts_with("=== TURN 0 ==="));
        assert!(output.contains("TO MOVE: red"));
        assert!(output.contains("DIE: not rolled"));
        assert!(output.contains("PLAYER blue:"));
        assert!(!output.contains("PLAYER green:"));
        assert!(output.contains("STATUS: in progress"));
    }

    #[test]
    fn test_lists_legal_moves() {
        let mut s = state();
        s.pieces[Color::Red.index()][1].place_on_track(10);
        s.pieces[Color::Red.index()][2].place_in_stretch(1);
        s.dice_value = 3;

        let output = render_text(&s, 5);
        assert!(output.contains("LEGAL MOVES: 1 -> track 13, 2 -> stretch 4"));
        assert!(output.contains("- piece 1: track 10 (travelled 10)"));
        assert!(output.contains("- piece 0: base"));
    }

    #[test]
    fn test_no_moves_reported_as_pass() {
        let mut s = state();
        s.dice_value = 2;
        let output = render_text(&s, 1);
        assert!(output.contains("LEGAL MOVES: none (pass)"));
    }

    #[test]
    fn test_game_over() {
        let mut s = state();
        for piece in &mut s.pieces[Color::Blue.index()] {
            piece.place_in_stretch(5);
        }
        s.winner = Some(Color::Blue);
        s.game_over = true;

        let output = render_text(&s, 300);
        assert!(output.contains("STATUS: game over, blue wins"));
        assert!(output.contains("- finished: 4/4"));
        assert!(!output.contains("TO MOVE"));
    }
}
