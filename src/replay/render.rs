//! ASCII renderer for terminal viewing with ANSI colors.

use std::fmt::Write;

use crate::game::{
    Color, GameState, HOME_POSITION, PieceState, TRACK_LEN, TURN_ORDER, is_safe, start_cell,
};

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const GRAY: &str = "\x1b[90m";

/// Cells per printed track row; one row per quarter of the board.
const ROW_LEN: u8 = TRACK_LEN / 4;

/// ANSI color code for a player.
const fn ansi(color: Color) -> &'static str {
    match color {
        Color::Red => "\x1b[31m",
        Color::Green => "\x1b[32m",
        Color::Yellow => "\x1b[33m",
        Color::Blue => "\x1b[34m",
    }
}

/// Single-letter tag for a player.
const fn letter(color: Color) -> char {
    match color {
        Color::Red => 'R',
        Color::Green => 'G',
        Color::Yellow => 'Y',
        Color::Blue => 'B',
    }
}

/// Render game state to ASCII with ANSI colors.
///
/// Output format:
/// ```text
/// Turn 42   red to move   die: 4
///
///  0 R  .  .  .  .  .  .  .  *  .  .  .  .
/// 13 *  .  .  .  .  .  .  .  *  G2 .  .  .
/// 26 *  .  .  .  .  .  .  .  *  .  .  .  .
/// 39 *  .  .  .  .  .  .  .  *  .  .  .  .
///
/// red     base 2  stretch [. R . . .] home 1
/// green   base 2  stretch [. . . . .] home 0
/// ```
#[must_use]
pub fn render_ascii(state: &GameState, turn: u32) -> String {
    let mut output = String::new();

    render_header(&mut output, state, turn);
    render_track(&mut output, state);
    render_players(&mut output, state);

    output.push_str("\nLegend: *=safe  .=empty  R/G/Y/B=piece  2..4=stacked\n");
    output.push_str("[<] Back  [>] Forward  [g] Goto turn  [q] Quit\n");

    output
}

fn render_header(output: &mut String, state: &GameState, turn: u32) {
    let _ = write!(output, "{BOLD}Turn {turn}{RESET}   ");
    if let Some(winner) = state.winner {
        let _ = writeln!(output, "{}{winner} wins{RESET}\n", ansi(winner));
        return;
    }
    let player = state.current_player();
    let _ = write!(output, "{}{player}{RESET} to move   ", ansi(player));
    if state.dice_value == 0 {
        output.push_str("die: -\n\n");
    } else {
        let _ = writeln!(output, "die: {}\n", state.dice_value);
    }
}

fn render_track(output: &mut String, state: &GameState) {
    for row in 0..4 {
        let first = row * ROW_LEN;
        let _ = write!(output, "{first:>2} ");
        for cell in first..first + ROW_LEN {
            render_cell(output, state, cell);
        }
        output.push('\n');
    }
    output.push('\n');
}

fn render_cell(output: &mut String, state: &GameState, cell: u8) {
    let occupants: Vec<Color> = state
        .active_players
        .iter()
        .flat_map(|color| {
            state
                .pieces(color)
                .iter()
                .filter(move |p| p.track_cell() == Some(cell))
                .map(move |_| color)
        })
        .collect();

    match occupants.as_slice() {
        [] if is_safe(cell) => {
            let _ = write!(output, "{GRAY}*{RESET}  ");
        }
        [] => output.push_str(".  "),
        [only] => {
            let _ = write!(output, "{}{}{RESET}  ", ansi(*only), letter(*only));
        }
        [first, ..] => {
            // Only safe cells hold more than one color; show the first owner.
            let _ = write!(output, "{}{}{}{RESET} ", ansi(*first), letter(*first), occupants.len());
        }
    }
}

fn render_players(output: &mut String, state: &GameState) {
    for color in TURN_ORDER {
        if !state.active_players.contains(color) {
            continue;
        }
        let mut lane = ['.'; HOME_POSITION as usize];
        for piece in state.pieces(color) {
            if let PieceState::InHomeStretch(pos) = piece.state()
                && let Some(slot) = lane.get_mut(usize::from(pos))
            {
                *slot = letter(color);
            }
        }
        let lane: Vec<String> = lane.iter().map(char::to_string).collect();
        let _ = writeln!(
            output,
            "{}{:<7}{RESET} start {:>2}  base {}  stretch [{}] home {}",
            ansi(color),
            color.name(),
            start_cell(color),
            state.in_base_count(color),
            lane.join(" "),
            state.finished_count(color),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ActivePlayers;

    fn state() -> GameState {
        GameState::new(ActivePlayers::new(&[Color::Red, Color::Green]).unwrap())
    }

    #[test]
    fn test_render_fresh_board() {
        let output = render_ascii(&state(), 0);
        assert!(output.contains("Turn 0"));
        assert!(output.contains("to move"));
        assert!(output.contains("die: -"));
        assert!(output.contains("base 4"));
        assert!(!output.contains("yellow"));
    }

    #[test]
    fn test_render_pieces_and_stacks() {
        let mut s = state();
        s.pieces[Color::Red.index()][0].place_on_track(3);
        s.pieces[Color::Green.index()][0].place_on_track(8);
        s.pieces[Color::Green.index()][1].place_on_track(8);
        s.pieces[Color::Red.index()][1].place_in_stretch(2);
        s.dice_value = 4;

        let output = render_ascii(&s, 9);
        assert!(output.contains("die: 4"));
        assert!(output.contains("G2"));
        assert!(output.contains("[. . R . .]"));
        assert!(output.contains("base 2"));
    }

    #[test]
    fn test_render_winner() {
        let mut s = state();
        s.winner = Some(Color::Green);
        s.game_over = true;
        let output = render_ascii(&s, 120);
        assert!(output.contains("green wins"));
    }
}
