//! Replay command implementation.

use super::watch::run_tui;
use super::{CliError, ReplayFormat};
use ludo::replay::{Recording, ReplayEngine, render_ascii, render_text};
use std::path::Path;

/// Default TUI step delay for replays.
const REPLAY_SPEED_MS: u64 = 300;

/// Execute the replay command.
///
/// # Errors
///
/// Returns an error if the recording cannot be loaded or replayed.
pub(crate) fn execute(recording_path: &Path, format: ReplayFormat, turn: Option<u32>) -> Result<(), CliError> {
    let recording = Recording::load(recording_path).map_err(|e| {
        CliError::new(format!("Failed to load recording {}: {e}", recording_path.display()))
    })?;

    let engine = ReplayEngine::new_at_turn(recording, turn.unwrap_or(0))?;

    match format {
        ReplayFormat::Tui => run_tui(engine, REPLAY_SPEED_MS, true),
        ReplayFormat::Text => print_replay(engine, render_ascii, "=== GAME OVER ==="),
        ReplayFormat::Llm => print_replay(engine, render_text, "# GAME OVER"),
    }
}

fn print_replay(
    mut engine: ReplayEngine,
    render: fn(&ludo::GameState, u32) -> String,
    footer: &str,
) -> Result<(), CliError> {
    println!("Replay of match (seed: {})", engine.recording().seed);
    println!("Players: {}", engine.recording().config.players);
    println!("Max turns: {}", engine.recording().config.max_turns);
    println!();

    loop {
        println!("{}", render(engine.state(), engine.turn()));
        println!("---");
        println!();

        if engine.is_game_over() {
            println!("{footer}");
            return Ok(());
        }
        engine.step_forward()?;
    }
}
