//! Run command implementation.

use super::output::{JsonMatchResult, format_event, format_text};
use super::{CliError, OutputFormat, match_config, resolve_seed};
use ludo::game::Color;
use ludo::match_runner::run_match;
use ludo::replay::{Recording, render_text};
use std::path::PathBuf;

/// Execute the run command.
///
/// # Errors
///
/// Returns an error if the match fails to run or the recording cannot be saved.
pub(crate) fn execute(
    players: &[Color],
    seed: Option<u64>,
    max_turns: Option<u32>,
    jitter: Option<f64>,
    format: OutputFormat,
    save: Option<PathBuf>,
    quiet: bool,
) -> Result<(), CliError> {
    let seed = resolve_seed(seed);
    let config = match_config(players, max_turns, jitter)?;

    if !quiet && format == OutputFormat::Text {
        println!("Running match with seed {seed}...");
        println!("Players: {}", config.players);
        println!();
    }

    let result = run_match(seed, &config)?;

    if let Some(save_path) = save {
        Recording::new(seed, config)
            .save(&save_path)
            .map_err(|e| CliError::new(format!("Failed to save recording: {e}")))?;
        if !quiet && format == OutputFormat::Text {
            println!("Recording saved to: {}", save_path.display());
            println!();
        }
    }

    match format {
        OutputFormat::Text => {
            if !quiet {
                for event in &result.events {
                    println!("{}", format_event(event));
                }
                println!();
            }
            print!("{}", format_text(&result));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonMatchResult::from_match_result(&result, !quiet))?;
            println!("{json}");
        }
        OutputFormat::Llm => {
            println!("{}", render_text(&result.final_state, result.turns_played));
            println!("=== FINAL RESULT ===");
            println!();
            match result.winner {
                Some(winner) => println!("Winner: {winner}"),
                None => println!("Result: no winner (turn limit reached)"),
            }
            println!("Total turns: {}", result.turns_played);
        }
    }

    Ok(())
}
