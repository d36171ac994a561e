//! Tournament command implementation.

use super::output::{JsonTournamentResult, TournamentStats, format_tournament_csv, format_tournament_text};
use super::{CliError, TournamentFormat, match_config, resolve_seed};
use indicatif::{ProgressBar, ProgressStyle};
use ludo::game::Color;
use ludo::match_runner::run_match;
use rayon::prelude::*;
use std::time::Instant;
use tracing::warn;

/// Execute the tournament command.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
#[allow(clippy::too_many_arguments, clippy::cast_precision_loss)]
pub(crate) fn execute(
    players: &[Color],
    games: u64,
    seed: Option<u64>,
    threads: Option<usize>,
    max_turns: Option<u32>,
    jitter: Option<f64>,
    format: TournamentFormat,
    progress: bool,
) -> Result<(), CliError> {
    let config = match_config(players, max_turns, jitter)?;
    let players = config.players.to_vec();

    if let Some(num_threads) = threads
        && let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(num_threads).build_global()
    {
        warn!(error = %e, "could not size thread pool, using default");
    }

    let base_seed = resolve_seed(seed);

    let pb = progress.then(|| {
        let pb = ProgressBar::new(games);
        if let Ok(style) = ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} games ({per_sec})",
        ) {
            pb.set_style(style.progress_chars("=>-"));
        }
        pb
    });

    let start = Instant::now();

    // Lock-free fold/reduce: each thread accumulates its own stats, merged at the end
    let stats = (0..games)
        .into_par_iter()
        .fold(TournamentStats::default, |mut local_stats, i| {
            let game_seed = base_seed.wrapping_add(i);
            match run_match(game_seed, &config) {
                Ok(result) => local_stats.add_result(&result),
                Err(e) => warn!(seed = game_seed, error = %e, "match failed"),
            }
            if let Some(pb) = &pb {
                pb.inc(1);
            }
            local_stats
        })
        .reduce(TournamentStats::default, |mut a, b| {
            a.merge(&b);
            a
        });

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }

    let duration = start.elapsed();
    let games_per_sec = if duration.as_secs_f64() > 0.0 {
        stats.games_played as f64 / duration.as_secs_f64()
    } else {
        0.0
    };

    match format {
        TournamentFormat::Text => {
            println!();
            print!("{}", format_tournament_text(&stats, &players));
            println!();
            println!("Duration: {:.2}s ({:.0} games/sec)", duration.as_secs_f64(), games_per_sec);
        }
        TournamentFormat::Json => {
            let json = serde_json::to_string_pretty(&JsonTournamentResult::from_stats(&stats, &players))?;
            println!("{json}");
        }
        TournamentFormat::Csv => {
            print!("{}", format_tournament_csv(&stats, &players));
        }
    }

    Ok(())
}
