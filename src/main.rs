//! Ludo CLI - Command-line interface for running and viewing bot matches.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use ludo::game::Color;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const ALL_PLAYERS: &str = "red,green,yellow,blue";

/// Ludo - A deterministic Ludo rules engine with heuristic bots
#[derive(Parser, Debug)]
#[command(name = "ludo")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a single match between bots
    Run {
        /// Colors taking part (2-4, comma separated)
        #[arg(short, long, value_delimiter = ',', default_value = ALL_PLAYERS)]
        players: Vec<Color>,

        /// Random seed (default: random)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum turns (default: 10000)
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// Bot tie-break jitter, 0.0-0.99 (default: 0.5)
        #[arg(long)]
        jitter: Option<f64>,

        /// Output format: text, json, or llm
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,

        /// Save recording to file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Suppress turn-by-turn output
        #[arg(short, long)]
        quiet: bool,
    },

    /// Interactive TUI to watch a match in real-time
    Watch {
        /// Colors taking part (2-4, comma separated)
        #[arg(short, long, value_delimiter = ',', default_value = ALL_PLAYERS)]
        players: Vec<Color>,

        /// Random seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Maximum turns (default: 10000)
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// Turn delay in milliseconds (default: 300)
        #[arg(long, default_value = "300")]
        speed: u64,
    },

    /// Replay a recorded match
    Replay {
        /// Recording file (JSON)
        #[arg(required = true)]
        recording: PathBuf,

        /// Output format: tui, text, or llm
        #[arg(short, long, default_value = "tui")]
        format: cli::ReplayFormat,

        /// Start at specific turn
        #[arg(short, long)]
        turn: Option<u32>,
    },

    /// Run mass parallel matches and aggregate statistics
    Tournament {
        /// Colors taking part (2-4, comma separated)
        #[arg(short, long, value_delimiter = ',', default_value = ALL_PLAYERS)]
        players: Vec<Color>,

        /// Number of matches to run (default: 1000)
        #[arg(short, long, default_value = "1000")]
        games: u64,

        /// Starting seed (increments for each match)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Parallel threads (default: CPU count)
        #[arg(short = 'j', long)]
        threads: Option<usize>,

        /// Maximum turns per match (default: 10000)
        #[arg(short = 't', long)]
        max_turns: Option<u32>,

        /// Bot tie-break jitter, 0.0-0.99 (default: 0.5)
        #[arg(long)]
        jitter: Option<f64>,

        /// Output format: text, json, or csv
        #[arg(short, long, default_value = "text")]
        format: cli::TournamentFormat,

        /// Show progress bar
        #[arg(long)]
        progress: bool,
    },
}

/// Log to stderr so diagnostics never mix with command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let result = match args.command {
        Commands::Run {
            players,
            seed,
            max_turns,
            jitter,
            format,
            save,
            quiet,
        } => cli::run::execute(&players, seed, max_turns, jitter, format, save, quiet),

        Commands::Watch {
            players,
            seed,
            max_turns,
            speed,
        } => cli::watch::execute(&players, seed, max_turns, speed),

        Commands::Replay {
            recording,
            format,
            turn,
        } => cli::replay::execute(&recording, format, turn),

        Commands::Tournament {
            players,
            games,
            seed,
            threads,
            max_turns,
            jitter,
            format,
            progress,
        } => cli::tournament::execute(&players, games, seed, threads, max_turns, jitter, format, progress),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
