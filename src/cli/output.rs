//! Output formatting utilities for CLI.

// Rates and averages over game counts; precision loss is irrelevant at these sizes
#![allow(clippy::cast_precision_loss, clippy::format_push_string)]

use ludo::game::{Color, NUM_COLORS, TURN_ORDER};
use ludo::match_runner::{MatchResult, PlayerStats, TurnAction, TurnEvent};
use ludo::MoveAction;
use serde::Serialize;

/// JSON-serializable match result.
#[derive(Debug, Serialize)]
pub(super) struct JsonMatchResult<'a> {
    /// Random seed used.
    seed: u64,
    /// Winning color (null if the turn cap was hit).
    winner: Option<Color>,
    /// Total turns played.
    turns_played: u32,
    /// Per-player results.
    players: &'a [PlayerStats],
    /// Turn-by-turn log, omitted with `--quiet`.
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<&'a [TurnEvent]>,
}

impl<'a> JsonMatchResult<'a> {
    /// Create from a `MatchResult`.
    pub(super) fn from_match_result(result: &'a MatchResult, with_events: bool) -> Self {
        Self {
            seed: result.seed,
            winner: result.winner,
            turns_played: result.turns_played,
            players: &result.player_stats,
            events: with_events.then_some(result.events.as_slice()),
        }
    }
}

/// One log line for a turn.
pub(super) fn format_event(event: &TurnEvent) -> String {
    let head = format!("[{:>4}] {:<6} rolled {}", event.turn, event.player, event.roll);
    match event.action {
        TurnAction::Forfeited => format!("{head}: third six, turn forfeited"),
        TurnAction::Passed => format!("{head}: no legal move"),
        TurnAction::Moved(outcome) => {
            let verb = match outcome.action {
                MoveAction::Start => "released",
                MoveAction::Move => "moved",
                MoveAction::Capture => "captured with",
                MoveAction::EnterHomeStretch => "entered the stretch with",
                MoveAction::Finish => "brought home",
                MoveAction::Win => "won with",
            };
            let mut line = format!("{head}: {verb} piece {}", outcome.piece);
            if let Some(captured) = outcome.captured {
                line.push_str(&format!(" ({} piece {} sent to base)", captured.player, captured.piece));
            }
            if outcome.extra_turn {
                line.push_str(", rolls again");
            }
            line
        }
    }
}

/// Format a match result as human-readable text.
pub(super) fn format_text(result: &MatchResult) -> String {
    let mut output = String::new();

    output.push_str(&format!("Match Result (seed: {})\n", result.seed));
    if let Some(winner) = result.winner {
        output.push_str(&format!("  Winner: {winner}\n"));
    } else {
        output.push_str("  Winner: none (turn limit reached)\n");
    }
    output.push_str(&format!("  Turns: {}\n\n", result.turns_played));

    for stats in &result.player_stats {
        output.push_str(&format!(
            "  {:<7} home {}/4  moves {:>3}  captures {:>2}  lost {:>2}  sixes {:>3}  passes {:>3}  forfeits {}\n",
            stats.color.name(),
            stats.finished,
            stats.moves,
            stats.captures,
            stats.pieces_lost,
            stats.sixes,
            stats.passes,
            stats.forfeits,
        ));
    }

    output
}

/// Tournament statistics for aggregated results.
#[derive(Debug, Default, Clone, Copy)]
pub(super) struct TournamentStats {
    /// Total matches played.
    pub(super) games_played: u64,
    /// Win count per seat.
    wins: [u64; NUM_COLORS],
    /// Matches that hit the turn cap.
    pub(super) draws: u64,
    /// Captures per seat.
    captures: [u64; NUM_COLORS],
    /// Total turns across all matches.
    total_turns: u64,
}

impl TournamentStats {
    /// Add a match result to the stats.
    pub(super) fn add_result(&mut self, result: &MatchResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);

        match result.winner {
            Some(winner) => self.wins[winner.index()] += 1,
            None => self.draws += 1,
        }
        for stats in &result.player_stats {
            self.captures[stats.color.index()] += u64::from(stats.captures);
        }
    }

    /// Merge another stats instance into this one.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.draws += other.draws;
        self.total_turns += other.total_turns;
        for seat in 0..NUM_COLORS {
            self.wins[seat] += other.wins[seat];
            self.captures[seat] += other.captures[seat];
        }
    }

    /// Wins for a player.
    pub(super) const fn wins(&self, color: Color) -> u64 {
        self.wins[color.index()]
    }

    /// Get win rate for a player (0.0-1.0).
    pub(super) fn win_rate(&self, color: Color) -> f64 {
        self.per_game(self.wins[color.index()])
    }

    /// Average captures per match for a player.
    pub(super) fn avg_captures(&self, color: Color) -> f64 {
        self.per_game(self.captures[color.index()])
    }

    /// Get average match length.
    pub(super) fn avg_turns(&self) -> f64 {
        self.per_game(self.total_turns)
    }

    fn per_game(&self, total: u64) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        total as f64 / self.games_played as f64
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total matches played.
    games_played: u64,
    /// Per-player statistics.
    players: Vec<JsonTournamentPlayer>,
    /// Matches without a winner.
    draws: u64,
    /// Average match length in turns.
    avg_turns: f64,
}

/// JSON-serializable per-player tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentPlayer {
    /// Player color.
    color: Color,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average captures per match.
    avg_captures: f64,
}

impl JsonTournamentResult {
    /// Create from stats for the colors that took part.
    pub(super) fn from_stats(stats: &TournamentStats, players: &[Color]) -> Self {
        let players = players
            .iter()
            .map(|&color| JsonTournamentPlayer {
                color,
                wins: stats.wins(color),
                win_rate: stats.win_rate(color),
                avg_captures: stats.avg_captures(color),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            players,
            draws: stats.draws,
            avg_turns: stats.avg_turns(),
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats, players: &[Color]) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tournament Results ({} games)\n", stats.games_played));
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for &color in players {
        output.push_str(&format!(
            "  {:<7} {:>5.1}% ({} wins)\n",
            color.name(),
            stats.win_rate(color) * 100.0,
            stats.wins(color)
        ));
    }
    output.push_str(&format!(
        "  Unfinished: {} ({:.1}%)\n\n",
        stats.draws,
        stats.per_game(stats.draws) * 100.0
    ));

    output.push_str("Average Captures:\n");
    for &color in players {
        output.push_str(&format!("  {:<7} {:.2}\n", color.name(), stats.avg_captures(color)));
    }

    output.push_str(&format!("\nAverage Game Length: {:.0} turns\n", stats.avg_turns()));

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats, players: &[Color]) -> String {
    let mut output = String::new();

    output.push_str("color,wins,win_rate,avg_captures\n");
    for color in TURN_ORDER.iter().filter(|c| players.contains(c)) {
        output.push_str(&format!(
            "{},{},{:.4},{:.2}\n",
            color.name(),
            stats.wins(*color),
            stats.win_rate(*color),
            stats.avg_captures(*color)
        ));
    }

    output
}
