//! Bot-vs-bot match runner.
//!
//! Provides a pure function interface: `(seed, config) -> MatchResult`
//!
//! One seed drives both the dice and the bots' tie-breaks, so the same seed
//! and config always replay the same match. A "turn" here is a single roll
//! together with whatever the bot did with it.

use rand::SeedableRng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::bot::{BotConfig, choose_move};
use crate::engine::LudoEngine;
use crate::error::EngineError;
use crate::game::{
    ActivePlayers, Color, GameState, MoveAction, MoveOutcome, NUM_COLORS, SeededDice, TURN_ORDER,
    assert_invariants,
};

/// Default safety cap on turns per match.
pub const DEFAULT_MAX_TURNS: u32 = 10_000;

/// Mixed into the match seed to seed the bots independently of the dice.
const BOT_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Match configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Colors taking part.
    pub players: ActivePlayers,
    /// Turns played before the match is abandoned without a winner.
    pub max_turns: u32,
    /// Bot tuning shared by every seat.
    pub bot: BotConfig,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            players: ActivePlayers::all(),
            max_turns: DEFAULT_MAX_TURNS,
            bot: BotConfig::default(),
        }
    }
}

/// Error type for match operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatchError {
    /// `max_turns` was zero.
    #[error("max_turns must be at least 1")]
    ZeroTurnLimit,
    /// The engine refused a step the runner issued.
    #[error("engine rejected bot step on turn {turn}: {source}")]
    Engine {
        /// Turn on which the engine refused.
        turn: u32,
        /// The engine error.
        #[source]
        source: EngineError,
    },
}

/// What happened to one roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum TurnAction {
    /// A piece moved.
    Moved(MoveOutcome),
    /// No legal move; the turn passed.
    Passed,
    /// Third six in a row; the turn was lost.
    Forfeited,
}

/// One entry of the match log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEvent {
    /// 1-based turn number.
    pub turn: u32,
    /// Player that rolled.
    pub player: Color,
    /// Face rolled.
    pub roll: u8,
    /// What came of it.
    pub action: TurnAction,
}

/// Statistics for a single player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Player color.
    pub color: Color,
    /// Dice rolled.
    pub rolls: u32,
    /// Sixes rolled.
    pub sixes: u32,
    /// Pieces moved.
    pub moves: u32,
    /// Opponent pieces sent to base.
    pub captures: u32,
    /// Own pieces sent to base by opponents.
    pub pieces_lost: u32,
    /// Rolls with no legal move.
    pub passes: u32,
    /// Turns lost to three sixes.
    pub forfeits: u32,
    /// Pieces home at the end.
    pub finished: u32,
}

impl PlayerStats {
    /// Zeroed statistics for `color`.
    #[must_use]
    pub const fn new(color: Color) -> Self {
        Self {
            color,
            rolls: 0,
            sixes: 0,
            moves: 0,
            captures: 0,
            pieces_lost: 0,
            passes: 0,
            forfeits: 0,
            finished: 0,
        }
    }
}

/// Final result of a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    /// The seed used for this match.
    pub seed: u64,
    /// Winner, `None` if the turn cap was hit first.
    pub winner: Option<Color>,
    /// Total turns played.
    pub turns_played: u32,
    /// Per-player statistics in seating order.
    pub player_stats: Vec<PlayerStats>,
    /// Every turn, in order.
    pub events: Vec<TurnEvent>,
    /// State at the end of the match.
    pub final_state: GameState,
}

/// Run a complete match with the given seed and configuration.
///
/// This is the main entry point - a pure function from inputs to result.
///
/// # Errors
///
/// Returns an error if `max_turns` is zero, or if the engine refuses a step
/// (which would be a rules bug).
pub fn run_match(seed: u64, config: &MatchConfig) -> Result<MatchResult, MatchError> {
    let mut runner = MatchRunner::new(seed, config)?;
    while runner.step()?.is_some() {}
    Ok(runner.into_result())
}

/// Steps a match one turn at a time.
///
/// Used by [`run_match`] to play to the end and by the replay viewer to
/// re-simulate up to a given turn.
#[derive(Debug, Clone)]
pub struct MatchRunner {
    engine: LudoEngine<SeededDice>,
    bot_rng: SmallRng,
    config: MatchConfig,
    seed: u64,
    turn: u32,
    events: Vec<TurnEvent>,
    stats: [PlayerStats; NUM_COLORS],
}

impl MatchRunner {
    /// Set up a match without playing any turn.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::ZeroTurnLimit`] if `max_turns` is zero.
    pub fn new(seed: u64, config: &MatchConfig) -> Result<Self, MatchError> {
        if config.max_turns == 0 {
            return Err(MatchError::ZeroTurnLimit);
        }
        Ok(Self {
            engine: LudoEngine::with_dice(config.players, SeededDice::new(seed)),
            bot_rng: SmallRng::seed_from_u64(seed ^ BOT_SEED_SALT),
            config: *config,
            seed,
            turn: 0,
            events: Vec::new(),
            stats: TURN_ORDER.map(PlayerStats::new),
        })
    }

    /// Current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        self.engine.state()
    }

    /// Turns played so far.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.turn
    }

    /// Events logged so far.
    #[must_use]
    pub fn events(&self) -> &[TurnEvent] {
        &self.events
    }

    /// Whether the match has a winner or hit the turn cap.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.engine.is_game_over() || self.turn >= self.config.max_turns
    }

    /// Play one roll for the player on turn.
    ///
    /// Returns `None` once the match is finished.
    ///
    /// # Errors
    ///
    /// Returns [`MatchError::Engine`] if the engine refuses the bot's step.
    pub fn step(&mut self) -> Result<Option<TurnEvent>, MatchError> {
        if self.is_finished() {
            return Ok(None);
        }
        let turn = self.turn + 1;
        let player = self.engine.current_player();
        let wrap = |source: EngineError| MatchError::Engine { turn, source };

        let roll = self.engine.roll_dice().ok_or_else(|| wrap(EngineError::GameOver))?;
        let action = if roll.forfeited {
            TurnAction::Forfeited
        } else {
            match choose_move(self.engine.state(), &self.config.bot, &mut self.bot_rng) {
                Some(piece) => TurnAction::Moved(self.engine.move_piece(player, piece).map_err(wrap)?),
                None => {
                    self.engine.pass_turn().map_err(wrap)?;
                    TurnAction::Passed
                }
            }
        };
        assert_invariants(self.engine.state());

        let event = TurnEvent {
            turn,
            player,
            roll: roll.value,
            action,
        };
        self.record(&event);
        self.turn = turn;
        self.events.push(event);

        if let TurnAction::Moved(MoveOutcome {
            winner: Some(winner), ..
        }) = action
        {
            info!(seed = self.seed, %winner, turns = turn, "match won");
        } else if self.turn >= self.config.max_turns {
            info!(seed = self.seed, turns = turn, "turn limit reached");
        }
        Ok(Some(event))
    }

    fn record(&mut self, event: &TurnEvent) {
        let stats = &mut self.stats[event.player.index()];
        stats.rolls += 1;
        if event.roll == 6 {
            stats.sixes += 1;
        }
        let outcome = match event.action {
            TurnAction::Moved(outcome) => outcome,
            TurnAction::Passed => {
                stats.passes += 1;
                return;
            }
            TurnAction::Forfeited => {
                stats.forfeits += 1;
                return;
            }
        };

        stats.moves += 1;
        if matches!(outcome.action, MoveAction::Finish | MoveAction::Win) {
            stats.finished += 1;
        }
        if let Some(captured) = outcome.captured {
            stats.captures += 1;
            self.stats[captured.player.index()].pieces_lost += 1;
            debug!(turn = event.turn, by = %event.player, victim = %captured.player, "capture logged");
        }
    }

    /// Build the final match result.
    #[must_use]
    pub fn into_result(self) -> MatchResult {
        let player_stats = self
            .config
            .players
            .iter()
            .map(|color| self.stats[color.index()])
            .collect();
        MatchResult {
            seed: self.seed,
            winner: self.engine.winner(),
            turns_played: self.turn,
            player_stats,
            events: self.events,
            final_state: self.engine.snapshot(),
        }
    }
}
