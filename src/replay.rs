//! Match replay and viewing.
//!
//! Because matches are 100% deterministic, a recording is only:
//! - `seed: u64` - drives the dice and the bots' tie-breaks
//! - `config: MatchConfig` - players, turn cap, bot tuning
//!
//! No state deltas needed. To view turn N, re-run the match from turn 0 to N.
//!
//! # Time Travel
//!
//! - **Forward**: Continue stepping the match
//! - **Backward**: Re-run from turn 0 to (`current_turn` - 1)
//! - **Jump to turn N**: Re-run from turn 0 to N

mod render;
mod text;

pub use render::render_ascii;
pub use text::render_text;

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::game::GameState;
use crate::match_runner::{MatchConfig, MatchError, MatchRunner, TurnEvent};

/// Minimal recording - just seed and config.
///
/// Stored as JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Recording {
    /// Match seed.
    pub seed: u64,
    /// Match configuration.
    pub config: MatchConfig,
}

impl Recording {
    /// Create a new recording from match inputs.
    #[must_use]
    pub const fn new(seed: u64, config: MatchConfig) -> Self {
        Self { seed, config }
    }

    /// Save recording to a file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ReplayError> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }

    /// Load recording from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid recording.
    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }
}

/// Error type for replay operations.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Reading or writing the recording failed.
    #[error("recording I/O failed: {0}")]
    Io(#[from] std::io::Error),
    /// The recording is not valid JSON for this format.
    #[error("invalid recording: {0}")]
    Format(#[from] serde_json::Error),
    /// Re-simulating the match failed.
    #[error(transparent)]
    Match(#[from] MatchError),
    /// Turn number out of bounds.
    #[error("turn {requested} out of bounds (max: {max_turn})")]
    TurnOutOfBounds {
        /// Requested turn.
        requested: u32,
        /// Last reachable turn.
        max_turn: u32,
    },
    /// Match is already over.
    #[error("match is already over")]
    GameOver,
}

/// Replay engine - steps through a match deterministically.
///
/// Since matches are deterministic, this engine can:
/// - Step forward by playing one more turn
/// - Step backward by replaying from turn 0
/// - Jump to any turn by replaying from turn 0
#[derive(Debug, Clone)]
pub struct ReplayEngine {
    recording: Recording,
    runner: MatchRunner,
}

impl ReplayEngine {
    /// Create a new replay engine from a recording, starting at turn 0.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded config is rejected.
    pub fn new(recording: Recording) -> Result<Self, ReplayError> {
        Self::new_at_turn(recording, 0)
    }

    /// Create a new replay engine at a specific turn.
    ///
    /// Stops early if the match ends before `target_turn`.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorded config is rejected.
    pub fn new_at_turn(recording: Recording, target_turn: u32) -> Result<Self, ReplayError> {
        let mut runner = MatchRunner::new(recording.seed, &recording.config)?;
        while runner.turn() < target_turn && runner.step()?.is_some() {}
        debug!(seed = recording.seed, turn = runner.turn(), "replay positioned");
        Ok(Self { recording, runner })
    }

    /// Get the recording.
    #[must_use]
    pub const fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Get current turn number.
    #[must_use]
    pub const fn turn(&self) -> u32 {
        self.runner.turn()
    }

    /// Get current game state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        self.runner.state()
    }

    /// The event that produced the current state, `None` at turn 0.
    #[must_use]
    pub fn last_event(&self) -> Option<&TurnEvent> {
        self.runner.events().last()
    }

    /// Check if the match is over (won or out of turns).
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.runner.is_finished()
    }

    /// Step forward one turn.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::GameOver`] if the match is already over.
    pub fn step_forward(&mut self) -> Result<TurnEvent, ReplayError> {
        self.runner.step()?.ok_or(ReplayError::GameOver)
    }

    /// Step backward one turn.
    ///
    /// This replays from turn 0 to (`current_turn` - 1).
    ///
    /// # Errors
    ///
    /// Returns an error if already at turn 0.
    pub fn step_backward(&mut self) -> Result<(), ReplayError> {
        let Some(target) = self.turn().checked_sub(1) else {
            return Err(ReplayError::TurnOutOfBounds {
                requested: 0,
                max_turn: self.recording.config.max_turns,
            });
        };
        self.goto_turn(target)
    }

    /// Jump to a specific turn.
    ///
    /// This replays from turn 0 to the target turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the turn is beyond the turn cap.
    pub fn goto_turn(&mut self, target_turn: u32) -> Result<(), ReplayError> {
        let max_turn = self.recording.config.max_turns;
        if target_turn > max_turn {
            return Err(ReplayError::TurnOutOfBounds {
                requested: target_turn,
                max_turn,
            });
        }
        *self = Self::new_at_turn(self.recording, target_turn)?;
        Ok(())
    }

    /// Render current state to ASCII for terminal viewing.
    #[must_use]
    pub fn render_ascii(&self) -> String {
        render_ascii(self.state(), self.turn())
    }

    /// Render current state to structured text.
    #[must_use]
    pub fn render_text(&self) -> String {
        render_text(self.state(), self.turn())
    }
}
