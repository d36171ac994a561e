//! Error types for the rules engine.

use thiserror::Error;

use crate::game::{Color, PieceId};

/// Why a requested move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IllegalMoveReason {
    /// No die has been rolled this turn.
    #[error("no die rolled this turn")]
    NoRoll,
    /// The color asked to move is not the player on turn.
    #[error("not this player's turn")]
    NotYourTurn,
    /// Piece index outside 0..=3.
    #[error("no such piece")]
    UnknownPiece,
    /// The piece already reached home.
    #[error("piece already finished")]
    Finished,
    /// A piece in base can only be released with a 6.
    #[error("piece in base needs a 6")]
    NeedsSix,
    /// The die would carry the piece past the final stretch cell.
    #[error("move overshoots home")]
    Overshoot,
    /// The face is not one a die can show.
    #[error("die value {0} outside 1..=6")]
    InvalidDie(u8),
}

/// Invalid active-player configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// No players given.
    #[error("active player set is empty")]
    Empty,
    /// Fewer than two players given.
    #[error("at least 2 players are required, got {0}")]
    TooFew(usize),
    /// The same color was listed twice.
    #[error("player {0} listed more than once")]
    Duplicate(Color),
}

/// Errors returned by [`crate::LudoEngine`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The requested move is not legal in the current state. Nothing was mutated.
    #[error("illegal move for {player} piece {piece}: {reason}")]
    IllegalMove {
        /// Color that asked to move.
        player: Color,
        /// Piece index requested.
        piece: PieceId,
        /// Why the move was refused.
        reason: IllegalMoveReason,
    },
    /// A pass was requested before the player on turn rolled.
    #[error("no die rolled this turn")]
    NotRolled,
    /// A pass was requested while the player still has a legal move.
    #[error("{0} still has a legal move and cannot pass")]
    MovesAvailable(Color),
    /// The game has a winner; only a reset is accepted.
    #[error("game is over")]
    GameOver,
    /// A restored snapshot breaks this many game invariants.
    #[error("snapshot rejected: {0} invariant violation(s)")]
    InvalidSnapshot(usize),
    /// The active player set is invalid.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigError),
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_illegal_move_display() {
        let err = EngineError::IllegalMove {
            player: Color::Red,
            piece: 2,
            reason: IllegalMoveReason::NeedsSix,
        };
        let msg = err.to_string();
        assert!(msg.contains("red"));
        assert!(msg.contains("piece 2"));
        assert!(msg.contains("needs a 6"));
        assert_eq!(IllegalMoveReason::InvalidDie(9).to_string(), "die value 9 outside 1..=6");
    }

    #[test]
    fn test_config_error_converts() {
        let err: EngineError = ConfigError::TooFew(1).into();
        assert_eq!(err, EngineError::Configuration(ConfigError::TooFew(1)));
        assert!(err.to_string().contains("at least 2"));
    }
}
