// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Ludo: a deterministic rules engine for the board game Ludo.
//!
//! This crate provides:
//! - A single-owner rules engine ([`LudoEngine`]) for 2-4 players
//! - A heuristic bot that picks among legal moves
//! - A seeded match runner and a replay viewer built on it
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Match Runner / Replay / CLI       │
//! ├─────────────────────────────────────┤
//! │   Heuristic Bot                     │
//! ├─────────────────────────────────────┤
//! │   Rules Engine (LudoEngine)         │
//! ├─────────────────────────────────────┤
//! │   Game State, Board, Dice           │
//! └─────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use ludo::{Color, LudoEngine};
//!
//! let mut engine = LudoEngine::new(&[Color::Red, Color::Blue], 42).unwrap();
//! let roll = engine.roll_dice().unwrap();
//! let player = engine.current_player();
//! match engine.legal_moves(player).first() {
//!     Some(&piece) => {
//!         engine.move_piece(player, piece).unwrap();
//!     }
//!     None if roll.forfeited => {}
//!     None => engine.pass_turn().unwrap(),
//! }
//! ```

pub mod bot;
mod engine;
pub mod error;
pub mod game;
pub mod match_runner;
pub mod replay;

pub use bot::{BotConfig, HeuristicBot, MovePriority, choose_move};
pub use engine::LudoEngine;
pub use error::{ConfigError, EngineError, EngineResult, IllegalMoveReason};

// Re-export key game types at crate root for convenience
pub use game::{
    ActivePlayers, CapturedPiece, Color, DiceRoll, DiceSource, GameState, MoveAction, MoveOutcome,
    Piece, PieceId, PieceState, ScriptedDice, SeededDice, Square, TurnPhase,
};
