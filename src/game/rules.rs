//! Move legality and move resolution.
//!
//! Legality only looks at the moving piece; everything about the rest of the
//! board (captures, wins) is settled by [`GameState::apply_move`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{EngineError, EngineResult, IllegalMoveReason};
use crate::game::board::{HOME_POSITION, RELEASE_ROLL, Square, advance_on_track, is_safe, start_cell};
use crate::game::{Color, DIE_FACES, GameState, PIECES_PER_PLAYER, PieceId, PieceState};

/// What a move did, most significant effect first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MoveAction {
    /// Released a piece from base onto its start cell.
    Start,
    /// Plain advance along the track or stretch.
    Move,
    /// Landed on an opponent and sent it back to base.
    Capture,
    /// Left the shared track for the home stretch.
    EnterHomeStretch,
    /// Brought a piece home.
    Finish,
    /// Brought the last piece home and won.
    Win,
}

/// A piece sent back to base by a capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPiece {
    /// Owner of the captured piece.
    pub player: Color,
    /// Index of the captured piece.
    pub piece: PieceId,
    /// Cell it was captured on.
    pub cell: u8,
}

/// Result of a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveOutcome {
    /// Player that moved.
    pub player: Color,
    /// Piece that moved.
    pub piece: PieceId,
    /// Face used for the move.
    pub dice_value: u8,
    /// Most significant effect of the move.
    pub action: MoveAction,
    /// Where the piece ended up.
    pub new_position: Square,
    /// Opponent piece sent to base, if any.
    pub captured: Option<CapturedPiece>,
    /// The same player rolls again.
    pub extra_turn: bool,
    /// Set when this move won the game.
    pub winner: Option<Color>,
}

impl GameState {
    /// Check whether `player` may move `piece` with the die currently showing.
    ///
    /// # Errors
    ///
    /// Returns the reason the move is refused.
    pub fn check_move(&self, player: Color, piece: PieceId) -> Result<(), IllegalMoveReason> {
        if self.dice_value == 0 {
            return Err(IllegalMoveReason::NoRoll);
        }
        if player != self.current_player() {
            return Err(IllegalMoveReason::NotYourTurn);
        }
        self.check_piece(player, piece, self.dice_value)
    }

    /// Check a hypothetical `die` for one piece, ignoring whose turn it is.
    ///
    /// # Errors
    ///
    /// Returns the reason the move would be refused.
    pub fn check_piece(&self, player: Color, piece: PieceId, die: u8) -> Result<(), IllegalMoveReason> {
        let Some(p) = self.piece(player, piece) else {
            return Err(IllegalMoveReason::UnknownPiece);
        };
        if !(1..=DIE_FACES).contains(&die) {
            return Err(IllegalMoveReason::InvalidDie(die));
        }

        match p.state() {
            PieceState::Finished => Err(IllegalMoveReason::Finished),
            PieceState::InBase if die != RELEASE_ROLL => Err(IllegalMoveReason::NeedsSix),
            PieceState::InHomeStretch(pos) if pos.saturating_add(die) > HOME_POSITION => {
                Err(IllegalMoveReason::Overshoot)
            }
            PieceState::InBase | PieceState::InHomeStretch(_) | PieceState::OnTrack(_) => Ok(()),
        }
    }

    /// Whether `player` may move `piece` right now.
    #[must_use]
    pub fn is_legal(&self, player: Color, piece: PieceId) -> bool {
        self.check_move(player, piece).is_ok()
    }

    /// Pieces `player` may move right now, in id order.
    ///
    /// Empty when nothing can move, including when it is not `player`'s turn
    /// or no die is showing.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn legal_moves(&self, player: Color) -> Vec<PieceId> {
        (0..PIECES_PER_PLAYER as PieceId)
            .filter(|&id| self.is_legal(player, id))
            .collect()
    }

    /// Where `piece` would land with `die`, without checking legality.
    ///
    /// Returns `None` for finished pieces and for a `die` outside `1..=6`.
    #[must_use]
    pub fn landing(&self, player: Color, piece: PieceId, die: u8) -> Option<Square> {
        if !(1..=DIE_FACES).contains(&die) {
            return None;
        }
        match self.piece(player, piece)?.state() {
            PieceState::Finished => None,
            PieceState::InBase => Some(Square::Track(start_cell(player))),
            PieceState::OnTrack(cell) => Some(advance_on_track(player, cell, die)),
            PieceState::InHomeStretch(pos) => Some(Square::Stretch(pos.saturating_add(die))),
        }
    }

    /// First opponent piece a landing on `cell` by `player` would capture.
    #[must_use]
    pub fn capture_target(&self, player: Color, cell: u8) -> Option<(Color, PieceId)> {
        if is_safe(cell) {
            return None;
        }
        self.opponents_on(player, cell).next()
    }

    /// Apply one move for the player on turn and settle the turn.
    ///
    /// On success the die is cleared. If the move earned an extra turn
    /// (release, capture, finish, or a 6) the same player rolls again,
    /// otherwise play passes to the next active player.
    ///
    /// # Errors
    ///
    /// [`EngineError::GameOver`] once a winner exists, or
    /// [`EngineError::IllegalMove`] if the move is refused. Nothing is
    /// mutated on error.
    pub fn apply_move(&mut self, player: Color, piece: PieceId) -> EngineResult<MoveOutcome> {
        if self.game_over {
            return Err(EngineError::GameOver);
        }
        self.check_move(player, piece)
            .map_err(|reason| EngineError::IllegalMove { player, piece, reason })?;

        let die = self.dice_value;
        let illegal = |reason| EngineError::IllegalMove { player, piece, reason };
        let before = self.piece(player, piece).ok_or(illegal(IllegalMoveReason::UnknownPiece))?.state();
        let landing = self
            .landing(player, piece, die)
            .ok_or(illegal(IllegalMoveReason::Finished))?;

        let mut action = match (before, landing) {
            (PieceState::InBase, _) => MoveAction::Start,
            (PieceState::OnTrack(_), Square::Stretch(_)) => MoveAction::EnterHomeStretch,
            _ => MoveAction::Move,
        };

        let mut captured = None;
        match landing {
            Square::Track(cell) => {
                if action != MoveAction::Start {
                    captured = self.resolve_capture(player, cell);
                    if captured.is_some() {
                        action = MoveAction::Capture;
                    }
                }
                if let Some(p) = self.piece_mut(player, piece) {
                    p.place_on_track(cell);
                }
            }
            Square::Stretch(pos) => {
                if let Some(p) = self.piece_mut(player, piece) {
                    p.place_in_stretch(pos);
                }
                if pos == HOME_POSITION {
                    action = MoveAction::Finish;
                }
            }
        }

        let mut winner = None;
        if action == MoveAction::Finish && self.all_finished(player) {
            action = MoveAction::Win;
            winner = Some(player);
            self.winner = winner;
            self.game_over = true;
        }

        let extra_turn = !self.game_over
            && (matches!(action, MoveAction::Start | MoveAction::Capture | MoveAction::Finish)
                || die == RELEASE_ROLL);

        debug!(
            %player,
            piece,
            die,
            ?action,
            ?landing,
            extra_turn,
            "move applied"
        );

        if self.game_over || extra_turn {
            self.dice_value = 0;
        } else {
            self.rotate_turn();
        }

        Ok(MoveOutcome {
            player,
            piece,
            dice_value: die,
            action,
            new_position: landing,
            captured,
            extra_turn,
            winner,
        })
    }

    /// Send the first opponent found on `cell` back to base.
    fn resolve_capture(&mut self, player: Color, cell: u8) -> Option<CapturedPiece> {
        let (victim, id) = self.capture_target(player, cell)?;
        self.piece_mut(victim, id)?.send_to_base();
        debug!(%player, %victim, piece = id, cell, "capture");
        Some(CapturedPiece {
            player: victim,
            piece: id,
            cell,
        })
    }
}
