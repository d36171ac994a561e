//! Game state management.

use serde::{Deserialize, Serialize};

use crate::game::{
    ActivePlayers, Color, NUM_COLORS, PIECES_PER_PLAYER, Piece, PieceId, PieceState, TURN_ORDER,
};

/// Where the current turn stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnPhase {
    /// The player on turn has to roll.
    AwaitingRoll,
    /// A die is showing and the player has to pick a piece (or pass).
    AwaitingMove,
    /// A player has won. Only a reset leaves this phase.
    GameOver,
}

/// Complete game state.
///
/// Owned by a single [`crate::LudoEngine`]; hosts read it through
/// [`crate::LudoEngine::state`] and never mutate it directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Colors taking part.
    pub active_players: ActivePlayers,
    /// Seat index into [`TURN_ORDER`] of the player on turn.
    pub current_player_index: u8,
    /// Face showing, `0` when the player on turn has not rolled yet.
    pub dice_value: u8,
    /// Sixes rolled in a row by the player on turn.
    pub consecutive_sixes: u8,
    /// Set once a player has all four pieces home.
    pub game_over: bool,
    /// The first player to bring all four pieces home.
    pub winner: Option<Color>,
    /// Pieces indexed by seat, then by piece id. Inactive seats keep their pieces in base.
    pub pieces: [[Piece; PIECES_PER_PLAYER]; NUM_COLORS],
}

impl GameState {
    /// A fresh game: every piece in base, the first listed player on turn.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(active_players: ActivePlayers) -> Self {
        let first = active_players.first().map_or(0, Color::index);
        Self {
            active_players,
            current_player_index: first as u8,
            dice_value: 0,
            consecutive_sixes: 0,
            game_over: false,
            winner: None,
            pieces: [Self::fresh_pieces(); NUM_COLORS],
        }
    }

    fn fresh_pieces() -> [Piece; PIECES_PER_PLAYER] {
        [Piece::new(0), Piece::new(1), Piece::new(2), Piece::new(3)]
    }

    /// Player on turn.
    #[must_use]
    pub fn current_player(&self) -> Color {
        TURN_ORDER[usize::from(self.current_player_index) % NUM_COLORS]
    }

    /// Turn micro-state.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        if self.game_over {
            TurnPhase::GameOver
        } else if self.dice_value == 0 {
            TurnPhase::AwaitingRoll
        } else {
            TurnPhase::AwaitingMove
        }
    }

    /// Check if the game is over.
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// All four pieces of `color`.
    #[must_use]
    pub fn pieces(&self, color: Color) -> &[Piece; PIECES_PER_PLAYER] {
        &self.pieces[color.index()]
    }

    /// A single piece, if `id` is in range.
    #[must_use]
    pub fn piece(&self, color: Color, id: PieceId) -> Option<&Piece> {
        self.pieces[color.index()].get(usize::from(id))
    }

    /// Mutable access to a single piece.
    #[must_use]
    pub fn piece_mut(&mut self, color: Color, id: PieceId) -> Option<&mut Piece> {
        self.pieces[color.index()].get_mut(usize::from(id))
    }

    /// Number of `color`'s pieces that reached home.
    #[must_use]
    pub fn finished_count(&self, color: Color) -> usize {
        self.pieces(color).iter().filter(|p| p.finished).count()
    }

    /// Whether every piece of `color` is home.
    #[must_use]
    pub fn all_finished(&self, color: Color) -> bool {
        self.finished_count(color) == PIECES_PER_PLAYER
    }

    /// Number of `color`'s pieces still in base.
    #[must_use]
    pub fn in_base_count(&self, color: Color) -> usize {
        self.pieces(color)
            .iter()
            .filter(|p| p.state() == PieceState::InBase)
            .count()
    }

    /// Active opponents of `color` standing on track `cell`, in seating order.
    pub fn opponents_on(&self, color: Color, cell: u8) -> impl Iterator<Item = (Color, PieceId)> + '_ {
        self.active_players
            .iter()
            .filter(move |&other| other != color)
            .flat_map(move |other| {
                self.pieces(other)
                    .iter()
                    .filter(move |p| p.track_cell() == Some(cell))
                    .map(move |p| (other, p.id))
            })
    }
}
