//! The rules engine: the one object hosts and bots drive a game through.

use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::game::{
    ActivePlayers, Color, DiceRoll, DiceSource, GameState, MoveOutcome, PieceId, SeededDice,
    TurnPhase, check_invariants,
};

/// A single Ludo game.
///
/// Owns the [`GameState`] and the dice. All mutation goes through the
/// methods below; [`LudoEngine::state`] hands out a shared borrow only.
/// The engine has no internal locking: a host that drives one engine from
/// several threads must serialize the calls itself.
#[derive(Debug, Clone)]
pub struct LudoEngine<D = SeededDice> {
    state: GameState,
    dice: D,
}

impl LudoEngine<SeededDice> {
    /// A game for `players` with dice seeded from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] for an empty, undersized, or
    /// duplicated player list.
    pub fn new(players: &[Color], seed: u64) -> EngineResult<Self> {
        let players = ActivePlayers::new(players)?;
        Ok(Self::with_dice(players, SeededDice::new(seed)))
    }
}

impl<D: DiceSource> LudoEngine<D> {
    /// A fresh game for an already validated player set.
    #[must_use]
    pub fn with_dice(players: ActivePlayers, dice: D) -> Self {
        Self {
            state: GameState::new(players),
            dice,
        }
    }

    /// Resume from a snapshot.
    ///
    /// A turn pointer that does not sit on an active seat is moved to the
    /// first listed player. Any other broken invariant rejects the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidSnapshot`] with the number of violations
    /// found by [`check_invariants`]; each one is logged at `warn`.
    pub fn from_state(mut state: GameState, dice: D) -> EngineResult<Self> {
        state.normalize_turn_pointer();
        let violations = check_invariants(&state);
        if !violations.is_empty() {
            for violation in &violations {
                warn!(%violation, "rejecting snapshot");
            }
            return Err(EngineError::InvalidSnapshot(violations.len()));
        }
        Ok(Self { state, dice })
    }

    /// Start over with every piece in base.
    ///
    /// `None` keeps the current player set.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Configuration`] if `players` is invalid. The
    /// running game is left untouched in that case.
    pub fn reset(&mut self, players: Option<&[Color]>) -> EngineResult<()> {
        let players = match players {
            Some(list) => ActivePlayers::new(list)?,
            None => self.state.active_players,
        };
        info!(%players, "game reset");
        self.state = GameState::new(players);
        Ok(())
    }

    /// Roll for the player on turn.
    ///
    /// Returns `None` once the game is over, or while the previous roll is
    /// still waiting for a move or pass. A third six in a row comes back
    /// with `forfeited` set and the turn already handed on.
    pub fn roll_dice(&mut self) -> Option<DiceRoll> {
        if !self.state.can_roll() {
            return None;
        }
        let player = self.state.current_player();
        let roll = self.state.register_roll(self.dice.roll())?;
        debug!(%player, value = roll.value, forfeited = roll.forfeited, "dice rolled");
        Some(roll)
    }

    /// Pieces `player` can move with the die showing.
    #[must_use]
    pub fn legal_moves(&self, player: Color) -> Vec<PieceId> {
        self.state.legal_moves(player)
    }

    /// Whether `player` may move `piece` now.
    #[must_use]
    pub fn is_legal(&self, player: Color, piece: PieceId) -> bool {
        self.state.is_legal(player, piece)
    }

    /// Move `piece` for `player` with the die showing.
    ///
    /// # Errors
    ///
    /// [`EngineError::IllegalMove`] if the move is refused,
    /// [`EngineError::GameOver`] once a winner exists.
    pub fn move_piece(&mut self, player: Color, piece: PieceId) -> EngineResult<MoveOutcome> {
        let outcome = self.state.apply_move(player, piece)?;
        if let Some(winner) = outcome.winner {
            info!(%winner, "game won");
        }
        Ok(outcome)
    }

    /// End the current roll: a 6 keeps the player, anything else moves on.
    pub fn advance_turn(&mut self) {
        self.state.advance_turn();
    }

    /// Forfeit a roll that left the player without a legal move.
    ///
    /// The turn always passes, even on a 6.
    ///
    /// # Errors
    ///
    /// [`EngineError::GameOver`] once a winner exists,
    /// [`EngineError::NotRolled`] if no die is showing, and
    /// [`EngineError::MovesAvailable`] if the player could still move.
    pub fn pass_turn(&mut self) -> EngineResult<()> {
        if self.state.game_over {
            return Err(EngineError::GameOver);
        }
        if self.state.dice_value == 0 {
            return Err(EngineError::NotRolled);
        }
        let player = self.state.current_player();
        if !self.state.legal_moves(player).is_empty() {
            return Err(EngineError::MovesAvailable(player));
        }
        debug!(%player, die = self.state.dice_value, "no legal move, turn passed");
        self.state.rotate_turn();
        Ok(())
    }

    /// Read-only view of the game.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy of the game, for shipping to another process.
    #[must_use]
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    /// Player on turn.
    #[must_use]
    pub fn current_player(&self) -> Color {
        self.state.current_player()
    }

    /// Turn micro-state.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.state.phase()
    }

    /// Winner, once there is one.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        self.state.winner
    }

    /// Check if the game is over.
    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.state.game_over
    }

    /// The dice, e.g. to extend a scripted sequence.
    pub fn dice_mut(&mut self) -> &mut D {
        &mut self.dice
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, IllegalMoveReason};
    use crate::game::{MoveAction, ScriptedDice, Square};

    fn scripted(players: &[Color], faces: &[u8]) -> LudoEngine<ScriptedDice> {
        LudoEngine::with_dice(
            ActivePlayers::new(players).unwrap(),
            ScriptedDice::new(faces.iter().copied()),
        )
    }

    #[test]
    fn test_new_rejects_bad_players() {
        assert_eq!(
            LudoEngine::new(&[Color::Red], 1).unwrap_err(),
            EngineError::Configuration(ConfigError::TooFew(1))
        );
    }

    #[test]
    fn test_roll_move_cycle() {
        let mut engine = scripted(&[Color::Red, Color::Green], &[6, 3]);
        assert_eq!(engine.phase(), TurnPhase::AwaitingRoll);

        let roll = engine.roll_dice().unwrap();
        assert_eq!(roll.value, 6);
        assert_eq!(engine.phase(), TurnPhase::AwaitingMove);
        assert!(engine.roll_dice().is_none());

        let outcome = engine.move_piece(Color::Red, 0).unwrap();
        assert_eq!(outcome.action, MoveAction::Start);
        assert_eq!(engine.current_player(), Color::Red);

        engine.roll_dice().unwrap();
        let outcome = engine.move_piece(Color::Red, 0).unwrap();
        assert_eq!(outcome.new_position, Square::Track(3));
        assert_eq!(engine.current_player(), Color::Green);
    }

    #[test]
    fn test_pass_turn_requires_no_moves() {
        let mut engine = scripted(&[Color::Red, Color::Green], &[6, 2]);
        assert_eq!(engine.pass_turn(), Err(EngineError::NotRolled));

        engine.roll_dice();
        assert_eq!(engine.pass_turn(), Err(EngineError::MovesAvailable(Color::Red)));
        engine.move_piece(Color::Red, 1).unwrap();

        engine.roll_dice();
        // Piece 1 is on the track, so a 2 still moves it
        assert_eq!(engine.legal_moves(Color::Red), vec![1]);
    }

    #[test]
    fn test_no_legal_move_passes_without_reroll() {
        let mut engine = scripted(&[Color::Red, Color::Green], &[4]);
        engine.roll_dice();
        assert!(engine.legal_moves(Color::Red).is_empty());
        engine.pass_turn().unwrap();
        assert_eq!(engine.current_player(), Color::Green);
        assert_eq!(engine.state().dice_value, 0);
    }

    #[test]
    fn test_wrong_player_rejected() {
        let mut engine = scripted(&[Color::Red, Color::Green], &[6]);
        engine.roll_dice();
        let err = engine.move_piece(Color::Green, 0).unwrap_err();
        assert_eq!(
            err,
            EngineError::IllegalMove {
                player: Color::Green,
                piece: 0,
                reason: IllegalMoveReason::NotYourTurn
            }
        );
    }

    #[test]
    fn test_reset_restores_fresh_state() {
        let mut engine = scripted(&[Color::Red, Color::Green], &[6]);
        engine.roll_dice();
        engine.move_piece(Color::Red, 0).unwrap();

        engine.reset(Some(&[Color::Yellow, Color::Blue])).unwrap();
        assert_eq!(engine.current_player(), Color::Yellow);
        assert_eq!(engine.state().pieces(Color::Red)[0].position, -1);

        assert!(engine.reset(Some(&[Color::Blue, Color::Blue])).is_err());
        assert_eq!(engine.current_player(), Color::Yellow);

        engine.reset(None).unwrap();
        assert_eq!(engine.state().active_players.to_vec(), vec![Color::Yellow, Color::Blue]);
    }

    #[test]
    fn test_from_state_fixes_turn_pointer() {
        let mut state = GameState::new(ActivePlayers::new(&[Color::Green, Color::Blue]).unwrap());
        state.current_player_index = 0;
        let engine = LudoEngine::from_state(state, ScriptedDice::default()).unwrap();
        assert_eq!(engine.current_player(), Color::Green);
    }

    #[test]
    fn test_from_state_rejects_corrupt_snapshot() {
        let mut state = GameState::new(ActivePlayers::new(&[Color::Red, Color::Green]).unwrap());
        let piece = &mut state.pieces[Color::Red.index()][0];
        piece.in_home_stretch = true;
        piece.home_stretch_position = -1;

        let err = LudoEngine::from_state(state, ScriptedDice::new([3])).unwrap_err();
        assert!(matches!(err, EngineError::InvalidSnapshot(n) if n > 0), "{err}");
    }

    #[test]
    fn test_from_state_rejects_corrupt_json() {
        let state = GameState::new(ActivePlayers::new(&[Color::Red, Color::Green]).unwrap());
        let mut json = serde_json::to_value(&state).unwrap();
        json["pieces"][0][1]["position"] = serde_json::json!(90);
        let corrupt: GameState = serde_json::from_value(json).unwrap();

        assert!(LudoEngine::from_state(corrupt, ScriptedDice::default()).is_err());
        assert!(LudoEngine::from_state(state, ScriptedDice::default()).is_ok());
    }

    #[test]
    fn test_snapshot_is_stable() {
        let mut engine = LudoEngine::new(&[Color::Red, Color::Blue], 9).unwrap();
        engine.roll_dice();
        assert_eq!(engine.snapshot(), engine.snapshot());
        assert_eq!(engine.state(), &engine.snapshot());
    }
}
