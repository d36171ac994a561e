//! Turn scheduling: whose turn it is, six streaks, and turn hand-over.

use tracing::{debug, warn};

use crate::game::dice::{DiceRoll, MAX_CONSECUTIVE_SIXES};
use crate::game::{GameState, NUM_COLORS, RELEASE_ROLL};

impl GameState {
    /// Whether a new roll may be taken right now.
    #[must_use]
    pub const fn can_roll(&self) -> bool {
        !self.game_over && self.dice_value == 0
    }

    /// Record a freshly rolled `value` for the player on turn.
    ///
    /// Returns `None` (and changes nothing) when the game is over or the
    /// previous roll has not been used yet. A third six in a row forfeits the
    /// turn: the streak resets and play passes to the next active player.
    pub fn register_roll(&mut self, value: u8) -> Option<DiceRoll> {
        if !self.can_roll() {
            return None;
        }

        self.dice_value = value;
        if value == RELEASE_ROLL {
            self.consecutive_sixes += 1;
        } else {
            self.consecutive_sixes = 0;
        }

        let forfeited = self.consecutive_sixes >= MAX_CONSECUTIVE_SIXES;
        if forfeited {
            debug!(player = %self.current_player(), "third six in a row, turn forfeited");
            self.rotate_turn();
        }

        Some(DiceRoll { value, forfeited })
    }

    /// End the current roll.
    ///
    /// A 6 keeps the same player on turn; any other face hands the turn to
    /// the next active player. Either way the die is cleared for a new roll.
    /// No-op once the game is over.
    pub fn advance_turn(&mut self) {
        if self.game_over {
            return;
        }
        if self.dice_value == RELEASE_ROLL {
            self.dice_value = 0;
        } else {
            self.rotate_turn();
        }
    }

    /// Hand the turn to the next active player unconditionally.
    ///
    /// Clears the die and the six streak.
    pub(crate) fn rotate_turn(&mut self) {
        let previous = self.current_player();
        self.current_player_index = self.next_active_index();
        self.dice_value = 0;
        self.consecutive_sixes = 0;
        debug!(from = %previous, to = %self.current_player(), "turn passed");
    }

    /// Seat index of the next active player after the current one.
    ///
    /// Walks the fixed seat order at most once around the table. If no active
    /// seat is found the active set is corrupt; the pointer snaps to the
    /// first active player (or seat 0) and the anomaly is logged.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn next_active_index(&self) -> u8 {
        let mut index = usize::from(self.current_player_index);
        for _ in 0..NUM_COLORS {
            index = (index + 1) % NUM_COLORS;
            if self.active_players.contains_index(index) {
                return index as u8;
            }
        }

        let fallback = self.active_players.first().map_or(0, |c| c.index());
        warn!(
            current = self.current_player_index,
            fallback, "no active seat found while advancing the turn"
        );
        fallback as u8
    }

    /// Snap the turn pointer onto an active seat if it points elsewhere.
    ///
    /// Returns `true` if the pointer had to be moved.
    #[allow(clippy::cast_possible_truncation)]
    pub fn normalize_turn_pointer(&mut self) -> bool {
        if self.active_players.contains_index(usize::from(self.current_player_index)) {
            return false;
        }
        let fallback = self.active_players.first().map_or(0, |c| c.index());
        warn!(
            current = self.current_player_index,
            fallback, "turn pointer on an inactive seat, falling back to first active player"
        );
        self.current_player_index = fallback as u8;
        self.dice_value = 0;
        self.consecutive_sixes = 0;
        true
    }
}
