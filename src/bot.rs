//! Heuristic move selection for computer-controlled players.
//!
//! Every legal move is classified by the single most valuable thing it
//! achieves, from [`MovePriority::Finish`] down to [`MovePriority::Plain`].
//! The score is the priority rank plus a uniform jitter smaller than the gap
//! between ranks, so the jitter only ever breaks ties between moves of the
//! same rank.

use std::cmp::Ordering;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::game::{Color, GameState, PieceId, PieceState, Square, distance_from_start, is_safe};

/// Travel distance beyond which a track piece counts as close to home.
pub const NEAR_HOME_DISTANCE: u8 = 40;

/// Largest jitter allowed; keeps jitter below the one-point gap between ranks.
pub const MAX_JITTER: f64 = 0.99;

/// What a move achieves, in increasing order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MovePriority {
    /// Nothing special.
    Plain = 0,
    /// Lands on a safe cell.
    SafeLanding = 1,
    /// Pushes a piece that is already far along its track.
    NearHome = 2,
    /// Releases a piece from base.
    Release = 3,
    /// Sends an opponent back to base.
    Capture = 4,
    /// Brings a piece home.
    Finish = 5,
}

impl MovePriority {
    /// Rank used as the integer part of a move's score.
    #[must_use]
    pub fn rank(self) -> f64 {
        f64::from(self as u8)
    }
}

/// Bot tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BotConfig {
    /// Upper bound of the uniform tie-break jitter, clamped to `0..=MAX_JITTER`.
    pub jitter: f64,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self { jitter: 0.5 }
    }
}

impl BotConfig {
    fn effective_jitter(&self) -> f64 {
        if self.jitter.is_nan() {
            0.0
        } else {
            self.jitter.clamp(0.0, MAX_JITTER)
        }
    }
}

/// Classify `player` moving `piece` with `die`.
///
/// Returns `None` if the piece cannot be moved with that die.
#[must_use]
pub fn classify_move(state: &GameState, player: Color, piece: PieceId, die: u8) -> Option<MovePriority> {
    state.check_piece(player, piece, die).ok()?;
    let before = state.piece(player, piece)?.state();
    let landing = state.landing(player, piece, die)?;

    let priority = match (before, landing) {
        (_, Square::Stretch(pos)) if pos == crate::game::HOME_POSITION => MovePriority::Finish,
        (PieceState::OnTrack(_), Square::Track(cell)) if state.capture_target(player, cell).is_some() => {
            MovePriority::Capture
        }
        (PieceState::InBase, _) => MovePriority::Release,
        (PieceState::OnTrack(cell), _) if distance_from_start(player, cell) > NEAR_HOME_DISTANCE => {
            MovePriority::NearHome
        }
        (_, Square::Track(cell)) if is_safe(cell) => MovePriority::SafeLanding,
        _ => MovePriority::Plain,
    };
    Some(priority)
}

/// Pick a piece for the player on turn, or `None` if nothing can move.
///
/// A single legal move is returned without scoring.
pub fn choose_move<R: Rng>(state: &GameState, config: &BotConfig, rng: &mut R) -> Option<PieceId> {
    let player = state.current_player();
    let legal = state.legal_moves(player);
    if legal.len() <= 1 {
        return legal.first().copied();
    }

    let die = state.dice_value;
    let jitter = config.effective_jitter();

    legal
        .into_iter()
        .filter_map(|piece| {
            let priority = classify_move(state, player, piece, die)?;
            let noise = if jitter > 0.0 { rng.gen_range(0.0..jitter) } else { 0.0 };
            Some((piece, priority.rank() + noise))
        })
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(Ordering::Equal))
        .map(|(piece, _)| piece)
}

/// A heuristic player with its own seeded randomness.
#[derive(Debug, Clone)]
pub struct HeuristicBot {
    config: BotConfig,
    rng: SmallRng,
}

impl HeuristicBot {
    /// A bot whose tie-breaks are seeded with `seed`.
    #[must_use]
    pub fn new(config: BotConfig, seed: u64) -> Self {
        Self {
            config,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Pick a piece for the player on turn.
    pub fn choose(&mut self, state: &GameState) -> Option<PieceId> {
        choose_move(state, &self.config, &mut self.rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{ActivePlayers, HOME_POSITION};

    fn state() -> GameState {
        GameState::new(ActivePlayers::new(&[Color::Red, Color::Green]).unwrap())
    }

    fn put(state: &mut GameState, color: Color, id: PieceId, cell: u8) {
        state.pieces[color.index()][usize::from(id)].place_on_track(cell);
    }

    #[test]
    fn test_classification() {
        let mut s = state();
        put(&mut s, Color::Red, 0, 46); // 46 + 4 = 50, still on track, near home
        put(&mut s, Color::Red, 1, 10); // 10 + 4 = 14, plain
        put(&mut s, Color::Red, 2, 4); // 4 + 4 = 8, safe
        s.pieces[Color::Red.index()][3].place_in_stretch(1); // 1 + 4 = 5, home

        assert_eq!(classify_move(&s, Color::Red, 0, 4), Some(MovePriority::NearHome));
        assert_eq!(classify_move(&s, Color::Red, 1, 4), Some(MovePriority::Plain));
        assert_eq!(classify_move(&s, Color::Red, 2, 4), Some(MovePriority::SafeLanding));
        assert_eq!(classify_move(&s, Color::Red, 3, 4), Some(MovePriority::Finish));
    }

    #[test]
    fn test_capture_classification_respects_safe_cells() {
        let mut s = state();
        put(&mut s, Color::Red, 0, 18);
        put(&mut s, Color::Green, 0, 20);
        put(&mut s, Color::Red, 1, 5);
        put(&mut s, Color::Green, 1, 8);

        assert_eq!(classify_move(&s, Color::Red, 0, 2), Some(MovePriority::Capture));
        assert_eq!(classify_move(&s, Color::Red, 1, 3), Some(MovePriority::SafeLanding));
    }

    #[test]
    fn test_illegal_move_unclassified() {
        let s = state();
        assert_eq!(classify_move(&s, Color::Red, 0, 5), None);
        assert_eq!(classify_move(&s, Color::Red, 0, 6), Some(MovePriority::Release));
    }

    #[test]
    fn test_priority_order() {
        assert!(MovePriority::Finish > MovePriority::Capture);
        assert!(MovePriority::Capture > MovePriority::Release);
        assert!(MovePriority::Release > MovePriority::NearHome);
        assert!(MovePriority::NearHome > MovePriority::SafeLanding);
        assert!(MovePriority::SafeLanding > MovePriority::Plain);
        assert!(MovePriority::Plain.rank() + MAX_JITTER < MovePriority::SafeLanding.rank());
    }

    #[test]
    fn test_single_move_short_circuits() {
        let mut s = state();
        put(&mut s, Color::Red, 2, 10);
        s.dice_value = 3;
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(choose_move(&s, &BotConfig::default(), &mut rng), Some(2));
    }

    #[test]
    fn test_no_move() {
        let mut s = state();
        s.dice_value = 3;
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(choose_move(&s, &BotConfig::default(), &mut rng), None);
    }

    #[test]
    fn test_prefers_finish_over_capture() {
        let mut s = state();
        put(&mut s, Color::Red, 0, 18);
        put(&mut s, Color::Green, 0, 20);
        s.pieces[Color::Red.index()][1].place_in_stretch(HOME_POSITION - 2);
        s.dice_value = 2;

        let mut bot = HeuristicBot::new(BotConfig::default(), 7);
        for _ in 0..50 {
            assert_eq!(bot.choose(&s), Some(1));
        }
    }

    #[test]
    fn test_prefers_capture_over_release() {
        let mut s = state();
        put(&mut s, Color::Red, 0, 14);
        put(&mut s, Color::Green, 0, 20);
        s.dice_value = 6;

        let mut bot = HeuristicBot::new(BotConfig::default(), 3);
        for _ in 0..50 {
            assert_eq!(bot.choose(&s), Some(0));
        }
    }

    #[test]
    fn test_ties_are_not_always_first() {
        let mut s = state();
        // Four pieces in base, a 6: every move is an equal-ranked release
        s.dice_value = 6;
        let mut bot = HeuristicBot::new(BotConfig::default(), 11);
        let mut picked = [false; 4];
        for _ in 0..200 {
            if let Some(id) = bot.choose(&s) {
                picked[usize::from(id)] = true;
            }
        }
        assert!(picked.iter().filter(|&&p| p).count() > 1, "{picked:?}");
    }

    #[test]
    fn test_zero_jitter_is_deterministic() {
        let mut s = state();
        s.dice_value = 6;
        let config = BotConfig { jitter: 0.0 };
        let mut bot = HeuristicBot::new(config, 11);
        let first = bot.choose(&s);
        for _ in 0..20 {
            assert_eq!(bot.choose(&s), first);
        }
    }
}
