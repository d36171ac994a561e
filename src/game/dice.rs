//! Dice sources.

use std::collections::VecDeque;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Number of faces on the die.
pub const DIE_FACES: u8 = 6;

/// Consecutive sixes that forfeit the turn.
pub const MAX_CONSECUTIVE_SIXES: u8 = 3;

/// Result of a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceRoll {
    /// Face shown, `1..=6`.
    pub value: u8,
    /// The roll completed a streak of three sixes and the turn was lost.
    pub forfeited: bool,
}

/// Something that produces die faces.
pub trait DiceSource {
    /// Next face in `1..=6`.
    fn roll(&mut self) -> u8;
}

/// Uniform dice from a seeded PRNG. Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: SmallRng,
}

impl SeededDice {
    /// Dice seeded with `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl DiceSource for SeededDice {
    fn roll(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_FACES)
    }
}

/// Dice that replay a fixed script.
///
/// Once the script runs out the dice fall back to `1`, the face that never
/// releases a piece or extends a six streak.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
}

impl ScriptedDice {
    /// Dice that return `faces` in order. Values are clamped to `1..=6`.
    #[must_use]
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: faces.into_iter().map(|f| f.clamp(1, DIE_FACES)).collect(),
        }
    }

    /// Append more faces to the script.
    pub fn push(&mut self, face: u8) {
        self.faces.push_back(face.clamp(1, DIE_FACES));
    }

    /// Faces not yet rolled.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll(&mut self) -> u8 {
        self.faces.pop_front().unwrap_or(1)
    }
}
