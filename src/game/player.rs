//! Player colors and the active-player set.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Number of seats around the board.
pub const NUM_COLORS: usize = 4;

/// A player, identified by the color of their pieces.
///
/// The discriminant is the seat's index in [`TURN_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    /// Seat 0.
    Red = 0,
    /// Seat 1.
    Green = 1,
    /// Seat 2.
    Yellow = 2,
    /// Seat 3.
    Blue = 3,
}

/// Fixed turn order. Play always rotates through this sequence.
pub const TURN_ORDER: [Color; NUM_COLORS] = [Color::Red, Color::Green, Color::Yellow, Color::Blue];

impl Color {
    /// Seat index in [`TURN_ORDER`].
    #[must_use]
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Color seated at `index`, if any.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Red),
            1 => Some(Self::Green),
            2 => Some(Self::Yellow),
            3 => Some(Self::Blue),
            _ => None,
        }
    }

    /// Lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Blue => "blue",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "red" | "r" => Ok(Self::Red),
            "green" | "g" => Ok(Self::Green),
            "yellow" | "y" => Ok(Self::Yellow),
            "blue" | "b" => Ok(Self::Blue),
            other => Err(format!("unknown color '{other}' (expected red, green, yellow or blue)")),
        }
    }
}

/// Validated, ordered set of 2-4 distinct colors taking part in a game.
///
/// The order the colors were given in is kept: the first color opens the
/// game and iteration follows the same order. Turn rotation itself always
/// walks [`TURN_ORDER`], skipping seats that are not playing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Color>", into = "Vec<Color>")]
pub struct ActivePlayers {
    order: [Color; NUM_COLORS],
    len: u8,
    seats: [bool; NUM_COLORS],
}

impl ActivePlayers {
    /// Build the set, rejecting empty, undersized, or duplicated lists.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first problem found.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(colors: &[Color]) -> Result<Self, ConfigError> {
        if colors.is_empty() {
            return Err(ConfigError::Empty);
        }

        let mut order = TURN_ORDER;
        let mut seats = [false; NUM_COLORS];
        for (slot, &color) in colors.iter().enumerate() {
            if seats[color.index()] {
                return Err(ConfigError::Duplicate(color));
            }
            seats[color.index()] = true;
            order[slot] = color;
        }

        if colors.len() < 2 {
            return Err(ConfigError::TooFew(colors.len()));
        }

        // Unused slots are padding; keep them canonical so equality only
        // depends on the listed colors.
        for slot in &mut order[colors.len()..] {
            *slot = Color::Red;
        }

        Ok(Self {
            order,
            len: colors.len() as u8,
            seats,
        })
    }

    /// All four colors, in turn order.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn all() -> Self {
        Self {
            order: TURN_ORDER,
            len: NUM_COLORS as u8,
            seats: [true; NUM_COLORS],
        }
    }

    /// Whether `color` is playing.
    #[must_use]
    #[inline]
    pub const fn contains(&self, color: Color) -> bool {
        self.seats[color.index()]
    }

    /// Whether the seat at `index` is occupied by an active color.
    #[must_use]
    #[inline]
    pub fn contains_index(&self, index: usize) -> bool {
        self.seats.get(index).copied().unwrap_or(false)
    }

    /// Color that was listed first. It opens the game.
    #[must_use]
    pub fn first(&self) -> Option<Color> {
        self.iter().next()
    }

    /// Number of active colors.
    #[must_use]
    pub fn len(&self) -> usize {
        usize::from(self.len)
    }

    /// Whether no color is active. Never true for a set built through [`Self::new`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Active colors in the order they were given.
    pub fn iter(&self) -> impl Iterator<Item = Color> + '_ {
        self.order[..self.len()].iter().copied()
    }

    /// Active colors in the order they were given, collected.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Color> {
        self.iter().collect()
    }
}

impl Default for ActivePlayers {
    fn default() -> Self {
        Self::all()
    }
}

impl TryFrom<Vec<Color>> for ActivePlayers {
    type Error = ConfigError;

    fn try_from(colors: Vec<Color>) -> Result<Self, Self::Error> {
        Self::new(&colors)
    }
}

impl From<ActivePlayers> for Vec<Color> {
    fn from(players: ActivePlayers) -> Self {
        players.to_vec()
    }
}

impl std::fmt::Display for ActivePlayers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(Color::name).collect();
        f.write_str(&names.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_index_roundtrip() {
        for (i, color) in TURN_ORDER.iter().enumerate() {
            assert_eq!(color.index(), i);
            assert_eq!(Color::from_index(i), Some(*color));
        }
        assert_eq!(Color::from_index(4), None);
    }

    #[test]
    fn test_color_parse() {
        assert_eq!("Red".parse::<Color>(), Ok(Color::Red));
        assert_eq!(" y ".parse::<Color>(), Ok(Color::Yellow));
        assert!("purple".parse::<Color>().is_err());
    }

    #[test]
    fn test_active_players_keep_given_order() {
        let players = ActivePlayers::new(&[Color::Blue, Color::Red]).unwrap();
        assert_eq!(players.to_vec(), vec![Color::Blue, Color::Red]);
        assert_eq!(players.first(), Some(Color::Blue));
        assert_eq!(players.len(), 2);
        assert!(players.contains(Color::Red));
        assert!(!players.contains(Color::Green));
        assert_ne!(players, ActivePlayers::new(&[Color::Red, Color::Blue]).unwrap());
    }

    #[test]
    fn test_all_players_in_turn_order() {
        assert_eq!(ActivePlayers::all().to_vec(), TURN_ORDER.to_vec());
        assert_eq!(ActivePlayers::all(), ActivePlayers::new(&TURN_ORDER).unwrap());
    }

    #[test]
    fn test_active_players_rejects_bad_input() {
        assert_eq!(ActivePlayers::new(&[]), Err(ConfigError::Empty));
        assert_eq!(ActivePlayers::new(&[Color::Red]), Err(ConfigError::TooFew(1)));
        assert_eq!(
            ActivePlayers::new(&[Color::Red, Color::Green, Color::Red]),
            Err(ConfigError::Duplicate(Color::Red))
        );
    }

    #[test]
    fn test_active_players_serde() {
        let players = ActivePlayers::new(&[Color::Green, Color::Yellow]).unwrap();
        let json = serde_json::to_string(&players).unwrap();
        assert_eq!(json, r#"["green","yellow"]"#);
        let back: ActivePlayers = serde_json::from_str(&json).unwrap();
        assert_eq!(back, players);
        assert!(serde_json::from_str::<ActivePlayers>(r#"["red"]"#).is_err());

        let reordered = ActivePlayers::new(&[Color::Blue, Color::Green]).unwrap();
        assert_eq!(serde_json::to_string(&reordered).unwrap(), r#"["blue","green"]"#);
    }
}
