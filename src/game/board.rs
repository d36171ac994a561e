//! Board geometry: the shared track, safe cells, and per-color home stretches.
//!
//! ```text
//!  cell:   0 .......... 13 .......... 26 .......... 39 .......... 51
//!  start:  red          green        blue         yellow
//! ```
//!
//! Every color travels 51 cells from its start cell before turning into its
//! private home stretch; stretch positions run `0..=5`, with `5` being home.

use serde::{Deserialize, Serialize};

use crate::game::Color;

/// Number of cells on the shared circular track.
pub const TRACK_LEN: u8 = 52;

/// Travel distance at which a piece leaves the track for its home stretch.
pub const STRETCH_ENTRY_DISTANCE: u8 = 51;

/// Final home-stretch position. A piece reaching it is finished.
pub const HOME_POSITION: u8 = 5;

/// Cells where no capture can happen.
pub const SAFE_CELLS: [u8; 8] = [0, 8, 13, 21, 26, 34, 39, 47];

/// Die value required to release a piece from base.
pub const RELEASE_ROLL: u8 = 6;

/// Track cell a color's pieces are released onto.
#[must_use]
pub const fn start_cell(color: Color) -> u8 {
    match color {
        Color::Red => 0,
        Color::Green => 13,
        Color::Blue => 26,
        Color::Yellow => 39,
    }
}

/// Last track cell a color passes before turning into its stretch.
#[must_use]
pub const fn entry_cell(color: Color) -> u8 {
    (start_cell(color) + STRETCH_ENTRY_DISTANCE - 1) % TRACK_LEN
}

/// Whether `cell` grants immunity from capture.
#[must_use]
#[inline]
pub fn is_safe(cell: u8) -> bool {
    SAFE_CELLS.contains(&cell)
}

/// Cells travelled from `color`'s start cell to `cell`.
#[must_use]
#[inline]
pub const fn distance_from_start(color: Color, cell: u8) -> u8 {
    (cell % TRACK_LEN + TRACK_LEN - start_cell(color)) % TRACK_LEN
}

/// A place a piece can stand outside its base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind", content = "at")]
pub enum Square {
    /// Shared track cell `0..52`.
    Track(u8),
    /// Position in the owner's home stretch, `0..=5`.
    Stretch(u8),
}

/// Advance a piece of `color` sitting on `cell` by `steps`.
///
/// Never overflows; a stretch position past [`HOME_POSITION`] means the
/// move overshoots.
#[must_use]
pub const fn advance_on_track(color: Color, cell: u8, steps: u8) -> Square {
    let travelled = distance_from_start(color, cell).saturating_add(steps);
    if travelled >= STRETCH_ENTRY_DISTANCE {
        Square::Stretch(travelled - STRETCH_ENTRY_DISTANCE)
    } else {
        // travelled < 51, so the sum stays below 2 * TRACK_LEN
        Square::Track((cell % TRACK_LEN + steps) % TRACK_LEN)
    }
}
