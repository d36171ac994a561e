//! Piece records.

use serde::{Deserialize, Serialize};

use crate::game::board::{HOME_POSITION, TRACK_LEN};

/// Index of a piece within its color's four pieces.
pub type PieceId = u8;

/// Pieces per color.
pub const PIECES_PER_PLAYER: usize = 4;

/// A single piece.
///
/// The raw fields mirror the snapshot format; use [`Piece::state`] to read
/// them as one of the mutually exclusive piece states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Piece {
    /// Stable index within the owner's pieces.
    pub id: PieceId,
    /// Track cell, or `-1` while in base.
    pub position: i8,
    /// Whether the piece turned into its home stretch.
    pub in_home_stretch: bool,
    /// Stretch position `0..=5`, `-1` outside the stretch.
    pub home_stretch_position: i8,
    /// Reached home. Terminal.
    pub finished: bool,
}

/// Typed view of a piece's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceState {
    /// Waiting in base for a 6.
    InBase,
    /// On the shared track at this cell.
    OnTrack(u8),
    /// In the private stretch at this position (`0..5`).
    InHomeStretch(u8),
    /// Home.
    Finished,
}

impl Piece {
    /// A piece waiting in base.
    #[must_use]
    pub const fn new(id: PieceId) -> Self {
        Self {
            id,
            position: -1,
            in_home_stretch: false,
            home_stretch_position: -1,
            finished: false,
        }
    }

    /// Lifecycle state derived from the raw fields.
    ///
    /// Out-of-range raw values (only possible in a hand-built or corrupt
    /// snapshot) are folded back into range: a stretch position below `0`
    /// reads as the stretch entry, one at or past home as finished, and a
    /// track cell wraps around the track. [`super::check_invariants`] reports
    /// such pieces.
    #[must_use]
    pub fn state(&self) -> PieceState {
        if self.finished {
            return PieceState::Finished;
        }
        if self.in_home_stretch {
            return match u8::try_from(self.home_stretch_position) {
                Ok(pos) if pos >= HOME_POSITION => PieceState::Finished,
                Ok(pos) => PieceState::InHomeStretch(pos),
                Err(_) => PieceState::InHomeStretch(0),
            };
        }
        match u8::try_from(self.position) {
            Ok(cell) => PieceState::OnTrack(cell % TRACK_LEN),
            Err(_) => PieceState::InBase,
        }
    }

    /// Track cell if the piece is on the shared track.
    #[must_use]
    pub fn track_cell(&self) -> Option<u8> {
        match self.state() {
            PieceState::OnTrack(cell) => Some(cell),
            _ => None,
        }
    }

    /// Put the piece on a track cell.
    #[allow(clippy::cast_possible_wrap)]
    pub fn place_on_track(&mut self, cell: u8) {
        self.position = cell as i8;
        self.in_home_stretch = false;
        self.home_stretch_position = -1;
    }

    /// Move the piece into (or along) its stretch, finishing it at home.
    #[allow(clippy::cast_possible_wrap)]
    pub fn place_in_stretch(&mut self, stretch_position: u8) {
        self.in_home_stretch = true;
        self.home_stretch_position = stretch_position as i8;
        if stretch_position == HOME_POSITION {
            self.finished = true;
        }
    }

    /// Return the piece to base, clearing all progress.
    pub fn send_to_base(&mut self) {
        *self = Self::new(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_fields_stay_in_range() {
        let mut piece = Piece::new(0);
        piece.in_home_stretch = true;
        piece.home_stretch_position = -1;
        assert_eq!(piece.state(), PieceState::InHomeStretch(0));

        piece.home_stretch_position = 9;
        assert_eq!(piece.state(), PieceState::Finished);

        let mut piece = Piece::new(1);
        piece.position = 60;
        assert_eq!(piece.state(), PieceState::OnTrack(8));
        piece.position = -7;
        assert_eq!(piece.state(), PieceState::InBase);
    }

    #[test]
    fn test_piece_lifecycle() {
        let mut piece = Piece::new(1);
        assert_eq!(piece.state(), PieceState::InBase);

        piece.place_on_track(13);
        assert_eq!(piece.state(), PieceState::OnTrack(13));
        assert_eq!(piece.track_cell(), Some(13));

        piece.place_in_stretch(2);
        assert_eq!(piece.state(), PieceState::InHomeStretch(2));
        assert_eq!(piece.track_cell(), None);
        assert!(!piece.finished);

        piece.place_in_stretch(HOME_POSITION);
        assert_eq!(piece.state(), PieceState::Finished);
    }

    #[test]
    fn test_send_to_base_clears_flags() {
        let mut piece = Piece::new(3);
        piece.place_on_track(40);
        piece.send_to_base();
        assert_eq!(piece, Piece::new(3));
    }

    #[test]
    fn test_snapshot_field_names() {
        let json = serde_json::to_string(&Piece::new(0)).unwrap();
        assert!(json.contains("\"inHomeStretch\":false"));
        assert!(json.contains("\"homeStretchPosition\":-1"));
    }
}
