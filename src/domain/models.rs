use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    Black,
    White,
}

impl Player {
    /// Disc glyph, the same one the status line uses.
    pub fn symbol(&self) -> &'static str {
        match self {
            Player::Black => "●",
            Player::White => "○",
        }
    }
}

/// What a view slot currently shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Occupant {
    #[default]
    Empty,
    Disc(Player),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct PieceCount {
    pub black: u32,
    pub white: u32,
}

impl fmt::Display for PieceCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Black-{}   White-{}", self.black, self.white)
    }
}

/// The status line. Only ever one of these two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TurnStatus {
    BlackToMove,
    WhiteToMove,
}

impl TurnStatus {
    pub fn from_black_turn(black_turn: bool) -> Self {
        if black_turn {
            TurnStatus::BlackToMove
        } else {
            TurnStatus::WhiteToMove
        }
    }

    pub fn text(&self) -> &'static str {
        match self {
            TurnStatus::BlackToMove => "Black's turn (●)",
            TurnStatus::WhiteToMove => "White's turn (○)",
        }
    }
}

impl fmt::Display for TurnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_text_tracks_turn() {
        assert_eq!(TurnStatus::from_black_turn(true).text(), "Black's turn (●)");
        assert_eq!(TurnStatus::from_black_turn(false).text(), "White's turn (○)");
    }

    #[test]
    fn count_text_layout() {
        let count = PieceCount { black: 2, white: 3 };
        assert_eq!(count.to_string(), "Black-2   White-3");
    }

    #[test]
    fn glyphs_match_status_line() {
        assert!(TurnStatus::BlackToMove.text().contains(Player::Black.symbol()));
        assert!(TurnStatus::WhiteToMove.text().contains(Player::White.symbol()));
    }
}
