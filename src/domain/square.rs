//! Cell index ↔ square notation.
//!
//! The remote authority numbers cells so that the low three bits run from
//! file `h` down to file `a`: index 0 is `h1`, index 7 is `a1`, index 63 is
//! `a8`. Moves must be sent in this notation for the authority to accept
//! them.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::mask::BoardMask;
use crate::error::SquareError;

pub type CellIndex = usize;

pub const BOARD_SIDE: usize = 8;
pub const CELL_COUNT: usize = BOARD_SIDE * BOARD_SIDE;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// File letter, `'a'..='h'`.
    pub fn file(&self) -> char {
        self.file as char
    }

    /// Rank number, `1..=8`.
    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn index(&self) -> CellIndex {
        let col = (b'h' - self.file) as usize;
        let row = (self.rank - 1) as usize;
        row * BOARD_SIDE + col
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file as char, self.rank)
    }
}

impl From<Square> for String {
    fn from(square: Square) -> Self {
        square.to_string()
    }
}

impl FromStr for Square {
    type Err = SquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(SquareError::Format(s.to_string()));
        };

        let file_lower = file.to_ascii_lowercase();
        if !('a'..='h').contains(&file_lower) {
            return Err(SquareError::File(file));
        }
        if !('1'..='8').contains(&rank) {
            return Err(SquareError::Rank(rank));
        }

        Ok(Square {
            file: file_lower as u8,
            rank: rank as u8 - b'0',
        })
    }
}

/// Panics if `index` is not a board cell.
pub fn cell_to_square(index: CellIndex) -> Square {
    assert!(index < CELL_COUNT, "cell index {index} out of range");
    Square {
        file: b'h' - (index % BOARD_SIDE) as u8,
        rank: (index / BOARD_SIDE) as u8 + 1,
    }
}

pub fn square_to_index(square: &str) -> Result<CellIndex, SquareError> {
    square.parse::<Square>().map(|sq| sq.index())
}

pub fn bit_at(mask: BoardMask, index: CellIndex) -> u8 {
    mask.get_bit(index) as u8
}
