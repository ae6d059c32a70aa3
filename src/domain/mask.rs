use std::fmt;
use std::ops::BitAnd;

use crate::domain::square::{CELL_COUNT, CellIndex};

/// Occupancy of the 8x8 board for one colour, one bit per cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct BoardMask(pub u64);

impl BoardMask {
    pub const EMPTY: BoardMask = BoardMask(0);

    pub fn get_bit(&self, index: CellIndex) -> bool {
        assert!(index < CELL_COUNT, "cell index {index} out of range");
        (self.0 & (1u64 << index)) != 0
    }

    pub fn set_bit(&mut self, index: CellIndex) {
        assert!(index < CELL_COUNT, "cell index {index} out of range");
        self.0 |= 1u64 << index;
    }

    pub fn count_ones(&self) -> u32 {
        self.0.count_ones()
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Builds a mask from occupied cell indices.
impl FromIterator<CellIndex> for BoardMask {
    fn from_iter<I: IntoIterator<Item = CellIndex>>(iter: I) -> Self {
        let mut mask = BoardMask::EMPTY;
        for index in iter {
            mask.set_bit(index);
        }
        mask
    }
}

impl fmt::LowerHex for BoardMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

impl BitAnd for BoardMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self::Output {
        BoardMask(self.0 & rhs.0)
    }
}
