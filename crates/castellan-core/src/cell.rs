//! Board cells addressed by (file, rank).

use std::fmt;

/// A cell on the 8x8 board.
///
/// Files run 0..7 from the a-file to the h-file; ranks run 0..7 from White's
/// back rank to Black's. Internally the pair is packed as `rank * 8 + file`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cell(u8);

impl Cell {
    /// Number of files on the board.
    pub const FILES: u8 = 8;
    /// Number of ranks on the board.
    pub const RANKS: u8 = 8;
    /// Total number of cells.
    pub const COUNT: usize = 64;

    /// Create a cell from a file and rank, returning `None` off the board.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Option<Cell> {
        if file < Self::FILES && rank < Self::RANKS {
            Some(Cell(rank * 8 + file))
        } else {
            None
        }
    }

    /// Create a cell from its packed index (0..63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Cell> {
        if (index as usize) < Self::COUNT {
            Some(Cell(index))
        } else {
            None
        }
    }

    #[inline]
    pub(crate) const fn from_index_unchecked(index: u8) -> Cell {
        debug_assert!((index as usize) < Self::COUNT);
        Cell(index)
    }

    /// Parse a cell name such as `"e4"`.
    pub fn from_algebraic(s: &str) -> Option<Cell> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let (file, rank) = (bytes[0], bytes[1]);
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return None;
        }
        Cell::new(file - b'a', rank - b'1')
    }

    /// Packed index (0..63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// File, 0 for the a-file.
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    /// Rank, 0 for White's back rank.
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    /// The cell `df` files and `dr` ranks away, if it is still on the board.
    #[inline]
    pub const fn offset(self, df: i8, dr: i8) -> Option<Cell> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if file < 0 || rank < 0 {
            return None;
        }
        Cell::new(file as u8, rank as u8)
    }

    /// Iterate over all 64 cells, rank by rank from a1 to h8.
    pub fn all() -> impl Iterator<Item = Cell> {
        (0u8..64).map(Cell)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        write!(f, "{file}{}", self.rank() + 1)
    }
}

impl fmt::Debug for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cell({self})")
    }
}
