//! Physical pieces tracked by a position.

use std::fmt;

use crate::cell::Cell;
use crate::color::Color;
use crate::piece_kind::PieceKind;

/// Stable identity of a piece within its [`Position`](crate::Position).
///
/// The id is the piece's index in the position's registry and never changes,
/// not even when the piece is captured or promoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PieceId(u8);

impl PieceId {
    #[inline]
    pub(crate) const fn new(index: usize) -> PieceId {
        PieceId(index as u8)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A piece on (or captured from) the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    id: PieceId,
    color: Color,
    kind: PieceKind,
    cell: Cell,
    starting_cell: Cell,
    has_moved: bool,
    alive: bool,
}

impl Piece {
    pub(crate) fn new(id: PieceId, color: Color, kind: PieceKind, cell: Cell) -> Piece {
        Piece {
            id,
            color,
            kind,
            cell,
            starting_cell: cell,
            has_moved: false,
            alive: true,
        }
    }

    #[inline]
    pub fn id(&self) -> PieceId {
        self.id
    }

    #[inline]
    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    /// The cell the piece is recorded on. For a captured piece this is the
    /// cell it was captured on.
    #[inline]
    pub fn cell(&self) -> Cell {
        self.cell
    }

    #[inline]
    pub fn starting_cell(&self) -> Cell {
        self.starting_cell
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// `false` once the piece has been captured.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    /// Letter for board printing: uppercase for White, lowercase for Black.
    pub fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.symbol().to_ascii_uppercase(),
            Color::Black => self.kind.symbol(),
        }
    }

    #[inline]
    pub(crate) fn set_cell(&mut self, cell: Cell) {
        self.cell = cell;
    }

    #[inline]
    pub(crate) fn set_kind(&mut self, kind: PieceKind) {
        self.kind = kind;
    }

    #[inline]
    pub(crate) fn set_moved(&mut self, moved: bool) {
        self.has_moved = moved;
    }

    #[inline]
    pub(crate) fn set_alive(&mut self, alive: bool) {
        self.alive = alive;
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.color, self.kind, self.cell)
    }
}
