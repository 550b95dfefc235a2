//! Occupancy snapshot read by the move generators.

use crate::cell::Cell;
use crate::color::Color;
use crate::piece::PieceId;
use crate::piece_kind::PieceKind;
use crate::position::{Position, precedence};

/// The piece a [`BoardView`] reports for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occupant {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceKind,
}

/// Cell-indexed snapshot of a [`Position`].
///
/// Generators consult it instead of scanning the piece registry. Shared cells
/// resolve with the same precedence as [`Position::piece_at`], and the
/// per-cell count exposes overlaps produced by move simulation.
#[derive(Debug, Clone)]
pub struct BoardView {
    cells: [Option<Occupant>; Cell::COUNT],
    counts: [u8; Cell::COUNT],
    kings: [Option<Cell>; Color::COUNT],
    /// En passant target and the color of the pawn that can be taken there.
    en_passant: Option<(Cell, Color)>,
}

impl BoardView {
    /// Take a snapshot of the live pieces of `position`.
    pub fn of(position: &Position) -> BoardView {
        let mut cells: [Option<Occupant>; Cell::COUNT] = [None; Cell::COUNT];
        let mut counts = [0u8; Cell::COUNT];
        let mut winners = [None; Cell::COUNT];
        let mut kings = [None; Color::COUNT];

        for piece in position.live_pieces() {
            if piece.kind() == PieceKind::King {
                kings[piece.color().index()] = Some(piece.cell());
            }
            let idx = piece.cell().index();
            counts[idx] += 1;
            let key = precedence(piece);
            if winners[idx].is_none_or(|best| key < best) {
                winners[idx] = Some(key);
                cells[idx] = Some(Occupant {
                    id: piece.id(),
                    color: piece.color(),
                    kind: piece.kind(),
                });
            }
        }

        let en_passant = position
            .en_passant()
            .map(|ep| (ep.target, position.piece(ep.victim).color()));

        BoardView {
            cells,
            counts,
            kings,
            en_passant,
        }
    }

    #[inline]
    pub fn occupant(&self, cell: Cell) -> Option<Occupant> {
        self.cells[cell.index()]
    }

    #[inline]
    pub fn color_at(&self, cell: Cell) -> Option<Color> {
        self.cells[cell.index()].map(|o| o.color)
    }

    #[inline]
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.counts[cell.index()] > 0
    }

    /// Number of live pieces recorded on `cell`.
    #[inline]
    pub fn count(&self, cell: Cell) -> usize {
        self.counts[cell.index()] as usize
    }

    /// Cell of the live king of `color`, if any.
    #[inline]
    pub fn king_cell(&self, color: Color) -> Option<Cell> {
        self.kings[color.index()]
    }

    #[inline]
    pub fn en_passant(&self) -> Option<(Cell, Color)> {
        self.en_passant
    }
}
