//! Fluent builder for composing positions piece by piece.
//!
//! ```
//! use castellan_core::{Cell, Color, PieceKind, PositionBuilder};
//!
//! let cell = |name: &str| Cell::from_algebraic(name).unwrap();
//! let position = PositionBuilder::new()
//!     .piece(Color::White, PieceKind::King, cell("e1"))
//!     .piece(Color::Black, PieceKind::King, cell("e8"))
//!     .piece(Color::White, PieceKind::Rook, cell("h1"))
//!     .side_to_move(Color::White)
//!     .build()
//!     .unwrap();
//! assert_eq!(position.live_pieces().count(), 3);
//! ```

use crate::cell::Cell;
use crate::color::Color;
use crate::error::PositionError;
use crate::piece::{Piece, PieceId};
use crate::piece_kind::PieceKind;
use crate::position::{EnPassant, Position};

#[derive(Debug, Clone, Copy)]
struct Placement {
    color: Color,
    kind: PieceKind,
    cell: Cell,
    moved: bool,
}

/// A fluent builder for [`Position`]s.
///
/// Pieces start unmoved on the cell they are placed on, except pawns placed
/// away from their home rank, which count as having moved (no double step).
#[derive(Debug, Clone)]
pub struct PositionBuilder {
    placements: Vec<Placement>,
    side_to_move: Color,
    en_passant: Option<Cell>,
}

impl Default for PositionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionBuilder {
    /// An empty board with White to move.
    #[must_use]
    pub fn new() -> Self {
        PositionBuilder {
            placements: Vec::new(),
            side_to_move: Color::White,
            en_passant: None,
        }
    }

    /// The standard initial layout, ready for extra pieces.
    #[must_use]
    pub fn starting_position() -> Self {
        let mut builder = Self::new();
        for piece in Position::starting_position().pieces() {
            builder = builder.piece(piece.color(), piece.kind(), piece.cell());
        }
        builder
    }

    /// Place an unmoved piece.
    #[must_use]
    pub fn piece(mut self, color: Color, kind: PieceKind, cell: Cell) -> Self {
        let moved = kind == PieceKind::Pawn && cell.rank() != color.pawn_rank();
        self.placements.push(Placement {
            color,
            kind,
            cell,
            moved,
        });
        self
    }

    /// Place a piece that has already moved, e.g. a king that lost the right
    /// to castle.
    #[must_use]
    pub fn moved_piece(mut self, color: Color, kind: PieceKind, cell: Cell) -> Self {
        self.placements.push(Placement {
            color,
            kind,
            cell,
            moved: true,
        });
        self
    }

    /// Remove whatever was placed on `cell`.
    #[must_use]
    pub fn clear(mut self, cell: Cell) -> Self {
        self.placements.retain(|p| p.cell != cell);
        self
    }

    #[must_use]
    pub fn side_to_move(mut self, color: Color) -> Self {
        self.side_to_move = color;
        self
    }

    /// Mark `target` as the cell skipped by the opponent's last double step.
    /// The pawn beyond it becomes the en passant victim.
    #[must_use]
    pub fn en_passant(mut self, target: Cell) -> Self {
        self.en_passant = Some(target);
        self
    }

    /// Number and validate the pieces.
    pub fn build(self) -> Result<Position, PositionError> {
        let pieces: Vec<Piece> = self
            .placements
            .iter()
            .enumerate()
            .map(|(index, p)| {
                let mut piece = Piece::new(PieceId::new(index), p.color, p.kind, p.cell);
                piece.set_moved(p.moved);
                piece
            })
            .collect();

        let en_passant = match self.en_passant {
            None => None,
            Some(target) => {
                let victim_color = self.side_to_move.flip();
                let victim_cell = target.offset(0, victim_color.forward());
                let victim = pieces
                    .iter()
                    .find(|p| {
                        Some(p.cell()) == victim_cell
                            && p.color() == victim_color
                            && p.kind() == PieceKind::Pawn
                    })
                    .ok_or(PositionError::InvalidEnPassant { target })?;
                Some(EnPassant {
                    target,
                    victim: victim.id(),
                })
            }
        };

        Position::from_parts(pieces, self.side_to_move, en_passant)
    }
}
