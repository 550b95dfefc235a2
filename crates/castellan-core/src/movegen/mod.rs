//! Pseudo-legal move generation, one generator per piece kind.
//!
//! Generators ignore king safety. Each returns the cells the piece could move
//! to and the cells it threatens; the legality filter decides which moves
//! survive.

mod king;
mod knights;
mod pawns;
mod sliders;

use crate::cell::Cell;
use crate::cell_set::CellSet;
use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::view::BoardView;

pub use self::king::KING_STEPS;
pub use self::knights::KNIGHT_JUMPS;
pub use self::sliders::{DIAGONALS, ORTHOGONALS};

/// Cells a piece can move to and cells it attacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reach {
    /// Pseudo-legal destinations. Never contains a cell held by the piece's
    /// own side or by the enemy king.
    pub moves: CellSet,
    /// Threatened cells, including ones held by the piece's own side. Pawn
    /// diagonals are always present, pawn pushes never.
    pub attacks: CellSet,
}

/// Generate the pseudo-legal reach of `piece` against `view`.
///
/// Returns an empty reach for a captured piece, and for a piece whose cell is
/// shared with another live piece: that only happens while some other piece
/// is being simulated onto it, and the board it would see is not real.
pub fn reach(piece: &Piece, view: &BoardView) -> Reach {
    if !piece.is_alive() || view.count(piece.cell()) > 1 {
        return Reach::default();
    }

    let mut reach = match piece.kind() {
        PieceKind::Pawn => pawns::reach(piece, view),
        PieceKind::Knight => knights::reach(piece, view),
        PieceKind::Bishop => sliders::reach(piece, view, &DIAGONALS),
        PieceKind::Rook => sliders::reach(piece, view, &ORTHOGONALS),
        PieceKind::Queen => {
            let diagonal = sliders::reach(piece, view, &DIAGONALS);
            let orthogonal = sliders::reach(piece, view, &ORTHOGONALS);
            Reach {
                moves: diagonal.moves | orthogonal.moves,
                attacks: diagonal.attacks | orthogonal.attacks,
            }
        }
        PieceKind::King => king::reach(piece, view),
    };
    // Kings are attacked, never taken.
    if let Some(king) = view.king_cell(piece.color().flip()) {
        reach.moves.remove(king);
    }
    reach
}

/// Single-step reach shared by kings and knights.
fn leap(piece: &Piece, view: &BoardView, offsets: &[(i8, i8)]) -> Reach {
    let mut reach = Reach::default();
    for &(df, dr) in offsets {
        let Some(target) = piece.cell().offset(df, dr) else {
            continue;
        };
        reach.attacks.insert(target);
        if !is_friendly(view, target, piece.color()) {
            reach.moves.insert(target);
        }
    }
    reach
}

#[inline]
fn is_friendly(view: &BoardView, cell: Cell, color: Color) -> bool {
    view.color_at(cell) == Some(color)
}
