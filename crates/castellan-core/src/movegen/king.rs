//! King steps. Castling lives in [`crate::castling`] because it depends on
//! attack sets and rook history.

use crate::piece::Piece;
use crate::view::BoardView;

use super::{Reach, leap};

/// The eight neighbouring offsets as (file, rank) deltas.
pub const KING_STEPS: [(i8, i8); 8] = [
    (1, 1),
    (1, 0),
    (1, -1),
    (0, 1),
    (0, -1),
    (-1, 1),
    (-1, 0),
    (-1, -1),
];

pub(super) fn reach(piece: &Piece, view: &BoardView) -> Reach {
    leap(piece, view, &KING_STEPS)
}
