//! Knight jumps.

use crate::piece::Piece;
use crate::view::BoardView;

use super::{Reach, leap};

/// The eight L-shaped offsets as (file, rank) deltas.
pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(super) fn reach(piece: &Piece, view: &BoardView) -> Reach {
    leap(piece, view, &KNIGHT_JUMPS)
}
