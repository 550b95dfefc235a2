//! Ray-casting for bishops, rooks and queens.

use crate::piece::Piece;
use crate::view::BoardView;

use super::Reach;

/// Bishop directions as (file, rank) deltas.
pub const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Rook directions as (file, rank) deltas.
pub const ORTHOGONALS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Cast one ray per direction until the edge or the first occupied cell.
/// An enemy blocker is a destination, a friendly one only an attacked cell.
pub(super) fn reach(piece: &Piece, view: &BoardView, directions: &[(i8, i8)]) -> Reach {
    let mut reach = Reach::default();
    for &(df, dr) in directions {
        let mut current = piece.cell();
        while let Some(next) = current.offset(df, dr) {
            reach.attacks.insert(next);
            match view.color_at(next) {
                None => {
                    reach.moves.insert(next);
                    current = next;
                }
                Some(color) => {
                    if color != piece.color() {
                        reach.moves.insert(next);
                    }
                    break;
                }
            }
        }
    }
    reach
}
