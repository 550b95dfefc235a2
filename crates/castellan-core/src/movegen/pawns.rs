//! Pawn pushes and captures.

use crate::piece::Piece;
use crate::view::BoardView;

use super::Reach;

pub(super) fn reach(piece: &Piece, view: &BoardView) -> Reach {
    let mut reach = Reach::default();
    let color = piece.color();
    let forward = color.forward();
    let from = piece.cell();

    // Pushes are blocked by anything; the double step only from an unmoved
    // pawn's starting cell.
    if let Some(one) = from.offset(0, forward)
        && !view.is_occupied(one)
    {
        reach.moves.insert(one);
        let unmoved = !piece.has_moved() && from == piece.starting_cell();
        if unmoved
            && let Some(two) = one.offset(0, forward)
            && !view.is_occupied(two)
        {
            reach.moves.insert(two);
        }
    }

    for df in [-1, 1] {
        let Some(diagonal) = from.offset(df, forward) else {
            continue;
        };
        reach.attacks.insert(diagonal);
        let capturable = match view.color_at(diagonal) {
            Some(occupant) => occupant != color,
            None => view
                .en_passant()
                .is_some_and(|(target, victim)| target == diagonal && victim != color),
        };
        if capturable {
            reach.moves.insert(diagonal);
        }
    }

    reach
}
