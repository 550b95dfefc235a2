//! Per-color attack sets.

use crate::cell::Cell;
use crate::cell_set::CellSet;
use crate::color::Color;
use crate::movegen;
use crate::piece::PieceId;
use crate::position::Position;

/// Every cell threatened by each side, rebuilt from scratch on demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttackMap {
    /// Attacked cells, indexed by [`Color::index()`].
    by_color: [CellSet; Color::COUNT],
}

impl AttackMap {
    /// Aggregate the attacks of every live piece.
    pub fn compute(position: &Position) -> AttackMap {
        Self::compute_excluding(position, None)
    }

    /// Aggregate the attacks of every live piece except `excluded`.
    ///
    /// Used while a piece is hypothetically relocated: the mover's own threats
    /// are irrelevant to its king's safety and are left out.
    pub fn compute_excluding(position: &Position, excluded: Option<PieceId>) -> AttackMap {
        let view = position.view();
        let mut map = AttackMap::default();
        for piece in position.live_pieces() {
            if Some(piece.id()) == excluded {
                continue;
            }
            map.by_color[piece.color().index()] |= movegen::reach(piece, &view).attacks;
        }
        map
    }

    /// Cells attacked by `color`.
    #[inline]
    pub fn attacked_by(&self, color: Color) -> CellSet {
        self.by_color[color.index()]
    }

    #[inline]
    pub fn is_attacked(&self, cell: Cell, by: Color) -> bool {
        self.by_color[by.index()].contains(cell)
    }

    /// Return `true` if `color`'s king stands on a cell the opponent attacks.
    pub fn in_check(&self, position: &Position, color: Color) -> bool {
        self.is_attacked(position.king_cell(color), color.flip())
    }
}
