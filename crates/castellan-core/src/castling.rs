//! Castling geometry and availability.

use crate::attacks::AttackMap;
use crate::cell::Cell;
use crate::cell_set::CellSet;
use crate::color::Color;
use crate::piece_kind::PieceKind;
use crate::position::Position;

/// File the king starts on.
const KING_FILE: u8 = 4;

/// Which side of the board to castle toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CastleSide {
    KingSide,
    QueenSide,
}

impl CastleSide {
    pub const ALL: [CastleSide; 2] = [CastleSide::KingSide, CastleSide::QueenSide];

    const fn rook_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 7,
            CastleSide::QueenSide => 0,
        }
    }

    const fn king_to_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 6,
            CastleSide::QueenSide => 2,
        }
    }

    const fn rook_to_file(self) -> u8 {
        match self {
            CastleSide::KingSide => 5,
            CastleSide::QueenSide => 3,
        }
    }

    /// Recognise a king move of two files along its home rank as a castle.
    pub fn from_king_move(color: Color, from: Cell, to: Cell) -> Option<CastleSide> {
        let rank = color.back_rank();
        if from.rank() != rank || to.rank() != rank || from.file() != KING_FILE {
            return None;
        }
        CastleSide::ALL
            .into_iter()
            .find(|side| side.king_to_file() == to.file())
    }
}

/// The cells involved in one castle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastleRoute {
    pub side: CastleSide,
    pub king_from: Cell,
    pub king_to: Cell,
    pub rook_from: Cell,
    pub rook_to: Cell,
}

impl CastleRoute {
    pub fn new(color: Color, side: CastleSide) -> CastleRoute {
        let rank = color.back_rank();
        let at = |file: u8| Cell::from_index_unchecked(rank * 8 + file);
        CastleRoute {
            side,
            king_from: at(KING_FILE),
            king_to: at(side.king_to_file()),
            rook_from: at(side.rook_file()),
            rook_to: at(side.rook_to_file()),
        }
    }

    /// Cells strictly between king and rook; all must be empty.
    pub fn between(&self) -> CellSet {
        let (lo, hi) = (
            self.king_from.file().min(self.rook_from.file()),
            self.king_from.file().max(self.rook_from.file()),
        );
        (lo + 1..hi)
            .filter_map(|file| Cell::new(file, self.king_from.rank()))
            .collect()
    }

    /// Cells the king stands on, crosses and lands on; none may be attacked.
    pub fn king_path(&self) -> CellSet {
        let (lo, hi) = (
            self.king_from.file().min(self.king_to.file()),
            self.king_from.file().max(self.king_to.file()),
        );
        (lo..=hi)
            .filter_map(|file| Cell::new(file, self.king_from.rank()))
            .collect()
    }
}

/// King destinations for every castle `color` may play right now.
///
/// Requires an unmoved king on its home cell, an unmoved rook of the same
/// color on the corner, empty cells between them, and no enemy attack on the
/// king's start, transit or destination cell.
pub fn availability(position: &Position, attacks: &AttackMap, color: Color) -> CellSet {
    let mut destinations = CellSet::EMPTY;
    let king = position.king(color);
    if king.has_moved() {
        return destinations;
    }

    let occupied = position.occupied_cells();
    let enemy_attacks = attacks.attacked_by(color.flip());

    for side in CastleSide::ALL {
        let route = CastleRoute::new(color, side);
        if king.cell() != route.king_from {
            break;
        }
        let rook_ready = position.piece_at(route.rook_from).is_some_and(|rook| {
            rook.kind() == PieceKind::Rook && rook.color() == color && !rook.has_moved()
        });
        if !rook_ready {
            continue;
        }
        if !(route.between() & occupied).is_empty() {
            continue;
        }
        if !(route.king_path() & enemy_attacks).is_empty() {
            continue;
        }
        destinations.insert(route.king_to);
    }

    destinations
}
