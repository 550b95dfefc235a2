//! The position: piece registry, side to move, en passant state and result.

use std::fmt;

use crate::attacks::AttackMap;
use crate::cell::Cell;
use crate::cell_set::CellSet;
use crate::color::Color;
use crate::error::PositionError;
use crate::outcome::GameStatus;
use crate::piece::{Piece, PieceId};
use crate::piece_kind::PieceKind;
use crate::view::BoardView;

/// The pawn that just advanced two cells and the cell it skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnPassant {
    /// The skipped cell; an enemy pawn capturing en passant lands here.
    pub target: Cell,
    /// The pawn that would be captured.
    pub victim: PieceId,
}

/// Complete game state.
///
/// Occupancy is derived from the recorded cells of live pieces, so moving a
/// piece is a single write to its record.
#[derive(Clone, PartialEq, Eq)]
pub struct Position {
    /// Every piece ever placed, indexed by [`PieceId`].
    pieces: Vec<Piece>,
    side_to_move: Color,
    en_passant: Option<EnPassant>,
    /// The king of each side, indexed by [`Color::index()`].
    kings: [PieceId; Color::COUNT],
    status: GameStatus,
}

impl Position {
    /// Return the standard starting position.
    pub fn starting_position() -> Position {
        let mut pieces = Vec::with_capacity(32);
        let mut kings = [PieceId::new(0); Color::COUNT];

        for color in Color::ALL {
            for (file, kind) in PieceKind::BACK_RANK.into_iter().enumerate() {
                let id = PieceId::new(pieces.len());
                let cell = Cell::from_index_unchecked(color.back_rank() * 8 + file as u8);
                if kind == PieceKind::King {
                    kings[color.index()] = id;
                }
                pieces.push(Piece::new(id, color, kind, cell));
            }
            for file in 0..Cell::FILES {
                let id = PieceId::new(pieces.len());
                let cell = Cell::from_index_unchecked(color.pawn_rank() * 8 + file);
                pieces.push(Piece::new(id, color, PieceKind::Pawn, cell));
            }
        }

        Position {
            pieces,
            side_to_move: Color::White,
            en_passant: None,
            kings,
            status: GameStatus::InProgress,
        }
    }

    /// Assemble a position from already-numbered pieces. Used by the builder.
    pub(crate) fn from_parts(
        pieces: Vec<Piece>,
        side_to_move: Color,
        en_passant: Option<EnPassant>,
    ) -> Result<Position, PositionError> {
        let mut kings = [PieceId::new(0); Color::COUNT];
        for color in Color::ALL {
            let found: Vec<PieceId> = pieces
                .iter()
                .filter(|p| p.is_alive() && p.color() == color && p.kind() == PieceKind::King)
                .map(Piece::id)
                .collect();
            match found.as_slice() {
                [king] => kings[color.index()] = *king,
                _ => {
                    return Err(PositionError::InvalidKingCount {
                        color,
                        count: found.len(),
                    });
                }
            }
        }

        let position = Position {
            pieces,
            side_to_move,
            en_passant,
            kings,
            status: GameStatus::InProgress,
        };
        position.validate()?;
        Ok(position)
    }

    /// All pieces, captured ones included, in id order.
    #[inline]
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    /// Look up a piece by id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this position.
    #[inline]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// Pieces still in play.
    pub fn live_pieces(&self) -> impl Iterator<Item = &Piece> {
        self.pieces.iter().filter(|p| p.is_alive())
    }

    /// Pieces of `color` that have been captured, in capture-agnostic id order.
    pub fn captured(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.pieces
            .iter()
            .filter(move |p| !p.is_alive() && p.color() == color)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn en_passant(&self) -> Option<EnPassant> {
        self.en_passant
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    #[inline]
    pub fn king(&self, color: Color) -> &Piece {
        self.piece(self.kings[color.index()])
    }

    #[inline]
    pub fn king_cell(&self, color: Color) -> Cell {
        self.king(color).cell()
    }

    /// All cells holding at least one live piece.
    pub fn occupied_cells(&self) -> CellSet {
        self.live_pieces().map(Piece::cell).collect()
    }

    /// Number of live pieces recorded on `cell`. Only exceeds one while a
    /// move is being simulated.
    pub fn occupancy_count(&self, cell: Cell) -> usize {
        self.live_pieces().filter(|p| p.cell() == cell).count()
    }

    /// The live piece on `cell`.
    ///
    /// If several live pieces report the cell, kings win over other pieces
    /// (White's king first), then the lowest id.
    pub fn piece_at(&self, cell: Cell) -> Option<&Piece> {
        self.live_pieces()
            .filter(|p| p.cell() == cell)
            .min_by_key(|p| precedence(p))
    }

    /// Occupancy snapshot for move generation.
    #[inline]
    pub fn view(&self) -> BoardView {
        BoardView::of(self)
    }

    #[inline]
    pub(crate) fn piece_mut(&mut self, id: PieceId) -> &mut Piece {
        &mut self.pieces[id.index()]
    }

    #[inline]
    pub(crate) fn set_en_passant(&mut self, target: Cell, victim: PieceId) {
        self.en_passant = Some(EnPassant { target, victim });
    }

    #[inline]
    pub(crate) fn clear_en_passant(&mut self) {
        self.en_passant = None;
    }

    #[inline]
    pub(crate) fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    #[inline]
    pub(crate) fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }

    /// Check the structural invariants of the position.
    pub fn validate(&self) -> Result<(), PositionError> {
        for color in Color::ALL {
            let count = self
                .live_pieces()
                .filter(|p| p.color() == color && p.kind() == PieceKind::King)
                .count();
            if count != 1 {
                return Err(PositionError::InvalidKingCount { color, count });
            }
            let king = self.king(color);
            if !king.is_alive() || king.kind() != PieceKind::King || king.color() != color {
                return Err(PositionError::KingMismatch { color });
            }
        }

        let mut seen = CellSet::EMPTY;
        for piece in self.live_pieces() {
            if seen.contains(piece.cell()) {
                return Err(PositionError::DuplicateOccupancy { cell: piece.cell() });
            }
            seen.insert(piece.cell());
        }

        if let Some(ep) = self.en_passant {
            let victim = self.piece(ep.victim);
            let expected = ep.target.offset(0, victim.color().forward());
            let valid = victim.is_alive()
                && victim.kind() == PieceKind::Pawn
                && victim.color() != self.side_to_move
                && expected == Some(victim.cell())
                && !seen.contains(ep.target);
            if !valid {
                return Err(PositionError::InvalidEnPassant { target: ep.target });
            }
        }

        let waiting = self.side_to_move.flip();
        if AttackMap::compute(self).is_attacked(self.king_cell(waiting), self.side_to_move) {
            return Err(PositionError::InactiveKingInCheck { color: waiting });
        }

        Ok(())
    }

    /// Return a pretty-printable wrapper for this position.
    pub fn pretty(&self) -> PrettyPosition<'_> {
        PrettyPosition(self)
    }
}

/// Tie-break order for pieces sharing a cell: White king, Black king, then
/// everything else by id.
pub(crate) fn precedence(piece: &Piece) -> (u8, PieceId) {
    let rank = match (piece.kind(), piece.color()) {
        (PieceKind::King, Color::White) => 0,
        (PieceKind::King, Color::Black) => 1,
        _ => 2,
    };
    (rank, piece.id())
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Position({} to move, {})", self.side_to_move, self.status)?;
        write!(f, "{}", self.pretty())
    }
}

/// Wrapper for printing a position as an 8x8 grid, rank 8 at the top.
pub struct PrettyPosition<'a>(&'a Position);

impl fmt::Display for PrettyPosition<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let position = self.0;
        for rank in (0..Cell::RANKS).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0..Cell::FILES {
                let c = Cell::new(file, rank)
                    .and_then(|cell| position.piece_at(cell))
                    .map_or('.', Piece::symbol);
                if file + 1 < Cell::FILES {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::cell::Cell;
    use crate::color::Color;
    use crate::error::PositionError;
    use crate::piece_kind::PieceKind;

    fn cell(name: &str) -> Cell {
        Cell::from_algebraic(name).unwrap()
    }

    #[test]
    fn starting_position_validates() {
        Position::starting_position().validate().unwrap();
    }

    #[test]
    fn starting_layout() {
        let position = Position::starting_position();
        assert_eq!(position.pieces().len(), 32);
        assert_eq!(position.occupied_cells().len(), 32);
        assert_eq!(position.side_to_move(), Color::White);
        assert_eq!(position.king_cell(Color::White), cell("e1"));
        assert_eq!(position.king_cell(Color::Black), cell("e8"));
        assert_eq!(position.piece_at(cell("d1")).map(|p| p.kind()), Some(PieceKind::Queen));
        assert_eq!(position.piece_at(cell("b8")).map(|p| p.kind()), Some(PieceKind::Knight));
        assert_eq!(position.piece_at(cell("h7")).map(|p| p.color()), Some(Color::Black));
        assert!(position.piece_at(cell("e4")).is_none());
        assert!(position.en_passant().is_none());
        assert!(!position.status().is_over());
    }

    #[test]
    fn king_wins_shared_cell() {
        let mut position = Position::starting_position();
        let knight = position.piece_at(cell("g1")).unwrap().id();
        position.piece_mut(knight).set_cell(cell("e1"));
        assert_eq!(position.occupancy_count(cell("e1")), 2);
        assert_eq!(position.piece_at(cell("e1")).map(|p| p.kind()), Some(PieceKind::King));
        assert_eq!(
            position.validate(),
            Err(PositionError::DuplicateOccupancy { cell: cell("e1") })
        );
    }

    #[test]
    fn captured_pieces_leave_occupancy() {
        let mut position = Position::starting_position();
        let pawn = position.piece_at(cell("a7")).unwrap().id();
        position.piece_mut(pawn).set_alive(false);
        assert!(position.piece_at(cell("a7")).is_none());
        assert_eq!(position.captured(Color::Black).count(), 1);
        assert_eq!(position.captured(Color::White).count(), 0);
        assert_eq!(position.occupied_cells().len(), 31);
    }

    #[test]
    fn en_passant_set_and_clear() {
        let mut position = Position::starting_position();
        let pawn = position.piece_at(cell("e2")).unwrap().id();
        position.piece_mut(pawn).set_cell(cell("e4"));
        position.set_side_to_move(Color::Black);
        position.set_en_passant(cell("e3"), pawn);
        position.validate().unwrap();
        assert_eq!(position.en_passant().map(|ep| ep.target), Some(cell("e3")));
        position.clear_en_passant();
        assert!(position.en_passant().is_none());
    }

    #[test]
    fn pretty_print() {
        let output = format!("{}", Position::starting_position().pretty());
        assert!(output.contains("r n b q k b n r"));
        assert!(output.contains("R N B Q K B N R"));
        assert!(output.starts_with("8  r"));
        assert!(output.ends_with("a b c d e f g h"));
    }
}
