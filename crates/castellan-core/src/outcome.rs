//! Game status and the result of a move attempt.

use std::fmt;

use crate::cell::Cell;
use crate::color::Color;
use crate::error::Rejection;
use crate::piece::PieceId;
use crate::piece_kind::PieceKind;

/// Whether the game is still being played, and if not, how it ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameStatus {
    #[default]
    InProgress,
    Win(Color),
    Draw,
}

impl GameStatus {
    /// Return `true` once the game has a result.
    #[inline]
    pub const fn is_over(self) -> bool {
        !matches!(self, GameStatus::InProgress)
    }

    /// The winning side, if any.
    #[inline]
    pub const fn winner(self) -> Option<Color> {
        match self {
            GameStatus::Win(color) => Some(color),
            _ => None,
        }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "in progress"),
            GameStatus::Win(color) => write!(f, "{color} wins"),
            GameStatus::Draw => write!(f, "draw"),
        }
    }
}

/// Side effects of a move beyond relocating the piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialMove {
    /// A pawn advanced two cells and set the en passant target.
    DoubleStep { target: Cell },
    /// A pawn captured en passant; the victim stood on `captured_on`.
    EnPassant { captured_on: Cell },
    /// The king castled and the rook jumped over it.
    Castle { rook_from: Cell, rook_to: Cell },
    /// The pawn was promoted straight away by the configured auto-promotion.
    Promotion { kind: PieceKind },
}

/// Everything that happened when a move was accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    pub piece: PieceId,
    pub color: Color,
    pub kind: PieceKind,
    pub from: Cell,
    pub to: Cell,
    /// The piece removed from play, if any.
    pub captured: Option<PieceId>,
    pub special: Option<SpecialMove>,
    /// The pawn reached the far rank and awaits [`Game::promote`](crate::Game::promote).
    pub promotion_pending: bool,
    /// The opponent's king is attacked after the move.
    pub gives_check: bool,
    /// Status after the move was fully resolved.
    pub status: GameStatus,
}

/// Result of a move attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Accepted(MoveRecord),
    Rejected(Rejection),
    /// The game is over and configured to disregard further input.
    Ignored,
}

impl MoveOutcome {
    #[inline]
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveOutcome::Accepted(_))
    }

    /// The accepted move, if any.
    pub fn record(&self) -> Option<&MoveRecord> {
        match self {
            MoveOutcome::Accepted(record) => Some(record),
            _ => None,
        }
    }

    /// The rejection reason, if any.
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            MoveOutcome::Rejected(reason) => Some(*reason),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{GameStatus, MoveOutcome};
    use crate::color::Color;
    use crate::error::Rejection;

    #[test]
    fn status_queries() {
        assert!(!GameStatus::InProgress.is_over());
        assert!(GameStatus::Draw.is_over());
        assert_eq!(GameStatus::Win(Color::Black).winner(), Some(Color::Black));
        assert_eq!(GameStatus::Draw.winner(), None);
        assert_eq!(GameStatus::default(), GameStatus::InProgress);
    }

    #[test]
    fn status_display() {
        assert_eq!(format!("{}", GameStatus::Win(Color::White)), "white wins");
        assert_eq!(format!("{}", GameStatus::Draw), "draw");
    }

    #[test]
    fn outcome_accessors() {
        let rejected = MoveOutcome::Rejected(Rejection::GameOver);
        assert!(!rejected.is_accepted());
        assert_eq!(rejected.rejection(), Some(Rejection::GameOver));
        assert!(rejected.record().is_none());
        assert_eq!(MoveOutcome::Ignored.rejection(), None);
    }
}
