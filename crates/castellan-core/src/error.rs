//! Error and rejection types.

use crate::cell::Cell;
use crate::color::Color;
use crate::piece_kind::PieceKind;

/// Structural problems with a position. Any of these after an accepted move
/// means the rules engine itself is wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    /// A side does not have exactly one live king.
    #[error("expected 1 king for {color}, found {count}")]
    InvalidKingCount {
        /// Which side has the wrong king count.
        color: Color,
        /// Number of live kings found.
        count: usize,
    },
    /// Two live pieces are recorded on the same cell.
    #[error("more than one live piece on {cell}")]
    DuplicateOccupancy {
        /// The contested cell.
        cell: Cell,
    },
    /// The registered king of a side is not a live king of that side.
    #[error("king registry for {color} points at the wrong piece")]
    KingMismatch {
        /// The side whose king pointer is wrong.
        color: Color,
    },
    /// The side that just moved is still in check.
    #[error("{color} is in check but it is not {color}'s turn")]
    InactiveKingInCheck {
        /// The side not to move.
        color: Color,
    },
    /// The en passant record does not describe a pawn that just double-stepped.
    #[error("invalid en passant target {target}")]
    InvalidEnPassant {
        /// The recorded target cell.
        target: Cell,
    },
}

/// Why a selection or move attempt was refused. Rejections are expected
/// outcomes of play, not failures of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// No live piece on the selected cell.
    #[error("no piece on {cell}")]
    InvalidSelection {
        /// The cell that was selected.
        cell: Cell,
    },
    /// The target is not among the piece's verified moves.
    #[error("illegal move {from}-{to}")]
    IllegalMove {
        /// Where the piece stands.
        from: Cell,
        /// Where it was dropped.
        to: Cell,
    },
    /// Turn order is enforced and the piece belongs to the side not to move.
    #[error("it is not {color}'s turn")]
    NotYourTurn {
        /// Color of the selected piece.
        color: Color,
    },
    /// A drop was attempted with nothing selected.
    #[error("no piece selected")]
    NoSelection,
    /// The game already has a result.
    #[error("the game is over")]
    GameOver,
    /// A pawn is waiting on the far rank for its promotion choice.
    #[error("a promotion choice is pending")]
    PromotionPending,
    /// `promote` was called with no pawn waiting.
    #[error("no promotion is pending")]
    NoPromotionPending,
    /// Pawns cannot promote to this kind.
    #[error("cannot promote to {kind}")]
    InvalidPromotion {
        /// The requested kind.
        kind: PieceKind,
    },
    /// A promotion choice came with a move that does not reach the far rank.
    #[error("move {from}-{to} does not promote")]
    NotAPromotion { from: Cell, to: Cell },
}
