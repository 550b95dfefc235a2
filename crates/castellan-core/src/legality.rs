//! Legality filter: drop every candidate that would leave the mover's own
//! king attacked.

use tracing::trace;

use crate::attacks::AttackMap;
use crate::castling;
use crate::cell::Cell;
use crate::cell_set::CellSet;
use crate::color::Color;
use crate::movegen;
use crate::piece::{Piece, PieceId};
use crate::piece_kind::PieceKind;
use crate::position::Position;

/// Move data for one piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MoveSet {
    /// Destinations ignoring king safety, castles included.
    pub pseudo_legal: CellSet,
    /// Threatened cells.
    pub attacked: CellSet,
    /// Destinations that keep the mover's king safe. Always a subset of
    /// `pseudo_legal`.
    pub verified: CellSet,
}

/// Move sets for every piece plus the attack map of the real position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MoveBanks {
    /// Indexed by [`PieceId::index()`]; captured pieces keep an empty set.
    sets: Vec<MoveSet>,
    attacks: AttackMap,
    legal_moves: [usize; Color::COUNT],
    in_check: [bool; Color::COUNT],
}

impl MoveBanks {
    /// Rebuild every move set from scratch.
    ///
    /// The position is borrowed mutably for hypothetical relocations only;
    /// it is identical to the input when this returns.
    pub fn refresh(position: &mut Position) -> MoveBanks {
        let attacks = AttackMap::compute(position);
        let view = position.view();
        let mut sets = vec![MoveSet::default(); position.pieces().len()];

        let movers: Vec<PieceId> = position.live_pieces().map(Piece::id).collect();
        for id in movers {
            let reach = movegen::reach(position.piece(id), &view);
            let mut verified = CellSet::EMPTY;
            for target in reach.moves {
                if !exposes_king(position, id, target) {
                    verified.insert(target);
                }
            }
            sets[id.index()] = MoveSet {
                pseudo_legal: reach.moves,
                attacked: reach.attacks,
                verified,
            };
        }

        for color in Color::ALL {
            let castles = castling::availability(position, &attacks, color);
            if castles.is_empty() {
                continue;
            }
            let set = &mut sets[position.king(color).id().index()];
            set.pseudo_legal |= castles;
            set.verified |= castles;
        }

        let mut legal_moves = [0; Color::COUNT];
        for piece in position.live_pieces() {
            legal_moves[piece.color().index()] += sets[piece.id().index()].verified.len();
        }
        let in_check = Color::ALL.map(|color| attacks.in_check(position, color));

        trace!(
            white_moves = legal_moves[Color::White.index()],
            black_moves = legal_moves[Color::Black.index()],
            white_in_check = in_check[Color::White.index()],
            black_in_check = in_check[Color::Black.index()],
            "move banks refreshed"
        );

        MoveBanks {
            sets,
            attacks,
            legal_moves,
            in_check,
        }
    }

    /// The move set of `id`; empty for unknown or captured pieces.
    pub fn move_set(&self, id: PieceId) -> MoveSet {
        self.sets.get(id.index()).copied().unwrap_or_default()
    }

    #[inline]
    pub fn verified(&self, id: PieceId) -> CellSet {
        self.move_set(id).verified
    }

    /// Attack map of the real position.
    #[inline]
    pub fn attacks(&self) -> &AttackMap {
        &self.attacks
    }

    /// Total verified moves available to `color`.
    #[inline]
    pub fn legal_move_count(&self, color: Color) -> usize {
        self.legal_moves[color.index()]
    }

    #[inline]
    pub fn in_check(&self, color: Color) -> bool {
        self.in_check[color.index()]
    }
}

/// Return `true` if moving `mover` to `target` leaves its king attacked.
fn exposes_king(position: &mut Position, mover: PieceId, target: Cell) -> bool {
    let trial = Hypothetical::apply(position, mover, target);
    trial.king_attacked()
}

/// A piece temporarily moved to a candidate cell. Dropping it puts the board
/// back.
struct Hypothetical<'a> {
    position: &'a mut Position,
    mover: PieceId,
    origin: Cell,
    /// En passant victim taken off the board for the trial.
    lifted: Option<PieceId>,
}

impl<'a> Hypothetical<'a> {
    fn apply(position: &'a mut Position, mover: PieceId, target: Cell) -> Hypothetical<'a> {
        let (origin, kind, color) = {
            let piece = position.piece(mover);
            (piece.cell(), piece.kind(), piece.color())
        };

        let lifted = position.en_passant().and_then(|ep| {
            let takes = kind == PieceKind::Pawn
                && ep.target == target
                && position.piece(ep.victim).color() != color;
            takes.then_some(ep.victim)
        });

        position.piece_mut(mover).set_cell(target);
        if let Some(victim) = lifted {
            position.piece_mut(victim).set_alive(false);
        }

        Hypothetical {
            position,
            mover,
            origin,
            lifted,
        }
    }

    fn king_attacked(&self) -> bool {
        let position: &Position = self.position;
        let color = position.piece(self.mover).color();
        AttackMap::compute_excluding(position, Some(self.mover)).in_check(position, color)
    }
}

impl Drop for Hypothetical<'_> {
    fn drop(&mut self) {
        self.position.piece_mut(self.mover).set_cell(self.origin);
        if let Some(victim) = self.lifted {
            self.position.piece_mut(victim).set_alive(true);
        }
    }
}
