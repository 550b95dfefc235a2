//! Game controller: selection, move application and end-of-game detection.

use tracing::{debug, info, trace, warn};

use crate::castling::{CastleRoute, CastleSide};
use crate::cell::Cell;
use crate::cell_set::CellSet;
use crate::color::Color;
use crate::config::{AfterGameOver, GameConfig, StalemateRule};
use crate::error::{PositionError, Rejection};
use crate::legality::{MoveBanks, MoveSet};
use crate::outcome::{GameStatus, MoveOutcome, MoveRecord, SpecialMove};
use crate::piece::{Piece, PieceId};
use crate::piece_kind::PieceKind;
use crate::position::Position;

/// Where the game is in its input cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for a piece to be picked up.
    AwaitingSelection,
    /// A piece on this cell is picked up and waiting for a drop.
    PieceSelected(Cell),
    /// The pawn on this cell reached the far rank and waits for a kind.
    AwaitingPromotion(Cell),
    GameOver,
}

/// Start a standard game with the default rules.
pub fn new_game() -> Game {
    Game::new(GameConfig::default())
}

/// A game in progress: the position, the move sets derived from it and the
/// player's current selection.
#[derive(Debug, Clone)]
pub struct Game {
    position: Position,
    banks: MoveBanks,
    config: GameConfig,
    selected: Option<PieceId>,
    pending_promotion: Option<PieceId>,
}

impl Default for Game {
    fn default() -> Self {
        new_game()
    }
}

impl Game {
    /// Start from the standard layout.
    pub fn new(config: GameConfig) -> Game {
        Self::assemble(Position::starting_position(), config)
    }

    /// Start from an arbitrary position.
    ///
    /// The result is evaluated immediately, so a position where the side to
    /// move is already mated starts out finished.
    pub fn from_position(position: Position, config: GameConfig) -> Result<Game, PositionError> {
        position.validate()?;
        Ok(Self::assemble(position, config))
    }

    fn assemble(mut position: Position, config: GameConfig) -> Game {
        let banks = MoveBanks::refresh(&mut position);
        let mut game = Game {
            position,
            banks,
            config,
            selected: None,
            pending_promotion: None,
        };
        game.evaluate_status();
        game
    }

    #[inline]
    pub fn position(&self) -> &Position {
        &self.position
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Replace the rules for the rest of the game. The current status is not
    /// re-evaluated.
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move()
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.position.status()
    }

    #[inline]
    pub fn is_in_check(&self, color: Color) -> bool {
        self.banks.in_check(color)
    }

    pub fn phase(&self) -> Phase {
        if self.status().is_over() {
            Phase::GameOver
        } else if let Some(pawn) = self.pending_promotion {
            Phase::AwaitingPromotion(self.position.piece(pawn).cell())
        } else if let Some(id) = self.selected {
            Phase::PieceSelected(self.position.piece(id).cell())
        } else {
            Phase::AwaitingSelection
        }
    }

    /// Verified destinations of the piece on `cell`; empty if the cell is
    /// vacant.
    pub fn legal_moves(&self, cell: Cell) -> CellSet {
        self.position
            .piece_at(cell)
            .map(|piece| self.banks.verified(piece.id()))
            .unwrap_or_default()
    }

    /// Full move data of the piece on `cell`.
    pub fn move_set(&self, cell: Cell) -> Option<MoveSet> {
        self.position
            .piece_at(cell)
            .map(|piece| self.banks.move_set(piece.id()))
    }

    /// Every cell `color` currently threatens.
    pub fn attacked_cells(&self, color: Color) -> CellSet {
        self.banks.attacks().attacked_by(color)
    }

    /// Pieces of `color` taken off the board.
    pub fn captured(&self, color: Color) -> impl Iterator<Item = &Piece> {
        self.position.captured(color)
    }

    /// Every verified `(from, to)` pair available to `color`.
    pub fn moves_for(&self, color: Color) -> impl Iterator<Item = (Cell, Cell)> + '_ {
        self.position
            .live_pieces()
            .filter(move |piece| piece.color() == color)
            .flat_map(move |piece| {
                let from = piece.cell();
                self.banks
                    .verified(piece.id())
                    .into_iter()
                    .map(move |to| (from, to))
            })
    }

    /// Pick up the piece on `cell` and return where it may go.
    pub fn select(&mut self, cell: Cell) -> Result<CellSet, Rejection> {
        if self.status().is_over() {
            return Err(Rejection::GameOver);
        }
        if self.pending_promotion.is_some() {
            return Err(Rejection::PromotionPending);
        }
        let piece = self
            .position
            .piece_at(cell)
            .ok_or(Rejection::InvalidSelection { cell })?;
        if self.config.enforce_turn_order && piece.color() != self.position.side_to_move() {
            trace!(%cell, color = %piece.color(), "selection out of turn");
            return Err(Rejection::NotYourTurn {
                color: piece.color(),
            });
        }

        let id = piece.id();
        self.selected = Some(id);
        Ok(self.banks.verified(id))
    }

    /// Put the selected piece back without moving it.
    pub fn deselect(&mut self) {
        self.selected = None;
    }

    /// Move the selected piece to `to`.
    ///
    /// On rejection the piece stays selected.
    pub fn drop_on(&mut self, to: Cell) -> MoveOutcome {
        self.drop_with(to, None)
    }

    fn drop_with(&mut self, to: Cell, promotion: Option<PieceKind>) -> MoveOutcome {
        if let Some(outcome) = self.finished_outcome() {
            return outcome;
        }
        if self.pending_promotion.is_some() {
            return MoveOutcome::Rejected(Rejection::PromotionPending);
        }
        let Some(id) = self.selected else {
            return MoveOutcome::Rejected(Rejection::NoSelection);
        };

        let (from, color) = {
            let piece = self.position.piece(id);
            (piece.cell(), piece.color())
        };
        let illegal = Rejection::IllegalMove { from, to };
        if !self.banks.verified(id).contains(to) {
            trace!(%from, %to, "illegal move rejected");
            return MoveOutcome::Rejected(illegal);
        }
        if self.position.piece_at(to).is_some_and(|p| p.color() == color) {
            warn!(%from, %to, "verified move lands on a friendly piece, snapping back");
            return MoveOutcome::Rejected(illegal);
        }

        self.selected = None;
        MoveOutcome::Accepted(self.apply(id, to, promotion))
    }

    /// Select the piece on `from` and drop it on `to`.
    pub fn attempt_move(&mut self, from: Cell, to: Cell) -> MoveOutcome {
        if let Some(outcome) = self.finished_outcome() {
            return outcome;
        }
        if let Err(reason) = self.select(from) {
            trace!(%from, %to, %reason, "move rejected at selection");
            return MoveOutcome::Rejected(reason);
        }
        self.drop_on(to)
    }

    /// Select the piece on `from`, drop it on `to` and promote it to `kind`.
    ///
    /// The choice overrides [`GameConfig::auto_promotion`]. A move that does
    /// not promote is rejected and the board is left as it was.
    pub fn attempt_promotion(&mut self, from: Cell, to: Cell, kind: PieceKind) -> MoveOutcome {
        if let Some(outcome) = self.finished_outcome() {
            return outcome;
        }
        if !kind.is_promotion_choice() {
            return MoveOutcome::Rejected(Rejection::InvalidPromotion { kind });
        }
        if let Err(reason) = self.select(from) {
            trace!(%from, %to, %reason, "move rejected at selection");
            return MoveOutcome::Rejected(reason);
        }
        if !self.is_promotion(from, to) {
            trace!(%from, %to, %kind, "promotion choice on a plain move");
            return MoveOutcome::Rejected(Rejection::NotAPromotion { from, to });
        }
        self.drop_with(to, Some(kind))
    }

    /// Return `true` if the piece on `from` is a pawn and `to` lies on its
    /// promotion rank.
    pub fn is_promotion(&self, from: Cell, to: Cell) -> bool {
        self.position
            .piece_at(from)
            .is_some_and(|p| p.kind() == PieceKind::Pawn && to.rank() == p.color().promotion_rank())
    }

    /// Choose what the pawn waiting on the far rank becomes.
    pub fn promote(&mut self, kind: PieceKind) -> Result<GameStatus, Rejection> {
        let Some(pawn) = self.pending_promotion else {
            return Err(Rejection::NoPromotionPending);
        };
        if !kind.is_promotion_choice() {
            return Err(Rejection::InvalidPromotion { kind });
        }

        self.position.piece_mut(pawn).set_kind(kind);
        self.pending_promotion = None;
        self.refresh();
        self.evaluate_status();
        debug!(cell = %self.position.piece(pawn).cell(), %kind, "pawn promoted");
        Ok(self.status())
    }

    /// Outcome for input arriving after the game ended, per the configured
    /// policy. `None` while the game is still running.
    fn finished_outcome(&self) -> Option<MoveOutcome> {
        if !self.status().is_over() {
            return None;
        }
        Some(match self.config.after_game_over {
            AfterGameOver::Reject => MoveOutcome::Rejected(Rejection::GameOver),
            AfterGameOver::Ignore => MoveOutcome::Ignored,
        })
    }

    /// Play a verified move and resolve everything it triggers.
    fn apply(&mut self, id: PieceId, to: Cell, promotion: Option<PieceKind>) -> MoveRecord {
        let (from, color, kind, had_moved) = {
            let piece = self.position.piece(id);
            (piece.cell(), piece.color(), piece.kind(), piece.has_moved())
        };

        let mut captured = self.position.piece_at(to).map(Piece::id);
        let mut special = None;

        self.position.piece_mut(id).set_cell(to);
        if let Some(victim) = captured {
            self.position.piece_mut(victim).set_alive(false);
        }

        if kind == PieceKind::Pawn
            && let Some(ep) = self.position.en_passant()
            && ep.target == to
            && captured.is_none()
        {
            let captured_on = self.position.piece(ep.victim).cell();
            self.position.piece_mut(ep.victim).set_alive(false);
            captured = Some(ep.victim);
            special = Some(SpecialMove::EnPassant { captured_on });
        }

        self.position.clear_en_passant();
        if kind == PieceKind::Pawn
            && from.rank().abs_diff(to.rank()) == 2
            && let Some(target) = from.offset(0, color.forward())
        {
            self.position.set_en_passant(target, id);
            special = Some(SpecialMove::DoubleStep { target });
        }

        if kind == PieceKind::King
            && !had_moved
            && let Some(side) = CastleSide::from_king_move(color, from, to)
        {
            let route = CastleRoute::new(color, side);
            if let Some(rook) = self.position.piece_at(route.rook_from).map(Piece::id) {
                let rook = self.position.piece_mut(rook);
                rook.set_cell(route.rook_to);
                rook.set_moved(true);
            }
            special = Some(SpecialMove::Castle {
                rook_from: route.rook_from,
                rook_to: route.rook_to,
            });
        }

        self.position.piece_mut(id).set_moved(true);
        self.position.set_side_to_move(color.flip());

        let mut promotion_pending = false;
        if kind == PieceKind::Pawn && to.rank() == color.promotion_rank() {
            match promotion.or(self.config.auto_promotion) {
                Some(choice) => {
                    self.position.piece_mut(id).set_kind(choice);
                    special = Some(SpecialMove::Promotion { kind: choice });
                }
                None => {
                    self.pending_promotion = Some(id);
                    promotion_pending = true;
                }
            }
        }

        self.refresh();
        if !promotion_pending {
            self.evaluate_status();
        }

        let record = MoveRecord {
            piece: id,
            color,
            kind,
            from,
            to,
            captured,
            special,
            promotion_pending,
            gives_check: self.banks.in_check(color.flip()),
            status: self.status(),
        };
        debug!(
            %from,
            %to,
            %color,
            %kind,
            captured = record.captured.is_some(),
            check = record.gives_check,
            "move accepted"
        );
        record
    }

    fn refresh(&mut self) {
        self.banks = MoveBanks::refresh(&mut self.position);
        debug_assert!(
            self.position.validate().is_ok(),
            "position invariants broken: {:?}",
            self.position.validate()
        );
    }

    /// Settle the result if the side to move has no legal move.
    fn evaluate_status(&mut self) {
        let side = self.position.side_to_move();
        if self.banks.legal_move_count(side) > 0 {
            return;
        }
        let status = if self.banks.in_check(side) {
            GameStatus::Win(side.flip())
        } else {
            match self.config.stalemate {
                StalemateRule::Draw => GameStatus::Draw,
                StalemateRule::OpponentWins => GameStatus::Win(side.flip()),
            }
        };
        self.position.set_status(status);
        self.selected = None;
        info!(%status, "game over");
    }
}

#[cfg(test)]
mod tests {
    use super::{Game, Phase, new_game};
    use crate::builder::PositionBuilder;
    use crate::cell::Cell;
    use crate::color::Color;
    use crate::config::{AfterGameOver, GameConfig};
    use crate::error::Rejection;
    use crate::outcome::{GameStatus, MoveOutcome, SpecialMove};
    use crate::piece_kind::PieceKind;

    fn cell(name: &str) -> Cell {
        Cell::from_algebraic(name).unwrap()
    }

    fn play(game: &mut Game, from: &str, to: &str) -> MoveOutcome {
        game.attempt_move(cell(from), cell(to))
    }

    #[test]
    fn fresh_game() {
        let game = new_game();
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert_eq!(game.status(), GameStatus::InProgress);
        assert_eq!(game.side_to_move(), Color::White);
        assert_eq!(game.moves_for(Color::White).count(), 20);
        assert!(!game.is_in_check(Color::White));
    }

    #[test]
    fn select_then_drop() {
        let mut game = new_game();
        let moves = game.select(cell("g1")).unwrap();
        assert_eq!(moves.len(), 2);
        assert_eq!(game.phase(), Phase::PieceSelected(cell("g1")));

        let outcome = game.drop_on(cell("g2"));
        assert_eq!(
            outcome.rejection(),
            Some(Rejection::IllegalMove {
                from: cell("g1"),
                to: cell("g2")
            })
        );
        assert_eq!(game.phase(), Phase::PieceSelected(cell("g1")));

        assert!(game.drop_on(cell("f3")).is_accepted());
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert_eq!(game.side_to_move(), Color::Black);
    }

    #[test]
    fn deselect_clears() {
        let mut game = new_game();
        game.select(cell("e2")).unwrap();
        game.deselect();
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert_eq!(game.drop_on(cell("e4")).rejection(), Some(Rejection::NoSelection));
    }

    #[test]
    fn empty_cell_and_wrong_side() {
        let mut game = new_game();
        assert_eq!(
            game.select(cell("e4")),
            Err(Rejection::InvalidSelection { cell: cell("e4") })
        );
        assert_eq!(
            game.select(cell("e7")),
            Err(Rejection::NotYourTurn {
                color: Color::Black
            })
        );
    }

    #[test]
    fn free_play_passes_turn_to_opponent_of_mover() {
        let mut game = Game::new(GameConfig::default().with_turn_order(false));
        assert!(play(&mut game, "e7", "e5").is_accepted());
        assert_eq!(game.side_to_move(), Color::White);
        assert!(play(&mut game, "d7", "d5").is_accepted());
        assert_eq!(game.side_to_move(), Color::White);
    }

    #[test]
    fn double_step_sets_en_passant() {
        let mut game = new_game();
        let outcome = play(&mut game, "e2", "e4");
        let record = outcome.record().unwrap();
        assert_eq!(
            record.special,
            Some(SpecialMove::DoubleStep { target: cell("e3") })
        );
        assert_eq!(
            game.position().en_passant().map(|ep| ep.target),
            Some(cell("e3"))
        );
        assert!(play(&mut game, "g8", "f6").is_accepted());
        assert!(game.position().en_passant().is_none());
    }

    #[test]
    fn capture_records_victim() {
        let mut game = new_game();
        for (from, to) in [("e2", "e4"), ("d7", "d5")] {
            assert!(play(&mut game, from, to).is_accepted());
        }
        let victim = game.position().piece_at(cell("d5")).unwrap().id();
        let outcome = play(&mut game, "e4", "d5");
        assert_eq!(outcome.record().unwrap().captured, Some(victim));
        assert_eq!(game.captured(Color::Black).count(), 1);
        assert_eq!(game.position().live_pieces().count(), 31);
    }

    #[test]
    fn promotion_waits_for_choice() {
        let position = PositionBuilder::new()
            .piece(Color::White, PieceKind::King, cell("e1"))
            .piece(Color::White, PieceKind::Pawn, cell("a7"))
            .piece(Color::Black, PieceKind::King, cell("e8"))
            .build()
            .unwrap();
        let mut game = Game::from_position(position, GameConfig::default()).unwrap();

        let record = play(&mut game, "a7", "a8").record().cloned().unwrap();
        assert!(record.promotion_pending);
        assert!(!record.gives_check);
        assert_eq!(game.phase(), Phase::AwaitingPromotion(cell("a8")));
        assert_eq!(
            play(&mut game, "e8", "d8").rejection(),
            Some(Rejection::PromotionPending)
        );
        assert_eq!(
            game.promote(PieceKind::King),
            Err(Rejection::InvalidPromotion {
                kind: PieceKind::King
            })
        );

        assert_eq!(game.promote(PieceKind::Rook), Ok(GameStatus::InProgress));
        assert!(game.is_in_check(Color::Black));
        assert_eq!(
            game.position().piece_at(cell("a8")).map(|p| p.kind()),
            Some(PieceKind::Rook)
        );
        assert_eq!(game.promote(PieceKind::Queen), Err(Rejection::NoPromotionPending));
    }

    #[test]
    fn auto_promotion() {
        let position = PositionBuilder::new()
            .piece(Color::White, PieceKind::King, cell("e1"))
            .piece(Color::White, PieceKind::Pawn, cell("b7"))
            .piece(Color::Black, PieceKind::King, cell("h8"))
            .build()
            .unwrap();
        let config = GameConfig::default().with_auto_promotion(Some(PieceKind::Queen));
        let mut game = Game::from_position(position, config).unwrap();
        let record = play(&mut game, "b7", "b8").record().cloned().unwrap();
        assert!(!record.promotion_pending);
        assert_eq!(
            record.special,
            Some(SpecialMove::Promotion {
                kind: PieceKind::Queen
            })
        );
        assert!(record.gives_check);
        assert_eq!(game.phase(), Phase::AwaitingSelection);
    }

    #[test]
    fn promotion_chosen_with_the_move() {
        let position = PositionBuilder::new()
            .piece(Color::White, PieceKind::King, cell("e1"))
            .piece(Color::White, PieceKind::Pawn, cell("b7"))
            .piece(Color::White, PieceKind::Pawn, cell("d2"))
            .piece(Color::Black, PieceKind::King, cell("h8"))
            .build()
            .unwrap();
        let config = GameConfig::default().with_auto_promotion(Some(PieceKind::Queen));
        let mut game = Game::from_position(position, config).unwrap();

        assert_eq!(
            game.attempt_promotion(cell("d2"), cell("d4"), PieceKind::Queen),
            MoveOutcome::Rejected(Rejection::NotAPromotion {
                from: cell("d2"),
                to: cell("d4"),
            })
        );
        assert_eq!(
            game.attempt_promotion(cell("b7"), cell("b8"), PieceKind::King),
            MoveOutcome::Rejected(Rejection::InvalidPromotion {
                kind: PieceKind::King
            })
        );
        assert!(game.position().piece_at(cell("d2")).is_some());
        assert_eq!(game.side_to_move(), Color::White);

        let outcome = game.attempt_promotion(cell("b7"), cell("b8"), PieceKind::Knight);
        let record = outcome.record().unwrap();
        assert!(!record.promotion_pending);
        assert_eq!(
            record.special,
            Some(SpecialMove::Promotion {
                kind: PieceKind::Knight
            })
        );
        assert_eq!(
            game.position().piece_at(cell("b8")).map(|p| p.kind()),
            Some(PieceKind::Knight)
        );
    }

    #[test]
    fn mated_position_starts_finished() {
        let position = PositionBuilder::new()
            .piece(Color::White, PieceKind::King, cell("g1"))
            .piece(Color::White, PieceKind::Pawn, cell("f2"))
            .piece(Color::White, PieceKind::Pawn, cell("g2"))
            .piece(Color::White, PieceKind::Pawn, cell("h2"))
            .piece(Color::Black, PieceKind::Rook, cell("a1"))
            .piece(Color::Black, PieceKind::King, cell("g8"))
            .build()
            .unwrap();
        let mut game = Game::from_position(position, GameConfig::default()).unwrap();
        assert_eq!(game.status(), GameStatus::Win(Color::Black));
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.select(cell("g1")), Err(Rejection::GameOver));

        game.set_config(GameConfig::default().with_after_game_over(AfterGameOver::Ignore));
        assert_eq!(play(&mut game, "g1", "f1"), MoveOutcome::Ignored);
    }
}
