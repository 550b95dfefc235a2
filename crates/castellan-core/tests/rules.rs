//! End-to-end rules scenarios played through the public game API.

use castellan_core::{
    AfterGameOver, Cell, CellSet, Color, Game, GameConfig, GameStatus, MoveOutcome, Phase,
    PieceKind, PositionBuilder, Rejection, SpecialMove, StalemateRule, new_game,
};

fn cell(name: &str) -> Cell {
    Cell::from_algebraic(name).unwrap()
}

fn cells(names: &[&str]) -> CellSet {
    names.iter().map(|n| cell(n)).collect()
}

/// Play moves given as `"e2e4"` strings, asserting each is accepted.
fn play_all(game: &mut Game, moves: &[&str]) {
    for mv in moves {
        let outcome = game.attempt_move(cell(&mv[..2]), cell(&mv[2..]));
        assert!(outcome.is_accepted(), "{mv} rejected: {outcome:?}");
    }
}

fn game_from(builder: PositionBuilder, config: GameConfig) -> Game {
    Game::from_position(builder.build().unwrap(), config).unwrap()
}

#[test]
fn twenty_opening_moves() {
    let game = new_game();
    assert_eq!(game.moves_for(Color::White).count(), 20);
    assert_eq!(game.legal_moves(cell("e2")), cells(&["e3", "e4"]));
    assert_eq!(game.legal_moves(cell("b1")), cells(&["a3", "c3"]));
    assert!(game.legal_moves(cell("a1")).is_empty());
    assert!(game.legal_moves(cell("e4")).is_empty());
}

#[test]
fn legal_moves_idempotent() {
    let mut game = new_game();
    play_all(&mut game, &["e2e4", "e7e5", "g1f3"]);
    let first: Vec<CellSet> = Cell::all().map(|c| game.legal_moves(c)).collect();
    let second: Vec<CellSet> = Cell::all().map(|c| game.legal_moves(c)).collect();
    assert_eq!(first, second);
}

#[test]
fn en_passant_takes_pawn_from_its_own_cell() {
    let mut game = new_game();
    play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);
    assert!(game.legal_moves(cell("e5")).contains(cell("d6")));

    let victim = game.position().piece_at(cell("d5")).unwrap().id();
    let outcome = game.attempt_move(cell("e5"), cell("d6"));
    let record = outcome.record().unwrap();
    assert_eq!(record.captured, Some(victim));
    assert_eq!(
        record.special,
        Some(SpecialMove::EnPassant {
            captured_on: cell("d5")
        })
    );
    assert!(game.position().piece_at(cell("d5")).is_none());
    assert_eq!(
        game.position().piece_at(cell("d6")).map(|p| (p.color(), p.kind())),
        Some((Color::White, PieceKind::Pawn))
    );
    assert!(!game.position().piece(victim).is_alive());
}

#[test]
fn en_passant_expires_after_one_ply() {
    let mut game = new_game();
    play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);
    assert!(!game.legal_moves(cell("e5")).contains(cell("d6")));
    assert_eq!(
        game.attempt_move(cell("e5"), cell("d6")).rejection(),
        Some(Rejection::IllegalMove {
            from: cell("e5"),
            to: cell("d6")
        })
    );
}

#[test]
fn castling_relocates_rook() {
    let builder = PositionBuilder::new()
        .piece(Color::White, PieceKind::King, cell("e1"))
        .piece(Color::White, PieceKind::Rook, cell("a1"))
        .piece(Color::White, PieceKind::Rook, cell("h1"))
        .piece(Color::Black, PieceKind::King, cell("e8"))
        .piece(Color::Black, PieceKind::Rook, cell("a8"));
    let mut game = game_from(builder, GameConfig::default());
    let king_moves = game.legal_moves(cell("e1"));
    assert!(king_moves.contains(cell("g1")));
    assert!(king_moves.contains(cell("c1")));

    let outcome = game.attempt_move(cell("e1"), cell("c1"));
    assert_eq!(
        outcome.record().unwrap().special,
        Some(SpecialMove::Castle {
            rook_from: cell("a1"),
            rook_to: cell("d1")
        })
    );
    let rook = game.position().piece_at(cell("d1")).unwrap();
    assert_eq!(rook.kind(), PieceKind::Rook);
    assert!(rook.has_moved());
    assert!(game.position().piece_at(cell("a1")).is_none());
    assert_eq!(game.position().king_cell(Color::White), cell("c1"));

    // The rook on d1 now covers d8, so Black cannot castle across it.
    assert!(!game.legal_moves(cell("e8")).contains(cell("c8")));
}

#[test]
fn castling_through_attack_forbidden() {
    let builder = PositionBuilder::new()
        .piece(Color::White, PieceKind::King, cell("e1"))
        .piece(Color::White, PieceKind::Rook, cell("h1"))
        .piece(Color::Black, PieceKind::King, cell("e8"))
        .piece(Color::Black, PieceKind::Rook, cell("f8"));
    let game = game_from(builder, GameConfig::default());
    assert!(!game.legal_moves(cell("e1")).contains(cell("g1")));
    let set = game.move_set(cell("e1")).unwrap();
    assert!(!set.pseudo_legal.contains(cell("g1")));
}

#[test]
fn castling_lost_after_king_moves() {
    let builder = PositionBuilder::new()
        .piece(Color::White, PieceKind::King, cell("e1"))
        .piece(Color::White, PieceKind::Rook, cell("h1"))
        .piece(Color::Black, PieceKind::King, cell("a8"));
    let mut game = game_from(builder, GameConfig::default());
    play_all(&mut game, &["e1e2", "a8b8", "e2e1", "b8a8"]);
    assert!(!game.legal_moves(cell("e1")).contains(cell("g1")));
}

#[test]
fn fools_mate() {
    let mut game = new_game();
    play_all(&mut game, &["f2f3", "e7e5", "g2g4"]);
    let record = game
        .attempt_move(cell("d8"), cell("h4"))
        .record()
        .cloned()
        .unwrap();
    assert!(record.gives_check);
    assert_eq!(record.status, GameStatus::Win(Color::Black));
    assert_eq!(game.status(), GameStatus::Win(Color::Black));
    assert!(game.is_in_check(Color::White));
    assert_eq!(game.phase(), Phase::GameOver);
}

#[test]
fn back_rank_mate() {
    let builder = PositionBuilder::new()
        .piece(Color::White, PieceKind::King, cell("g1"))
        .piece(Color::White, PieceKind::Pawn, cell("f2"))
        .piece(Color::White, PieceKind::Pawn, cell("g2"))
        .piece(Color::White, PieceKind::Pawn, cell("h2"))
        .piece(Color::Black, PieceKind::Rook, cell("a8"))
        .piece(Color::Black, PieceKind::King, cell("h7"))
        .side_to_move(Color::Black);
    let mut game = game_from(builder, GameConfig::default());
    play_all(&mut game, &["a8a1"]);
    assert_eq!(game.status(), GameStatus::Win(Color::Black));
    assert_eq!(game.moves_for(Color::White).count(), 0);
}

fn stalemate_setup() -> PositionBuilder {
    PositionBuilder::new()
        .piece(Color::White, PieceKind::King, cell("b6"))
        .piece(Color::White, PieceKind::Queen, cell("d7"))
        .piece(Color::Black, PieceKind::King, cell("a8"))
}

#[test]
fn stalemate_is_a_draw_by_default() {
    let mut game = game_from(stalemate_setup(), GameConfig::default());
    play_all(&mut game, &["d7c7"]);
    assert!(!game.is_in_check(Color::Black));
    assert_eq!(game.status(), GameStatus::Draw);
}

#[test]
fn stalemate_can_lose() {
    let config = GameConfig::default().with_stalemate(StalemateRule::OpponentWins);
    let mut game = game_from(stalemate_setup(), config);
    play_all(&mut game, &["d7c7"]);
    assert_eq!(game.status(), GameStatus::Win(Color::White));
}

#[test]
fn input_after_game_over() {
    let mut game = new_game();
    play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(
        game.attempt_move(cell("a2"), cell("a3")),
        MoveOutcome::Rejected(Rejection::GameOver)
    );

    let config = GameConfig::default().with_after_game_over(AfterGameOver::Ignore);
    let mut game = Game::new(config);
    play_all(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
    assert_eq!(game.attempt_move(cell("a2"), cell("a3")), MoveOutcome::Ignored);
    assert_eq!(game.drop_on(cell("a3")), MoveOutcome::Ignored);
}

#[test]
fn turn_order_enforced() {
    let mut game = new_game();
    assert_eq!(
        game.attempt_move(cell("e7"), cell("e5")),
        MoveOutcome::Rejected(Rejection::NotYourTurn {
            color: Color::Black
        })
    );
    play_all(&mut game, &["e2e4"]);
    assert_eq!(
        game.attempt_move(cell("d2"), cell("d4")).rejection(),
        Some(Rejection::NotYourTurn {
            color: Color::White
        })
    );
}

#[test]
fn promotion_by_capture() {
    let builder = PositionBuilder::new()
        .piece(Color::White, PieceKind::King, cell("e1"))
        .piece(Color::White, PieceKind::Pawn, cell("g7"))
        .piece(Color::Black, PieceKind::Rook, cell("h8"))
        .piece(Color::Black, PieceKind::King, cell("a1"));
    let mut game = game_from(builder, GameConfig::default());
    let rook = game.position().piece_at(cell("h8")).unwrap().id();
    let record = game
        .attempt_move(cell("g7"), cell("h8"))
        .record()
        .cloned()
        .unwrap();
    assert_eq!(record.captured, Some(rook));
    assert!(record.promotion_pending);
    assert_eq!(game.status(), GameStatus::InProgress);

    assert_eq!(game.promote(PieceKind::Knight), Ok(GameStatus::InProgress));
    let knight = game.position().piece_at(cell("h8")).unwrap();
    assert_eq!(knight.kind(), PieceKind::Knight);
    assert_eq!(knight.id(), record.piece);
    assert_eq!(game.captured(Color::Black).count(), 1);
}

#[test]
fn check_must_be_answered() {
    let mut game = new_game();
    play_all(&mut game, &["e2e4", "d7d5", "f1b5"]);
    assert!(game.is_in_check(Color::Black));
    let answers: Vec<(Cell, Cell)> = game.moves_for(Color::Black).collect();
    // c7c6, b8c6, b8d7, c8d7 and d8d7 all block the bishop.
    assert_eq!(answers.len(), 5);
    assert!(answers.iter().all(|&(_, to)| to == cell("c6") || to == cell("d7")));
}

#[test]
fn king_in_check_cannot_be_taken() {
    let mut game = new_game();
    play_all(&mut game, &["e2e4", "f7f6", "d1h5"]);
    assert!(game.is_in_check(Color::Black));
    assert!(game.attacked_cells(Color::White).contains(cell("e8")));
    assert!(!game.legal_moves(cell("h5")).contains(cell("e8")));
}

#[test]
fn free_play_never_captures_a_king() {
    let mut game = Game::new(GameConfig::default().with_turn_order(false));
    play_all(&mut game, &["f2f3", "e7e5", "g2g4", "b8c6", "e1f2", "d8h4"]);
    assert!(game.is_in_check(Color::White));
    assert!(!game.legal_moves(cell("h4")).contains(cell("f2")));

    // Black moves twice in a row, but still may not take the king.
    assert_eq!(
        game.attempt_move(cell("h4"), cell("f2")),
        MoveOutcome::Rejected(Rejection::IllegalMove {
            from: cell("h4"),
            to: cell("f2"),
        })
    );
    assert!(game.position().king(Color::White).is_alive());
    assert_eq!(game.position().king(Color::White).cell(), cell("f2"));
}
