//! Perft (performance test) for move generation correctness verification.

use crate::cell::Cell;
use crate::game::Game;
use crate::piece_kind::PieceKind;

/// Count the leaf nodes `depth` plies below `game`.
///
/// Depth 0 returns 1. Each promotion counts once per choice of kind. The
/// last ply is bulk-counted from the verified move sets.
pub fn perft(game: &Game, depth: usize) -> u64 {
    if depth == 0 || game.status().is_over() {
        return u64::from(depth == 0);
    }

    let side = game.side_to_move();
    let moves: Vec<(Cell, Cell)> = game.moves_for(side).collect();

    if depth == 1 {
        return moves
            .iter()
            .map(|&(from, to)| if game.is_promotion(from, to) { 4 } else { 1 })
            .sum();
    }

    let mut nodes = 0u64;
    for (from, to) in moves {
        for child in children(game, from, to) {
            nodes += perft(&child, depth - 1);
        }
    }
    nodes
}

/// Per-move breakdown of [`perft`], sorted by move name.
pub fn divide(game: &Game, depth: usize) -> Vec<(String, u64)> {
    let side = game.side_to_move();
    let mut results: Vec<(String, u64)> = game
        .moves_for(side)
        .collect::<Vec<_>>()
        .into_iter()
        .map(|(from, to)| {
            let count = children(game, from, to)
                .iter()
                .map(|child| perft(child, depth.saturating_sub(1)))
                .sum();
            (format!("{from}{to}"), count)
        })
        .collect();
    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}

/// Positions reached by playing `from`-`to`, one per promotion choice.
fn children(game: &Game, from: Cell, to: Cell) -> Vec<Game> {
    let mut child = game.clone();
    let outcome = child.attempt_move(from, to);
    match outcome.record() {
        None => Vec::new(),
        Some(record) if record.promotion_pending => PieceKind::PROMOTION_CHOICES
            .into_iter()
            .filter_map(|kind| {
                let mut promoted = child.clone();
                promoted.promote(kind).ok().map(|_| promoted)
            })
            .collect(),
        Some(_) => vec![child],
    }
}
