//! Rules knobs for a [`Game`](crate::Game).

use std::fmt;
use std::str::FromStr;

use crate::piece_kind::PieceKind;

/// Result when the side to move has no legal move and is not in check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StalemateRule {
    /// Standard chess: the game is drawn.
    #[default]
    Draw,
    /// The side that cannot move loses.
    OpponentWins,
}

/// Handling of input after the game has ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AfterGameOver {
    /// Answer with [`Rejection::GameOver`](crate::Rejection::GameOver).
    #[default]
    Reject,
    /// Answer with [`MoveOutcome::Ignored`](crate::MoveOutcome::Ignored).
    Ignore,
}

/// Configuration knobs for a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Only the side to move may select pieces. When off, either side may
    /// move at any time and the turn passes to the opponent of whoever moved.
    pub enforce_turn_order: bool,
    pub stalemate: StalemateRule,
    pub after_game_over: AfterGameOver,
    /// Promote to this kind without waiting for [`Game::promote`](crate::Game::promote).
    pub auto_promotion: Option<PieceKind>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            enforce_turn_order: true,
            stalemate: StalemateRule::Draw,
            after_game_over: AfterGameOver::Reject,
            auto_promotion: None,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn with_turn_order(mut self, enforce: bool) -> Self {
        self.enforce_turn_order = enforce;
        self
    }

    #[must_use]
    pub fn with_stalemate(mut self, rule: StalemateRule) -> Self {
        self.stalemate = rule;
        self
    }

    #[must_use]
    pub fn with_after_game_over(mut self, policy: AfterGameOver) -> Self {
        self.after_game_over = policy;
        self
    }

    /// Set the automatic promotion choice. Kinds that are not valid
    /// promotion targets are ignored and leave promotion manual.
    #[must_use]
    pub fn with_auto_promotion(mut self, kind: Option<PieceKind>) -> Self {
        self.auto_promotion = kind.filter(|k| k.is_promotion_choice());
        self
    }
}

impl fmt::Display for StalemateRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StalemateRule::Draw => "draw",
            StalemateRule::OpponentWins => "loss",
        })
    }
}

impl FromStr for StalemateRule {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draw" => Ok(StalemateRule::Draw),
            "loss" | "opponent" => Ok(StalemateRule::OpponentWins),
            _ => Err(()),
        }
    }
}

impl fmt::Display for AfterGameOver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AfterGameOver::Reject => "reject",
            AfterGameOver::Ignore => "ignore",
        })
    }
}

impl FromStr for AfterGameOver {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "reject" => Ok(AfterGameOver::Reject),
            "ignore" => Ok(AfterGameOver::Ignore),
            _ => Err(()),
        }
    }
}
