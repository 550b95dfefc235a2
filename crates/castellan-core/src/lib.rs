//! Chess rules: board state, move generation, legality, special moves and
//! game results.

mod attacks;
mod builder;
mod castling;
mod cell;
mod cell_set;
mod color;
mod config;
mod error;
mod game;
mod legality;
pub mod movegen;
mod outcome;
mod perft;
mod piece;
mod piece_kind;
mod position;
mod view;

pub use attacks::AttackMap;
pub use builder::PositionBuilder;
pub use castling::{CastleRoute, CastleSide};
pub use cell::Cell;
pub use cell_set::{CellSet, CellSetIter};
pub use color::Color;
pub use config::{AfterGameOver, GameConfig, StalemateRule};
pub use error::{PositionError, Rejection};
pub use game::{Game, Phase, new_game};
pub use legality::{MoveBanks, MoveSet};
pub use outcome::{GameStatus, MoveOutcome, MoveRecord, SpecialMove};
pub use perft::{divide, perft};
pub use piece::{Piece, PieceId};
pub use piece_kind::PieceKind;
pub use position::{EnPassant, Position, PrettyPosition};
pub use view::{BoardView, Occupant};
