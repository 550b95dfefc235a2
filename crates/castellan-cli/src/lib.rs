//! Text driver for castellan: a line protocol over a rules-engine game.

pub mod command;
pub mod error;
pub mod session;

pub use command::{Command, GameOption, parse_command};
pub use error::CliError;
pub use session::Session;
