//! Driver command parsing.

use castellan_core::{AfterGameOver, Cell, PieceKind, StalemateRule};

use crate::error::CliError;

/// A rules option adjustable with `set`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOption {
    /// `set turn-order on|off`
    TurnOrder(bool),
    /// `set stalemate draw|loss`
    Stalemate(StalemateRule),
    /// `set after-game-over reject|ignore`
    AfterGameOver(AfterGameOver),
    /// `set auto-promote q|r|b|n|off`
    AutoPromotion(Option<PieceKind>),
}

/// A parsed driver command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `new` -- start a game with the current options.
    New,
    /// `show` -- print the board.
    Show,
    /// `moves <cell>` -- list the legal destinations of a piece.
    Moves(Cell),
    /// `select <cell>` -- pick up a piece.
    Select(Cell),
    /// `drop <cell>` -- put the selected piece down.
    Drop(Cell),
    /// `deselect` -- put the selected piece back.
    Deselect,
    /// `move <from> <to>`, or a bare `e2e4` / `e7e8q`.
    Move {
        from: Cell,
        to: Cell,
        promotion: Option<PieceKind>,
    },
    /// `promote <q|r|b|n>` -- finish a pending promotion.
    Promote(PieceKind),
    /// `status` -- print the game result and side to move.
    Status,
    /// `set <option> <value>` -- change a rules option.
    Set(GameOption),
    /// `quit` -- leave the driver.
    Quit,
    /// Unrecognized command.
    Unknown(String),
}

/// Parse a single line of input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, CliError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = tokens.first() else {
        return Ok(Command::Unknown(String::new()));
    };
    let args = &tokens[1..];

    match head {
        "new" => Ok(Command::New),
        "show" => Ok(Command::Show),
        "status" => Ok(Command::Status),
        "deselect" => Ok(Command::Deselect),
        "quit" | "exit" => Ok(Command::Quit),
        "moves" => Ok(Command::Moves(parse_cell(args.first(), "moves")?)),
        "select" => Ok(Command::Select(parse_cell(args.first(), "select")?)),
        "drop" => Ok(Command::Drop(parse_cell(args.first(), "drop")?)),
        "move" => Ok(Command::Move {
            from: parse_cell(args.first(), "move")?,
            to: parse_cell(args.get(1), "move")?,
            promotion: args.get(2).map(|t| parse_promotion(t)).transpose()?,
        }),
        "promote" => {
            let token = args.first().ok_or(CliError::MissingArgument {
                command: "promote",
                what: "piece",
            })?;
            Ok(Command::Promote(parse_promotion(token)?))
        }
        "set" => parse_set(args),
        other => Ok(parse_bare_move(other).unwrap_or_else(|| Command::Unknown(other.to_string()))),
    }
}

/// Parse `e2e4` or `e7e8q`.
fn parse_bare_move(token: &str) -> Option<Command> {
    if !token.is_ascii() || !(4..=5).contains(&token.len()) {
        return None;
    }
    let from = Cell::from_algebraic(&token[0..2])?;
    let to = Cell::from_algebraic(&token[2..4])?;
    let promotion = match token.get(4..) {
        Some("") | None => None,
        Some(kind) => Some(parse_promotion(kind).ok()?),
    };
    Some(Command::Move {
        from,
        to,
        promotion,
    })
}

fn parse_cell(token: Option<&&str>, command: &'static str) -> Result<Cell, CliError> {
    let value = token.ok_or(CliError::MissingArgument {
        command,
        what: "cell",
    })?;
    Cell::from_algebraic(value).ok_or_else(|| CliError::InvalidCell {
        value: value.to_string(),
    })
}

fn parse_promotion(token: &str) -> Result<PieceKind, CliError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => PieceKind::from_symbol(c).filter(|kind| kind.is_promotion_choice()),
        _ => None,
    }
    .ok_or_else(|| CliError::InvalidPromotion {
        value: token.to_string(),
    })
}

/// Parse the `set` command arguments.
fn parse_set(args: &[&str]) -> Result<Command, CliError> {
    let name = args.first().ok_or(CliError::MissingArgument {
        command: "set",
        what: "option name",
    })?;
    let value = args.get(1).ok_or(CliError::MissingArgument {
        command: "set",
        what: "option value",
    })?;
    let invalid = || CliError::InvalidOptionValue {
        name: name.to_string(),
        value: value.to_string(),
    };

    let option = match *name {
        "turn-order" => match *value {
            "on" => GameOption::TurnOrder(true),
            "off" => GameOption::TurnOrder(false),
            _ => return Err(invalid()),
        },
        "stalemate" => GameOption::Stalemate(value.parse().map_err(|()| invalid())?),
        "after-game-over" => GameOption::AfterGameOver(value.parse().map_err(|()| invalid())?),
        "auto-promote" => match *value {
            "off" => GameOption::AutoPromotion(None),
            kind => GameOption::AutoPromotion(Some(parse_promotion(kind).map_err(|_| invalid())?)),
        },
        _ => {
            return Err(CliError::UnknownOption {
                name: name.to_string(),
            });
        }
    };
    Ok(Command::Set(option))
}
