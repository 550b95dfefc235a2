//! Line-oriented driver loop around a [`Game`].

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use castellan_core::{Color, Game, GameConfig, MoveOutcome, MoveRecord, SpecialMove};

use crate::command::{Command, GameOption, parse_command};
use crate::error::CliError;

/// A driver session: the current game and the options new games start with.
#[derive(Debug, Clone, Default)]
pub struct Session {
    game: Game,
    config: GameConfig,
}

impl Session {
    /// Create a session with a standard game and default options.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read commands until `quit` or end of input, writing replies to `output`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<(), CliError> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            debug!(cmd = %trimmed, "received command");
            match parse_command(trimmed) {
                Ok(Command::Quit) => break,
                Ok(cmd) => self.execute(cmd, output)?,
                Err(e) => {
                    warn!(error = %e, "command parse error");
                    writeln!(output, "error: {e}")?;
                }
            }
            output.flush()?;
        }

        info!("castellan shutting down");
        Ok(())
    }

    /// Carry out one parsed command.
    pub fn execute<W: Write>(&mut self, cmd: Command, out: &mut W) -> Result<(), CliError> {
        match cmd {
            Command::New => {
                self.game = Game::new(self.config);
                writeln!(out, "new game")?;
            }
            Command::Show => self.show(out)?,
            Command::Moves(cell) => {
                writeln!(out, "moves {cell}: {}", self.game.legal_moves(cell))?;
            }
            Command::Select(cell) => match self.game.select(cell) {
                Ok(moves) => writeln!(out, "selected {cell}: {moves}")?,
                Err(reason) => writeln!(out, "rejected: {reason}")?,
            },
            Command::Drop(cell) => {
                let outcome = self.game.drop_on(cell);
                self.report(&outcome, out)?;
            }
            Command::Deselect => {
                self.game.deselect();
                writeln!(out, "deselected")?;
            }
            Command::Move {
                from,
                to,
                promotion,
            } => {
                let outcome = match promotion {
                    Some(kind) => self.game.attempt_promotion(from, to, kind),
                    None => self.game.attempt_move(from, to),
                };
                self.report(&outcome, out)?;
            }
            Command::Promote(kind) => match self.game.promote(kind) {
                Ok(status) => {
                    writeln!(out, "promoted to {kind}")?;
                    self.report_check(out)?;
                    if status.is_over() {
                        writeln!(out, "game over: {status}")?;
                    }
                }
                Err(reason) => writeln!(out, "rejected: {reason}")?,
            },
            Command::Status => self.status(out)?,
            Command::Set(option) => {
                self.apply_option(option);
                writeln!(out, "ok")?;
            }
            Command::Quit => {}
            Command::Unknown(name) => {
                if !name.is_empty() {
                    writeln!(out, "unknown command: {name}")?;
                }
            }
        }
        Ok(())
    }

    fn apply_option(&mut self, option: GameOption) {
        self.config = match option {
            GameOption::TurnOrder(on) => self.config.with_turn_order(on),
            GameOption::Stalemate(rule) => self.config.with_stalemate(rule),
            GameOption::AfterGameOver(policy) => self.config.with_after_game_over(policy),
            GameOption::AutoPromotion(kind) => self.config.with_auto_promotion(kind),
        };
        self.game.set_config(self.config);
    }

    fn report<W: Write>(&self, outcome: &MoveOutcome, out: &mut W) -> Result<(), CliError> {
        match outcome {
            MoveOutcome::Accepted(record) => {
                writeln!(out, "{}", describe(record))?;
                if record.status.is_over() {
                    writeln!(out, "game over: {}", record.status)?;
                }
            }
            MoveOutcome::Rejected(reason) => writeln!(out, "rejected: {reason}")?,
            MoveOutcome::Ignored => writeln!(out, "ignored")?,
        }
        Ok(())
    }

    fn report_check<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let side = self.game.side_to_move();
        if self.game.is_in_check(side) {
            writeln!(out, "{side} is in check")?;
        }
        Ok(())
    }

    fn status<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        let status = self.game.status();
        if status.is_over() {
            writeln!(out, "status: {status}")?;
        } else {
            writeln!(out, "status: {status}, {} to move", self.game.side_to_move())?;
        }
        self.report_check(out)
    }

    fn show<W: Write>(&self, out: &mut W) -> Result<(), CliError> {
        writeln!(out, "{}", self.game.position().pretty())?;
        for color in Color::ALL {
            let taken: String = self.game.captured(color).map(|p| p.symbol()).collect();
            if !taken.is_empty() {
                writeln!(out, "captured {color}: {taken}")?;
            }
        }
        self.status(out)
    }
}

/// One-line summary of an accepted move, e.g. `ok e1g1 castle check`.
fn describe(record: &MoveRecord) -> String {
    let mut line = format!("ok {}{}", record.from, record.to);
    match record.special {
        Some(SpecialMove::Castle { .. }) => line.push_str(" castle"),
        Some(SpecialMove::EnPassant { .. }) => line.push_str(" en-passant"),
        Some(SpecialMove::Promotion { kind }) => line.push_str(&format!(" ={}", kind.symbol())),
        Some(SpecialMove::DoubleStep { .. }) | None => {}
    }
    if record.captured.is_some() {
        line.push_str(" capture");
    }
    if record.promotion_pending {
        line.push_str(" promote?");
    }
    if record.gives_check {
        line.push_str(" check");
    }
    line
}
