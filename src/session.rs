//! Line-based command protocol for playing a board from a terminal.
//!
//! Each input line is a command followed by whitespace separated
//! arguments. Every command gets one reply: `= <message>` on success,
//! `? <message>` on failure, followed by a blank line.
//!
//! ## Tile Commands
//!
//! - `up`, `down`, `left`, `right` - Slide, then spawn a tile if anything moved
//! - `move <direction>` - Same, with the direction as an argument
//! - `show` - Print the board
//! - `quit` - Exit
//!
//! ## Mine Commands
//!
//! - `click <row> <col>` - Reveal a cell
//! - `flag <row> <col>` / `unflag <row> <col>` - Toggle a marker
//! - `show` - Print the visible board
//! - `mines` - List mine positions (only once the game is over)
//! - `quit` - Exit
//!
//! The loop also ends at end of input and after the reply that reports a
//! finished game.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use log::info;

use crate::mines::{Click, MineBoard};
use crate::render::{Style, render_mines};
use crate::tiles::{Direction, TileBoard};

/// A board driven by text commands.
pub trait Game {
    /// Execute one command and return (success, response).
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String);

    /// No further command can change the board.
    fn is_finished(&self) -> bool;
}

/// Read commands from `input` until `quit`, end of input, or a finished game.
pub fn run<G, R, W>(game: &mut G, input: R, mut output: W) -> Result<()>
where
    G: Game,
    R: BufRead,
    W: Write,
{
    for line in input.lines() {
        let line = line.context("failed to read command")?;

        // Skip empty lines and comments
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let command = parts[0].to_lowercase();
        let args = &parts[1..];

        let (success, message) = game.execute(&command, args);
        let prefix = if success { '=' } else { '?' };
        writeln!(output, "{prefix} {}\n", message.trim_end()).context("failed to write reply")?;
        output.flush().context("failed to flush reply")?;

        if command == "quit" {
            break;
        }
        if game.is_finished() {
            info!("game finished, closing session");
            break;
        }
    }
    Ok(())
}

/// Parse `<row> <col>` arguments.
fn parse_point(args: &[&str]) -> Result<(usize, usize), String> {
    let [row, col] = args else {
        return Err("expected <row> <col>".to_string());
    };
    let row = row.parse().map_err(|_| format!("invalid row '{row}'"))?;
    let col = col.parse().map_err(|_| format!("invalid column '{col}'"))?;
    Ok((row, col))
}

/// Tile board session.
pub struct TilesGame {
    board: TileBoard,
}

impl TilesGame {
    pub fn new(board: TileBoard) -> Self {
        Self { board }
    }

    pub fn board(&self) -> &TileBoard {
        &self.board
    }

    fn slide(&mut self, direction: Direction) -> (bool, String) {
        let (moved, _inserted) = self.board.slide_and_insert(direction);
        if !moved {
            return (true, format!("{direction}: nothing moved"));
        }
        if self.board.is_game_over() {
            info!("no legal slides left, highest tile {}", self.board.highest_tile());
            return (true, format!("{}game over", self.board));
        }
        (true, self.board.to_string())
    }
}

impl Game for TilesGame {
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "up" | "down" | "left" | "right" => match command.parse() {
                Ok(direction) => self.slide(direction),
                Err(e) => (false, e.to_string()),
            },

            "move" => {
                let Some(token) = args.first() else {
                    return (false, "missing argument".to_string());
                };
                match token.to_lowercase().parse() {
                    Ok(direction) => self.slide(direction),
                    Err(e) => (false, e.to_string()),
                }
            }

            "show" => (true, self.board.to_string()),

            "quit" => (true, String::new()),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn is_finished(&self) -> bool {
        self.board.is_game_over()
    }
}

/// Mine board session.
pub struct MinesGame {
    board: MineBoard,
    style: Style,
}

impl MinesGame {
    pub fn new(board: MineBoard, style: Style) -> Self {
        Self { board, style }
    }

    pub fn board(&self) -> &MineBoard {
        &self.board
    }

    fn render(&self) -> String {
        render_mines(&self.board, self.style)
    }

    fn click(&mut self, args: &[&str]) -> (bool, String) {
        let (row, col) = match parse_point(args) {
            Ok(p) => p,
            Err(msg) => return (false, msg),
        };
        match self.board.click(row, col) {
            Ok(Click::AlreadyRevealed) => (true, "already revealed".to_string()),
            Ok(Click::Revealed) => (true, self.render()),
            Ok(Click::Won) => (true, format!("{}you win", self.render())),
            Ok(Click::Lost) => (true, format!("{}game over", self.render())),
            Err(e) => (false, e.to_string()),
        }
    }

    fn flag(&mut self, args: &[&str], place: bool) -> (bool, String) {
        let (row, col) = match parse_point(args) {
            Ok(p) => p,
            Err(msg) => return (false, msg),
        };
        let result = if place {
            self.board.place_flag(row, col)
        } else {
            self.board.remove_flag(row, col)
        };
        match result {
            Ok(true) => (true, String::new()),
            Ok(false) => (true, "unchanged".to_string()),
            Err(e) => (false, e.to_string()),
        }
    }
}

impl Game for MinesGame {
    fn execute(&mut self, command: &str, args: &[&str]) -> (bool, String) {
        match command {
            "click" => self.click(args),

            "flag" => self.flag(args, true),

            "unflag" => self.flag(args, false),

            "show" => (true, self.render()),

            "mines" => {
                if !self.board.state().is_terminal() {
                    return (false, "mines stay hidden until the game ends".to_string());
                }
                let points: Vec<String> = self
                    .board
                    .mine_indexes()
                    .iter()
                    .map(|(r, c)| format!("{r},{c}"))
                    .collect();
                (true, points.join(" "))
            }

            "quit" => (true, String::new()),

            _ => (false, format!("unknown command: {command}")),
        }
    }

    fn is_finished(&self) -> bool {
        self.board.state().is_terminal()
    }
}
