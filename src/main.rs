//! Grid-Puzzles: play the tile or mine board from a terminal.
//!
//! ## Usage
//!
//! - `grid-puzzles` - Show a demo
//! - `grid-puzzles tiles` - Play 2048 over stdin/stdout
//! - `grid-puzzles mines` - Play Minesweeper over stdin/stdout
//! - `grid-puzzles demo` - Run the demo

use std::io;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;
use log::info;

use grid_puzzles::constants::{
    DEFAULT_MAX_RANDOM_VALUE, DEFAULT_MINE_SIDE, DEFAULT_MINES, DEFAULT_TILE_SIDE,
};
use grid_puzzles::mines::MineBoard;
use grid_puzzles::render::{Style, render_mines};
use grid_puzzles::session::{self, MinesGame, TilesGame};
use grid_puzzles::tiles::{Direction, TileBoard};

/// Grid-Puzzles: 2048 and Minesweeper board engines
#[derive(Parser)]
#[command(name = "grid-puzzles")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the sliding tile game
    Tiles {
        #[arg(long, default_value_t = DEFAULT_TILE_SIDE)]
        width: usize,
        #[arg(long, default_value_t = DEFAULT_TILE_SIDE)]
        height: usize,
        /// Largest value a spawned tile may take (power of two)
        #[arg(long, default_value_t = DEFAULT_MAX_RANDOM_VALUE)]
        max_random_value: u32,
        /// Seed for a reproducible game
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Play the mine discovery game
    Mines {
        #[arg(long, default_value_t = DEFAULT_MINE_SIDE)]
        width: usize,
        #[arg(long, default_value_t = DEFAULT_MINE_SIDE)]
        height: usize,
        #[arg(long, default_value_t = DEFAULT_MINES)]
        mines: usize,
        /// Seed for a reproducible mine layout
        #[arg(long)]
        seed: Option<u64>,
        /// Frame the board with box-drawing characters
        #[arg(long)]
        boxed: bool,
    },
    /// Run a short demo of both engines
    Demo,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    match cli.command {
        Some(Commands::Tiles {
            width,
            height,
            max_random_value,
            seed,
        }) => {
            let board = match seed {
                Some(seed) => TileBoard::with_seed(width, height, max_random_value, seed),
                None => TileBoard::new(width, height, max_random_value),
            }
            .context("cannot create tile board")?;
            info!("tile board {width}x{height}, spawns up to {max_random_value}");
            println!("{board}");
            let mut game = TilesGame::new(board);
            session::run(&mut game, io::stdin().lock(), io::stdout().lock())
        }
        Some(Commands::Mines {
            width,
            height,
            mines,
            seed,
            boxed,
        }) => {
            let board = match seed {
                Some(seed) => MineBoard::with_seed(width, height, mines, seed),
                None => MineBoard::new(width, height, mines),
            }
            .context("cannot create mine board")?;
            info!("mine board {width}x{height} with {mines} mines");
            let style = if boxed { Style::Boxed } else { Style::Plain };
            let mut game = MinesGame::new(board, style);
            session::run(&mut game, io::stdin().lock(), io::stdout().lock())
        }
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_demo() -> Result<()> {
    println!("Grid-Puzzles: 2048 and Minesweeper engines\n");

    println!("=== Tiles Demo ===");
    let mut tiles = TileBoard::with_seed(4, 4, DEFAULT_MAX_RANDOM_VALUE, 2048)?;
    println!("{tiles}");
    for direction in [Direction::Left, Direction::Up, Direction::Right] {
        let (moved, inserted) = tiles.slide_and_insert(direction);
        println!("{direction}: moved={moved} inserted={inserted}");
        println!("{tiles}");
    }

    println!("=== Mines Demo ===");
    let mut mines = MineBoard::with_seed(DEFAULT_MINE_SIDE, DEFAULT_MINE_SIDE, DEFAULT_MINES, 9)?;
    let center = DEFAULT_MINE_SIDE / 2;
    let result = mines.click(center, center)?;
    println!("Click at ({center},{center}): {result:?}");
    print!("{}", render_mines(&mines, Style::Boxed));
    Ok(())
}
