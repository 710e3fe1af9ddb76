//! Grid-Puzzles: board engines for two single-player grid games.
//!
//! Each engine is a self-contained state machine over a 2D grid and has
//! no dependency on the other.
//!
//! ## Modules
//!
//! - [`constants`] - Tile values, cell values and defaults
//! - [`error`] - Error type shared by both engines
//! - [`tiles`] - Sliding and merging tile board (2048)
//! - [`mines`] - Mine discovery board (Minesweeper)
//! - [`render`] - Text rendering of mine boards
//! - [`session`] - Line-based command protocol used by the binary
//!
//! ## Example
//!
//! ```
//! use grid_puzzles::mines::{Click, MineBoard};
//! use grid_puzzles::tiles::{Direction, TileBoard};
//!
//! let mut tiles = TileBoard::with_seed(4, 4, 4, 42)?;
//! let (moved, inserted) = tiles.slide_and_insert(Direction::Left);
//! assert!(inserted || !moved);
//!
//! let mut mines = MineBoard::with_seed(9, 9, 10, 42)?;
//! // The first click never hits a mine
//! assert_ne!(mines.click(4, 4)?, Click::Lost);
//! # Ok::<(), grid_puzzles::error::BoardError>(())
//! ```

pub mod constants;
pub mod error;
pub mod mines;
pub mod render;
pub mod session;
pub mod tiles;
