//! Sliding and merging tile board (2048).
//!
//! The grid is a row-major `Vec<u32>` where `0` is an empty cell and every
//! other value is a power of two. A slide processes each row (or column)
//! independently:
//! - Empty cells are dropped and the tiles keep their relative order
//! - Tiles are merged pairwise starting from the edge the slide moves toward
//! - A merged tile never merges again within the same slide
//! - Freed cells are refilled with empty tiles on the trailing side
//!
//! All line handling goes through [`slide_line`], which always treats the
//! last index as the leading edge. Each direction only decides in which
//! order the cells of a line are read and written back.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::constants::{
    EMPTY_TILE, MAX_GRID_TILE, MAX_TILE_EXPONENT, MAX_TILE_VALUE, SEED_TILES,
};
use crate::error::BoardError;

/// Direction of a slide.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Every direction, in the order used when probing for legal slides.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl FromStr for Direction {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            other => Err(BoardError::InvalidDirection(other.to_string())),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slide and merge one line toward its last index.
///
/// ```
/// use grid_puzzles::tiles::slide_line;
///
/// assert_eq!(
///     slide_line(&[2, 4, 4, 4, 0, 0, 2, 0, 0, 0, 2]),
///     vec![0, 0, 0, 0, 0, 0, 0, 2, 4, 8, 4]
/// );
/// ```
pub fn slide_line(line: &[u32]) -> Vec<u32> {
    // Walk from the leading edge so merges happen there first
    let mut tiles = line
        .iter()
        .rev()
        .copied()
        .filter(|&v| v != EMPTY_TILE)
        .peekable();
    let mut merged = Vec::with_capacity(line.len());

    while let Some(value) = tiles.next() {
        // A pair whose sum overflows `u32` stays unmerged
        let sum = (tiles.peek() == Some(&value))
            .then(|| value.checked_mul(2))
            .flatten();
        if let Some(sum) = sum {
            tiles.next();
            merged.push(sum);
        } else {
            merged.push(value);
        }
    }

    let mut out = vec![EMPTY_TILE; line.len() - merged.len()];
    out.extend(merged.into_iter().rev());
    out
}

/// Cell indexes of line `i`, ordered so the leading edge comes last.
fn line_indexes(width: usize, height: usize, direction: Direction, i: usize) -> Vec<usize> {
    match direction {
        Direction::Right => (0..width).map(|c| i * width + c).collect(),
        Direction::Left => (0..width).rev().map(|c| i * width + c).collect(),
        Direction::Down => (0..height).map(|r| r * width + i).collect(),
        Direction::Up => (0..height).rev().map(|r| r * width + i).collect(),
    }
}

/// Apply a slide to a copy of `cells` and return the result.
fn slide_cells(cells: &[u32], width: usize, height: usize, direction: Direction) -> Vec<u32> {
    let n_lines = match direction {
        Direction::Left | Direction::Right => height,
        Direction::Up | Direction::Down => width,
    };
    let mut out = cells.to_vec();
    for i in 0..n_lines {
        let indexes = line_indexes(width, height, direction, i);
        let line: Vec<u32> = indexes.iter().map(|&k| cells[k]).collect();
        for (&k, value) in indexes.iter().zip(slide_line(&line)) {
            out[k] = value;
        }
    }
    out
}

fn is_tile_value(value: u32) -> bool {
    value == EMPTY_TILE || ((2..=MAX_GRID_TILE).contains(&value) && value.is_power_of_two())
}

/// A 2048 board.
#[derive(Clone, Debug)]
pub struct TileBoard {
    width: usize,
    height: usize,
    /// Row-major tile values, 0 = empty.
    cells: Vec<u32>,
    /// Values a spawned tile may take: 2, 4, ..., max_random_value.
    spawn_values: Vec<u32>,
    rng: fastrand::Rng,
}

impl TileBoard {
    /// Create a board with two seed tiles, seeding the RNG from entropy.
    pub fn new(width: usize, height: usize, max_random_value: u32) -> Result<Self, BoardError> {
        Self::with_rng(width, height, max_random_value, fastrand::Rng::new())
    }

    /// Create a reproducible board: the same seed yields the same game.
    pub fn with_seed(
        width: usize,
        height: usize,
        max_random_value: u32,
        seed: u64,
    ) -> Result<Self, BoardError> {
        Self::with_rng(width, height, max_random_value, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(
        width: usize,
        height: usize,
        max_random_value: u32,
        rng: fastrand::Rng,
    ) -> Result<Self, BoardError> {
        if max_random_value < 2
            || !max_random_value.is_power_of_two()
            || max_random_value > MAX_TILE_VALUE
        {
            return Err(BoardError::InvalidConfig(format!(
                "max random value must be a power of two between 2 and {MAX_TILE_VALUE}, got {max_random_value}"
            )));
        }
        if width * height < SEED_TILES {
            return Err(BoardError::InvalidConfig(format!(
                "a {width}x{height} board cannot hold {SEED_TILES} seed tiles"
            )));
        }

        let spawn_values = (1..=MAX_TILE_EXPONENT)
            .map(|e| 1u32 << e)
            .take_while(|&v| v <= max_random_value)
            .collect();

        let mut board = TileBoard {
            width,
            height,
            cells: vec![EMPTY_TILE; width * height],
            spawn_values,
            rng,
        };
        board.place_seed_tiles();
        Ok(board)
    }

    fn place_seed_tiles(&mut self) {
        let area = self.cells.len();
        let first = self.rng.usize(..area);
        let mut second = self.rng.usize(..area);
        while second == first {
            second = self.rng.usize(..area);
        }
        for k in [first, second] {
            self.cells[k] = self.random_value();
        }
        debug!("seed tiles at {first} and {second}");
    }

    fn random_value(&mut self) -> u32 {
        self.spawn_values[self.rng.usize(..self.spawn_values.len())]
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid dimensions as (rows, columns).
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Tile at (row, col), `None` outside the grid.
    pub fn value(&self, row: usize, col: usize) -> Option<u32> {
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    /// Row-major view of the grid.
    pub fn cells(&self) -> &[u32] {
        &self.cells
    }

    /// Copy of the grid, one `Vec` per row.
    pub fn rows(&self) -> Vec<Vec<u32>> {
        self.cells.chunks(self.width).map(<[u32]>::to_vec).collect()
    }

    /// Values a newly spawned tile may take.
    pub fn spawn_values(&self) -> &[u32] {
        &self.spawn_values
    }

    pub fn empty_cells(&self) -> usize {
        self.cells.iter().filter(|&&v| v == EMPTY_TILE).count()
    }

    pub fn highest_tile(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(EMPTY_TILE)
    }

    /// Replace the whole grid.
    ///
    /// The rows must form a non-empty rectangle and every value must be
    /// empty or a power of two no larger than [`MAX_GRID_TILE`]. The board
    /// adopts the new dimensions.
    pub fn set_grid(&mut self, rows: &[Vec<u32>]) -> Result<(), BoardError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(BoardError::InvalidConfig("grid must not be empty".into()));
        }
        if rows.iter().any(|r| r.len() != width) {
            return Err(BoardError::InvalidConfig("grid rows differ in length".into()));
        }
        if let Some(bad) = rows.iter().flatten().find(|&&v| !is_tile_value(v)) {
            return Err(BoardError::InvalidConfig(format!(
                "tile value {bad} is not a power of two up to {MAX_GRID_TILE}"
            )));
        }

        self.width = width;
        self.height = rows.len();
        self.cells = rows.concat();
        Ok(())
    }

    /// Slide every line toward `direction`.
    ///
    /// Returns `true` if any cell changed. A slide that changes nothing
    /// leaves the board untouched.
    pub fn slide(&mut self, direction: Direction) -> bool {
        let next = slide_cells(&self.cells, self.width, self.height, direction);
        if next == self.cells {
            return false;
        }
        self.cells = next;
        true
    }

    /// Parse a direction token and slide.
    pub fn slide_str(&mut self, direction: &str) -> Result<bool, BoardError> {
        Ok(self.slide(direction.parse()?))
    }

    /// Would a slide toward `direction` change the grid? Never mutates.
    pub fn can_slide(&self, direction: Direction) -> bool {
        slide_cells(&self.cells, self.width, self.height, direction) != self.cells
    }

    /// Place a spawn-valued tile on a uniformly random empty cell.
    ///
    /// Returns `false` if the board is full.
    pub fn insert_random_tile(&mut self) -> bool {
        let empty: Vec<usize> = (0..self.cells.len())
            .filter(|&k| self.cells[k] == EMPTY_TILE)
            .collect();
        if empty.is_empty() {
            return false;
        }
        let k = empty[self.rng.usize(..empty.len())];
        self.cells[k] = self.random_value();
        true
    }

    /// Slide, then insert a random tile only if the slide changed the grid.
    ///
    /// Returns (moved, inserted).
    pub fn slide_and_insert(&mut self, direction: Direction) -> (bool, bool) {
        if !self.slide(direction) {
            return (false, false);
        }
        (true, self.insert_random_tile())
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&EMPTY_TILE)
    }

    /// The board is full and no direction would change it.
    pub fn is_game_over(&self) -> bool {
        self.is_full() && !Direction::ALL.iter().any(|&d| self.can_slide(d))
    }
}

impl fmt::Display for TileBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_width = self.highest_tile().to_string().len();
        for row in self.cells.chunks(self.width) {
            let line: Vec<String> = row
                .iter()
                .map(|&v| {
                    if v == EMPTY_TILE {
                        format!("{:>cell_width$}", ".")
                    } else {
                        format!("{v:>cell_width$}")
                    }
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
