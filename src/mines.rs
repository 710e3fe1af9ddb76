//! Mine discovery board (Minesweeper).
//!
//! Three row-major grids describe a board:
//! - `cells`: 0 = clear, 1..=8 = adjacent mine count, 9 = mine
//! - `visible`: revealed cells
//! - `flagged`: player flags, meaningful on hidden cells only
//!
//! Mines are placed lazily by the first click, never on the clicked cell
//! or its neighbours. The board moves through [`GameState`]:
//! `Uninitialized -> Active -> Won | Lost`.

use std::fmt;

use log::{debug, info};

use crate::constants::{CLEAR, MINE, NEIGHBORS, SAFE_ZONE_SIDE};
use crate::error::BoardError;

/// A cell coordinate as (row, col).
pub type Point = (usize, usize);

/// Lifecycle of a mine board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GameState {
    /// No click yet, mines not placed.
    Uninitialized,
    /// Mines placed, game in progress.
    Active,
    /// Every non-mine cell revealed.
    Won,
    /// A mine was clicked.
    Lost,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Won | GameState::Lost)
    }
}

/// Result of a click on a board that was still in play.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Click {
    /// The cell was already revealed; nothing changed.
    AlreadyRevealed,
    /// Cells were revealed and the game goes on.
    Revealed,
    /// This click revealed the last safe cell.
    Won,
    /// This click hit a mine.
    Lost,
}

/// What the presentation layer may see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CellView {
    Hidden,
    Clear,
    Number(u8),
    Mine,
}

/// A Minesweeper board.
#[derive(Clone, Debug)]
pub struct MineBoard {
    width: usize,
    height: usize,
    n_mines: usize,
    cells: Vec<u8>,
    visible: Vec<bool>,
    flagged: Vec<bool>,
    state: GameState,
    rng: fastrand::Rng,
}

impl MineBoard {
    /// Create an empty board; mines are placed by the first click.
    pub fn new(width: usize, height: usize, n_mines: usize) -> Result<Self, BoardError> {
        Self::with_rng(width, height, n_mines, fastrand::Rng::new())
    }

    /// Create a board whose mine layout is fully determined by `seed`
    /// and the first click.
    pub fn with_seed(
        width: usize,
        height: usize,
        n_mines: usize,
        seed: u64,
    ) -> Result<Self, BoardError> {
        Self::with_rng(width, height, n_mines, fastrand::Rng::with_seed(seed))
    }

    fn with_rng(
        width: usize,
        height: usize,
        n_mines: usize,
        rng: fastrand::Rng,
    ) -> Result<Self, BoardError> {
        if width == 0 || height == 0 {
            return Err(BoardError::InvalidConfig(format!(
                "board must have at least one row and column, got {width}x{height}"
            )));
        }
        let max_mines = max_mines(width, height);
        if n_mines > max_mines {
            return Err(BoardError::InvalidConfig(format!(
                "{n_mines} mines do not fit a {width}x{height} board with a safe first click (at most {max_mines})"
            )));
        }

        let area = width * height;
        Ok(MineBoard {
            width,
            height,
            n_mines,
            cells: vec![CLEAR; area],
            visible: vec![false; area],
            flagged: vec![false; area],
            state: GameState::Uninitialized,
            rng,
        })
    }

    /// Create an active board with mines at the given positions.
    ///
    /// The layout is fixed, so the board never draws from its RNG.
    pub fn from_mines(width: usize, height: usize, mines: &[Point]) -> Result<Self, BoardError> {
        let mut board = Self::with_rng(width, height, 0, fastrand::Rng::with_seed(0))?;
        for &(row, col) in mines {
            let k = board.check_bounds(row, col)?;
            board.cells[k] = MINE;
        }
        board.count_mines();
        board.n_mines = board.cells.iter().filter(|&&v| v == MINE).count();
        board.state = GameState::Active;
        Ok(board)
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    fn point(&self, k: usize) -> Point {
        (k / self.width, k % self.width)
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<usize, BoardError> {
        if row >= self.height || col >= self.width {
            return Err(BoardError::OutOfBounds { row, col });
        }
        Ok(self.idx(row, col))
    }

    /// Indexes of the up to eight cells surrounding (row, col).
    fn neighbors(&self, row: usize, col: usize) -> impl Iterator<Item = usize> + '_ {
        NEIGHBORS.iter().filter_map(move |&(dr, dc)| {
            let r = row.checked_add_signed(dr)?;
            let c = col.checked_add_signed(dc)?;
            (r < self.height && c < self.width).then(|| self.idx(r, c))
        })
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

    pub fn n_mines(&self) -> usize {
        self.n_mines
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state != GameState::Uninitialized
    }

    /// True value of (row, col), `None` outside the grid.
    pub fn value(&self, row: usize, col: usize) -> Option<u8> {
        (row < self.height && col < self.width).then(|| self.cells[self.idx(row, col)])
    }

    pub fn is_visible(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.visible[self.idx(row, col)]
    }

    pub fn is_flagged(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.flagged[self.idx(row, col)]
    }

    /// Copy of the true grid, one `Vec` per row.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        self.cells.chunks(self.width).map(<[u8]>::to_vec).collect()
    }

    pub fn hidden_count(&self) -> usize {
        self.visible.iter().filter(|&&v| !v).count()
    }

    /// Positions of every mine, in row-major order.
    pub fn mine_indexes(&self) -> Vec<Point> {
        (0..self.cells.len())
            .filter(|&k| self.cells[k] == MINE)
            .map(|k| self.point(k))
            .collect()
    }

    /// Read-only projection of (row, col) for display.
    pub fn view(&self, row: usize, col: usize) -> Option<CellView> {
        let value = self.value(row, col)?;
        if !self.visible[self.idx(row, col)] {
            return Some(CellView::Hidden);
        }
        Some(match value {
            CLEAR => CellView::Clear,
            MINE => CellView::Mine,
            n => CellView::Number(n),
        })
    }

    /// Replace the mine layout.
    ///
    /// Every non-mine value must equal its neighbour mine count. The mine
    /// count is recomputed, both masks are cleared, and the board becomes
    /// active, so the first click no longer places mines.
    pub fn set_grid(&mut self, rows: &[Vec<u8>]) -> Result<(), BoardError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(BoardError::InvalidConfig("grid must not be empty".into()));
        }
        if rows.iter().any(|r| r.len() != width) {
            return Err(BoardError::InvalidConfig("grid rows differ in length".into()));
        }
        if let Some(bad) = rows.iter().flatten().find(|&&v| v > MINE) {
            return Err(BoardError::InvalidConfig(format!("cell value {bad} out of range")));
        }

        let area = width * rows.len();
        let mut next = MineBoard {
            width,
            height: rows.len(),
            n_mines: 0,
            cells: rows.concat(),
            visible: vec![false; area],
            flagged: vec![false; area],
            state: GameState::Active,
            rng: self.rng.clone(),
        };
        let expected = {
            let mut counted = next.clone();
            counted.count_mines();
            counted.cells
        };
        if let Some(k) = (0..area).find(|&k| expected[k] != next.cells[k]) {
            let (row, col) = next.point(k);
            return Err(BoardError::InvalidConfig(format!(
                "cell ({row}, {col}) holds {} but has {} neighbouring mines",
                next.cells[k], expected[k]
            )));
        }
        next.n_mines = next.cells.iter().filter(|&&v| v == MINE).count();

        *self = next;
        Ok(())
    }

    /// Click (row, col).
    ///
    /// The first click places the mines away from the clicked cell, then
    /// the cell is revealed: a clear cell opens its connected clear region
    /// and that region's numbered border. Fails with `GameOver`/`GameWon`
    /// once the board is terminal.
    pub fn click(&mut self, row: usize, col: usize) -> Result<Click, BoardError> {
        let k = self.check_bounds(row, col)?;
        match self.state {
            GameState::Lost => return Err(BoardError::GameOver),
            GameState::Won => return Err(BoardError::GameWon),
            GameState::Uninitialized | GameState::Active => {}
        }

        if self.cells[k] == MINE {
            self.visible[k] = true;
            self.state = GameState::Lost;
            info!("mine hit at ({row}, {col})");
            return Ok(Click::Lost);
        }
        if self.visible[k] {
            return Ok(Click::AlreadyRevealed);
        }

        if self.state == GameState::Uninitialized {
            self.place_mines(row, col);
            self.state = GameState::Active;
        }

        let revealed = self.flood_reveal(row, col);
        debug!("click at ({row}, {col}) revealed {revealed} cells");

        if self.hidden_count() == self.n_mines {
            self.state = GameState::Won;
            info!("board cleared, {} mines avoided", self.n_mines);
            return Ok(Click::Won);
        }
        Ok(Click::Revealed)
    }

    /// Place `n_mines` mines uniformly at random outside the 3x3
    /// neighbourhood of (row, col), then fill in the counts.
    fn place_mines(&mut self, row: usize, col: usize) {
        let clicked = self.idx(row, col);
        let safe: Vec<usize> = self.neighbors(row, col).collect();
        let area = self.cells.len();

        let mut placed = 0;
        while placed != self.n_mines {
            let k = self.rng.usize(..area);
            if k != clicked && !safe.contains(&k) && self.cells[k] != MINE {
                self.cells[k] = MINE;
                placed += 1;
            }
        }
        self.count_mines();
        debug!("placed {placed} mines away from ({row}, {col})");
    }

    /// Set every non-mine cell to the number of mines around it.
    fn count_mines(&mut self) {
        for k in 0..self.cells.len() {
            if self.cells[k] == MINE {
                continue;
            }
            let (row, col) = self.point(k);
            let count = self
                .neighbors(row, col)
                .filter(|&n| self.cells[n] == MINE)
                .count();
            self.cells[k] = count as u8;
        }
    }

    /// Reveal (row, col) and, if it is clear, the connected clear region
    /// around it plus its numbered border. Returns the number of cells
    /// that became visible.
    ///
    /// A numbered cell reveals only itself. Cells are marked visible when
    /// pushed, so each one enters the stack at most once.
    fn flood_reveal(&mut self, row: usize, col: usize) -> usize {
        let start = self.idx(row, col);
        let mut revealed = 0;
        if !self.visible[start] {
            self.visible[start] = true;
            revealed += 1;
        }

        let mut stack = vec![start];
        while let Some(k) = stack.pop() {
            if self.cells[k] != CLEAR {
                continue;
            }
            let (r, c) = self.point(k);
            let neighbors: Vec<usize> = self.neighbors(r, c).collect();
            for n in neighbors {
                if self.visible[n] || self.cells[n] == MINE {
                    continue;
                }
                self.visible[n] = true;
                revealed += 1;
                if self.cells[n] == CLEAR {
                    stack.push(n);
                }
            }
        }
        revealed
    }

    /// Flag a hidden cell. Returns `false` if the cell is already visible.
    pub fn place_flag(&mut self, row: usize, col: usize) -> Result<bool, BoardError> {
        let k = self.check_bounds(row, col)?;
        if self.visible[k] {
            return Ok(false);
        }
        self.flagged[k] = true;
        Ok(true)
    }

    /// Remove a flag. Returns `false` if the cell was not flagged.
    pub fn remove_flag(&mut self, row: usize, col: usize) -> Result<bool, BoardError> {
        let k = self.check_bounds(row, col)?;
        if !self.flagged[k] {
            return Ok(false);
        }
        self.flagged[k] = false;
        Ok(true)
    }
}

/// Largest mine count that always leaves room for a safe first click.
pub fn max_mines(width: usize, height: usize) -> usize {
    let safe_zone = width.min(SAFE_ZONE_SIDE) * height.min(SAFE_ZONE_SIDE);
    (width * height).saturating_sub(safe_zone)
}

impl fmt::Display for CellView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellView::Hidden => f.write_str("?"),
            CellView::Clear => f.write_str("0"),
            CellView::Number(n) => write!(f, "{n}"),
            CellView::Mine => f.write_str("*"),
        }
    }
}
