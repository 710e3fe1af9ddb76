//! Constants shared by the board engines.
//!
//! Tile values, mine-grid cell values, neighbour offsets and the board
//! sizes the command-line front end falls back to.

// =============================================================================
// Sliding Tiles
// =============================================================================

/// Largest exponent in the tile value set (tiles are 2^1 ..= 2^20).
pub const MAX_TILE_EXPONENT: u32 = 20;

/// Largest value a newly spawned tile may be configured to take.
pub const MAX_TILE_VALUE: u32 = 1 << MAX_TILE_EXPONENT;

/// Largest tile a grid may be loaded with; two of them still merge within `u32`.
pub const MAX_GRID_TILE: u32 = 1 << 30;

/// Default bound for newly spawned tiles (spawns are 2 or 4).
pub const DEFAULT_MAX_RANDOM_VALUE: u32 = 4;

/// Empty tile.
pub const EMPTY_TILE: u32 = 0;

/// Number of seed tiles placed when a tile board is created.
pub const SEED_TILES: usize = 2;

// =============================================================================
// Mines
// =============================================================================

/// Revealed cell with no adjacent mines.
pub const CLEAR: u8 = 0;

/// Cell holding a mine.
pub const MINE: u8 = 9;

/// Side of the square neighbourhood kept free of mines around the first click.
pub const SAFE_ZONE_SIDE: usize = 3;

// =============================================================================
// Neighbour Offsets
// =============================================================================

/// (row, col) offsets to the eight surrounding cells.
/// Order: NW, N, NE, W, E, SW, S, SE
pub const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

// =============================================================================
// Front-end Defaults
// =============================================================================

/// Default tile board side.
pub const DEFAULT_TILE_SIDE: usize = 4;

/// Default mine board side (beginner layout).
pub const DEFAULT_MINE_SIDE: usize = 9;

/// Default mine count (beginner layout).
pub const DEFAULT_MINES: usize = 10;
