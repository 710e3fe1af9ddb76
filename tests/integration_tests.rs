//! Integration tests for grid-puzzles
//!
//! Boards with a fixed layout are built through the structured setters
//! (`TileBoard::set_grid`, `MineBoard::from_mines`); random behaviour is
//! checked over many seeds.

use grid_puzzles::constants::MINE;
use grid_puzzles::error::BoardError;
use grid_puzzles::mines::{CellView, Click, GameState, MineBoard};
use grid_puzzles::tiles::{Direction, TileBoard};

// =============================================================================
// Helper functions
// =============================================================================

/// Tile board holding exactly `rows`.
fn tiles(rows: &[Vec<u32>]) -> TileBoard {
    let mut board = TileBoard::with_seed(rows[0].len(), rows.len(), 4, 0).unwrap();
    board.set_grid(rows).unwrap();
    board
}

/// 5x5 board split by a wall of mines down column 2.
fn walled_board() -> MineBoard {
    let wall: Vec<(usize, usize)> = (0..5).map(|r| (r, 2)).collect();
    MineBoard::from_mines(5, 5, &wall).unwrap()
}

/// Every non-mine cell holds the number of mines around it.
fn assert_counts_consistent(board: &MineBoard) {
    let rows = board.rows();
    let (height, width) = board.shape();
    for r in 0..height {
        for c in 0..width {
            if rows[r][c] == MINE {
                continue;
            }
            let mut count = 0;
            for nr in r.saturating_sub(1)..=(r + 1).min(height - 1) {
                for nc in c.saturating_sub(1)..=(c + 1).min(width - 1) {
                    if (nr, nc) != (r, c) && rows[nr][nc] == MINE {
                        count += 1;
                    }
                }
            }
            assert_eq!(rows[r][c], count, "count mismatch at ({r}, {c})");
        }
    }
}

// =============================================================================
// Tile board: slides
// =============================================================================

#[test]
fn test_slide_right_long_line() {
    let mut board = tiles(&[vec![2, 4, 4, 4, 0, 0, 2, 0, 0, 0, 2]]);
    assert!(board.slide(Direction::Right));
    assert_eq!(board.rows(), vec![vec![0, 0, 0, 0, 0, 0, 0, 2, 4, 8, 4]]);

    let mut board = tiles(&[vec![2, 0, 0, 8, 0, 0, 4, 0, 0, 0, 2]]);
    assert!(board.slide(Direction::Right));
    assert_eq!(board.rows(), vec![vec![0, 0, 0, 0, 0, 0, 0, 2, 8, 4, 2]]);
}

#[test]
fn test_slide_left_mirrors_right() {
    let mut board = tiles(&[vec![2, 0, 0, 0, 2, 0, 0, 4, 4, 4, 2]]);
    assert!(board.slide(Direction::Left));
    assert_eq!(board.rows(), vec![vec![4, 8, 4, 2, 0, 0, 0, 0, 0, 0, 0]]);
}

#[test]
fn test_slide_merges_once_per_pair() {
    let mut board = tiles(&[vec![2, 2, 2, 2]]);
    assert!(board.slide(Direction::Left));
    assert_eq!(board.rows(), vec![vec![4, 4, 0, 0]]);
    assert!(board.slide(Direction::Left));
    assert_eq!(board.rows(), vec![vec![8, 0, 0, 0]]);
}

#[test]
fn test_slide_columns() {
    let mut board = tiles(&[vec![2], vec![2], vec![4], vec![0]]);
    assert!(board.slide(Direction::Up));
    assert_eq!(board.cells(), &[4, 4, 0, 0]);

    let mut board = tiles(&[vec![2], vec![2], vec![4], vec![0]]);
    assert!(board.slide(Direction::Down));
    assert_eq!(board.cells(), &[0, 0, 4, 4]);
}

#[test]
fn test_blocked_slide_is_idempotent() {
    let mut board = tiles(&[vec![2, 4, 0], vec![8, 0, 0], vec![0, 0, 0]]);
    let before = board.rows();
    for _ in 0..3 {
        assert!(!board.slide(Direction::Left));
        assert!(!board.slide(Direction::Up));
    }
    assert_eq!(board.rows(), before);
}

#[test]
fn test_slide_str() {
    let mut board = tiles(&[vec![0, 2]]);
    assert_eq!(board.slide_str("left"), Ok(true));
    assert_eq!(
        board.slide_str("forward"),
        Err(BoardError::InvalidDirection("forward".into()))
    );
    assert_eq!(board.rows(), vec![vec![2, 0]]);
}

// =============================================================================
// Tile board: random tiles and game over
// =============================================================================

#[test]
fn test_insert_random_tile_fills_one_cell() {
    let mut board = tiles(&[vec![2, 0, 0], vec![0, 0, 0]]);
    let mut empty = board.empty_cells();
    while empty > 0 {
        assert!(board.insert_random_tile());
        assert_eq!(board.empty_cells(), empty - 1);
        empty -= 1;
    }
    assert!(board.is_full());
    assert!(!board.insert_random_tile());
    assert!(board.cells().iter().all(|&v| v == 2 || v == 4));
}

#[test]
fn test_slide_and_insert() {
    let mut board = tiles(&[vec![2, 0], vec![0, 0]]);
    assert_eq!(board.slide_and_insert(Direction::Left), (false, false));
    assert_eq!(board.empty_cells(), 3);

    assert_eq!(board.slide_and_insert(Direction::Right), (true, true));
    assert_eq!(board.empty_cells(), 2);
    assert_eq!(board.value(0, 1), Some(2));
}

#[test]
fn test_game_over_checkerboard() {
    let board = tiles(&[vec![2, 4], vec![4, 2]]);
    assert!(board.is_full());
    assert!(board.is_game_over());
}

#[test]
fn test_game_not_over_with_merge_available() {
    let board = tiles(&[vec![2, 2], vec![4, 8]]);
    assert!(board.is_full());
    assert!(!board.is_game_over());
    // Probing must leave the grid untouched
    assert_eq!(board.rows(), vec![vec![2, 2], vec![4, 8]]);
}

#[test]
fn test_game_not_over_with_empty_cell() {
    let board = tiles(&[vec![2, 4], vec![4, 0]]);
    assert!(!board.is_game_over());
}

#[test]
fn test_same_seed_same_game() {
    let mut a = TileBoard::with_seed(4, 4, 8, 99).unwrap();
    let mut b = TileBoard::with_seed(4, 4, 8, 99).unwrap();
    assert_eq!(a.cells(), b.cells());
    for d in [Direction::Left, Direction::Down, Direction::Right, Direction::Up] {
        assert_eq!(a.slide_and_insert(d), b.slide_and_insert(d));
        assert_eq!(a.cells(), b.cells());
    }
}

// =============================================================================
// Mine board: lazy placement
// =============================================================================

#[test]
fn test_first_click_center_is_safe() {
    for seed in 0..200 {
        let mut board = MineBoard::with_seed(9, 9, 10, seed).unwrap();
        let result = board.click(4, 4).unwrap();
        assert_ne!(result, Click::Lost, "seed {seed}");

        let mines = board.mine_indexes();
        assert_eq!(mines.len(), 10);
        for (r, c) in mines {
            assert!(
                !((3..=5).contains(&r) && (3..=5).contains(&c)),
                "seed {seed}: mine at ({r}, {c})"
            );
        }
        assert_counts_consistent(&board);
        assert_eq!(board.view(4, 4), Some(CellView::Clear));
    }
}

#[test]
fn test_first_click_corner_is_safe() {
    for seed in 0..100 {
        let mut board = MineBoard::with_seed(6, 5, 20, seed).unwrap();
        board.click(0, 0).unwrap();
        let mines = board.mine_indexes();
        assert_eq!(mines.len(), 20);
        assert!(!mines.iter().any(|&(r, c)| r <= 1 && c <= 1));
        assert_counts_consistent(&board);
    }
}

#[test]
fn test_densest_layout_fills_everything_outside_safe_zone() {
    // 4x4 with the 3x3 zone at the top-left kept free: 7 mines, 7 cells left
    let mut board = MineBoard::with_seed(4, 4, 7, 5).unwrap();
    assert_eq!(board.click(1, 1), Ok(Click::Won));
    let mut expected: Vec<(usize, usize)> = (0..4).map(|c| (3, c)).collect();
    expected.extend((0..3).map(|r| (r, 3)));
    expected.sort();
    assert_eq!(board.mine_indexes(), expected);
}

#[test]
fn test_placement_happens_once() {
    let mut board = MineBoard::with_seed(9, 9, 10, 3).unwrap();
    assert_eq!(board.state(), GameState::Uninitialized);
    board.click(4, 4).unwrap();
    assert_eq!(board.state(), GameState::Active);
    let layout = board.rows();

    let target = (0..9)
        .flat_map(|r| (0..9).map(move |c| (r, c)))
        .find(|&(r, c)| !board.is_visible(r, c) && board.value(r, c) != Some(MINE));
    if let Some((r, c)) = target {
        board.click(r, c).unwrap();
        assert_eq!(board.rows(), layout);
    }
}

#[test]
fn test_board_without_mines_wins_on_first_click() {
    let mut board = MineBoard::new(3, 3, 0).unwrap();
    assert_eq!(board.click(1, 1), Ok(Click::Won));
    assert_eq!(board.hidden_count(), 0);
    assert_eq!(board.click(0, 0), Err(BoardError::GameWon));
}

// =============================================================================
// Mine board: flood reveal
// =============================================================================

#[test]
fn test_flood_stops_at_numbered_border() {
    let mut board = walled_board();
    assert_eq!(board.click(0, 0), Ok(Click::Revealed));

    for r in 0..5 {
        assert_eq!(board.view(r, 0), Some(CellView::Clear));
        assert!(matches!(board.view(r, 1), Some(CellView::Number(_))));
        for c in 2..5 {
            assert_eq!(board.view(r, c), Some(CellView::Hidden), "({r}, {c})");
        }
    }
    assert_eq!(board.hidden_count(), 15);
}

#[test]
fn test_flood_reveals_whole_open_board() {
    let mut board = MineBoard::from_mines(6, 6, &[(5, 5)]).unwrap();
    assert_eq!(board.click(0, 0), Ok(Click::Won));
    assert_eq!(board.hidden_count(), 1);
    assert!(!board.is_visible(5, 5));
}

#[test]
fn test_clicking_numbered_cell_reveals_only_it() {
    let mut board = walled_board();
    assert_eq!(board.click(2, 1), Ok(Click::Revealed));
    assert_eq!(board.hidden_count(), 24);
    assert_eq!(board.view(2, 1), Some(CellView::Number(3)));
}

#[test]
fn test_click_on_revealed_cell_changes_nothing() {
    let mut board = walled_board();
    board.click(0, 0).unwrap();
    let hidden = board.hidden_count();
    assert_eq!(board.click(3, 0), Ok(Click::AlreadyRevealed));
    assert_eq!(board.click(3, 1), Ok(Click::AlreadyRevealed));
    assert_eq!(board.hidden_count(), hidden);
}

// =============================================================================
// Mine board: terminal states
// =============================================================================

#[test]
fn test_win_signalled_once() {
    let mut board = walled_board();
    assert_eq!(board.click(0, 0), Ok(Click::Revealed));
    assert_eq!(board.state(), GameState::Active);
    assert_eq!(board.click(4, 4), Ok(Click::Won));
    assert_eq!(board.state(), GameState::Won);
    assert_eq!(board.click(0, 0), Err(BoardError::GameWon));
    assert_eq!(board.click(2, 2), Err(BoardError::GameWon));
}

#[test]
fn test_mine_click_loses() {
    let mut board = walled_board();
    assert_eq!(board.click(2, 2), Ok(Click::Lost));
    assert_eq!(board.state(), GameState::Lost);
    assert_eq!(board.view(2, 2), Some(CellView::Mine));
    assert_eq!(board.click(0, 0), Err(BoardError::GameOver));
    assert_eq!(board.hidden_count(), 24);
}

// =============================================================================
// Mine board: flags and layout replacement
// =============================================================================

#[test]
fn test_flags() {
    let mut board = walled_board();
    board.click(0, 0).unwrap();

    assert_eq!(board.place_flag(0, 3), Ok(true));
    assert_eq!(board.place_flag(0, 3), Ok(true));
    assert!(board.is_flagged(0, 3));
    assert_eq!(board.place_flag(0, 0), Ok(false));
    assert!(!board.is_flagged(0, 0));

    assert_eq!(board.remove_flag(0, 3), Ok(true));
    assert_eq!(board.remove_flag(0, 3), Ok(false));
    assert!(!board.is_flagged(0, 3));
}

#[test]
fn test_flag_does_not_protect_cell() {
    let mut board = walled_board();
    board.place_flag(1, 4).unwrap();
    assert_eq!(board.click(1, 4), Ok(Click::Revealed));
    board.place_flag(3, 2).unwrap();
    assert_eq!(board.click(3, 2), Ok(Click::Lost));
}

#[test]
fn test_set_grid_recomputes_mine_count() {
    let mut board = MineBoard::new(9, 9, 10).unwrap();
    board
        .set_grid(&[vec![9, 2, 9], vec![1, 2, 1], vec![0, 0, 0]])
        .unwrap();
    assert_eq!(board.n_mines(), 2);
    assert_eq!(board.shape(), (3, 3));
    assert_eq!(board.mine_indexes(), vec![(0, 0), (0, 2)]);
    assert!(board.is_initialized());

    // No lazy placement on a board whose layout was set
    assert_eq!(board.click(2, 1), Ok(Click::Revealed));
    assert_eq!(board.mine_indexes(), vec![(0, 0), (0, 2)]);
    assert_eq!(board.hidden_count(), 3);
}

#[test]
fn test_from_mines_rejects_outside_point() {
    assert_eq!(
        MineBoard::from_mines(3, 3, &[(3, 0)]).unwrap_err(),
        BoardError::OutOfBounds { row: 3, col: 0 }
    );
}
