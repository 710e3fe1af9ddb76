//! Errors reported by the board engines.
//!
//! Routine no-ops (a slide that changes nothing, a click on a revealed
//! cell, an insert on a full board) are reported as `false` or as a
//! [`Click`](crate::mines::Click) variant, never as errors.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// A construction parameter or a replacement grid violates a precondition.
    InvalidConfig(String),
    /// Unrecognised movement token.
    InvalidDirection(String),
    /// Coordinates outside the grid.
    OutOfBounds { row: usize, col: usize },
    /// The board was already lost.
    GameOver,
    /// The board was already won.
    GameWon,
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            BoardError::InvalidDirection(token) => write!(
                f,
                "unknown direction '{token}', expected one of up, down, left, right"
            ),
            BoardError::OutOfBounds { row, col } => {
                write!(f, "cell ({row}, {col}) is outside the board")
            }
            BoardError::GameOver => write!(f, "game over, a mine was clicked"),
            BoardError::GameWon => write!(f, "game already won"),
        }
    }
}

impl std::error::Error for BoardError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            BoardError::OutOfBounds { row: 3, col: 7 }.to_string(),
            "cell (3, 7) is outside the board"
        );
        assert!(
            BoardError::InvalidDirection("north".into())
                .to_string()
                .contains("'north'")
        );
    }
}
