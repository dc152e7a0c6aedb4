//! Error types for the color-fill solver.

use thiserror::Error;

/// Structural problems with a board, detected before any search begins.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    /// The board has no rows, or its first row has no cells.
    #[error("board must have at least one row and one column")]
    Empty,

    /// A row does not have the same number of cells as the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A character in a text board does not name a palette tile.
    #[error("unrecognized character '{ch}' in row {row} col {col}")]
    UnknownColor { ch: char, row: usize, col: usize },

    /// The anchor cell lies outside the grid.
    #[error("anchor ({row}, {col}) is outside the {rows}x{cols} board")]
    AnchorOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
}

/// Errors raised while setting up a solve.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    #[error(transparent)]
    Board(#[from] BoardError),

    /// The lookahead solver needs at least one ply.
    #[error("lookahead depth must be at least 1, got {0}")]
    InvalidDepth(usize),
}

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type alias for solver setup.
pub type Result<T> = std::result::Result<T, SolveError>;
