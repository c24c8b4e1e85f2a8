//! Error types for maze generation and path finding

use thiserror::Error;

use crate::grid::Cell;

/// Maze error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MazeError {
    #[error("Invalid maze dimensions {rows}x{cols}: both must be at least 1")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("No path from {from} to {to}")]
    Unreachable { from: Cell, to: Cell },

    #[error("Invalid coordinate {cell}: {reason}")]
    InvalidCoordinate { cell: Cell, reason: String },

    #[error("Unexpected character `{found}` at line {line}, column {column}")]
    Parse {
        line: usize,
        column: usize,
        found: String,
    },

    #[error("Row {line} has {found} cells, expected {expected}")]
    RaggedRow {
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("{0} not found in maze")]
    MissingMarker(&'static str),

    #[error("Path is empty")]
    EmptyPath,

    #[error("Invalid coordinate literal `{0}`, expected `row,col`")]
    InvalidLiteral(String),
}

impl MazeError {
    pub(crate) fn invalid_coordinate(cell: Cell, reason: impl Into<String>) -> Self {
        MazeError::InvalidCoordinate {
            cell,
            reason: reason.into(),
        }
    }
}

/// Result type for maze operations
pub type Result<T> = std::result::Result<T, MazeError>;
