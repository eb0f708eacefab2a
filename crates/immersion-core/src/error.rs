//! Error types for immersion-core
//!
//! Provides a unified error type for grid construction, access and
//! conversion. Each variant carries enough context to report the
//! offending shape or value.

use thiserror::Error;

/// immersion-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Grid with zero rows or zero columns, or a cell count that overflows
    #[error("invalid grid dimensions: {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    /// Rows of unequal length passed to `Grid::from_rows`
    #[error("grid is not rectangular: row {row} has {actual} columns, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// Backing buffer does not match the requested shape
    #[error("data length mismatch: expected {expected} cells, got {actual}")]
    DataLength { expected: usize, actual: usize },

    /// Coordinate outside the grid
    #[error("coordinate ({row}, {col}) out of bounds for {rows}x{cols} grid")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    /// Invalid parameter value
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;
