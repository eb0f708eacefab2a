//! Error types for immersion-region

use thiserror::Error;

/// Errors that can occur during ordering and labeling
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error (zero-area or ragged grids end up here)
    #[error("core error: {0}")]
    Core(#[from] immersion_core::Error),

    /// Ordering and grid disagree in shape
    #[error("dimension mismatch: grid is {}x{}, ordering is {}x{}", .grid.0, .grid.1, .ordering.0, .ordering.1)]
    DimensionMismatch {
        grid: (usize, usize),
        ordering: (usize, usize),
    },

    /// Ordering visits a pixel out of bounds, twice, or out of sequence
    #[error("invalid ordering: {0}")]
    InvalidOrdering(String),

    /// Ordering ended before every pixel was visited
    #[error("incomplete ordering: visited {visited} of {total} pixels")]
    IncompleteOrdering { visited: usize, total: usize },

    /// Raw label value below the unassigned sentinel
    #[error("invalid label value: {0}")]
    InvalidLabel(i32),

    /// More regions than the raw label type can hold
    #[error("region id overflow after {0} regions")]
    RegionOverflow(u32),
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
