//! Immersion watershed segmentation
//!
//! Composes the two stages: order the pixels by intensity, then label them
//! in that order. Pixels are treated as a topographic surface flooded from
//! its lowest points; a pixel touching exactly one flooded basin joins it,
//! a pixel touching two or more becomes a watershed line.

use crate::error::RegionResult;
use crate::label::LabelGrid;
use crate::labeler::{Segmentation, label_with};
use crate::ordering::{Intensity, TieBreak, order_with};
use immersion_core::{Connectivity, Grid};
use log::debug;

/// Options for watershed segmentation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WatershedOptions {
    /// Order of pixels with equal intensity
    pub tie_break: TieBreak,
    /// Connectivity used to find neighbors
    pub connectivity: Connectivity,
}

impl WatershedOptions {
    /// Create new options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tie-break rule
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Set connectivity type
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }
}

/// Segment an intensity grid with default options.
///
/// Returns a label grid where 0 marks watershed pixels and positive values
/// are region ids numbered in order of discovery.
///
/// # Example
///
/// ```
/// use immersion_core::Grid;
/// use immersion_region::segment;
///
/// let grid = Grid::from_rows(vec![vec![1u8, 1, 9, 2, 2]]).unwrap();
/// let labels = segment(&grid).unwrap();
/// assert_eq!(labels.as_raw().as_slice(), &[1, 1, 0, 2, 2]);
/// ```
pub fn segment<T: Intensity>(grid: &Grid<T>) -> RegionResult<LabelGrid> {
    segment_with_options(grid, &WatershedOptions::default()).map(|s| s.labels)
}

/// Segment an intensity grid, returning labels and pass statistics.
pub fn segment_with_options<T: Intensity>(
    grid: &Grid<T>,
    options: &WatershedOptions,
) -> RegionResult<Segmentation> {
    let (rows, cols) = grid.shape();
    debug!(
        "watershed: {}x{} grid, tie-break {:?}, {:?}",
        rows, cols, options.tie_break, options.connectivity
    );

    let ordering = order_with(grid, options.tie_break);
    let result = label_with(grid, &ordering, options.connectivity)?;

    debug!(
        "watershed: {} regions, {} watershed pixels, {} isolated pixels",
        result.stats.regions, result.stats.watershed_pixels, result.stats.isolated_pixels
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_builder() {
        let options = WatershedOptions::new()
            .with_tie_break(TieBreak::ColumnMajor)
            .with_connectivity(Connectivity::FourWay);
        assert_eq!(options.tie_break, TieBreak::ColumnMajor);
        assert_eq!(options.connectivity, Connectivity::FourWay);

        let defaults = WatershedOptions::default();
        assert_eq!(defaults.tie_break, TieBreak::RowMajor);
        assert_eq!(defaults.connectivity, Connectivity::EightWay);
    }

    #[test]
    fn test_segment_two_valleys() {
        let grid = Grid::from_rows(vec![
            vec![0u8, 0, 5, 1, 1],
            vec![0, 0, 5, 1, 1],
            vec![0, 0, 5, 1, 1],
        ])
        .unwrap();
        let result = segment_with_options(&grid, &WatershedOptions::default()).unwrap();
        assert_eq!(
            result.labels.as_raw().as_slice(),
            &[1, 1, 0, 2, 2, 1, 1, 0, 2, 2, 1, 1, 0, 2, 2]
        );
        assert_eq!(result.stats.regions, 2);
        assert_eq!(result.stats.watershed_pixels, 3);
        assert_eq!(result.stats.isolated_pixels, 0);
    }

    #[test]
    fn test_tie_break_decides_discovery_order() {
        // Both minima have intensity 0; row-major reaches the top-right one
        // first, column-major the bottom-left one.
        let grid = Grid::from_rows(vec![vec![5u8, 5, 5, 0], vec![0, 5, 5, 5]]).unwrap();
        let four = WatershedOptions::new().with_connectivity(Connectivity::FourWay);

        let row_major = segment_with_options(&grid, &four).unwrap();
        assert_eq!(
            row_major.labels.as_raw().as_slice(),
            &[2, 2, 0, 1, 2, 2, 2, 0]
        );

        let column_major =
            segment_with_options(&grid, &four.with_tie_break(TieBreak::ColumnMajor)).unwrap();
        assert_eq!(
            column_major.labels.as_raw().as_slice(),
            &[1, 1, 0, 2, 1, 1, 1, 0]
        );
    }
}
