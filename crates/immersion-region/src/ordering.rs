//! Intensity ordering
//!
//! Produces the visiting order for the labeling pass: every pixel exactly
//! once, ascending by intensity. Equal intensities are ordered by a fixed
//! [`TieBreak`] rule, so the sort key `(intensity, rank)` is a strict total
//! order and the result does not depend on the sort algorithm used.
//!
//! The tie-break rule changes which pixels end up on watershed lines, so
//! it is part of the result's identity and is recorded in the list.

use crate::error::{RegionError, RegionResult};
use immersion_core::{Coord, Grid};
use std::fmt::Debug;

/// Grids at least this large are sorted in parallel when the `parallel`
/// feature is enabled.
pub const PARALLEL_SORT_MIN_PIXELS: usize = 1 << 16;

/// Intensity sample type accepted by the ordering and labeling pass.
///
/// Any totally ordered copyable value works; `u8` and `u16` are the usual
/// choices for 8- and 16-bit imagery.
pub trait Intensity: Ord + Copy + Debug + Send + Sync {}

impl<T: Ord + Copy + Debug + Send + Sync> Intensity for T {}

/// Rule for ordering pixels of equal intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Ascending row-major index (row first, then column)
    #[default]
    RowMajor,
    /// Ascending column-major index (column first, then row)
    ColumnMajor,
}

impl TieBreak {
    /// Position of `coord` under this rule in a `rows × cols` grid.
    pub fn rank(self, coord: Coord, rows: usize, cols: usize) -> usize {
        match self {
            TieBreak::RowMajor => coord.row * cols + coord.col,
            TieBreak::ColumnMajor => coord.col * rows + coord.row,
        }
    }
}

/// One entry of the visiting order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedPixel<T> {
    pub intensity: T,
    pub coord: Coord,
}

/// Every pixel of a grid, sorted non-decreasing by intensity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedPixelList<T> {
    rows: usize,
    cols: usize,
    tie_break: TieBreak,
    pixels: Vec<OrderedPixel<T>>,
}

impl<T: Intensity> OrderedPixelList<T> {
    /// Wrap a caller-built sequence for a `rows × cols` grid.
    ///
    /// The sequence must ascend by `(intensity, rank)` under `tie_break`, so
    /// the recorded rule always describes it. Whether it covers every pixel
    /// is checked by the labeling pass.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidOrdering`] if the shape overflows, a
    /// pixel lies outside the grid, intensities decrease, or equal
    /// intensities are out of `tie_break` order.
    pub fn from_pixels(
        rows: usize,
        cols: usize,
        tie_break: TieBreak,
        pixels: Vec<OrderedPixel<T>>,
    ) -> RegionResult<Self> {
        if rows.checked_mul(cols).is_none() {
            return Err(RegionError::InvalidOrdering(format!(
                "{}x{} grid is too large to rank",
                rows, cols
            )));
        }
        if let Some(p) = pixels
            .iter()
            .find(|p| p.coord.row >= rows || p.coord.col >= cols)
        {
            return Err(RegionError::InvalidOrdering(format!(
                "pixel ({}, {}) is outside the {}x{} grid",
                p.coord.row, p.coord.col, rows, cols
            )));
        }
        let rank = |p: &OrderedPixel<T>| tie_break.rank(p.coord, rows, cols);
        for (i, w) in pixels.windows(2).enumerate() {
            let (prev, next) = (&w[0], &w[1]);
            if next.intensity < prev.intensity {
                return Err(RegionError::InvalidOrdering(format!(
                    "intensity decreases at position {}: {:?} after {:?}",
                    i + 1,
                    next.intensity,
                    prev.intensity
                )));
            }
            if next.intensity == prev.intensity && rank(next) <= rank(prev) {
                return Err(RegionError::InvalidOrdering(format!(
                    "pixel ({}, {}) at position {} breaks {:?} order",
                    next.coord.row,
                    next.coord.col,
                    i + 1,
                    tie_break
                )));
            }
        }
        Ok(Self {
            rows,
            cols,
            tie_break,
            pixels,
        })
    }

    /// Shape of the grid this ordering was built for.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderedPixel<T>> {
        self.pixels.iter()
    }

    pub fn as_slice(&self) -> &[OrderedPixel<T>] {
        &self.pixels
    }

    pub fn into_vec(self) -> Vec<OrderedPixel<T>> {
        self.pixels
    }
}

impl<'a, T> IntoIterator for &'a OrderedPixelList<T> {
    type Item = &'a OrderedPixel<T>;
    type IntoIter = std::slice::Iter<'a, OrderedPixel<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.pixels.iter()
    }
}

/// Order a grid's pixels by ascending intensity, ties in row-major order.
pub fn order<T: Intensity>(grid: &Grid<T>) -> OrderedPixelList<T> {
    order_with(grid, TieBreak::RowMajor)
}

/// Order a grid's pixels by ascending intensity with an explicit tie-break.
pub fn order_with<T: Intensity>(grid: &Grid<T>, tie_break: TieBreak) -> OrderedPixelList<T> {
    let (rows, cols) = grid.shape();
    let mut pixels: Vec<OrderedPixel<T>> = grid
        .iter()
        .map(|(coord, &intensity)| OrderedPixel { intensity, coord })
        .collect();

    sort_pixels(&mut pixels, tie_break, rows, cols);

    OrderedPixelList {
        rows,
        cols,
        tie_break,
        pixels,
    }
}

#[cfg(feature = "parallel")]
fn sort_pixels<T: Intensity>(
    pixels: &mut [OrderedPixel<T>],
    tie_break: TieBreak,
    rows: usize,
    cols: usize,
) {
    use rayon::prelude::*;

    if pixels.len() >= PARALLEL_SORT_MIN_PIXELS {
        pixels.par_sort_unstable_by_key(|p| (p.intensity, tie_break.rank(p.coord, rows, cols)));
    } else {
        pixels.sort_unstable_by_key(|p| (p.intensity, tie_break.rank(p.coord, rows, cols)));
    }
}

#[cfg(not(feature = "parallel"))]
fn sort_pixels<T: Intensity>(
    pixels: &mut [OrderedPixel<T>],
    tie_break: TieBreak,
    rows: usize,
    cols: usize,
) {
    pixels.sort_unstable_by_key(|p| (p.intensity, tie_break.rank(p.coord, rows, cols)));
}
