//! Region labeling pass
//!
//! Visits pixels in the order given by an [`OrderedPixelList`] and writes
//! one final label per pixel, based only on the labels its neighbors
//! already carry. Each pixel's label depends on everything written before
//! it, so the pass is strictly sequential.
//!
//! This is a single forward pass, not a flooding watershed: results depend
//! on the visiting order (including the tie-break rule) and generally
//! differ from priority-queue or marker-controlled watershed.

use crate::error::{RegionError, RegionResult};
use crate::label::{Label, LabelGrid};
use crate::neighborhood::{Classification, NeighborSummary};
use crate::ordering::{Intensity, OrderedPixelList};
use immersion_core::{Connectivity, Coord, Grid};
use log::{debug, trace, warn};

/// Counters collected during a labeling pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LabelingStats {
    /// Number of regions created
    pub regions: u32,
    /// Number of pixels labeled watershed
    pub watershed_pixels: usize,
    /// Number of pixels that had no informative neighbor
    pub isolated_pixels: usize,
}

/// Result of a completed labeling pass
#[derive(Debug, Clone)]
pub struct Segmentation {
    pub labels: LabelGrid,
    pub stats: LabelingStats,
}

/// Incremental labeler owning the label grid during a pass
#[derive(Debug)]
pub struct RegionLabeler {
    labels: LabelGrid,
    connectivity: Connectivity,
    visited: usize,
    stats: LabelingStats,
}

impl RegionLabeler {
    /// Start a pass over a `rows × cols` grid.
    pub fn new(rows: usize, cols: usize, connectivity: Connectivity) -> RegionResult<Self> {
        Ok(Self {
            labels: LabelGrid::new(rows, cols)?,
            connectivity,
            visited: 0,
            stats: LabelingStats::default(),
        })
    }

    /// Label the next pixel in visiting order.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidOrdering`] if `coord` is outside the
    /// grid or was already visited, and [`RegionError::RegionOverflow`] if
    /// region ids run out.
    pub fn visit(&mut self, coord: Coord) -> RegionResult<Label> {
        match self.labels.get(coord) {
            Some(Label::Unassigned) => {}
            Some(_) => {
                return Err(RegionError::InvalidOrdering(format!(
                    "pixel ({}, {}) visited twice",
                    coord.row, coord.col
                )));
            }
            None => {
                return Err(RegionError::InvalidOrdering(format!(
                    "pixel ({}, {}) is outside the {}x{} grid",
                    coord.row,
                    coord.col,
                    self.labels.rows(),
                    self.labels.cols()
                )));
            }
        }

        let summary = NeighborSummary::scan(&self.labels, coord, self.connectivity);
        let label = match summary.classify() {
            Classification::NewRegion => self.new_region(coord)?,
            Classification::Isolated => {
                self.stats.isolated_pixels += 1;
                if summary.watershed_neighbors() > 0 {
                    warn!(
                        "pixel ({}, {}) is surrounded by watershed pixels; starting a new region",
                        coord.row, coord.col
                    );
                } else {
                    debug!(
                        "pixel ({}, {}) has no neighbors; starting a new region",
                        coord.row, coord.col
                    );
                }
                self.new_region(coord)?
            }
            Classification::Join(id) => Label::Region(id),
            Classification::Watershed => {
                self.stats.watershed_pixels += 1;
                Label::Watershed
            }
        };

        self.labels.assign(coord, label)?;
        self.visited += 1;
        Ok(label)
    }

    fn new_region(&mut self, coord: Coord) -> RegionResult<Label> {
        if self.stats.regions >= i32::MAX as u32 {
            return Err(RegionError::RegionOverflow(self.stats.regions));
        }
        self.stats.regions += 1;
        trace!(
            "region {} seeded at ({}, {})",
            self.stats.regions, coord.row, coord.col
        );
        Ok(Label::Region(self.stats.regions))
    }

    /// Labels written so far.
    pub fn labels(&self) -> &LabelGrid {
        &self.labels
    }

    /// Number of pixels visited so far.
    pub fn visited(&self) -> usize {
        self.visited
    }

    pub fn stats(&self) -> LabelingStats {
        self.stats
    }

    /// End the pass.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::IncompleteOrdering`] if any pixel was never
    /// visited.
    pub fn finish(self) -> RegionResult<Segmentation> {
        let total = self.labels.len();
        if self.visited != total {
            return Err(RegionError::IncompleteOrdering {
                visited: self.visited,
                total,
            });
        }
        Ok(Segmentation {
            labels: self.labels,
            stats: self.stats,
        })
    }
}

/// Label a grid using 8-way connectivity.
///
/// `ordering` must come from the same grid (see [`crate::order`]).
pub fn label<T: Intensity>(
    grid: &Grid<T>,
    ordering: &OrderedPixelList<T>,
) -> RegionResult<LabelGrid> {
    label_with(grid, ordering, Connectivity::EightWay).map(|s| s.labels)
}

/// Label a grid with the given connectivity, returning pass statistics.
///
/// # Errors
///
/// Returns [`RegionError::DimensionMismatch`] if the ordering was built
/// for a different shape, [`RegionError::InvalidOrdering`] if it disagrees
/// with the grid's intensities or visits a pixel twice, and
/// [`RegionError::IncompleteOrdering`] if it misses pixels.
pub fn label_with<T: Intensity>(
    grid: &Grid<T>,
    ordering: &OrderedPixelList<T>,
    connectivity: Connectivity,
) -> RegionResult<Segmentation> {
    if ordering.shape() != grid.shape() {
        return Err(RegionError::DimensionMismatch {
            grid: grid.shape(),
            ordering: ordering.shape(),
        });
    }

    let (rows, cols) = grid.shape();
    let mut labeler = RegionLabeler::new(rows, cols, connectivity)?;
    for pixel in ordering {
        match grid.get(pixel.coord) {
            Some(&value) if value == pixel.intensity => {}
            Some(&value) => {
                return Err(RegionError::InvalidOrdering(format!(
                    "pixel ({}, {}) has intensity {:?} in the grid but {:?} in the ordering",
                    pixel.coord.row, pixel.coord.col, value, pixel.intensity
                )));
            }
            None => {}
        }
        labeler.visit(pixel.coord)?;
    }
    labeler.finish()
}
