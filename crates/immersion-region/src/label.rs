//! Label values and the label grid
//!
//! A label grid cell holds one of three kinds of value:
//!
//! | Raw value | Meaning |
//! |---|---|
//! | `-1` ([`UNASSIGNED`]) | not visited yet |
//! | `0` ([`WATERSHED`]) | boundary between two or more regions |
//! | `1, 2, 3, …` | region id, in order of discovery |
//!
//! Cells are written at most once. The only way to write is the
//! crate-private [`LabelGrid::assign`], used by the labeler.

use crate::error::{RegionError, RegionResult};
use immersion_core::{Coord, Grid};

/// Raw value of a cell that has not been visited.
pub const UNASSIGNED: i32 = -1;

/// Raw value of a watershed (boundary) cell.
pub const WATERSHED: i32 = 0;

/// Decoded label of one cell.
///
/// The derived ordering matches the raw integer ordering:
/// `Unassigned < Watershed < Region(1) < Region(2) < …`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Label {
    /// Not visited yet
    Unassigned,
    /// Boundary between regions
    Watershed,
    /// Member of the region with this id (always >= 1)
    Region(u32),
}

impl Label {
    /// Decode a raw label value.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidLabel`] for values below `-1`.
    pub fn from_raw(raw: i32) -> RegionResult<Self> {
        match raw {
            UNASSIGNED => Ok(Label::Unassigned),
            WATERSHED => Ok(Label::Watershed),
            id if id > 0 => Ok(Label::Region(id as u32)),
            _ => Err(RegionError::InvalidLabel(raw)),
        }
    }

    /// Raw integer form of this label.
    pub fn to_raw(self) -> i32 {
        match self {
            Label::Unassigned => UNASSIGNED,
            Label::Watershed => WATERSHED,
            Label::Region(id) => id as i32,
        }
    }

    /// Region id, if this label is a region.
    pub fn region_id(self) -> Option<u32> {
        match self {
            Label::Region(id) => Some(id),
            _ => None,
        }
    }

    pub fn is_region(self) -> bool {
        matches!(self, Label::Region(_))
    }

    pub fn is_watershed(self) -> bool {
        self == Label::Watershed
    }
}

/// Per-pixel labels produced by a labeling pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelGrid {
    grid: Grid<i32>,
    regions: u32,
}

impl LabelGrid {
    /// Create a grid with every cell unassigned.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::Core`] if either dimension is zero.
    pub fn new(rows: usize, cols: usize) -> RegionResult<Self> {
        Ok(Self {
            grid: Grid::new(rows, cols, UNASSIGNED)?,
            regions: 0,
        })
    }

    /// Wrap raw label values, e.g. a previously saved result.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::InvalidLabel`] if any value is below `-1`.
    pub fn from_raw(grid: Grid<i32>) -> RegionResult<Self> {
        let mut regions = 0u32;
        for &raw in grid.as_slice() {
            if let Label::Region(id) = Label::from_raw(raw)? {
                regions = regions.max(id);
            }
        }
        Ok(Self { grid, regions })
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.grid.shape()
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Label at `coord`, or `None` when out of bounds.
    pub fn get(&self, coord: Coord) -> Option<Label> {
        self.grid.get(coord).map(|&raw| decode(raw))
    }

    /// Write the label of an unvisited cell.
    ///
    /// Fails if the cell is out of bounds or already written; a label is
    /// never overwritten.
    pub(crate) fn assign(&mut self, coord: Coord, label: Label) -> RegionResult<()> {
        let cell = self.grid.get_mut(coord).ok_or_else(|| {
            RegionError::InvalidOrdering(format!(
                "pixel ({}, {}) is outside the grid",
                coord.row, coord.col
            ))
        })?;
        if *cell != UNASSIGNED {
            return Err(RegionError::InvalidOrdering(format!(
                "pixel ({}, {}) visited twice",
                coord.row, coord.col
            )));
        }
        *cell = label.to_raw();
        if let Label::Region(id) = label {
            self.regions = self.regions.max(id);
        }
        Ok(())
    }

    /// Highest region id written so far (the number of regions after a pass).
    pub fn region_count(&self) -> u32 {
        self.regions
    }

    /// Number of watershed cells.
    pub fn watershed_count(&self) -> usize {
        self.count_raw(WATERSHED)
    }

    /// Number of cells still unassigned.
    pub fn unassigned_count(&self) -> usize {
        self.count_raw(UNASSIGNED)
    }

    /// True when every cell carries a final label.
    pub fn is_complete(&self) -> bool {
        self.unassigned_count() == 0
    }

    fn count_raw(&self, raw: i32) -> usize {
        self.grid.as_slice().iter().filter(|&&v| v == raw).count()
    }

    /// Iterate `(coord, label)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, Label)> + '_ {
        self.grid.iter().map(|(coord, &raw)| (coord, decode(raw)))
    }

    /// Apply `f` to every decoded label, keeping the shape.
    pub fn map<U, F>(&self, mut f: F) -> Grid<U>
    where
        F: FnMut(Label) -> U,
    {
        self.grid.map(|&raw| f(decode(raw)))
    }

    /// Borrow the raw integer grid.
    pub fn as_raw(&self) -> &Grid<i32> {
        &self.grid
    }

    /// Consume into the raw integer grid.
    pub fn into_raw(self) -> Grid<i32> {
        self.grid
    }
}

// Cells only ever hold values written through `assign` or checked by
// `from_raw`, so every raw value decodes.
fn decode(raw: i32) -> Label {
    match raw {
        WATERSHED => Label::Watershed,
        id if id > 0 => Label::Region(id as u32),
        _ => Label::Unassigned,
    }
}
