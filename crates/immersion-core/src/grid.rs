//! Grid - the 2-D container shared by every stage
//!
//! A `Grid<T>` stores `rows × cols` cells in row-major order. Intensity
//! images, label images and rendered color images are all grids; only
//! the cell type differs.
//!
//! # Coordinates
//!
//! Cells are addressed by [`Coord`] as `(row, col)`, with `(0, 0)` at the
//! top-left corner. The row-major index of a cell is `row * cols + col`.

use crate::error::{Error, Result};
use std::ops::Index;

/// Neighborhood used when looking at adjacent cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connectivity {
    /// 4-way connectivity (up, down, left, right)
    FourWay,
    /// 8-way connectivity (includes diagonals)
    #[default]
    EightWay,
}

impl Connectivity {
    /// Relative `(drow, dcol)` offsets of the neighbors, scanned top-left first.
    pub fn offsets(self) -> &'static [(isize, isize)] {
        const FOUR: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
        const EIGHT: [(isize, isize); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        match self {
            Connectivity::FourWay => &FOUR,
            Connectivity::EightWay => &EIGHT,
        }
    }
}

/// A `(row, col)` cell position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    /// Create a new coordinate.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Iterate the in-bounds neighbors of this cell in a `rows × cols` grid.
    ///
    /// Neighbors that would fall outside the grid are skipped, so corner
    /// cells yield 3 neighbors under 8-way connectivity and edge cells 5.
    pub fn neighbors(
        self,
        rows: usize,
        cols: usize,
        connectivity: Connectivity,
    ) -> impl Iterator<Item = Coord> {
        connectivity.offsets().iter().filter_map(move |&(dr, dc)| {
            let row = self.row.checked_add_signed(dr)?;
            let col = self.col.checked_add_signed(dc)?;
            (row < rows && col < cols).then_some(Coord { row, col })
        })
    }
}

impl From<(usize, usize)> for Coord {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// Row-major 2-D array
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T> Grid<T> {
    /// Wrap an existing row-major buffer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero or
    /// `rows * cols` overflows, and [`Error::DataLength`] if
    /// `data.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self> {
        let expected = check_dimensions(rows, cols)?;
        if data.len() != expected {
            return Err(Error::DataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a grid from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for an empty outer or first inner
    /// vector, and [`Error::NotRectangular`] if any row differs in length
    /// from the first one.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, Vec::len);
        let area = check_dimensions(nrows, ncols)?;

        let mut data = Vec::with_capacity(area);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != ncols {
                return Err(Error::NotRectangular {
                    row: i,
                    expected: ncols,
                    actual: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: nrows,
            cols: ncols,
            data,
        })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a constructed grid; provided for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether `coord` lies inside the grid.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Row-major index of `coord`, or `None` when out of bounds.
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        self.contains(coord).then(|| coord.row * self.cols + coord.col)
    }

    /// Coordinate of a row-major index.
    pub fn coord_of(&self, index: usize) -> Option<Coord> {
        (index < self.data.len()).then(|| Coord::new(index / self.cols, index % self.cols))
    }

    /// Borrow a cell.
    pub fn get(&self, coord: Coord) -> Option<&T> {
        self.index_of(coord).map(|i| &self.data[i])
    }

    /// Mutably borrow a cell.
    pub fn get_mut(&mut self, coord: Coord) -> Option<&mut T> {
        self.index_of(coord).map(|i| &mut self.data[i])
    }

    /// Overwrite a cell.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfBounds`] if `coord` is outside the grid.
    pub fn set(&mut self, coord: Coord, value: T) -> Result<()> {
        let cell = self.get_mut_checked(coord)?;
        *cell = value;
        Ok(())
    }

    fn get_mut_checked(&mut self, coord: Coord) -> Result<&mut T> {
        let (rows, cols) = self.shape();
        self.get_mut(coord).ok_or(Error::OutOfBounds {
            row: coord.row,
            col: coord.col,
            rows,
            cols,
        })
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> Option<&[T]> {
        (row < self.rows).then(|| &self.data[row * self.cols..(row + 1) * self.cols])
    }

    /// The row-major backing buffer.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Consume the grid, returning its row-major buffer.
    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Iterate every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<T> {
        let (rows, cols) = self.shape();
        (0..rows).flat_map(move |row| (0..cols).map(move |col| Coord::new(row, col)))
    }

    /// Iterate `(coord, &value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, &T)> {
        self.coords().zip(self.data.iter())
    }

    /// In-bounds neighbors of `coord`.
    pub fn neighbors(
        &self,
        coord: Coord,
        connectivity: Connectivity,
    ) -> impl Iterator<Item = Coord> + use<T> {
        coord.neighbors(self.rows, self.cols, connectivity)
    }

    /// Apply `f` to every cell, keeping the shape.
    pub fn map<U, F>(&self, f: F) -> Grid<U>
    where
        F: FnMut(&T) -> U,
    {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }
}

impl<T: Clone> Grid<T> {
    /// Create a grid with every cell set to `fill`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if either dimension is zero or
    /// `rows * cols` overflows.
    pub fn new(rows: usize, cols: usize, fill: T) -> Result<Self> {
        let area = check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            data: vec![fill; area],
        })
    }
}

impl<T> Index<Coord> for Grid<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `coord` is out of bounds.
    fn index(&self, coord: Coord) -> &T {
        assert!(
            self.contains(coord),
            "coordinate ({}, {}) out of bounds for {}x{} grid",
            coord.row,
            coord.col,
            self.rows,
            self.cols
        );
        &self.data[coord.row * self.cols + coord.col]
    }
}

/// Cell count of a `rows × cols` grid.
fn check_dimensions(rows: usize, cols: usize) -> Result<usize> {
    match rows.checked_mul(cols) {
        Some(area) if area > 0 => Ok(area),
        _ => Err(Error::InvalidDimension { rows, cols }),
    }
}
