//! immersion-core - Basic data structures for immersion segmentation
//!
//! This crate provides the containers and input preparation shared by the
//! other immersion crates:
//!
//! - [`Grid`] - Row-major 2-D array used for intensities, labels and colors
//! - [`Coord`] / [`Connectivity`] - Cell addressing and neighborhoods
//! - [`Rgb`] / [`GrayWeights`] - Color samples and reduction to intensity
//! - [`scale_to_size`] - Resizing an intensity grid to a working size
//!
//! # Example
//!
//! ```
//! use immersion_core::{Coord, Grid};
//!
//! let grid = Grid::from_rows(vec![vec![1u8, 1, 9, 2, 2]]).unwrap();
//! assert_eq!(grid.shape(), (1, 5));
//! assert_eq!(grid[Coord::new(0, 2)], 9);
//! ```

pub mod convert;
pub mod error;
pub mod grid;
pub mod scale;

pub use convert::{GrayWeights, Rgb};
pub use error::{Error, Result};
pub use grid::{Connectivity, Coord, Grid};
pub use scale::{ScaleMethod, scale_to_size};
