//! Immersion - Watershed image segmentation for Rust
//!
//! Segments an image by visiting its pixels once in ascending intensity
//! order: each pixel starts a region, joins the single region around it,
//! or becomes a watershed pixel where regions meet.
//!
//! # Overview
//!
//! - [`io`] - Reading and writing PNG, PNM and JPEG images
//! - [`region`] - Intensity ordering, labeling, region statistics, rendering
//! - Core types ([`Grid`], [`Coord`], [`Rgb`], scaling) re-exported at the root
//!
//! # Example
//!
//! ```
//! use immersion::Grid;
//! use immersion::region::segment;
//!
//! let grid = Grid::from_rows(vec![vec![1u8, 1, 9, 2, 2]]).unwrap();
//! let labels = segment(&grid).unwrap();
//! assert_eq!(labels.as_raw().as_slice(), &[1, 1, 0, 2, 2]);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use immersion_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use immersion_io as io;
pub use immersion_region as region;
