//! immersion-region - Immersion watershed labeling
//!
//! This crate turns an intensity grid into a label grid in two stages:
//!
//! - **Ordering** - Every pixel sorted by ascending intensity with a fixed
//!   tie-break rule ([`order`], [`order_with`])
//! - **Labeling** - One forward pass over that ordering; each pixel starts a
//!   region, joins the single region around it, or becomes a watershed
//!   pixel where two regions meet ([`label`], [`label_with`], [`RegionLabeler`])
//!
//! [`segment`] composes both. The crate also measures regions, checks
//! their connectivity, and renders label grids as images.
//!
//! # Examples
//!
//! ## Segmenting a grid
//!
//! ```
//! use immersion_core::Grid;
//! use immersion_region::{WATERSHED, segment};
//!
//! let grid = Grid::from_rows(vec![
//!     vec![0u8, 0, 5, 1, 1],
//!     vec![0, 0, 5, 1, 1],
//! ])
//! .unwrap();
//! let labels = segment(&grid).unwrap();
//! assert_eq!(labels.region_count(), 2);
//! assert_eq!(labels.as_raw().row(0).unwrap()[2], WATERSHED);
//! ```
//!
//! ## Ordering and labeling separately
//!
//! ```
//! use immersion_core::{Connectivity, Grid};
//! use immersion_region::{TieBreak, label_with, order_with};
//!
//! let grid = Grid::new(3, 3, 7u16).unwrap();
//! let ordering = order_with(&grid, TieBreak::ColumnMajor);
//! let result = label_with(&grid, &ordering, Connectivity::FourWay).unwrap();
//! assert_eq!(result.stats.regions, 1);
//! assert_eq!(result.stats.watershed_pixels, 0);
//! ```

pub mod conncomp;
pub mod error;
pub mod label;
pub mod labeler;
pub mod neighborhood;
pub mod ordering;
pub mod render;
pub mod segment;
pub mod stats;

pub use conncomp::{boundary_violations, disconnected_regions, is_region_connected, region_mask};
pub use error::{RegionError, RegionResult};
pub use label::{Label, LabelGrid, UNASSIGNED, WATERSHED};
pub use labeler::{LabelingStats, RegionLabeler, Segmentation, label, label_with};
pub use neighborhood::{Classification, NeighborSummary};
pub use ordering::{
    Intensity, OrderedPixel, OrderedPixelList, PARALLEL_SORT_MIN_PIXELS, TieBreak, order,
    order_with,
};
pub use render::{region_palette, render_gray, render_regions};
pub use segment::{WatershedOptions, segment, segment_with_options};
pub use stats::{RegionBounds, first_appearance_order, region_bounds, region_sizes};
