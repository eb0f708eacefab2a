//! Neighbor classification
//!
//! Decides the label of a pixel from the labels already written to its
//! neighbors. Watershed neighbors are ignored; what remains is whether any
//! neighbor is still unassigned and which distinct region ids are present:
//!
//! | Unassigned seen | Distinct regions | Result |
//! |---|---|---|
//! | yes | 0 | new region |
//! | no | 0 | isolated (treated as a new region) |
//! | any | 1 | join that region |
//! | any | 2 or more | watershed |

use crate::label::{Label, LabelGrid};
use immersion_core::{Connectivity, Coord};

/// Outcome of classifying one pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Every informative neighbor is unassigned: seed a new region
    NewRegion,
    /// No informative neighbor at all (no in-bounds neighbor, or only
    /// watershed neighbors)
    Isolated,
    /// Exactly one region among the neighbors
    Join(u32),
    /// Two or more regions meet here
    Watershed,
}

/// What a pixel's neighbors look like at the moment it is visited.
///
/// A pixel has at most 8 neighbors, so distinct region ids fit in a fixed
/// array and no map is needed.
#[derive(Debug, Clone, Default)]
pub struct NeighborSummary {
    saw_unassigned: bool,
    watershed: usize,
    regions: [u32; 8],
    distinct: usize,
}

impl NeighborSummary {
    /// Summarize the current labels around `coord`.
    pub fn scan(labels: &LabelGrid, coord: Coord, connectivity: Connectivity) -> Self {
        let (rows, cols) = labels.shape();
        let mut summary = Self::default();
        for neighbor in coord.neighbors(rows, cols, connectivity) {
            if let Some(label) = labels.get(neighbor) {
                summary.observe(label);
            }
        }
        summary
    }

    /// Record one neighbor label.
    pub fn observe(&mut self, label: Label) {
        match label {
            Label::Unassigned => self.saw_unassigned = true,
            Label::Watershed => self.watershed += 1,
            Label::Region(id) => {
                let known = &self.regions[..self.distinct];
                if !known.contains(&id) && self.distinct < self.regions.len() {
                    self.regions[self.distinct] = id;
                    self.distinct += 1;
                }
            }
        }
    }

    /// Whether any neighbor was still unassigned.
    pub fn saw_unassigned(&self) -> bool {
        self.saw_unassigned
    }

    /// Number of watershed neighbors (these do not affect the outcome).
    pub fn watershed_neighbors(&self) -> usize {
        self.watershed
    }

    /// Distinct region ids seen, in order of first observation.
    pub fn regions(&self) -> &[u32] {
        &self.regions[..self.distinct]
    }

    /// Apply the classification rule.
    pub fn classify(&self) -> Classification {
        match self.regions() {
            [] if self.saw_unassigned => Classification::NewRegion,
            [] => Classification::Isolated,
            [id] => Classification::Join(*id),
            _ => Classification::Watershed,
        }
    }
}
