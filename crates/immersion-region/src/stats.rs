//! Region statistics
//!
//! Per-region measurements over a finished label grid: pixel counts,
//! bounding boxes and discovery order.

use crate::label::{Label, LabelGrid};
use crate::ordering::{Intensity, OrderedPixelList};

/// Bounding box and size of one region
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionBounds {
    /// Region id
    pub id: u32,
    pub min_row: usize,
    pub min_col: usize,
    pub max_row: usize,
    pub max_col: usize,
    /// Number of pixels carrying this id
    pub pixel_count: usize,
}

impl RegionBounds {
    /// Height of the bounding box in pixels
    pub fn height(&self) -> usize {
        self.max_row - self.min_row + 1
    }

    /// Width of the bounding box in pixels
    pub fn width(&self) -> usize {
        self.max_col - self.min_col + 1
    }
}

/// Pixel count of every region.
///
/// The index in the vector is `id - 1`.
pub fn region_sizes(labels: &LabelGrid) -> Vec<usize> {
    let mut sizes = vec![0usize; labels.region_count() as usize];
    for (_, label) in labels.iter() {
        if let Label::Region(id) = label {
            sizes[id as usize - 1] += 1;
        }
    }
    sizes
}

/// Bounding boxes of all regions, sorted by id.
///
/// Ids with no pixels (possible only for a hand-built grid) are skipped.
pub fn region_bounds(labels: &LabelGrid) -> Vec<RegionBounds> {
    let mut bounds: Vec<Option<RegionBounds>> = vec![None; labels.region_count() as usize];

    for (coord, label) in labels.iter() {
        let Label::Region(id) = label else {
            continue;
        };
        let entry = bounds[id as usize - 1].get_or_insert(RegionBounds {
            id,
            min_row: coord.row,
            min_col: coord.col,
            max_row: coord.row,
            max_col: coord.col,
            pixel_count: 0,
        });
        entry.min_row = entry.min_row.min(coord.row);
        entry.min_col = entry.min_col.min(coord.col);
        entry.max_row = entry.max_row.max(coord.row);
        entry.max_col = entry.max_col.max(coord.col);
        entry.pixel_count += 1;
    }

    bounds.into_iter().flatten().collect()
}

/// Distinct region ids in the order they are first met along `ordering`.
///
/// For a label grid produced from this ordering the result is
/// `1, 2, 3, …` with no gaps.
pub fn first_appearance_order<T: Intensity>(
    labels: &LabelGrid,
    ordering: &OrderedPixelList<T>,
) -> Vec<u32> {
    let mut seen = vec![false; labels.region_count() as usize];
    let mut ids = Vec::new();
    for pixel in ordering {
        if let Some(Label::Region(id)) = labels.get(pixel.coord) {
            let slot = &mut seen[id as usize - 1];
            if !*slot {
                *slot = true;
                ids.push(id);
            }
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ordering::order;
    use crate::segment::segment;
    use immersion_core::Grid;

    fn two_valleys() -> Grid<u8> {
        Grid::from_rows(vec![
            vec![0u8, 0, 5, 1, 1],
            vec![0, 0, 5, 1, 1],
            vec![0, 0, 5, 1, 7],
        ])
        .unwrap()
    }

    #[test]
    fn test_region_sizes() {
        let labels = segment(&two_valleys()).unwrap();
        assert_eq!(region_sizes(&labels), vec![6, 6]);
    }

    #[test]
    fn test_region_bounds() {
        let labels = segment(&two_valleys()).unwrap();
        let bounds = region_bounds(&labels);
        assert_eq!(bounds.len(), 2);
        assert_eq!(bounds[0].id, 1);
        assert_eq!((bounds[0].min_col, bounds[0].max_col), (0, 1));
        assert_eq!((bounds[0].height(), bounds[0].width()), (3, 2));
        assert_eq!(bounds[1].id, 2);
        assert_eq!((bounds[1].min_col, bounds[1].max_col), (3, 4));
        assert_eq!(bounds[1].pixel_count, 6);
    }

    #[test]
    fn test_first_appearance_is_sequential() {
        let grid = two_valleys();
        let ordering = order(&grid);
        let labels = segment(&grid).unwrap();
        assert_eq!(first_appearance_order(&labels, &ordering), vec![1, 2]);
    }
}
