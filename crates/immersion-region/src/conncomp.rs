//! Connectivity checks on a finished segmentation
//!
//! A region grows only by adding pixels adjacent to pixels it already
//! holds, so under the connectivity used for labeling every region is a
//! single connected component, and every watershed pixel touches at least
//! two distinct regions. These functions verify both facts on any label
//! grid.

use crate::label::{Label, LabelGrid};
use immersion_core::{Connectivity, Coord, Grid};
use std::collections::VecDeque;

/// Check whether all pixels carrying region `id` form one connected set.
///
/// Returns `false` when no pixel carries `id`.
pub fn is_region_connected(labels: &LabelGrid, id: u32, connectivity: Connectivity) -> bool {
    let Some(start) = labels
        .iter()
        .find(|&(_, label)| label == Label::Region(id))
        .map(|(coord, _)| coord)
    else {
        return false;
    };

    let total = labels
        .iter()
        .filter(|&(_, label)| label == Label::Region(id))
        .count();

    let mut visited = vec![false; labels.len()];
    let reached = flood(labels, start, connectivity, &mut visited);
    reached == total
}

/// Ids of all regions made of more than one connected component.
pub fn disconnected_regions(labels: &LabelGrid, connectivity: Connectivity) -> Vec<u32> {
    component_counts(labels, connectivity)
        .into_iter()
        .enumerate()
        .filter(|&(_, count)| count > 1)
        .map(|(i, _)| i as u32 + 1)
        .collect()
}

/// Watershed pixels that do not separate at least two distinct regions.
///
/// Other watershed neighbors are ignored. An empty result means every
/// boundary pixel is justified.
pub fn boundary_violations(labels: &LabelGrid, connectivity: Connectivity) -> Vec<Coord> {
    let (rows, cols) = labels.shape();
    let mut violations = Vec::new();

    for (coord, label) in labels.iter() {
        if !label.is_watershed() {
            continue;
        }
        let mut first: Option<u32> = None;
        let mut plural = false;
        for neighbor in coord.neighbors(rows, cols, connectivity) {
            if let Some(Label::Region(id)) = labels.get(neighbor) {
                match first {
                    None => first = Some(id),
                    Some(seen) if seen != id => {
                        plural = true;
                        break;
                    }
                    Some(_) => {}
                }
            }
        }
        if !plural {
            violations.push(coord);
        }
    }

    violations
}

/// Number of connected components of each region, indexed by `id - 1`.
fn component_counts(labels: &LabelGrid, connectivity: Connectivity) -> Vec<usize> {
    let mut counts = vec![0usize; labels.region_count() as usize];
    let mut visited = vec![false; labels.len()];

    for (coord, label) in labels.iter() {
        let Label::Region(id) = label else {
            continue;
        };
        let index = coord.row * labels.cols() + coord.col;
        if visited[index] {
            continue;
        }
        flood(labels, coord, connectivity, &mut visited);
        counts[id as usize - 1] += 1;
    }

    counts
}

/// Breadth-first fill over pixels sharing the label at `start`.
///
/// Marks every reached pixel in `visited` and returns how many there were.
fn flood(
    labels: &LabelGrid,
    start: Coord,
    connectivity: Connectivity,
    visited: &mut [bool],
) -> usize {
    let (rows, cols) = labels.shape();
    let Some(target) = labels.get(start) else {
        return 0;
    };

    let mut reached = 0usize;
    let mut queue = VecDeque::new();
    visited[start.row * cols + start.col] = true;
    queue.push_back(start);

    while let Some(coord) = queue.pop_front() {
        reached += 1;
        for neighbor in coord.neighbors(rows, cols, connectivity) {
            let index = neighbor.row * cols + neighbor.col;
            if !visited[index] && labels.get(neighbor) == Some(target) {
                visited[index] = true;
                queue.push_back(neighbor);
            }
        }
    }

    reached
}

/// Mask of pixels carrying region `id`.
pub fn region_mask(labels: &LabelGrid, id: u32) -> Grid<bool> {
    labels.as_raw().map(|&raw| raw == id as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(rows: Vec<Vec<i32>>) -> LabelGrid {
        LabelGrid::from_raw(Grid::from_rows(rows).unwrap()).unwrap()
    }

    #[test]
    fn test_connected_region() {
        let grid = labels(vec![vec![1, 1, 0, 2], vec![1, 0, 2, 2]]);
        assert!(is_region_connected(&grid, 1, Connectivity::FourWay));
        assert!(is_region_connected(&grid, 2, Connectivity::FourWay));
        assert!(!is_region_connected(&grid, 3, Connectivity::FourWay));
        assert!(disconnected_regions(&grid, Connectivity::EightWay).is_empty());
    }

    #[test]
    fn test_diagonal_contact_depends_on_connectivity() {
        let grid = labels(vec![vec![1, 0], vec![0, 1]]);
        assert!(is_region_connected(&grid, 1, Connectivity::EightWay));
        assert!(!is_region_connected(&grid, 1, Connectivity::FourWay));
        assert_eq!(disconnected_regions(&grid, Connectivity::FourWay), vec![1]);
    }

    #[test]
    fn test_boundary_violations() {
        let good = labels(vec![vec![1, 0, 2]]);
        assert!(boundary_violations(&good, Connectivity::EightWay).is_empty());

        let bad = labels(vec![vec![1, 0, 1], vec![0, 0, 0]]);
        let violations = boundary_violations(&bad, Connectivity::EightWay);
        assert_eq!(violations.len(), 4);
        assert!(violations.contains(&Coord::new(0, 1)));
    }

    #[test]
    fn test_region_mask() {
        let grid = labels(vec![vec![1, 0, 2]]);
        let mask = region_mask(&grid, 2);
        assert_eq!(mask.as_slice(), &[false, false, true]);
    }
}
