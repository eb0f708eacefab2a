//! Grid resizing
//!
//! Provides two scaling algorithms:
//! - Sampling (nearest neighbor)
//! - Linear interpolation (bilinear, pixel centers aligned)
//!
//! Segmentation cost grows with the pixel count, so large inputs are
//! commonly reduced to a fixed working size first.

use crate::error::{Error, Result};
use crate::grid::Grid;

/// Scaling method to use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMethod {
    /// Nearest-neighbor sampling
    Sampling,
    /// Bilinear interpolation
    #[default]
    Linear,
}

/// Scale an intensity grid to exactly `rows × cols`.
///
/// # Errors
///
/// Returns [`Error::InvalidParameter`] if either target dimension is zero
/// and [`Error::InvalidDimension`] if the target is too large to address.
pub fn scale_to_size(
    grid: &Grid<u8>,
    rows: usize,
    cols: usize,
    method: ScaleMethod,
) -> Result<Grid<u8>> {
    if rows == 0 || cols == 0 {
        return Err(Error::InvalidParameter(format!(
            "target size must be non-zero, got {}x{}",
            rows, cols
        )));
    }
    if grid.shape() == (rows, cols) {
        return Ok(grid.clone());
    }
    // Sampling maps through `2 * dst * src`; the output holds `rows * cols`.
    let (src_rows, src_cols) = grid.shape();
    let fits = |dst: usize, src: usize| dst.checked_mul(2).and_then(|d| d.checked_mul(src));
    if fits(rows, src_rows).is_none()
        || fits(cols, src_cols).is_none()
        || rows.checked_mul(cols).is_none()
    {
        return Err(Error::InvalidDimension { rows, cols });
    }

    let data = match method {
        ScaleMethod::Sampling => scale_sampling(grid, rows, cols),
        ScaleMethod::Linear => scale_linear(grid, rows, cols),
    };
    Grid::from_vec(rows, cols, data)
}

fn scale_sampling(grid: &Grid<u8>, rows: usize, cols: usize) -> Vec<u8> {
    let (src_rows, src_cols) = grid.shape();
    let src = grid.as_slice();
    let col_map: Vec<usize> = (0..cols)
        .map(|c| ((c * 2 + 1) * src_cols / (cols * 2)).min(src_cols - 1))
        .collect();

    let mut out = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        let sr = ((r * 2 + 1) * src_rows / (rows * 2)).min(src_rows - 1);
        let line = &src[sr * src_cols..(sr + 1) * src_cols];
        out.extend(col_map.iter().map(|&sc| line[sc]));
    }
    out
}

/// Source position and blend weight for one destination index.
fn linear_tap(dst: usize, dst_len: usize, src_len: usize) -> (usize, usize, f32) {
    let pos = (dst as f32 + 0.5) * src_len as f32 / dst_len as f32 - 0.5;
    let pos = pos.clamp(0.0, (src_len - 1) as f32);
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(src_len - 1);
    (lo, hi, pos - lo as f32)
}

fn scale_linear(grid: &Grid<u8>, rows: usize, cols: usize) -> Vec<u8> {
    let (src_rows, src_cols) = grid.shape();
    let src = grid.as_slice();
    let col_taps: Vec<_> = (0..cols).map(|c| linear_tap(c, cols, src_cols)).collect();

    let mut out = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        let (r0, r1, fy) = linear_tap(r, rows, src_rows);
        let top = &src[r0 * src_cols..(r0 + 1) * src_cols];
        let bottom = &src[r1 * src_cols..(r1 + 1) * src_cols];
        for &(c0, c1, fx) in &col_taps {
            let t = f32::from(top[c0]) * (1.0 - fx) + f32::from(top[c1]) * fx;
            let b = f32::from(bottom[c0]) * (1.0 - fx) + f32::from(bottom[c1]) * fx;
            let v = t * (1.0 - fy) + b * fy;
            out.push((v + 0.5).clamp(0.0, 255.0) as u8);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coord;

    #[test]
    fn test_sampling_upscale_replicates() {
        let grid = Grid::from_rows(vec![vec![10u8, 20], vec![30, 40]]).unwrap();
        let up = scale_to_size(&grid, 4, 4, ScaleMethod::Sampling).unwrap();
        assert_eq!(
            up.as_slice(),
            &[10, 10, 20, 20, 10, 10, 20, 20, 30, 30, 40, 40, 30, 30, 40, 40]
        );
    }

    #[test]
    fn test_sampling_downscale() {
        let grid = Grid::from_vec(4, 4, (0u8..16).collect()).unwrap();
        let down = scale_to_size(&grid, 2, 2, ScaleMethod::Sampling).unwrap();
        assert_eq!(down.as_slice(), &[5, 7, 13, 15]);
    }

    #[test]
    fn test_linear_uniform_stays_uniform() {
        let grid = Grid::new(7, 5, 93u8).unwrap();
        let scaled = scale_to_size(&grid, 128, 128, ScaleMethod::Linear).unwrap();
        assert_eq!(scaled.shape(), (128, 128));
        assert!(scaled.as_slice().iter().all(|&v| v == 93));
    }

    #[test]
    fn test_linear_interpolates_between_columns() {
        let grid = Grid::from_rows(vec![vec![0u8, 100]]).unwrap();
        let scaled = scale_to_size(&grid, 1, 4, ScaleMethod::Linear).unwrap();
        assert_eq!(scaled[Coord::new(0, 0)], 0);
        assert_eq!(scaled[Coord::new(0, 1)], 25);
        assert_eq!(scaled[Coord::new(0, 2)], 75);
        assert_eq!(scaled[Coord::new(0, 3)], 100);
    }

    #[test]
    fn test_same_size_is_copy() {
        let grid = Grid::from_rows(vec![vec![1u8, 2], vec![3, 4]]).unwrap();
        let scaled = scale_to_size(&grid, 2, 2, ScaleMethod::Linear).unwrap();
        assert_eq!(scaled, grid);
    }

    #[test]
    fn test_zero_target_rejected() {
        let grid = Grid::new(2, 2, 0u8).unwrap();
        assert!(scale_to_size(&grid, 0, 2, ScaleMethod::Sampling).is_err());
    }

    #[test]
    fn test_huge_target_rejected() {
        let grid = Grid::new(3, 3, 0u8).unwrap();
        let huge = usize::MAX / 4;
        for method in [ScaleMethod::Sampling, ScaleMethod::Linear] {
            assert!(matches!(
                scale_to_size(&grid, huge, 2, method),
                Err(Error::InvalidDimension { cols: 2, .. })
            ));
            assert!(matches!(
                scale_to_size(&grid, 2, huge, method),
                Err(Error::InvalidDimension { rows: 2, .. })
            ));
        }
    }
}
