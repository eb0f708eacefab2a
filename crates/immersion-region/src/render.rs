//! Rendering label grids as images
//!
//! Watershed pixels are drawn black. Regions get either a pseudo-random
//! color from a seeded generator, so the same seed always gives the same
//! picture, or a gray level spread evenly over `1..=255`.

use crate::label::{Label, LabelGrid};
use immersion_core::{Grid, Rgb};
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

/// Lowest channel value used for region colors, keeping them apart from
/// the black watershed lines.
const MIN_CHANNEL: u8 = 48;

/// Color every region with a reproducible random color.
pub fn render_regions(labels: &LabelGrid, seed: u64) -> Grid<Rgb> {
    let palette = region_palette(labels.region_count(), seed);
    labels.map(|label| match label {
        Label::Region(id) => palette[id as usize - 1],
        Label::Watershed | Label::Unassigned => Rgb::BLACK,
    })
}

/// Render regions as gray levels.
///
/// Region `id` of `n` maps to `round(id * 255 / n)`, so the last region is
/// white and no region shares the watershed value 0.
pub fn render_gray(labels: &LabelGrid) -> Grid<u8> {
    let n = labels.region_count().max(1) as u64;
    labels.map(|label| match label {
        Label::Region(id) => {
            let level = (id as u64 * 255 + n / 2) / n;
            level.clamp(1, 255) as u8
        }
        Label::Watershed | Label::Unassigned => 0,
    })
}

/// One color per region, indexed by `id - 1`.
pub fn region_palette(regions: u32, seed: u64) -> Vec<Rgb> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..regions)
        .map(|_| {
            Rgb::new(
                rng.random_range(MIN_CHANNEL..=255),
                rng.random_range(MIN_CHANNEL..=255),
                rng.random_range(MIN_CHANNEL..=255),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use immersion_core::Coord;

    fn ridge() -> LabelGrid {
        LabelGrid::from_raw(Grid::from_rows(vec![vec![1, 1, 0, 2, 2]]).unwrap()).unwrap()
    }

    #[test]
    fn test_render_regions() {
        let labels = ridge();
        let image = render_regions(&labels, 7);
        assert_eq!(image.shape(), (1, 5));
        assert_eq!(image[Coord::new(0, 2)], Rgb::BLACK);
        assert_eq!(image[Coord::new(0, 0)], image[Coord::new(0, 1)]);
        assert_eq!(image[Coord::new(0, 3)], image[Coord::new(0, 4)]);
        assert_ne!(image[Coord::new(0, 0)], Rgb::BLACK);
    }

    #[test]
    fn test_render_is_reproducible() {
        let labels = ridge();
        assert_eq!(render_regions(&labels, 42), render_regions(&labels, 42));
        assert_eq!(region_palette(3, 1), region_palette(3, 1));
    }

    #[test]
    fn test_palette_avoids_dark_colors() {
        for color in region_palette(64, 9) {
            assert!(color.r >= MIN_CHANNEL && color.g >= MIN_CHANNEL && color.b >= MIN_CHANNEL);
        }
    }

    #[test]
    fn test_unvisited_cells_render_black() {
        let labels = LabelGrid::new(1, 2).unwrap();
        assert_eq!(render_gray(&labels).as_slice(), &[0, 0]);
        assert_eq!(render_regions(&labels, 3).as_slice(), &[Rgb::BLACK, Rgb::BLACK]);
    }

    #[test]
    fn test_render_gray() {
        let image = render_gray(&ridge());
        assert_eq!(image.as_slice(), &[128, 128, 0, 255, 255]);
    }
}
