//! Watershed segmentation regression test
//!
//! Checks the properties every segmentation must have, on hand-made grids
//! and on seeded random and synthetic grids:
//!
//! 1. Same grid and options give the same labels
//! 2. No pixel is left unassigned
//! 3. Region ids first appear along the ordering as 1, 2, 3, ...
//! 4. Every watershed pixel touches at least two distinct regions
//! 5. Every region is connected, under either tie-break rule
//!
//! Run with:
//! ```
//! cargo test -p immersion-region --test watershed_reg
//! ```

use immersion_core::{Connectivity, Grid};
use immersion_io::{Image, ImageFormat};
use immersion_region::{
    TieBreak, WatershedOptions, boundary_violations, disconnected_regions,
    first_appearance_order, order_with, region_sizes, render_gray, render_regions, segment,
    segment_with_options,
};
use immersion_test::RegParams;
use rand::rngs::StdRng;
use rand::{RngExt, SeedableRng};

fn random_grid(rng: &mut StdRng, rows: usize, cols: usize, levels: u8) -> Grid<u8> {
    let data = (0..rows * cols).map(|_| rng.random_range(0..levels)).collect();
    Grid::from_vec(rows, cols, data).unwrap()
}

/// Smooth surface with several basins.
fn synthetic_grid(size: usize) -> Grid<u8> {
    let data = (0..size * size)
        .map(|i| {
            let fi = (i / size) as f32;
            let fj = (i % size) as f32;
            let f = 128.0
                + 40.0 * (0.21 * fi).sin()
                + 45.0 * (0.17 * fj).cos()
                + 20.0 * (0.09 * (fi + fj)).sin();
            f.clamp(0.0, 255.0) as u8
        })
        .collect();
    Grid::from_vec(size, size, data).unwrap()
}

/// Check properties 1-5 for one grid and options.
fn check_properties(rp: &mut RegParams, grid: &Grid<u8>, options: &WatershedOptions) {
    let first = segment_with_options(grid, options).unwrap();
    let second = segment_with_options(grid, options).unwrap();
    rp.compare_grids(first.labels.as_raw(), second.labels.as_raw());

    let labels = &first.labels;
    rp.compare_values(0.0, labels.unassigned_count() as f64, 0.0);
    rp.compare_values(
        first.stats.watershed_pixels as f64,
        labels.watershed_count() as f64,
        0.0,
    );
    rp.compare_values(
        first.stats.regions as f64,
        labels.region_count() as f64,
        0.0,
    );

    let ordering = order_with(grid, options.tie_break);
    let appearance = first_appearance_order(labels, &ordering);
    let expected: Vec<u32> = (1..=labels.region_count()).collect();
    rp.compare_strings(
        format!("{:?}", expected).as_bytes(),
        format!("{:?}", appearance).as_bytes(),
    );

    let violations = boundary_violations(labels, options.connectivity);
    rp.compare_values(0.0, violations.len() as f64, 0.0);

    let disconnected = disconnected_regions(labels, options.connectivity);
    rp.compare_values(0.0, disconnected.len() as f64, 0.0);

    // Under 8-way no pixel with neighbors is isolated
    if options.connectivity == Connectivity::EightWay && grid.len() > 1 {
        rp.compare_values(0.0, first.stats.isolated_pixels as f64, 0.0);
    }

    // Every region holds at least its seed pixel
    let sizes = region_sizes(labels);
    rp.compare_values(0.0, sizes.iter().filter(|&&n| n == 0).count() as f64, 0.0);
}

#[test]
fn watershed_reg() {
    let mut rp = RegParams::new("watershed");

    // Ridge between two flat basins
    let ridge = Grid::from_rows(vec![vec![1u8, 1, 9, 2, 2]]).unwrap();
    let labels = segment(&ridge).unwrap();
    let expected = Grid::from_rows(vec![vec![1, 1, 0, 2, 2]]).unwrap();
    rp.compare_grids(&expected, labels.as_raw());

    // Uniform grid is a single region
    let uniform = Grid::new(3, 3, 5u8).unwrap();
    let labels = segment(&uniform).unwrap();
    rp.compare_grids(&Grid::new(3, 3, 1).unwrap(), labels.as_raw());
    rp.compare_values(0.0, labels.watershed_count() as f64, 0.0);

    // Properties on random grids, both tie-breaks and connectivities
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let shapes = [(1, 12), (12, 1), (7, 9), (16, 16), (25, 10)];
    for &(rows, cols) in &shapes {
        for levels in [2u8, 4, 16] {
            let grid = random_grid(&mut rng, rows, cols, levels);
            for tie_break in [TieBreak::RowMajor, TieBreak::ColumnMajor] {
                for connectivity in [Connectivity::EightWay, Connectivity::FourWay] {
                    let options = WatershedOptions::new()
                        .with_tie_break(tie_break)
                        .with_connectivity(connectivity);
                    check_properties(&mut rp, &grid, &options);
                }
            }
        }
    }

    // Smooth synthetic surface
    let synthetic = synthetic_grid(64);
    for tie_break in [TieBreak::RowMajor, TieBreak::ColumnMajor] {
        let options = WatershedOptions::new().with_tie_break(tie_break);
        check_properties(&mut rp, &synthetic, &options);
    }

    let result = segment_with_options(&synthetic, &WatershedOptions::default()).unwrap();
    assert!(result.stats.regions > 1, "synthetic surface has several basins");
    rp.write_image_and_check(&Image::Gray(render_gray(&result.labels)), ImageFormat::Png)
        .unwrap();
    rp.write_image_and_check(
        &Image::Rgb(render_regions(&result.labels, 1)),
        ImageFormat::Png,
    )
    .unwrap();

    assert!(rp.cleanup(), "watershed regression test failed");
}

#[test]
fn watershed_large_grid_reg() {
    let mut rp = RegParams::new("watershed_large");

    // Large enough for the parallel sort when that feature is on
    let mut rng = StdRng::seed_from_u64(17);
    let grid = random_grid(&mut rng, 300, 300, 32);
    check_properties(&mut rp, &grid, &WatershedOptions::default());

    let tie_a = segment_with_options(&grid, &WatershedOptions::default()).unwrap();
    let column = WatershedOptions::new().with_tie_break(TieBreak::ColumnMajor);
    let tie_b = segment_with_options(&grid, &column).unwrap();
    // Either tie-break labels every pixel
    rp.compare_values(0.0, tie_a.labels.unassigned_count() as f64, 0.0);
    rp.compare_values(0.0, tie_b.labels.unassigned_count() as f64, 0.0);

    assert!(rp.cleanup(), "watershed_large regression test failed");
}
