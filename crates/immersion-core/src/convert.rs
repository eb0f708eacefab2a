//! Color to intensity conversion
//!
//! Segmentation runs on a single intensity channel, so color input is
//! reduced with a weighted sum of its components before anything else.

use crate::error::{Error, Result};
use crate::grid::Grid;

/// An 8-bit RGB sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a new sample.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Gray sample with all channels equal.
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }
}

/// Channel weights for RGB-to-gray conversion.
///
/// The default is the ITU-R BT.601 luma weighting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrayWeights {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl Default for GrayWeights {
    fn default() -> Self {
        Self {
            red: 0.299,
            green: 0.587,
            blue: 0.114,
        }
    }
}

impl GrayWeights {
    /// Create weights; they are normalized on use if they do not sum to 1.
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self { red, green, blue }
    }

    /// Equal weighting of the three channels.
    pub fn average() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }

    /// Validate and normalize to a unit sum.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if any weight is negative or
    /// all of them are zero.
    pub fn normalized(self) -> Result<Self> {
        if self.red < 0.0 || self.green < 0.0 || self.blue < 0.0 {
            return Err(Error::InvalidParameter(
                "gray weights must all be >= 0.0".into(),
            ));
        }
        let sum = self.red + self.green + self.blue;
        if sum <= 0.0 {
            return Err(Error::InvalidParameter(
                "gray weights must not all be zero".into(),
            ));
        }
        if (sum - 1.0).abs() > 0.0001 {
            Ok(Self::new(self.red / sum, self.green / sum, self.blue / sum))
        } else {
            Ok(self)
        }
    }

    fn apply(&self, px: Rgb) -> u8 {
        let v = self.red * f32::from(px.r)
            + self.green * f32::from(px.g)
            + self.blue * f32::from(px.b);
        (v + 0.5).min(255.0) as u8
    }
}

impl Grid<Rgb> {
    /// Reduce a color grid to one intensity channel.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for invalid weights.
    pub fn to_gray(&self, weights: GrayWeights) -> Result<Grid<u8>> {
        let weights = weights.normalized()?;
        Ok(self.map(|&px| weights.apply(px)))
    }
}

impl Grid<u8> {
    /// Expand an intensity grid to gray RGB samples.
    pub fn to_rgb(&self) -> Grid<Rgb> {
        self.map(|&v| Rgb::gray(v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Coord;

    #[test]
    fn test_to_gray_default_weights() {
        let grid = Grid::from_rows(vec![vec![
            Rgb::new(255, 255, 255),
            Rgb::new(255, 0, 0),
            Rgb::new(0, 255, 0),
            Rgb::new(0, 0, 255),
        ]])
        .unwrap();
        let gray = grid.to_gray(GrayWeights::default()).unwrap();
        assert_eq!(gray.as_slice(), &[255, 76, 150, 29]);
    }

    #[test]
    fn test_to_gray_normalizes_weights() {
        let grid = Grid::new(1, 1, Rgb::new(30, 60, 90)).unwrap();
        let gray = grid.to_gray(GrayWeights::average()).unwrap();
        assert_eq!(gray[Coord::new(0, 0)], 60);
    }

    #[test]
    fn test_to_gray_rejects_bad_weights() {
        let grid = Grid::new(1, 1, Rgb::BLACK).unwrap();
        assert!(grid.to_gray(GrayWeights::new(-1.0, 1.0, 1.0)).is_err());
        assert!(grid.to_gray(GrayWeights::new(0.0, 0.0, 0.0)).is_err());
    }

    #[test]
    fn test_gray_to_rgb() {
        let gray = Grid::from_rows(vec![vec![0u8, 128]]).unwrap();
        let rgb = gray.to_rgb();
        assert_eq!(rgb[Coord::new(0, 1)], Rgb::gray(128));
    }
}
