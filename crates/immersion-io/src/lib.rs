//! immersion-io - Image I/O for immersion segmentation
//!
//! Reads images into [`Image`] (gray or RGB [`Grid`]s of 8-bit samples)
//! and writes grids back out. Supported formats, each behind a cargo
//! feature enabled by default:
//!
//! | Format | Feature | Read | Write |
//! |---|---|---|---|
//! | PNG | `png-format` | all color types and depths | 8-bit gray, RGB |
//! | PNM | `pnm` | P2, P3, P5, P6 | P5, P6 |
//! | JPEG | `jpeg` | L8, RGB24 | gray, RGB |
//!
//! # Example
//!
//! ```
//! use immersion_core::Grid;
//! use immersion_io::{Image, ImageFormat, read_image_from_bytes, write_image_mem};
//!
//! let grid = Grid::from_rows(vec![vec![0u8, 128, 255]]).unwrap();
//! let bytes = write_image_mem(&Image::Gray(grid.clone()), ImageFormat::Png).unwrap();
//! let back = read_image_from_bytes(&bytes).unwrap();
//! assert_eq!(back, Image::Gray(grid));
//! ```

pub mod error;
pub mod format;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};
#[cfg(feature = "png-format")]
pub use png::{write_gray_png, write_rgb_png};
#[cfg(feature = "pnm")]
pub use pnm::{write_pgm, write_ppm};

use immersion_core::{GrayWeights, Grid, Rgb};
use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor, Write};
use std::path::Path;

/// A decoded image
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Image {
    Gray(Grid<u8>),
    Rgb(Grid<Rgb>),
}

impl Image {
    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        match self {
            Image::Gray(grid) => grid.shape(),
            Image::Rgb(grid) => grid.shape(),
        }
    }

    pub fn is_gray(&self) -> bool {
        matches!(self, Image::Gray(_))
    }

    /// Reduce to a single intensity channel.
    ///
    /// Gray images are returned unchanged.
    pub fn into_gray(self, weights: GrayWeights) -> IoResult<Grid<u8>> {
        match self {
            Image::Gray(grid) => Ok(grid),
            Image::Rgb(grid) => Ok(grid.to_gray(weights)?),
        }
    }
}

impl From<Grid<u8>> for Image {
    fn from(grid: Grid<u8>) -> Self {
        Image::Gray(grid)
    }
}

impl From<Grid<Rgb>> for Image {
    fn from(grid: Grid<Rgb>) -> Self {
        Image::Rgb(grid)
    }
}

/// Read an image file, detecting its format from the content.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Image> {
    let path = path.as_ref();
    let format = detect_format(path)?;
    let file = File::open(path)?;
    read_image_format(BufReader::new(file), format)
}

/// Read an image from memory, detecting its format from the content.
pub fn read_image_from_bytes(data: &[u8]) -> IoResult<Image> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(Cursor::new(data), format)
}

/// Read an image of a known format.
pub fn read_image_format<R>(reader: R, format: ImageFormat) -> IoResult<Image>
where
    R: std::io::BufRead + std::io::Seek,
{
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        #[allow(unreachable_patterns)]
        other => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            other
        ))),
    }
}

/// Write an image, choosing the encoder from the file extension.
///
/// `png` writes PNG, `pgm`/`ppm`/`pnm` write binary PNM and `jpg`/`jpeg`
/// write JPEG.
pub fn write_image<P: AsRef<Path>>(path: P, image: &Image) -> IoResult<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_format(image, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into memory.
pub fn write_image_mem(image: &Image, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut data = Vec::new();
    write_image_format(image, &mut data, format)?;
    Ok(data)
}

/// Write an image in the given format.
pub fn write_image_format<W: Write>(
    image: &Image,
    writer: W,
    format: ImageFormat,
) -> IoResult<()> {
    match (format, image) {
        #[cfg(feature = "png-format")]
        (ImageFormat::Png, Image::Gray(grid)) => png::write_gray_png(grid, writer),
        #[cfg(feature = "png-format")]
        (ImageFormat::Png, Image::Rgb(grid)) => png::write_rgb_png(grid, writer),
        #[cfg(feature = "pnm")]
        (ImageFormat::Pnm, image) => pnm::write_pnm(image, writer),
        #[cfg(feature = "jpeg")]
        (ImageFormat::Jpeg, image) => jpeg::write_jpeg(image, writer, jpeg::DEFAULT_QUALITY),
        #[allow(unreachable_patterns)]
        (other, _) => Err(IoError::UnsupportedFormat(format!(
            "{:?} support is not enabled",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_gray() {
        let rgb = Grid::from_rows(vec![vec![Rgb::new(255, 0, 0), Rgb::gray(40)]]).unwrap();
        let gray = Image::Rgb(rgb).into_gray(GrayWeights::default()).unwrap();
        assert_eq!(gray.as_slice(), &[76, 40]);

        let plain = Grid::from_rows(vec![vec![3u8, 4]]).unwrap();
        let same = Image::from(plain.clone()).into_gray(GrayWeights::default()).unwrap();
        assert_eq!(same, plain);
    }

    #[test]
    fn test_read_from_bytes_detects_format() {
        let image = read_image_from_bytes(b"P2 2 1 255 7 9").unwrap();
        assert!(image.is_gray());
        assert_eq!(image.shape(), (1, 2));
        assert!(matches!(
            read_image_from_bytes(b"GIF89a"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_mem_roundtrip_all_formats() {
        let grid = Grid::from_rows(vec![vec![10u8, 20], vec![30, 40]]).unwrap();
        let image = Image::Gray(grid);
        for format in [ImageFormat::Png, ImageFormat::Pnm] {
            let bytes = write_image_mem(&image, format).unwrap();
            assert_eq!(detect_format_from_bytes(&bytes).unwrap(), format);
            assert_eq!(read_image_from_bytes(&bytes).unwrap(), image);
        }
        let bytes = write_image_mem(&image, ImageFormat::Jpeg).unwrap();
        assert_eq!(read_image_from_bytes(&bytes).unwrap().shape(), (2, 2));
    }
}
