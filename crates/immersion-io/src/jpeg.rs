//! JPEG image format support
//!
//! Reads 8-bit grayscale and 24-bit RGB JPEGs with `jpeg-decoder` and
//! writes them with `jpeg-encoder`.

use crate::{Image, IoError, IoResult};
use immersion_core::{Grid, Rgb};
use jpeg_decoder::{Decoder, PixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use std::io::{Read, Write};

/// Quality used when writing JPEG files.
pub const DEFAULT_QUALITY: u8 = 90;

/// Read a JPEG image from a reader.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = info.width as usize;
    let height = info.height as usize;

    match info.pixel_format {
        PixelFormat::L8 => Ok(Image::Gray(Grid::from_vec(height, width, data)?)),
        PixelFormat::RGB24 => {
            let pixels = data
                .chunks_exact(3)
                .map(|c| Rgb::new(c[0], c[1], c[2]))
                .collect();
            Ok(Image::Rgb(Grid::from_vec(height, width, pixels)?))
        }
        other => Err(IoError::UnsupportedFormat(format!(
            "JPEG pixel format {:?}",
            other
        ))),
    }
}

/// Write an image as JPEG at the given quality (1-100).
pub fn write_jpeg<W: Write>(image: &Image, writer: W, quality: u8) -> IoResult<()> {
    let (rows, cols) = image.shape();
    let width = u16::try_from(cols)
        .map_err(|_| IoError::InvalidData(format!("width {} too large for JPEG", cols)))?;
    let height = u16::try_from(rows)
        .map_err(|_| IoError::InvalidData(format!("height {} too large for JPEG", rows)))?;

    let encoder = Encoder::new(writer, quality.clamp(1, 100));
    let result = match image {
        Image::Gray(grid) => encoder.encode(grid.as_slice(), width, height, ColorType::Luma),
        Image::Rgb(grid) => {
            let data: Vec<u8> = grid
                .as_slice()
                .iter()
                .flat_map(|p| [p.r, p.g, p.b])
                .collect();
            encoder.encode(&data, width, height, ColorType::Rgb)
        }
    };
    result.map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gray_roundtrip_is_close() {
        let grid = Grid::new(16, 16, 100u8).unwrap();
        let mut bytes = Vec::new();
        write_jpeg(&Image::Gray(grid), &mut bytes, DEFAULT_QUALITY).unwrap();

        let Image::Gray(back) = read_jpeg(&bytes[..]).unwrap() else {
            panic!("expected gray image");
        };
        assert_eq!(back.shape(), (16, 16));
        assert!(back.as_slice().iter().all(|&v| v.abs_diff(100) <= 2));
    }

    #[test]
    fn test_rgb_roundtrip_keeps_shape() {
        let grid = Grid::new(8, 24, Rgb::new(200, 40, 40)).unwrap();
        let mut bytes = Vec::new();
        write_jpeg(&Image::Rgb(grid), &mut bytes, DEFAULT_QUALITY).unwrap();

        let Image::Rgb(back) = read_jpeg(&bytes[..]).unwrap() else {
            panic!("expected rgb image");
        };
        assert_eq!(back.shape(), (8, 24));
        let p = back[immersion_core::Coord::new(4, 12)];
        assert!(p.r > 150 && p.g < 90 && p.b < 90);
    }

    #[test]
    fn test_garbage_is_decode_error() {
        let data = [0xFF, 0xD8, 0xFF, 0x00, 0x01];
        assert!(matches!(read_jpeg(&data[..]), Err(IoError::DecodeError(_))));
    }
}
