//! PNG image format support
//!
//! Every PNG layout is read down to 8-bit samples: low bit depths are
//! stretched to `0..=255`, 16-bit samples keep their high byte, alpha is
//! dropped and palettes are expanded to RGB.

use crate::{Image, IoError, IoResult};
use immersion_core::{Grid, Rgb};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Image> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::IDENTITY);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let info = reader.info();
    let width = info.width as usize;
    let height = info.height as usize;
    let color_type = info.color_type;
    let bit_depth = info.bit_depth;
    let palette = info.palette.as_ref().map(|p| p.to_vec());

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let bits = bit_depth as u8;

    match color_type {
        ColorType::Grayscale => {
            let mut pixels = Vec::with_capacity(width * height);
            for y in 0..height {
                let row = &data[y * bytes_per_row..];
                for x in 0..width {
                    pixels.push(gray_sample(row, x, bits));
                }
            }
            Ok(Image::Gray(Grid::from_vec(height, width, pixels)?))
        }
        ColorType::GrayscaleAlpha => {
            let step = if bit_depth == BitDepth::Sixteen { 4 } else { 2 };
            let mut pixels = Vec::with_capacity(width * height);
            for y in 0..height {
                let row_start = y * bytes_per_row;
                for x in 0..width {
                    pixels.push(data[row_start + x * step]);
                }
            }
            Ok(Image::Gray(Grid::from_vec(height, width, pixels)?))
        }
        ColorType::Rgb | ColorType::Rgba => {
            let channels = if color_type == ColorType::Rgb { 3 } else { 4 };
            let bytes = if bit_depth == BitDepth::Sixteen { 2 } else { 1 };
            let step = channels * bytes;
            let mut pixels = Vec::with_capacity(width * height);
            for y in 0..height {
                let row_start = y * bytes_per_row;
                for x in 0..width {
                    let idx = row_start + x * step;
                    pixels.push(Rgb::new(
                        data[idx],
                        data[idx + bytes],
                        data[idx + 2 * bytes],
                    ));
                }
            }
            Ok(Image::Rgb(Grid::from_vec(height, width, pixels)?))
        }
        ColorType::Indexed => {
            let palette = palette.ok_or_else(|| {
                IoError::DecodeError("indexed PNG without a palette".to_string())
            })?;
            let entries = palette.len() / 3;
            let mut pixels = Vec::with_capacity(width * height);
            for y in 0..height {
                let row = &data[y * bytes_per_row..];
                for x in 0..width {
                    let index = packed_sample(row, x, bits) as usize;
                    if index >= entries {
                        return Err(IoError::InvalidData(format!(
                            "palette index {} out of range ({} entries)",
                            index, entries
                        )));
                    }
                    let entry = &palette[index * 3..index * 3 + 3];
                    pixels.push(Rgb::new(entry[0], entry[1], entry[2]));
                }
            }
            Ok(Image::Rgb(Grid::from_vec(height, width, pixels)?))
        }
    }
}

/// Gray sample `x` of a row, stretched to 8 bits.
fn gray_sample(row: &[u8], x: usize, bits: u8) -> u8 {
    match bits {
        16 => row[x * 2],
        8 => row[x],
        _ => {
            let max = (1u16 << bits) - 1;
            let v = packed_sample(row, x, bits) as u16;
            ((v * 255 + max / 2) / max) as u8
        }
    }
}

/// Raw sample `x` of a row packed at `bits` per sample (1, 2, 4 or 8).
fn packed_sample(row: &[u8], x: usize, bits: u8) -> u8 {
    if bits >= 8 {
        return row[x];
    }
    let per_byte = 8 / bits as usize;
    let byte = row[x / per_byte];
    let shift = 8 - bits as usize * (x % per_byte + 1);
    (byte >> shift) & ((1u8 << bits) - 1)
}

/// Write an 8-bit grayscale PNG
pub fn write_gray_png<W: Write>(grid: &Grid<u8>, writer: W) -> IoResult<()> {
    write_png_data(grid.rows(), grid.cols(), ColorType::Grayscale, grid.as_slice(), writer)
}

/// Write an 8-bit RGB PNG
pub fn write_rgb_png<W: Write>(grid: &Grid<Rgb>, writer: W) -> IoResult<()> {
    let data: Vec<u8> = grid
        .as_slice()
        .iter()
        .flat_map(|p| [p.r, p.g, p.b])
        .collect();
    write_png_data(grid.rows(), grid.cols(), ColorType::Rgb, &data, writer)
}

fn write_png_data<W: Write>(
    rows: usize,
    cols: usize,
    color_type: ColorType,
    data: &[u8],
    writer: W,
) -> IoResult<()> {
    let width = u32::try_from(cols)
        .map_err(|_| IoError::InvalidData(format!("width {} too large for PNG", cols)))?;
    let height = u32::try_from(rows)
        .map_err(|_| IoError::InvalidData(format!("height {} too large for PNG", rows)))?;

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;
    writer
        .write_image_data(data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
