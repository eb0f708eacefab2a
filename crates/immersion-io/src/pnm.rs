//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P2 ASCII, P5 binary) and PPM (P3 ASCII, P6 binary) with any
//! maxval up to 65535; samples are rescaled to 8 bits. Writes binary P5
//! for gray grids and P6 for RGB grids.

use crate::{Image, IoError, IoResult};
use immersion_core::{Grid, Rgb};
use std::io::{Read, Write};

/// Read a PNM image (P2/P3/P5/P6) from a reader.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Image> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    decode_pnm(&data)
}

fn decode_pnm(data: &[u8]) -> IoResult<Image> {
    let mut header = HeaderReader { data, pos: 0 };
    let magic = header.token()?;
    let (channels, binary) = match magic {
        b"P2" => (1, false),
        b"P3" => (3, false),
        b"P5" => (1, true),
        b"P6" => (3, true),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "PNM variant {}",
                String::from_utf8_lossy(other)
            )));
        }
    };

    let width = header.number()? as usize;
    let height = header.number()? as usize;
    let maxval = header.number()?;
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("PNM maxval {} out of range", maxval)));
    }

    let count = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(channels))
        .ok_or_else(|| {
            IoError::InvalidData(format!("PNM size {}x{} too large", width, height))
        })?;
    let samples = if binary {
        // Exactly one whitespace byte separates the header from the raster
        let start = header.pos + 1;
        read_binary_samples(data.get(start..).unwrap_or(&[]), count, maxval)?
    } else {
        let mut samples = Vec::with_capacity(count.min(data.len()));
        for _ in 0..count {
            let v = header.number()?;
            if v > maxval {
                return Err(IoError::InvalidData(format!(
                    "PNM sample {} exceeds maxval {}",
                    v, maxval
                )));
            }
            samples.push(v);
        }
        samples
    };

    let scaled: Vec<u8> = samples.iter().map(|&v| rescale(v, maxval)).collect();
    if channels == 1 {
        Ok(Image::Gray(Grid::from_vec(height, width, scaled)?))
    } else {
        let pixels = scaled
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Ok(Image::Rgb(Grid::from_vec(height, width, pixels)?))
    }
}

fn read_binary_samples(raster: &[u8], count: usize, maxval: u32) -> IoResult<Vec<u32>> {
    let bytes_per_sample = if maxval > 255 { 2 } else { 1 };
    let needed = count.saturating_mul(bytes_per_sample);
    if raster.len() < needed {
        return Err(IoError::InvalidData(format!(
            "PNM raster truncated: need {} bytes, have {}",
            needed,
            raster.len()
        )));
    }
    let samples = if bytes_per_sample == 2 {
        raster[..needed]
            .chunks_exact(2)
            .map(|c| u32::from(u16::from_be_bytes([c[0], c[1]])))
            .collect()
    } else {
        raster[..needed].iter().map(|&b| u32::from(b)).collect()
    };
    Ok(samples)
}

/// Map `0..=maxval` onto `0..=255`, rounding to nearest.
fn rescale(v: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        return v as u8;
    }
    ((v.min(maxval) * 255 + maxval / 2) / maxval) as u8
}

/// Whitespace-separated header tokens with `#` comments skipped.
struct HeaderReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> HeaderReader<'a> {
    fn token(&mut self) -> IoResult<&'a [u8]> {
        loop {
            match self.data.get(self.pos) {
                Some(b'#') => {
                    while let Some(&c) = self.data.get(self.pos) {
                        if c == b'\n' {
                            break;
                        }
                        self.pos += 1;
                    }
                }
                Some(c) if c.is_ascii_whitespace() => self.pos += 1,
                Some(_) => break,
                None => {
                    return Err(IoError::InvalidData("unexpected end of PNM data".to_string()));
                }
            }
        }
        let start = self.pos;
        while let Some(c) = self.data.get(self.pos) {
            if c.is_ascii_whitespace() {
                break;
            }
            self.pos += 1;
        }
        Ok(&self.data[start..self.pos])
    }

    fn number(&mut self) -> IoResult<u32> {
        let token = self.token()?;
        std::str::from_utf8(token)
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| {
                IoError::InvalidData(format!(
                    "expected a number in PNM data, found '{}'",
                    String::from_utf8_lossy(token)
                ))
            })
    }
}

/// Write a gray grid as binary PGM (P5).
pub fn write_pgm<W: Write>(grid: &Grid<u8>, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", grid.cols(), grid.rows())?;
    writer.write_all(grid.as_slice())?;
    Ok(())
}

/// Write an RGB grid as binary PPM (P6).
pub fn write_ppm<W: Write>(grid: &Grid<Rgb>, mut writer: W) -> IoResult<()> {
    write!(writer, "P6\n{} {}\n255\n", grid.cols(), grid.rows())?;
    let data: Vec<u8> = grid
        .as_slice()
        .iter()
        .flat_map(|p| [p.r, p.g, p.b])
        .collect();
    writer.write_all(&data)?;
    Ok(())
}

/// Write an image as PGM or PPM depending on its kind.
pub fn write_pnm<W: Write>(image: &Image, writer: W) -> IoResult<()> {
    match image {
        Image::Gray(grid) => write_pgm(grid, writer),
        Image::Rgb(grid) => write_ppm(grid, writer),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray(image: Image) -> Grid<u8> {
        match image {
            Image::Gray(grid) => grid,
            Image::Rgb(_) => panic!("expected gray image"),
        }
    }

    #[test]
    fn test_ascii_pgm_with_comments() {
        let data = b"P2\n# a comment\n3 2\n# another\n15\n0 15 5\n10 1 3\n";
        let grid = gray(read_pnm(&data[..]).unwrap());
        assert_eq!(grid.shape(), (2, 3));
        assert_eq!(grid.as_slice(), &[0, 255, 85, 170, 17, 51]);
    }

    #[test]
    fn test_ascii_ppm() {
        let data = b"P3 1 1 255 10 20 30";
        match read_pnm(&data[..]).unwrap() {
            Image::Rgb(grid) => assert_eq!(grid.as_slice(), &[Rgb::new(10, 20, 30)]),
            Image::Gray(_) => panic!("expected rgb image"),
        }
    }

    #[test]
    fn test_binary_pgm_roundtrip() {
        let grid = Grid::from_rows(vec![vec![9u8, 32, 10], vec![255, 0, 13]]).unwrap();
        let mut bytes = Vec::new();
        write_pgm(&grid, &mut bytes).unwrap();
        assert!(bytes.starts_with(b"P5\n3 2\n255\n"));
        assert_eq!(gray(read_pnm(&bytes[..]).unwrap()), grid);
    }

    #[test]
    fn test_binary_ppm_roundtrip() {
        let grid = Grid::from_rows(vec![vec![Rgb::new(1, 2, 3)], vec![Rgb::new(4, 5, 6)]]).unwrap();
        let mut bytes = Vec::new();
        write_ppm(&grid, &mut bytes).unwrap();
        match read_pnm(&bytes[..]).unwrap() {
            Image::Rgb(back) => assert_eq!(back, grid),
            Image::Gray(_) => panic!("expected rgb image"),
        }
    }

    #[test]
    fn test_sixteen_bit_binary_pgm() {
        let mut data = b"P5 2 1 65535\n".to_vec();
        data.extend_from_slice(&[0xFF, 0xFF, 0x80, 0x00]);
        let grid = gray(read_pnm(&data[..]).unwrap());
        assert_eq!(grid.as_slice(), &[255, 128]);
    }

    #[test]
    fn test_truncated_raster() {
        let data = b"P5 4 4 255\n\x00\x01";
        assert!(matches!(read_pnm(&data[..]), Err(IoError::InvalidData(_))));
    }

    #[test]
    fn test_bad_header() {
        assert!(matches!(
            read_pnm(&b"P2 x 1 255 0"[..]),
            Err(IoError::InvalidData(_))
        ));
        assert!(matches!(
            read_pnm(&b"P4 1 1\n\x00"[..]),
            Err(IoError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            read_pnm(&b"P2 1 1 255 300"[..]),
            Err(IoError::InvalidData(_))
        ));
    }
}
