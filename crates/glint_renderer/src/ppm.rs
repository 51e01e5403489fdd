//! Plain-text PPM (`P3`) output.
//!
//! The writer expects colors that are already gamma-corrected, as produced by
//! [`render`](crate::render). It only clamps and quantizes. The reader exists
//! so written files can be checked back channel by channel.

use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::Path;

use crate::{Color, Image};
use glint_math::Interval;
use thiserror::Error;

/// Errors that can occur while writing or reading PPM images.
#[derive(Error, Debug)]
pub enum PpmError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image is empty")]
    Empty,

    #[error("Image is not rectangular: row {row} has {found} pixels, expected {expected}")]
    NotRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Parse error: {message}")]
    Parse { message: String },
}

/// Result type for PPM operations.
pub type PpmResult<T> = Result<T, PpmError>;

/// Largest channel value the writer emits.
pub const MAX_VALUE: u16 = 255;

/// Map a [0, 1] channel to 0..=255 as `floor(255.999 * v)`.
#[inline]
pub fn quantize(value: f32) -> u8 {
    // Values should already be in the range [0, 1], but clamp them just in case
    let intensity = Interval::new(0.0, 1.0);
    (255.999 * intensity.clamp(value)) as u8
}

/// Quantize a color to 8 bits per channel.
pub fn color_to_rgb8(color: Color) -> [u8; 3] {
    [quantize(color.x), quantize(color.y), quantize(color.z)]
}

/// Write a `[height][width]` array of colors as a P3 image.
///
/// Rejects an image without pixels and rows of unequal length.
pub fn write_ppm<W: Write, R: AsRef<[Color]>>(mut writer: W, rows: &[R]) -> PpmResult<()> {
    if rows.iter().all(|row| row.as_ref().is_empty()) {
        return Err(PpmError::Empty);
    }

    let width = rows[0].as_ref().len();
    if let Some((row, found)) = rows
        .iter()
        .map(|row| row.as_ref().len())
        .enumerate()
        .find(|&(_, len)| len != width)
    {
        return Err(PpmError::NotRectangular {
            row,
            expected: width,
            found,
        });
    }

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, rows.len())?;
    writeln!(writer, "{}", MAX_VALUE)?;

    for row in rows {
        for &color in row.as_ref() {
            let [r, g, b] = color_to_rgb8(color);
            writeln!(writer, "{} {} {}", r, g, b)?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// Write a rendered image as P3.
pub fn write_image<W: Write>(writer: W, image: &Image) -> PpmResult<()> {
    let rows: Vec<&[Color]> = image.rows().collect();
    write_ppm(writer, &rows)
}

/// Save a rendered image to a `.ppm` file.
pub fn save_ppm<P: AsRef<Path>>(path: P, image: &Image) -> PpmResult<()> {
    let file = File::create(path.as_ref())?;
    write_image(BufWriter::new(file), image)?;
    log::info!("Saved {}x{} image to {}", image.width, image.height, path.as_ref().display());
    Ok(())
}

/// A decoded P3 image with 8-bit channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PpmImage {
    pub width: usize,
    pub height: usize,
    pub max_value: u16,
    /// Row-major RGB triples
    pub pixels: Vec<[u8; 3]>,
}

impl PpmImage {
    /// Get the pixel at (x, y).
    pub fn get(&self, x: usize, y: usize) -> [u8; 3] {
        self.pixels[y * self.width + x]
    }
}

/// Read a P3 image.
///
/// Accepts any whitespace layout and `#` comments. Only 8-bit images are
/// supported.
pub fn read_ppm<R: BufRead>(reader: R) -> PpmResult<PpmImage> {
    let mut tokens = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let content = line.split('#').next().unwrap_or_default();
        tokens.extend(content.split_whitespace().map(str::to_owned));
    }
    let mut tokens = tokens.into_iter();

    match tokens.next() {
        Some(magic) if magic == "P3" => {}
        Some(magic) => return Err(parse_error(format!("unsupported magic number {magic:?}"))),
        None => return Err(parse_error("missing magic number")),
    }

    let width: usize = next_number(&mut tokens, "width")?;
    let height: usize = next_number(&mut tokens, "height")?;
    let max_value: u16 = next_number(&mut tokens, "max value")?;
    if max_value == 0 || max_value > MAX_VALUE {
        return Err(parse_error(format!("unsupported max value {max_value}")));
    }

    let pixel_count = width
        .checked_mul(height)
        .filter(|count| count.checked_mul(3).is_some())
        .ok_or_else(|| parse_error(format!("image size {width}x{height} overflows")))?;
    // Header sizes are untrusted until the channel values are actually present
    if tokens.len() < pixel_count * 3 {
        return Err(parse_error(format!(
            "header declares {pixel_count} pixels but only {} channel values follow",
            tokens.len()
        )));
    }

    let mut pixels = Vec::with_capacity(pixel_count);
    for index in 0..pixel_count {
        let mut rgb = [0u8; 3];
        for channel in &mut rgb {
            let value: u16 = next_number(&mut tokens, "channel value")?;
            if value > max_value {
                return Err(parse_error(format!(
                    "pixel {index} has value {value} above max {max_value}"
                )));
            }
            *channel = value as u8;
        }
        pixels.push(rgb);
    }

    if tokens.next().is_some() {
        return Err(parse_error("trailing data after pixels"));
    }

    Ok(PpmImage {
        width,
        height,
        max_value,
        pixels,
    })
}

fn next_number<T: std::str::FromStr>(
    tokens: &mut impl Iterator<Item = String>,
    what: &str,
) -> PpmResult<T> {
    let token = tokens
        .next()
        .ok_or_else(|| parse_error(format!("unexpected end of file reading {what}")))?;
    token
        .parse()
        .map_err(|_| parse_error(format!("invalid {what} {token:?}")))
}

fn parse_error(message: impl Into<String>) -> PpmError {
    PpmError::Parse {
        message: message.into(),
    }
}
