//! Writing rendered images to disk.
//!
//! The renderer hands over display-encoded 8-bit RGB pixels in row-major
//! order, top row first. Text PPM (`P3`) is the reference format; PNG is
//! available through the `image` crate.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{OutputError, OutputResult};

fn check_size(width: u32, height: u32, pixels: &[[u8; 3]]) -> OutputResult<()> {
    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        return Err(OutputError::SizeMismatch {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

/// Write pixels as a text PPM: a `P3` header, then one `r g b` line per pixel.
pub fn write_ppm<W: Write>(
    writer: &mut W,
    width: u32,
    height: u32,
    pixels: &[[u8; 3]],
) -> OutputResult<()> {
    check_size(width, height, pixels)?;

    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", width, height)?;
    writeln!(writer, "255")?;

    for [r, g, b] in pixels {
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save pixels as a text PPM file.
pub fn save_ppm(path: impl AsRef<Path>, width: u32, height: u32, pixels: &[[u8; 3]]) -> OutputResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ppm(&mut writer, width, height, pixels)
}

/// Save pixels as a PNG file.
pub fn save_png(path: impl AsRef<Path>, width: u32, height: u32, pixels: &[[u8; 3]]) -> OutputResult<()> {
    check_size(width, height, pixels)?;

    let raw: Vec<u8> = pixels.iter().flatten().copied().collect();
    let buffer = image::RgbImage::from_raw(width, height, raw).ok_or(OutputError::SizeMismatch {
        expected: width as usize * height as usize,
        actual: pixels.len(),
    })?;
    buffer.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

/// Save pixels, picking the format from the file extension (`ppm` or `png`).
pub fn save_image(path: impl AsRef<Path>, width: u32, height: u32, pixels: &[[u8; 3]]) -> OutputResult<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => save_ppm(path, width, height, pixels),
        "png" => save_png(path, width, height, pixels),
        other => Err(OutputError::UnsupportedFormat(other.to_string())),
    }?;

    log::info!("Saved {}x{} image to {}", width, height, path.display());
    Ok(())
}
