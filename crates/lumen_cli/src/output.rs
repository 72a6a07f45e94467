//! Image writers: PPM (ASCII `P3` or binary `P6`) and PNG.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use lumen_renderer::ImageBuffer;

/// PPM flavour to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PpmFormat {
    /// Plain text `P3`, one pixel per line
    Ascii,
    /// Raw bytes `P6`
    Binary,
}

impl PpmFormat {
    fn magic(self) -> &'static str {
        match self {
            PpmFormat::Ascii => "P3",
            PpmFormat::Binary => "P6",
        }
    }
}

/// Write a gamma-corrected 8-bit PPM, rows top to bottom.
pub fn write_ppm<W: Write>(writer: &mut W, image: &ImageBuffer, format: PpmFormat) -> Result<()> {
    writeln!(writer, "{}", format.magic())?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    let bytes = image.to_rgb8();
    match format {
        PpmFormat::Ascii => {
            for rgb in bytes.chunks_exact(3) {
                writeln!(writer, "{} {} {}", rgb[0], rgb[1], rgb[2])?;
            }
        }
        PpmFormat::Binary => writer.write_all(&bytes)?,
    }

    writer.flush()?;
    Ok(())
}

/// Save a PPM file to disk.
pub fn save_ppm(path: &Path, image: &ImageBuffer, format: PpmFormat) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_ppm(&mut writer, image, format)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Save a PNG file to disk.
pub fn save_png(path: &Path, image: &ImageBuffer) -> Result<()> {
    let rgb = image::RgbImage::from_raw(image.width, image.height, image.to_rgb8())
        .context("Image buffer size does not match its dimensions")?;
    rgb.save(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_renderer::Color;

    fn checker() -> ImageBuffer {
        let mut image = ImageBuffer::new(2, 1);
        image.set(0, 0, Color::ONE);
        image.set(1, 0, Color::new(0.25, 0.0, 1.0));
        image
    }

    #[test]
    fn test_write_ascii_ppm() {
        let mut out = Vec::new();
        write_ppm(&mut out, &checker(), PpmFormat::Ascii).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 1\n255\n255 255 255\n128 0 255\n");
    }

    #[test]
    fn test_write_binary_ppm() {
        let mut out = Vec::new();
        write_ppm(&mut out, &checker(), PpmFormat::Binary).unwrap();

        let header = b"P6\n2 1\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(&out[header.len()..], &[255, 255, 255, 128, 0, 255]);
    }
}
