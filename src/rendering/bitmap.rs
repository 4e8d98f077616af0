//! Uncompressed 24-bit BMP output.
//!
//! Files are written to a hidden temporary in the destination directory and
//! renamed into place, so a reader never sees a half-written bitmap.

use epaper_dither::QuantizedImage;
use image::codecs::bmp::BmpEncoder;
use image::ExtendedColorType;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::ProcessError;

/// Encode a quantized image as an in-memory BMP file.
pub fn encode_bmp(image: &QuantizedImage) -> Result<Vec<u8>, ProcessError> {
    let mut buf = Vec::new();
    encode_into(image, &mut buf)?;
    Ok(buf)
}

/// Write a quantized image to `dest` as a BMP file.
pub fn write_bmp(image: &QuantizedImage, dest: &Path) -> Result<(), ProcessError> {
    let dir = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".")
        .suffix(".tmp")
        .tempfile_in(dir)
        .map_err(ProcessError::WriteFailure)?;

    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        encode_into(image, &mut writer)?;
        writer.flush().map_err(ProcessError::WriteFailure)?;
    }

    tmp.persist(dest)
        .map_err(|e| ProcessError::WriteFailure(e.error))?;

    tracing::debug!(
        path = %dest.display(),
        width = image.width(),
        height = image.height(),
        "Wrote bitmap"
    );
    Ok(())
}

fn encode_into<W: Write>(image: &QuantizedImage, writer: &mut W) -> Result<(), ProcessError> {
    let width = u32::try_from(image.width()).map_err(|_| invalid(image))?;
    let height = u32::try_from(image.height()).map_err(|_| invalid(image))?;
    if width == 0 || height == 0 {
        return Err(invalid(image));
    }

    let rgb = image.to_rgb();
    let mut encoder = BmpEncoder::new(writer);
    encoder
        .encode(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| ProcessError::WriteFailure(io::Error::other(e)))
}

fn invalid(image: &QuantizedImage) -> ProcessError {
    ProcessError::InvalidDimensions {
        width: image.width().min(u32::MAX as usize) as u32,
        height: image.height().min(u32::MAX as usize) as u32,
    }
}
