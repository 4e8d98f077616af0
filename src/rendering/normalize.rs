//! Decode, orient and fit an uploaded photo onto the display canvas.

use epaper_dither::Rgb;
use image::imageops::{self, FilterType};
use image::metadata::Orientation::NoTransforms;
use image::{DynamicImage, ImageDecoder, ImageReader, Rgba, RgbaImage};
use std::io::Cursor;

use crate::error::ProcessError;
use crate::models::FitPolicy;

const FILTER: FilterType = FilterType::Lanczos3;

/// Turn encoded image bytes into a canvas-sized RGBA raster.
///
/// The format is guessed from the content and any embedded EXIF
/// orientation is applied before fitting.
pub fn normalize(
    bytes: &[u8],
    fit: FitPolicy,
    width: u32,
    height: u32,
    background: Rgb,
) -> Result<RgbaImage, ProcessError> {
    if width == 0 || height == 0 {
        return Err(ProcessError::InvalidDimensions { width, height });
    }

    let img = decode(bytes)?;
    if img.width() == 0 || img.height() == 0 {
        return Err(ProcessError::InvalidDimensions {
            width: img.width(),
            height: img.height(),
        });
    }

    tracing::debug!(
        src_width = img.width(),
        src_height = img.height(),
        width,
        height,
        %fit,
        "Fitting image to canvas"
    );

    let out = match fit {
        FitPolicy::Fill => img.resize_exact(width, height, FILTER).into_rgba8(),
        FitPolicy::Cover => img.resize_to_fill(width, height, FILTER).into_rgba8(),
        FitPolicy::Contain => contain(&img, width, height, background),
    };

    Ok(out)
}

fn decode(bytes: &[u8]) -> Result<DynamicImage, ProcessError> {
    let unsupported = |e: image::ImageError| ProcessError::UnsupportedFormat(e.to_string());

    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ProcessError::UnsupportedFormat(e.to_string()))?
        .into_decoder()
        .map_err(unsupported)?;
    let orientation = decoder.orientation().unwrap_or(NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder).map_err(unsupported)?;
    img.apply_orientation(orientation);
    Ok(img)
}

/// Scale inside the canvas and center on an opaque background.
fn contain(img: &DynamicImage, width: u32, height: u32, background: Rgb) -> RgbaImage {
    let scaled = img.resize(width, height, FILTER).into_rgba8();
    let mut canvas = RgbaImage::from_pixel(
        width,
        height,
        Rgba([background.r, background.g, background.b, 255]),
    );

    let x = (width - scaled.width().min(width)) / 2;
    let y = (height - scaled.height().min(height)) / 2;
    imageops::overlay(&mut canvas, &scaled, x as i64, y as i64);
    canvas
}
