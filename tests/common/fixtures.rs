//! Test fixtures and constants.

use image::{ImageFormat, RgbImage};
use std::io::Cursor;

/// Multipart boundary used by [`multipart_body`]
pub const BOUNDARY: &str = "inkframe-test-boundary";

/// Palette colors
pub mod colors {
    pub const BLACK: [u8; 3] = [0, 0, 0];
    pub const WHITE: [u8; 3] = [255, 255, 255];
    pub const RED: [u8; 3] = [255, 0, 0];
}

/// Build a 768-byte Adobe color table.
///
/// Unused slots repeat the last color, as exported tables usually do.
pub fn act_table(palette: &[[u8; 3]]) -> Vec<u8> {
    let mut table = Vec::with_capacity(768);
    for i in 0..256 {
        table.extend_from_slice(&palette[i.min(palette.len() - 1)]);
    }
    table
}

/// Encode a solid-color PNG
pub fn png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, image::Rgb(color));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)
        .expect("Failed to encode PNG");
    buf.into_inner()
}

/// Build a `multipart/form-data` body with an optional photo and fit field
pub fn multipart_body(photo: Option<&[u8]>, fit: Option<&str>) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(photo) = photo {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            b"Content-Disposition: form-data; name=\"photo\"; filename=\"photo.png\"\r\n",
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(photo);
        body.extend_from_slice(b"\r\n");
    }

    if let Some(fit) = fit {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(b"Content-Disposition: form-data; name=\"fit\"\r\n\r\n");
        body.extend_from_slice(fit.as_bytes());
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
