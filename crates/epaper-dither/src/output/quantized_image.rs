//! QuantizedImage: palette indices plus the palette they index.

use crate::color::Rgb;
use crate::palette::Palette;

/// The output of the ditherer.
///
/// Stores one `u8` palette index per pixel in row-major order, along with
/// image dimensions and the palette used for dithering. Because pixels are
/// indices, every RGB value this image yields is exactly a palette entry.
///
/// # Example
///
/// ```
/// use epaper_dither::{Palette, QuantizedImage, Rgb};
///
/// let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// let image = QuantizedImage::new(vec![0, 1, 1, 0], 2, 2, palette);
///
/// assert_eq!(image.pixel(1, 0), Rgb::new(255, 255, 255));
/// assert_eq!(image.to_rgb().len(), 2 * 2 * 3);
/// ```
#[derive(Debug, Clone)]
pub struct QuantizedImage {
    indices: Vec<u8>,
    width: usize,
    height: usize,
    palette: Palette,
}

impl QuantizedImage {
    /// Create a new `QuantizedImage` from palette indices.
    ///
    /// # Panics (debug only)
    ///
    /// Debug-asserts that `indices.len() == width * height`.
    pub fn new(indices: Vec<u8>, width: usize, height: usize, palette: Palette) -> Self {
        debug_assert_eq!(
            indices.len(),
            width * height,
            "indices length ({}) must match width * height ({}x{}={})",
            indices.len(),
            width,
            height,
            width * height,
        );
        Self {
            indices,
            width,
            height,
            palette,
        }
    }

    /// Returns the palette indices, row-major.
    #[inline]
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the palette used for this image.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Color of the pixel at `(x, y)`.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        self.palette.color(self.indices[y * self.width + x] as usize)
    }

    /// Packed `[R, G, B, R, G, B, ...]` bytes, `width * height * 3` long.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut rgb = Vec::with_capacity(self.indices.len() * 3);
        for &idx in &self.indices {
            rgb.extend_from_slice(&self.palette.color(idx as usize).to_bytes());
        }
        rgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Palette {
        Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)]).unwrap()
    }

    #[test]
    fn test_to_rgb_looks_up_palette() {
        let image = QuantizedImage::new(vec![2, 0, 1], 3, 1, palette());
        assert_eq!(image.to_rgb(), vec![0, 0, 255, 0, 0, 0, 255, 0, 0]);
    }

    #[test]
    fn test_pixel_addresses_row_major() {
        let image = QuantizedImage::new(vec![0, 1, 2, 1], 2, 2, palette());
        assert_eq!(image.pixel(0, 1), Rgb::new(0, 0, 255));
        assert_eq!(image.pixel(1, 1), Rgb::new(255, 0, 0));
    }
}
