//! Ditherer builder, the primary entry point for the crate.
//!
//! [`Ditherer`] binds a [`Palette`] to a set of [`DitherOptions`] and checks
//! raster dimensions before running the Atkinson kernel.

use super::DitherError;
use crate::color::Rgb;
use crate::dither::{Atkinson, Dither, DitherOptions};
use crate::output::QuantizedImage;
use crate::palette::Palette;

/// High-level Atkinson ditherer.
///
/// - Constructor requires a [`Palette`], which is never empty
/// - Configuration methods consume and return `self`
/// - [`dither()`](Self::dither) takes `&self`, so one ditherer can process
///   many images
///
/// # Example
///
/// ```
/// use epaper_dither::{Ditherer, Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// let ditherer = Ditherer::new(palette).step(1);
///
/// let pixels = vec![Rgb::new(128, 128, 128); 4];
/// let result = ditherer.dither(&pixels, 2, 2).unwrap();
/// assert_eq!(result.indices().len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct Ditherer {
    palette: Palette,
    options: DitherOptions,
}

impl Ditherer {
    /// Create a new ditherer with the given palette and default options.
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            options: DitherOptions::default(),
        }
    }

    /// Set the diffusion step divisor.
    #[inline]
    pub fn step(mut self, step: u32) -> Self {
        self.options = self.options.step(step);
        self
    }

    /// Returns the palette this ditherer quantizes to.
    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Dither a row-major RGB raster.
    ///
    /// # Errors
    ///
    /// - [`DitherError::InvalidStep`] if the step divisor is zero
    /// - [`DitherError::BufferSize`] if `pixels.len() != width * height`
    pub fn dither(
        &self,
        pixels: &[Rgb],
        width: usize,
        height: usize,
    ) -> Result<QuantizedImage, DitherError> {
        if self.options.step == 0 {
            return Err(DitherError::InvalidStep);
        }
        let expected = width * height;
        if pixels.len() != expected {
            return Err(DitherError::BufferSize {
                expected,
                actual: pixels.len(),
            });
        }

        let indices = Atkinson.dither(pixels, width, height, &self.palette, &self.options);
        Ok(QuantizedImage::new(
            indices,
            width,
            height,
            self.palette.clone(),
        ))
    }

    /// Dither a row-major RGBA byte raster. Alpha is ignored.
    ///
    /// # Errors
    ///
    /// Same as [`dither()`](Self::dither); [`DitherError::BufferSize`]
    /// compares against `width * height * 4` bytes.
    pub fn dither_rgba(
        &self,
        rgba: &[u8],
        width: usize,
        height: usize,
    ) -> Result<QuantizedImage, DitherError> {
        let expected = width * height * 4;
        if rgba.len() != expected {
            return Err(DitherError::BufferSize {
                expected,
                actual: rgba.len(),
            });
        }
        let pixels: Vec<Rgb> = rgba
            .chunks_exact(4)
            .map(|px| Rgb::new(px[0], px[1], px[2]))
            .collect();
        self.dither(&pixels, width, height)
    }
}
