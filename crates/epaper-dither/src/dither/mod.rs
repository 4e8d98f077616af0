//! Error diffusion dithering.
//!
//! Pixels are visited in raster order (left to right, top to bottom). Each
//! pixel's accumulated color is matched against the palette, and the
//! difference between that color and the chosen entry is spread to the
//! unvisited neighbors named by a [`Kernel`].
//!
//! # Example
//!
//! ```
//! use epaper_dither::dither::{Atkinson, Dither, DitherOptions};
//! use epaper_dither::{Palette, Rgb};
//!
//! let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
//! let pixels = vec![Rgb::new(200, 200, 200); 9];
//!
//! let indices = Atkinson.dither(&pixels, 3, 3, &palette, &DitherOptions::new());
//! assert_eq!(indices.len(), 9);
//! ```

mod atkinson;
mod kernel;
mod options;

pub use atkinson::Atkinson;
pub use kernel::{Kernel, ATKINSON};
pub use options::DitherOptions;

use crate::color::Rgb;
use crate::palette::Palette;

/// Trait for error diffusion dithering algorithms.
///
/// Error diffusion works by:
/// 1. For each pixel, find the nearest palette color
/// 2. Compute the quantization error (desired - actual)
/// 3. Distribute that error to neighboring unprocessed pixels
/// 4. Repeat, with accumulated error influencing future decisions
pub trait Dither {
    /// Dither an image to palette indices.
    ///
    /// # Arguments
    ///
    /// * `image` - Input pixels (row-major order)
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `palette` - Color palette for quantization
    /// * `options` - Dithering configuration
    ///
    /// # Returns
    ///
    /// One palette index per pixel, row-major. Each index is in the range
    /// `0..palette.len()`.
    ///
    /// Implementations cannot fail, so a `step` of 0 diffuses like a step
    /// of 1. [`Ditherer::dither()`](crate::Ditherer::dither) rejects it
    /// with [`DitherError::InvalidStep`](crate::DitherError::InvalidStep).
    fn dither(
        &self,
        image: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        options: &DitherOptions,
    ) -> Vec<u8>;
}

/// Error buffer for efficient error diffusion.
///
/// Manages a sliding window of error rows, storing only the rows that
/// the diffusion kernel can reach (determined by `max_dy`). This avoids
/// allocating a full-image error buffer.
///
/// # Usage Pattern
///
/// 1. Create buffer with `new(width, row_depth)`
/// 2. For each row:
///    a. Read accumulated error with `get_accumulated(x)`
///    b. After processing pixel, distribute error with `add_error(x, dy, error)`
///    c. After row complete, call `advance_row()`
#[derive(Debug)]
pub struct ErrorBuffer {
    /// Error rows: rows[0] is current row, rows[1] is next, etc.
    rows: Vec<Vec<[f32; 3]>>,
    width: usize,
}

impl ErrorBuffer {
    /// Create a new error buffer.
    ///
    /// # Arguments
    ///
    /// * `width` - Image width in pixels
    /// * `row_depth` - Number of rows to track (kernel's `max_dy + 1`)
    pub fn new(width: usize, row_depth: usize) -> Self {
        Self {
            rows: (0..row_depth).map(|_| vec![[0.0; 3]; width]).collect(),
            width,
        }
    }

    /// Get accumulated error for a pixel in the current row.
    #[inline]
    pub fn get_accumulated(&self, x: usize) -> [f32; 3] {
        self.rows[0][x]
    }

    /// Add error to a future pixel.
    ///
    /// Silently ignores out-of-bounds coordinates.
    #[inline]
    pub fn add_error(&mut self, x: usize, row_offset: usize, error: [f32; 3]) {
        if x < self.width && row_offset < self.rows.len() {
            for c in 0..3 {
                self.rows[row_offset][x][c] += error[c];
            }
        }
    }

    /// Advance to the next row.
    ///
    /// Rotates the row buffer: the first row is discarded, subsequent rows
    /// shift forward, and a new zeroed row is added at the end.
    pub fn advance_row(&mut self) {
        // Rotate left: [0,1,2] -> [1,2,0]
        self.rows.rotate_left(1);
        if let Some(last) = self.rows.last_mut() {
            last.fill([0.0; 3]);
        }
    }
}

/// Core error diffusion loop parameterized by kernel.
///
/// The accumulated color is clamped to `0.0..=255.0` per channel before
/// matching, the same saturation an 8-bit working buffer would apply, and
/// the propagated error is measured from that clamped value.
pub(crate) fn dither_with_kernel(
    image: &[Rgb],
    width: usize,
    height: usize,
    palette: &Palette,
    kernel: &Kernel,
    options: &DitherOptions,
) -> Vec<u8> {
    let mut output = vec![0u8; width * height];
    if palette.is_empty() {
        return output;
    }

    // Step 0 counts as 1, see `Dither::dither`
    let scale = 1.0 / (kernel.divisor as f32 * options.step.max(1) as f32);
    let mut error_buf = ErrorBuffer::new(width, kernel.max_dy + 1);

    for y in 0..height {
        for x in 0..width {
            let idx = y * width + x;

            let source = image[idx].to_f32();
            let acc = error_buf.get_accumulated(x);
            let color = [
                (source[0] + acc[0]).clamp(0.0, 255.0),
                (source[1] + acc[1]).clamp(0.0, 255.0),
                (source[2] + acc[2]).clamp(0.0, 255.0),
            ];

            let best = palette.find_nearest(color);
            output[idx] = best as u8;

            let chosen = palette.color(best).to_f32();
            let error = [
                color[0] - chosen[0],
                color[1] - chosen[1],
                color[2] - chosen[2],
            ];
            if error == [0.0; 3] {
                continue;
            }

            for &(dx, dy, weight) in kernel.entries {
                let tx = x as i64 + dx as i64;
                let ty = y + dy as usize;
                if tx < 0 || tx as usize >= width || ty >= height {
                    continue;
                }
                let w = weight as f32 * scale;
                error_buf.add_error(
                    tx as usize,
                    dy as usize,
                    [error[0] * w, error[1] * w, error[2] * w],
                );
            }
        }
        error_buf.advance_row();
    }

    output
}
