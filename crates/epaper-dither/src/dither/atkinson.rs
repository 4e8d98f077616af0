//! Atkinson error diffusion dithering algorithm.
//!
//! Atkinson dithering distributes only 75% of the quantization error (6/8),
//! which prevents color bleeding with small palettes. Originally developed
//! by Bill Atkinson for the Apple Macintosh, it suits e-paper well.

use crate::color::Rgb;
use crate::palette::Palette;

use super::{dither_with_kernel, Dither, DitherOptions, ATKINSON};

/// Atkinson error diffusion dithering.
///
/// # Algorithm
///
/// The Atkinson kernel distributes error to 6 neighbors:
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Each neighbor receives 1/8 of the error (divided further by
/// [`DitherOptions::step`]), for a total of at most 6/8 = 75%.
pub struct Atkinson;

impl Dither for Atkinson {
    fn dither(
        &self,
        image: &[Rgb],
        width: usize,
        height: usize,
        palette: &Palette,
        options: &DitherOptions,
    ) -> Vec<u8> {
        dither_with_kernel(image, width, height, palette, &ATKINSON, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bw_palette() -> Palette {
        Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap()
    }

    fn make_rgb_palette() -> Palette {
        Palette::new(&[
            Rgb::new(0, 0, 0),       // black
            Rgb::new(255, 255, 255), // white
            Rgb::new(255, 0, 0),     // red
            Rgb::new(0, 255, 0),     // green
            Rgb::new(0, 0, 255),     // blue
        ])
        .unwrap()
    }

    #[test]
    fn test_exact_colors_map_to_themselves() {
        let palette = make_rgb_palette();
        let options = DitherOptions::new();
        let image = palette.colors().to_vec();

        let result = Atkinson.dither(&image, image.len(), 1, &palette, &options);
        assert_eq!(result, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_uniform_gray_2x2_mixes_black_and_white() {
        let palette = make_bw_palette();
        let options = DitherOptions::new();
        let image = vec![Rgb::new(128, 128, 128); 4];

        let result = Atkinson.dither(&image, 2, 2, &palette, &options);

        // 128 sits one step closer to white; diffusion then alternates.
        assert_eq!(result, vec![1, 0, 0, 1]);
    }

    #[test]
    fn test_mid_gray_ratio_tracks_intensity() {
        let palette = make_bw_palette();
        let options = DitherOptions::new();
        let size = 32;
        let image = vec![Rgb::new(128, 128, 128); size * size];

        let result = Atkinson.dither(&image, size, size, &palette, &options);
        let whites = result.iter().filter(|&&x| x == 1).count();
        let ratio = whites as f32 / (size * size) as f32;

        assert!(
            (ratio - 0.5).abs() < 0.15,
            "Expected ~50% white for mid gray, got {ratio}"
        );
    }

    #[test]
    fn test_gradient_dithering() {
        let palette = make_bw_palette();
        let options = DitherOptions::new();

        let image: Vec<Rgb> = (0..10)
            .map(|i| {
                let v = (i * 255 / 9) as u8;
                Rgb::new(v, v, v)
            })
            .collect();

        let result = Atkinson.dither(&image, 10, 1, &palette, &options);

        assert_eq!(result[0], 0, "Pure black should map to black");
        assert_eq!(result[9], 1, "Pure white should map to white");

        let blacks = result.iter().filter(|&&x| x == 0).count();
        let whites = result.iter().filter(|&&x| x == 1).count();
        assert!(blacks >= 2, "Should have multiple black pixels");
        assert!(whites >= 2, "Should have multiple white pixels");
    }

    #[test]
    fn test_step_damps_diffusion() {
        let palette = make_bw_palette();
        // Dark gray: alone it maps to black, only diffused error can
        // turn neighbors white.
        let image = vec![Rgb::new(100, 100, 100); 16 * 16];

        let count_whites = |step: u32| {
            let options = DitherOptions::new().step(step);
            Atkinson
                .dither(&image, 16, 16, &palette, &options)
                .iter()
                .filter(|&&x| x == 1)
                .count()
        };

        let full = count_whites(1);
        let damped = count_whites(8);
        assert!(full > 0, "Full diffusion should produce some white");
        assert!(
            damped < full,
            "Larger step should spread less error: {damped} >= {full}"
        );
    }

    #[test]
    fn test_zero_step_diffuses_like_one() {
        let palette = make_bw_palette();
        let image = vec![Rgb::new(100, 100, 100); 8 * 8];

        let zero = Atkinson.dither(&image, 8, 8, &palette, &DitherOptions::new().step(0));
        let one = Atkinson.dither(&image, 8, 8, &palette, &DitherOptions::new().step(1));
        assert_eq!(zero, one);
    }

    #[test]
    fn test_error_stays_inside_row_bounds() {
        // Error from the right edge must not wrap into the next row's
        // left edge, where 120 would otherwise be pushed over to white.
        let palette = make_bw_palette();
        let options = DitherOptions::new();

        #[rustfmt::skip]
        let image = vec![
            Rgb::new(0, 0, 0),       Rgb::new(0, 0, 0),       Rgb::new(100, 100, 100),
            Rgb::new(120, 120, 120), Rgb::new(120, 120, 120), Rgb::new(120, 120, 120),
        ];

        let result = Atkinson.dither(&image, 3, 2, &palette, &options);
        assert_eq!(result[3], 0);
    }

    #[test]
    fn test_output_indices_in_range() {
        let palette = make_rgb_palette();
        let options = DitherOptions::new();

        let image: Vec<Rgb> = (0..100)
            .map(|i| Rgb::new((i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 23 % 256) as u8))
            .collect();

        let result = Atkinson.dither(&image, 10, 10, &palette, &options);

        for (i, &idx) in result.iter().enumerate() {
            assert!(
                (idx as usize) < palette.len(),
                "Index {} at position {} exceeds palette size {}",
                idx,
                i,
                palette.len()
            );
        }
    }

    #[test]
    fn test_empty_image() {
        let palette = make_bw_palette();
        let result = Atkinson.dither(&[], 0, 0, &palette, &DitherOptions::new());
        assert!(result.is_empty());
    }

    #[test]
    fn test_single_column_image() {
        let palette = make_bw_palette();
        let options = DitherOptions::new();

        let image = vec![
            Rgb::new(0, 0, 0),
            Rgb::new(64, 64, 64),
            Rgb::new(192, 192, 192),
            Rgb::new(255, 255, 255),
        ];

        let result = Atkinson.dither(&image, 1, 4, &palette, &options);

        assert_eq!(result.len(), 4);
        assert_eq!(result[0], 0, "Black should stay black");
        assert_eq!(result[3], 1, "White should stay white");
    }
}
