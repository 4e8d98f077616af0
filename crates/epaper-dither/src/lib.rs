#![allow(clippy::needless_range_loop, clippy::module_inception)]

//! epaper-dither: palette quantization for e-paper displays
//!
//! This library maps full-color RGBA rasters onto a small, fixed color
//! palette using Atkinson error diffusion. The output is an indexed image
//! whose every pixel is byte-identical to one palette entry, ready to be
//! written out in an uncompressed format for a low-capability panel.
//!
//! # Quick Start
//!
//! ```
//! use epaper_dither::{Ditherer, Palette, Rgb};
//!
//! let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
//! let ditherer = Ditherer::new(palette);
//!
//! // 2x2 mid-gray RGBA raster
//! let rgba = [128u8, 128, 128, 255].repeat(4);
//! let result = ditherer.dither_rgba(&rgba, 2, 2).unwrap();
//!
//! assert_eq!(result.width(), 2);
//! assert_eq!(result.height(), 2);
//! ```
//!
//! # Palettes
//!
//! Palettes usually come from a 768-byte Adobe color table (`.act`), see
//! [`Palette::from_act()`]. Loading keeps the first occurrence of each color
//! and preserves table order, so nearest-color ties always resolve to the
//! entry that appears first in the table.
//!
//! # Determinism
//!
//! Dithering the same raster against the same palette with the same
//! [`DitherOptions`] always yields byte-identical output. Matching uses
//! squared Euclidean distance in RGB and a strict "less than" comparison,
//! and the scan order is fixed (left to right, top to bottom).

pub mod api;
pub mod color;
pub mod dither;
pub mod output;
pub mod palette;


pub use api::{DitherError, Ditherer};
pub use color::Rgb;
pub use dither::{DitherOptions, Kernel, ATKINSON};
pub use output::QuantizedImage;
pub use palette::{Palette, PaletteError, ParseColorError, ACT_TABLE_LEN, MAX_COLORS};
