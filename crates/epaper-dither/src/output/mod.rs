//! Output types for the dithering pipeline.
//!
//! [`QuantizedImage`] stores palette indices with dimension metadata and an
//! owned [`Palette`](crate::palette::Palette). The indexed form is
//! canonical; packed RGB is produced on demand for encoders.

mod quantized_image;

pub use quantized_image::QuantizedImage;
