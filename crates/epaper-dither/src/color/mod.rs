//! Color types
//!
//! The ditherer works directly on 8-bit sRGB triples. Error accumulation
//! happens in `f32` on top of these values, see [`crate::dither`].

mod rgb;

pub use rgb::Rgb;
