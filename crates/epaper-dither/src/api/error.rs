//! Unified error type for the epaper-dither public API.

use crate::palette::{PaletteError, ParseColorError};
use std::fmt;

/// Unified error type for the epaper-dither public API.
///
/// # Example
///
/// ```
/// use epaper_dither::{DitherError, Palette, Rgb};
///
/// fn two_tone(fg: &str) -> Result<Palette, DitherError> {
///     let fg: Rgb = fg.parse()?;
///     Ok(Palette::new(&[Rgb::new(255, 255, 255), fg])?)
/// }
///
/// assert!(two_tone("#000").is_ok());
/// assert!(two_tone("#FFF").is_err());
/// ```
#[derive(Debug)]
pub enum DitherError {
    /// Palette validation error
    Palette(PaletteError),
    /// Color parsing error (invalid hex string)
    ParseColor(ParseColorError),
    /// The diffusion step divisor was zero
    InvalidStep,
    /// The pixel buffer does not match the declared dimensions
    BufferSize {
        /// Bytes required by `width * height * channels`
        expected: usize,
        /// Bytes actually supplied
        actual: usize,
    },
}

impl fmt::Display for DitherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DitherError::Palette(err) => write!(f, "palette error: {}", err),
            DitherError::ParseColor(err) => write!(f, "color parse error: {}", err),
            DitherError::InvalidStep => write!(f, "diffusion step must be at least 1"),
            DitherError::BufferSize { expected, actual } => write!(
                f,
                "pixel buffer is {} bytes, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for DitherError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DitherError::Palette(err) => Some(err),
            DitherError::ParseColor(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PaletteError> for DitherError {
    fn from(err: PaletteError) -> Self {
        DitherError::Palette(err)
    }
}

impl From<ParseColorError> for DitherError {
    fn from(err: ParseColorError) -> Self {
        DitherError::ParseColor(err)
    }
}
