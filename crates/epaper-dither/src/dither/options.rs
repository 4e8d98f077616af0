//! Dithering options and configuration.

/// Configuration options for error diffusion dithering.
///
/// # Example
///
/// ```
/// use epaper_dither::DitherOptions;
///
/// let options = DitherOptions::new();
/// assert_eq!(options.step, 1);
///
/// // Spread half as much error to each neighbor
/// let gentle = DitherOptions::new().step(2);
/// assert_eq!(gentle.step, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DitherOptions {
    /// Diffusion step divisor.
    ///
    /// Each neighbor receives `error * weight / (kernel divisor * step)`,
    /// so `1` is textbook Atkinson and larger values damp the diffusion.
    /// Must be at least 1.
    ///
    /// Default: `1`
    pub step: u32,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self { step: 1 }
    }
}

impl DitherOptions {
    /// Create new dither options with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the diffusion step divisor.
    #[inline]
    pub fn step(mut self, step: u32) -> Self {
        self.step = step;
        self
    }
}
