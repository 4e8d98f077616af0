//! Error diffusion kernel definitions.

/// An error diffusion kernel.
///
/// The kernel defines how quantization error is distributed to neighboring
/// pixels that haven't been processed yet. Each entry specifies an offset
/// (dx, dy) and a weight for that neighbor.
///
/// # Error Propagation
///
/// The total error propagated is `sum(weights) / divisor`. Atkinson
/// intentionally propagates only 75%, which keeps small palettes from
/// bleeding.
///
/// # Buffer Sizing
///
/// The `max_dy` field indicates how many rows ahead the kernel reaches,
/// which determines the error buffer depth needed: `max_dy + 1` rows.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries for error diffusion.
    ///
    /// - `dx`: horizontal offset (positive = right)
    /// - `dy`: vertical offset (always >= 0, below the current row)
    /// - `weight`: fraction of error to diffuse (numerator, divisor is separate)
    pub entries: &'static [(i32, i32, u8)],

    /// Each neighbor receives `error * weight / divisor`.
    pub divisor: u8,

    /// Maximum dy value in entries.
    pub max_dy: usize,
}

/// Atkinson dithering kernel.
///
/// Distributes error to 6 neighbors with 75% total propagation (6/8).
///
/// ```text
///        X   1   1
///    1   1   1
///        1
/// ```
///
/// Originally developed by Bill Atkinson for the Apple Macintosh.
pub const ATKINSON: Kernel = Kernel {
    entries: &[
        (1, 0, 1),  // right
        (2, 0, 1),  // two right
        (-1, 1, 1), // bottom-left
        (0, 1, 1),  // bottom
        (1, 1, 1),  // bottom-right
        (0, 2, 1),  // two below
    ],
    divisor: 8,
    max_dy: 2,
};
