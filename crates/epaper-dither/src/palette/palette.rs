//! Palette struct, Adobe color table loading and nearest-color matching.

use super::error::PaletteError;
use crate::color::Rgb;

/// Maximum number of palette entries (indices are stored as `u8`).
pub const MAX_COLORS: usize = 256;

/// Size of an Adobe color table: 256 consecutive RGB triples.
pub const ACT_TABLE_LEN: usize = MAX_COLORS * 3;

/// An ordered set of distinct output colors.
///
/// Entries keep the order in which they were supplied and are never
/// reordered or removed; the index of an entry is what the ditherer writes
/// into a [`QuantizedImage`](crate::QuantizedImage).
///
/// # Example
///
/// ```
/// use epaper_dither::{Palette, Rgb};
///
/// let palette = Palette::new(&[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]).unwrap();
/// assert_eq!(palette.len(), 2);
/// assert_eq!(palette.color(1), Rgb::new(255, 255, 255));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Create a palette from a list of colors.
    ///
    /// # Errors
    ///
    /// - [`PaletteError::EmptyPalette`] if `colors` is empty
    /// - [`PaletteError::TooManyColors`] if there are more than 256 colors
    /// - [`PaletteError::DuplicateColor`] if a color appears twice
    pub fn new(colors: &[Rgb]) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::EmptyPalette);
        }
        if colors.len() > MAX_COLORS {
            return Err(PaletteError::TooManyColors {
                count: colors.len(),
            });
        }
        for (i, color) in colors.iter().enumerate() {
            if colors[..i].contains(color) {
                return Err(PaletteError::DuplicateColor { index: i });
            }
        }

        Ok(Self {
            colors: colors.to_vec(),
        })
    }

    /// Load a palette from an Adobe color table (`.act`).
    ///
    /// The table holds 256 RGB triples. Every triple is visited in file
    /// order and kept only if no identical color was accepted before it,
    /// so a table padded with black yields a single black entry at the
    /// position of its first occurrence. Trailing bytes past the 256th
    /// triple (Photoshop's count/transparency footer) are ignored.
    ///
    /// Deduplication is a linear scan over the accepted entries. With at
    /// most 256 entries the quadratic bound is fine, and it pins the
    /// first-seen order that nearest-color tie-breaking depends on.
    ///
    /// # Errors
    ///
    /// [`PaletteError::MalformedTable`] if fewer than 768 bytes are given.
    ///
    /// ```
    /// use epaper_dither::{Palette, Rgb, ACT_TABLE_LEN};
    ///
    /// let mut table = vec![0u8; ACT_TABLE_LEN];
    /// table[3..6].copy_from_slice(&[255, 255, 255]);
    ///
    /// let palette = Palette::from_act(&table).unwrap();
    /// assert_eq!(palette.colors(), &[Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);
    /// ```
    pub fn from_act(table: &[u8]) -> Result<Self, PaletteError> {
        if table.len() < ACT_TABLE_LEN {
            return Err(PaletteError::MalformedTable { len: table.len() });
        }

        let mut colors: Vec<Rgb> = Vec::new();
        for triple in table[..ACT_TABLE_LEN].chunks_exact(3) {
            let color = Rgb::new(triple[0], triple[1], triple[2]);

            let mut exists = false;
            for accepted in &colors {
                if *accepted == color {
                    exists = true;
                    break;
                }
            }

            if !exists {
                colors.push(color);
            }
        }

        Ok(Self { colors })
    }

    /// Returns the number of colors in the palette.
    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Returns true if the palette is empty.
    ///
    /// Always `false` for palettes built by [`Palette::new`] or
    /// [`Palette::from_act`].
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Get the color at the given index.
    #[inline]
    pub fn color(&self, idx: usize) -> Rgb {
        self.colors[idx]
    }

    /// All colors in palette order.
    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Find the palette entry nearest to `color`.
    ///
    /// Distance is squared Euclidean in RGB. When two entries are equally
    /// close, the one appearing first in the palette wins.
    pub fn find_nearest(&self, color: [f32; 3]) -> usize {
        let mut best_idx = 0;
        let mut best_dist = f32::INFINITY;

        for (i, entry) in self.colors.iter().enumerate() {
            let dist = entry.distance_sq(color);
            if dist < best_dist {
                best_dist = dist;
                best_idx = i;
            }
        }

        best_idx
    }
}
