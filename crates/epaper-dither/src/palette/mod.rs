//! Palette types and utilities
//!
//! This module provides the [`Palette`] type, the Adobe color table loader,
//! and error types for parsing and validation.

mod error;
mod palette;

pub use error::{PaletteError, ParseColorError};
pub use palette::{Palette, ACT_TABLE_LEN, MAX_COLORS};
