//! Public API for the epaper-dither crate.
//!
//! This module provides the high-level API: the [`Ditherer`] entry point
//! and the [`DitherError`] unified error type.

mod builder;
mod error;

pub use builder::Ditherer;
pub use error::DitherError;
