//! Inkframe - photo frames for e-paper panels
//!
//! Upload photos, dither them to the panel's palette, and keep every viewer
//! in sync with the image currently on display.
//! This library exposes modules for integration testing.

pub mod api;
pub mod error;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
