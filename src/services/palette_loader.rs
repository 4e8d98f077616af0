use epaper_dither::Palette;
use std::path::PathBuf;

use crate::error::ProcessError;

/// Reads the panel palette from an Adobe color table on disk.
///
/// The table is re-read on every call so edits take effect on the next
/// upload without a restart.
#[derive(Debug, Clone)]
pub struct PaletteLoader {
    path: PathBuf,
}

impl PaletteLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub async fn load(&self) -> Result<Palette, ProcessError> {
        let table =
            tokio::fs::read(&self.path)
                .await
                .map_err(|source| ProcessError::ResourceUnavailable {
                    path: self.path.clone(),
                    source,
                })?;

        let palette = Palette::from_act(&table)?;
        tracing::debug!(
            path = %self.path.display(),
            colors = palette.len(),
            "Loaded palette"
        );
        Ok(palette)
    }
}
