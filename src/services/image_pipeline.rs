use epaper_dither::QuantizedImage;
use std::sync::Arc;
use std::time::Instant;

use crate::error::ProcessError;
use crate::models::{AppConfig, CanvasConfig, FitPolicy};
use crate::rendering::{normalize, write_bmp};
use crate::services::{DitherPool, ImageStore, PaletteLoader};

/// decode → orient → fit → quantize → encode
///
/// A failed job leaves nothing behind in the store.
pub struct ImagePipeline {
    palette: PaletteLoader,
    store: Arc<ImageStore>,
    pool: Arc<DitherPool>,
    canvas: CanvasConfig,
    step: u32,
}

impl ImagePipeline {
    pub fn new(config: &AppConfig, store: Arc<ImageStore>, pool: Arc<DitherPool>) -> Self {
        Self {
            palette: PaletteLoader::new(&config.palette),
            store,
            pool,
            canvas: config.canvas.clone(),
            step: config.dither.step,
        }
    }

    pub fn canvas(&self) -> &CanvasConfig {
        &self.canvas
    }

    /// Number of dither worker threads behind this pipeline.
    pub fn workers(&self) -> usize {
        self.pool.workers()
    }

    /// Run the full pipeline and add the result to the store.
    ///
    /// Returns the new image id.
    pub async fn process(&self, bytes: Vec<u8>, fit: FitPolicy) -> Result<String, ProcessError> {
        let started = Instant::now();
        let quantized = self.render(bytes, fit).await?;

        let id = ImageStore::new_id();
        let dest = self.store.dir().join(&id);
        tokio::task::spawn_blocking(move || write_bmp(&quantized, &dest))
            .await
            .map_err(|e| ProcessError::WorkerFailure(format!("Encode task failed: {e}")))??;

        tracing::info!(
            id = %id,
            %fit,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Processed upload"
        );
        Ok(id)
    }

    /// Run the pipeline up to the quantized image without storing it.
    pub async fn render(
        &self,
        bytes: Vec<u8>,
        fit: FitPolicy,
    ) -> Result<QuantizedImage, ProcessError> {
        // Re-read per job so a swapped palette file applies immediately
        let palette = self.palette.load().await?;

        let (width, height, background) =
            (self.canvas.width, self.canvas.height, self.canvas.background);
        let normalized = tokio::task::spawn_blocking(move || {
            normalize(&bytes, fit, width, height, background)
        })
        .await
        .map_err(|e| ProcessError::WorkerFailure(format!("Normalize task failed: {e}")))??;

        self.pool.dither(normalized, palette, self.step).await
    }
}
