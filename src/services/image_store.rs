use rand::RngCore;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::StateError;

/// Extension of every stored bitmap.
pub const IMAGE_EXTENSION: &str = ".bmp";

/// Directory of processed bitmaps, addressed by generated id.
///
/// Stored files are never modified; they only appear (after a complete
/// write) and disappear (on delete).
#[derive(Debug, Clone)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the store directory if needed.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// A fresh id: 32 lowercase hex characters plus the extension.
    pub fn new_id() -> String {
        let mut bytes = [0u8; 16];
        rand::thread_rng().fill_bytes(&mut bytes);
        format!("{}{}", hex::encode(bytes), IMAGE_EXTENSION)
    }

    /// Path of `id` inside the store, or `None` if `id` is not a plain
    /// stored-image name.
    pub fn path_for(&self, id: &str) -> Option<PathBuf> {
        is_valid_id(id).then(|| self.dir.join(id))
    }

    pub async fn exists(&self, id: &str) -> bool {
        match self.path_for(id) {
            Some(path) => tokio::fs::metadata(&path)
                .await
                .map(|m| m.is_file())
                .unwrap_or(false),
            None => false,
        }
    }

    /// Stored ids, sorted. A missing directory is an empty store.
    pub async fn list(&self) -> io::Result<Vec<String>> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        let mut ids = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if is_valid_id(&name) && entry.file_type().await?.is_file() {
                ids.push(name);
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// Delete `id` from the store.
    pub async fn remove(&self, id: &str) -> Result<(), StateError> {
        let path = self
            .path_for(id)
            .ok_or_else(|| StateError::NotFound(id.to_string()))?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(id = %id, "Removed stored image");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(StateError::NotFound(id.to_string()))
            }
            Err(e) => Err(StateError::WriteFailure(e)),
        }
    }
}

/// Plain file name ending in the image extension; hidden temporaries and
/// anything that could escape the directory are rejected.
fn is_valid_id(id: &str) -> bool {
    id.len() > IMAGE_EXTENSION.len()
        && id.ends_with(IMAGE_EXTENSION)
        && !id.starts_with('.')
        && !id.contains(['/', '\\', '\0'])
        && !id.contains("..")
}
