//! The single "what is on display" pointer shared by every viewer.
//!
//! Writers (`select`, `clear`, `delete`) serialize through one async mutex
//! and persist before they publish. The in-memory pointer sits behind a
//! short-held `RwLock`, so `current()` never waits on disk.

use rand::seq::SliceRandom;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::{broadcast, Mutex};

use crate::error::StateError;
use crate::models::DisplayEvent;
use crate::services::ImageStore;

pub struct DisplayState {
    store: Arc<ImageStore>,
    state_file: PathBuf,
    current: RwLock<Option<String>>,
    writer: Mutex<()>,
    events: broadcast::Sender<DisplayEvent>,
}

impl DisplayState {
    /// Restore the pointer from `state_file`.
    ///
    /// A missing record means nothing is displayed. A record naming an image
    /// that no longer exists is dropped in memory. Loading never broadcasts.
    pub async fn load(
        store: Arc<ImageStore>,
        state_file: impl Into<PathBuf>,
        buffer: usize,
    ) -> Self {
        let state_file = state_file.into();
        let recorded = match tokio::fs::read_to_string(&state_file).await {
            Ok(content) => Some(content.trim().to_string()).filter(|s| !s.is_empty()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!(path = %state_file.display(), "No display state recorded yet");
                None
            }
            Err(e) => {
                tracing::warn!(%e, path = %state_file.display(), "Failed to read display state");
                None
            }
        };

        let current = match recorded {
            Some(id) if store.exists(&id).await => Some(id),
            Some(id) => {
                tracing::warn!(id = %id, "Recorded image no longer exists, starting empty");
                None
            }
            None => None,
        };

        tracing::info!(current = ?current, "Display state loaded");
        let (events, _) = broadcast::channel(buffer.max(1));
        Self {
            store,
            state_file,
            current: RwLock::new(current),
            writer: Mutex::new(()),
            events,
        }
    }

    pub fn store(&self) -> &ImageStore {
        &self.store
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// The image currently on display.
    pub fn current(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Receive every event published after this call.
    ///
    /// A receiver that falls more than the buffer size behind is cut off.
    pub fn subscribe(&self) -> broadcast::Receiver<DisplayEvent> {
        self.events.subscribe()
    }

    /// Make `id` the current image. An empty id clears the display.
    ///
    /// Returns the id now on display, empty after a clear.
    pub async fn select(&self, id: &str) -> Result<String, StateError> {
        let _guard = self.writer.lock().await;

        if id.is_empty() {
            self.clear_locked().await;
            return Ok(String::new());
        }

        if !self.store.exists(id).await {
            return Err(StateError::NotFound(id.to_string()));
        }

        self.persist(Some(id)).await?;
        self.set(Some(id.to_string()));
        tracing::info!(id = %id, "Selected image");
        self.publish(DisplayEvent::Update {
            filename: id.to_string(),
        });
        Ok(id.to_string())
    }

    /// Show nothing. A persistence failure is logged, the pointer is still
    /// cleared.
    pub async fn clear(&self) {
        let _guard = self.writer.lock().await;
        self.clear_locked().await;
    }

    /// Remove `id` from the store and, if it was current, move the pointer
    /// to a random remaining image (or clear it).
    ///
    /// Returns the current image after the delete.
    pub async fn delete(&self, id: &str) -> Result<Option<String>, StateError> {
        let _guard = self.writer.lock().await;

        self.store.remove(id).await?;

        if self.current().as_deref() != Some(id) {
            return Ok(self.current());
        }

        let remaining = self.store.list().await.unwrap_or_else(|e| {
            tracing::warn!(%e, "Failed to list images after delete");
            Vec::new()
        });
        let next = remaining.choose(&mut rand::thread_rng()).cloned();

        match next {
            Some(next) => {
                if let Err(e) = self.persist(Some(&next)).await {
                    tracing::warn!(%e, id = %next, "Failed to persist replacement image");
                }
                self.set(Some(next.clone()));
                tracing::info!(deleted = %id, id = %next, "Replaced deleted current image");
                self.publish(DisplayEvent::Update {
                    filename: next.clone(),
                });
                Ok(Some(next))
            }
            None => {
                self.clear_locked().await;
                Ok(None)
            }
        }
    }

    async fn clear_locked(&self) {
        if let Err(e) = self.persist(None).await {
            tracing::warn!(%e, "Failed to persist cleared display state");
        }
        self.set(None);
        tracing::info!("Cleared display");
        self.publish(DisplayEvent::Clear);
    }

    fn set(&self, value: Option<String>) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = value;
    }

    fn publish(&self, event: DisplayEvent) {
        // No subscribers is not an error
        let receivers = self.events.send(event).unwrap_or(0);
        tracing::debug!(receivers, "Published display event");
    }

    /// Write the record to a sibling temporary and rename it into place.
    async fn persist(&self, value: Option<&str>) -> io::Result<()> {
        if let Some(parent) = self.state_file.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let name = self
            .state_file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp = self.state_file.with_file_name(format!(".{name}.tmp"));

        tokio::fs::write(&tmp, value.unwrap_or("")).await?;
        tokio::fs::rename(&tmp, &self.state_file).await
    }
}
