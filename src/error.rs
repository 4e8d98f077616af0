use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use epaper_dither::{DitherError, PaletteError};
use serde_json::json;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of one processing job. Never touches display state.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("Resource unavailable: {}: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed palette: {0}")]
    MalformedPalette(PaletteError),

    #[error("Palette has no colors")]
    EmptyPalette,

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unsupported fit: {0}")]
    UnsupportedFit(String),

    #[error("Dither error: {0}")]
    Dither(DitherError),

    #[error("Write failure: {0}")]
    WriteFailure(#[source] std::io::Error),

    #[error("Worker failure: {0}")]
    WorkerFailure(String),
}

impl ProcessError {
    /// Whether the failure was caused by the caller's input.
    pub fn is_bad_input(&self) -> bool {
        matches!(
            self,
            ProcessError::UnsupportedFormat(_)
                | ProcessError::InvalidDimensions { .. }
                | ProcessError::UnsupportedFit(_)
        )
    }
}

impl From<PaletteError> for ProcessError {
    fn from(e: PaletteError) -> Self {
        match e {
            PaletteError::EmptyPalette => ProcessError::EmptyPalette,
            other => ProcessError::MalformedPalette(other),
        }
    }
}

impl From<DitherError> for ProcessError {
    fn from(e: DitherError) -> Self {
        match e {
            DitherError::Palette(p) => p.into(),
            other => ProcessError::Dither(other),
        }
    }
}

/// Failure of a display state operation.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("Image not found: {0}")]
    NotFound(String),

    #[error("Write failure: {0}")]
    WriteFailure(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid upload: {0}")]
    Upload(#[from] MultipartError),

    #[error("Processing error: {0}")]
    Process(#[from] ProcessError),

    #[error("State error: {0}")]
    State(#[from] StateError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Upload(e) => e.status(),
            ApiError::Process(e) if e.is_bad_input() => StatusCode::BAD_REQUEST,
            ApiError::Process(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::State(StateError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::State(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "status": status.as_u16(),
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
