use axum::{
    extract::State,
    response::Json,
    Json as JsonExtractor,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::services::DisplayState;

/// Request naming one stored image
#[derive(Debug, Deserialize, ToSchema)]
pub struct FilenameRequest {
    pub filename: String,
}

/// The current image; empty when nothing is displayed
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FilenameResponse {
    pub filename: String,
}

impl FilenameResponse {
    fn from_current(current: Option<String>) -> Self {
        Self {
            filename: current.unwrap_or_default(),
        }
    }
}

/// All stored images
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FilesResponse {
    pub files: Vec<String>,
}

/// Get the current image
#[utoipa::path(
    get,
    path = "/current",
    responses(
        (status = 200, description = "Current image id, empty when none", body = FilenameResponse),
    ),
    tag = "Display"
)]
pub async fn handle_current(State(display): State<Arc<DisplayState>>) -> Json<FilenameResponse> {
    Json(FilenameResponse::from_current(display.current()))
}

/// List stored images
#[utoipa::path(
    get,
    path = "/all",
    responses(
        (status = 200, description = "Stored image ids, sorted", body = FilesResponse),
    ),
    tag = "Images"
)]
pub async fn handle_all(
    State(display): State<Arc<DisplayState>>,
) -> Result<Json<FilesResponse>, ApiError> {
    let files = display
        .store()
        .list()
        .await
        .map_err(|e| ApiError::Internal(format!("Failed to list images: {e}")))?;
    Ok(Json(FilesResponse { files }))
}

/// Select the current image
///
/// An empty filename clears the display.
#[utoipa::path(
    post,
    path = "/select",
    request_body = FilenameRequest,
    responses(
        (status = 200, description = "Image selected", body = FilenameResponse),
        (status = 404, description = "No such image"),
    ),
    tag = "Display"
)]
pub async fn handle_select(
    State(display): State<Arc<DisplayState>>,
    JsonExtractor(request): JsonExtractor<FilenameRequest>,
) -> Result<Json<FilenameResponse>, ApiError> {
    let filename = display.select(&request.filename).await?;
    Ok(Json(FilenameResponse { filename }))
}

/// Delete a stored image
///
/// Deleting the current image moves the display to a random remaining image,
/// or clears it when none remain.
#[utoipa::path(
    post,
    path = "/delete",
    request_body = FilenameRequest,
    responses(
        (status = 200, description = "Image deleted; body holds the current image", body = FilenameResponse),
        (status = 404, description = "No such image"),
    ),
    tag = "Images"
)]
pub async fn handle_delete(
    State(display): State<Arc<DisplayState>>,
    JsonExtractor(request): JsonExtractor<FilenameRequest>,
) -> Result<Json<FilenameResponse>, ApiError> {
    let current = display.delete(&request.filename).await?;
    Ok(Json(FilenameResponse::from_current(current)))
}

/// Clear the display
#[utoipa::path(
    post,
    path = "/clear",
    responses(
        (status = 200, description = "Display cleared", body = FilenameResponse),
    ),
    tag = "Display"
)]
pub async fn handle_clear(State(display): State<Arc<DisplayState>>) -> Json<FilenameResponse> {
    display.clear().await;
    Json(FilenameResponse::from_current(None))
}
