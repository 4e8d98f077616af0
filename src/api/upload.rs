use axum::{
    extract::{Multipart, State},
    response::Json,
};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::models::FitPolicy;
use crate::services::{DisplayState, ImagePipeline};

/// Multipart form accepted by the upload endpoint
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// The photo to display (any common format)
    #[schema(value_type = String, format = Binary)]
    photo: Vec<u8>,
    /// `contain` (default), `cover` or `fill`
    fit: Option<String>,
}

/// Response from a successful upload
#[derive(Debug, Serialize, ToSchema)]
pub struct UploadResponse {
    pub message: String,
    /// Id of the stored bitmap, now the current image
    pub filename: String,
}

/// Upload a photo
///
/// The photo is fitted to the display canvas, dithered to the panel palette,
/// stored, and made the current image.
#[utoipa::path(
    post,
    path = "/upload",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo processed and displayed", body = UploadResponse),
        (status = 400, description = "Missing photo, unreadable image or unknown fit"),
        (status = 413, description = "Upload too large"),
    ),
    tag = "Images"
)]
pub async fn handle_upload(
    State(pipeline): State<Arc<ImagePipeline>>,
    State(display): State<Arc<DisplayState>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut photo = None;
    let mut fit = FitPolicy::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("photo") => {
                photo = Some(field.bytes().await?);
            }
            Some("fit") => {
                fit = field.text().await?.parse()?;
            }
            _ => {}
        }
    }

    let photo = photo
        .filter(|b| !b.is_empty())
        .ok_or_else(|| ApiError::BadRequest("No photo uploaded".to_string()))?;

    tracing::info!(bytes = photo.len(), %fit, "Upload received");

    let id = pipeline.process(photo.to_vec(), fit).await?;
    let filename = display.select(&id).await?;

    Ok(Json(UploadResponse {
        message: "Image uploaded and processed".to_string(),
        filename,
    }))
}
