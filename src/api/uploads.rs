//! Image upload endpoint

use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::Multipart;

use crate::{
    error::{AppError, AppResult},
    services::assets::{ImageUpload, UploadedAsset},
    AppState,
};

use super::AuthenticatedUser;

/// Multipart upload form
#[derive(utoipa::ToSchema)]
#[allow(dead_code)]
pub struct UploadForm {
    /// Image file
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Upload an image to the asset store (multipart field `file`)
#[utoipa::path(
    post,
    path = "/admin/uploads",
    tag = "admin",
    security(("session" = [])),
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Image uploaded", body = UploadedAsset),
        (status = 400, description = "Missing file or not an image", body = crate::error::ErrorResponse),
        (status = 502, description = "Image upload failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn upload_image(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<UploadedAsset>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        let content_type = field.content_type().unwrap_or_default().to_string();
        if !content_type.starts_with("image/") {
            return Err(AppError::BadRequest("Only image files can be uploaded".to_string()));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }

        tracing::debug!(by = %claims.email, file_name = %file_name, size = bytes.len(), "Uploading image");
        let asset = state
            .services
            .assets
            .upload(ImageUpload {
                file_name,
                content_type,
                bytes: bytes.to_vec(),
            })
            .await?;
        return Ok((StatusCode::CREATED, Json(asset)));
    }

    Err(AppError::BadRequest("Missing 'file' field".to_string()))
}
